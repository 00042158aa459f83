//! DTOs for upload and concatenation base URLs.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::entities::Scheme;

/// Query parameters for `GET /api/upload-url`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct UploadUrlParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub tenant_id: Option<i64>,
}

/// Query parameters for `GET /api/concat-base`.
#[derive(Debug, Deserialize)]
pub struct ConcatBaseParams {
    #[serde(default)]
    pub scheme: Option<Scheme>,
}

#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub url: String,
}
