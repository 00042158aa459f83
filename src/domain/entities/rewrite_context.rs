//! Emission points that ask for a rewrite.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Extensions a plugin asset must carry to be moved to the static host.
pub const PLUGIN_ASSET_EXTENSIONS: &[&str] = &["gif", "png", "jpg", "jpeg", "js", "css"];

/// Identifies which emission point produced the URL being rewritten.
///
/// Selects context-specific policy; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteContext {
    EnqueuedScript,
    EnqueuedStyle,
    TemplateDirectory,
    StylesheetDirectory,
    Stylesheet,
    PluginAsset,
    ThirdPartyStatic,
    UploadPath,
    ConcatBase,
}

impl RewriteContext {
    pub const ALL: [RewriteContext; 9] = [
        Self::EnqueuedScript,
        Self::EnqueuedStyle,
        Self::TemplateDirectory,
        Self::StylesheetDirectory,
        Self::Stylesheet,
        Self::PluginAsset,
        Self::ThirdPartyStatic,
        Self::UploadPath,
        Self::ConcatBase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnqueuedScript => "enqueued_script",
            Self::EnqueuedStyle => "enqueued_style",
            Self::TemplateDirectory => "template_directory",
            Self::StylesheetDirectory => "stylesheet_directory",
            Self::Stylesheet => "stylesheet",
            Self::PluginAsset => "plugin_asset",
            Self::ThirdPartyStatic => "third_party_static",
            Self::UploadPath => "upload_path",
            Self::ConcatBase => "concat_base",
        }
    }

    /// Extension allow-list for this context, if it has one.
    pub fn allowed_extensions(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::PluginAsset => Some(PLUGIN_ASSET_EXTENSIONS),
            _ => None,
        }
    }
}

impl fmt::Display for RewriteContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RewriteContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|ctx| ctx.as_str() == needle)
            .ok_or_else(|| format!("unknown rewrite context '{}'", s))
    }
}
