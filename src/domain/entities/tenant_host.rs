//! Directory row tying a hostname to a tenant.

/// A hostname owned by a tenant, as listed by the tenant directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantHost {
    pub host: String,
    pub tenant_id: i64,
}

impl TenantHost {
    pub fn new(host: String, tenant_id: i64) -> Self {
        Self { host, tenant_id }
    }
}
