//! Frontend configuration

/// Authentication configuration
pub struct AuthConfig;

impl AuthConfig {
    /// Browser storage key holding the persisted token pair
    pub const AUTH_STATE_KEY: &'static str = "auth-storage";
}

/// Paging used by the admin views
pub struct AdminConfig;

impl AdminConfig {
    /// Users fetched per page of the admin user list
    pub const USER_PAGE_SIZE: u32 = 100;
}
