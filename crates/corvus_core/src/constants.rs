pub mod scopes {
    pub const READ: &str = "read";
    /// Non-guest users; required to file recovery tickets.
    pub const RECOVER: &str = "recover";
    pub const ADMIN: &str = "admin";
}

pub mod routes {
    pub const HEALTH: &str = "/health";

    pub const AUTH_TOKEN: &str = "/auth/token";

    pub const RECOVERY_TICKETS: &str = "/recovery/tickets";
    pub const RECOVERY_RESTORE: &str = "/recovery/restore";
    pub const RECOVERY_CHECK: &str = "/recovery/check";
    pub const RECOVERY_CLAIM: &str = "/recovery/claim";
}
