/// Token users pass to mean "the newest good build".
pub const LATEST_BUILD: &str = "latest";

/// Server-side alias for the most recent successful build.
pub const LAST_SUCCESSFUL_BUILD: &str = "lastSuccessfulBuild";
