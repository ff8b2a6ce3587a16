use crate::data::{LAST_SUCCESSFUL_BUILD, LATEST_BUILD};

/// Map a user-supplied build token to the path segment used in API URLs.
///
/// The empty token and `"latest"` both name the last successful build; any
/// other token is an explicit build and passes through unchanged.
///
/// # Examples
///
/// ```
/// use jenkins_fetch::resolve_build;
///
/// assert_eq!(resolve_build(""), "lastSuccessfulBuild");
/// assert_eq!(resolve_build("latest"), "lastSuccessfulBuild");
/// assert_eq!(resolve_build("42"), "42");
/// ```
pub fn resolve_build(token: &str) -> &str {
    match token {
        "" | LATEST_BUILD => LAST_SUCCESSFUL_BUILD,
        other => other,
    }
}
