use url::Url;

use super::resolve::resolve_build;

fn job_root(server: &Url) -> &str {
    server.as_str().trim_end_matches('/')
}

/// `{server}/{build}/api/json`, with the build token resolved.
///
/// # Examples
///
/// ```
/// use jenkins_fetch::metadata_url;
/// use url::Url;
///
/// let server = Url::parse("https://ci.example.org/job/app/").unwrap();
/// assert_eq!(
///     metadata_url(&server, "latest"),
///     "https://ci.example.org/job/app/lastSuccessfulBuild/api/json"
/// );
/// ```
pub fn metadata_url(server: &Url, build: &str) -> String {
    format!("{}/{}/api/json", job_root(server), resolve_build(build))
}

/// `{server}/{build}/artifact/{relative_path}`, with the build token resolved.
pub fn artifact_url(server: &Url, build: &str, relative_path: &str) -> String {
    format!(
        "{}/{}/artifact/{}",
        job_root(server),
        resolve_build(build),
        relative_path.trim_start_matches('/')
    )
}
