//! Shared helpers for task implementations.
use std::path::Path;

/// Render `path` with the home directory abbreviated to `~`.
///
/// Paths outside `home` are rendered unchanged. Matching is done per path
/// component, so `/home/user2` is not abbreviated for a home of `/home/user`.
///
/// ```
/// use dotfiles_bootstrap::tasks::helpers::shorten_path;
/// use std::path::Path;
///
/// let home = Path::new("/home/user");
/// assert_eq!(shorten_path(Path::new("/home/user/a/b.conf"), home), "~/a/b.conf");
/// assert_eq!(shorten_path(Path::new("/etc/hosts"), home), "/etc/hosts");
/// ```
#[must_use]
pub fn shorten_path(path: &Path, home: &Path) -> String {
    match path.strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => Path::new("~").join(rest).display().to_string(),
        Err(_) => path.display().to_string(),
    }
}
