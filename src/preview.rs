//! Result viewer hand-off
//!
//! Rendering the result is left to an external viewer; this module only turns
//! a result path into something a viewer can load.

use std::path::{Path, PathBuf};

use crate::compiler::PreviewSink;

/// Convert a local path to a `file://` URL.
///
/// Relative paths are resolved against the current directory. Bytes outside
/// the unreserved set are percent-encoded.
pub fn file_url(path: &Path) -> String {
    let absolute = absolute_path(path);
    let raw = absolute.to_string_lossy().replace('\\', "/");

    let mut url = String::from("file://");
    if !raw.starts_with('/') {
        // Windows drive paths: file:///C:/...
        url.push('/');
    }
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' | b':' => {
                url.push(byte as char)
            }
            _ => url.push_str(&format!("%{:02X}", byte)),
        }
    }
    url
}

fn absolute_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Opens each result with the platform's default viewer
#[derive(Debug, Default)]
pub struct SystemViewer {
    last: Option<PathBuf>,
}

impl SystemViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently shown result
    pub fn last(&self) -> Option<&Path> {
        self.last.as_deref()
    }
}

impl PreviewSink for SystemViewer {
    fn show(&mut self, result: &Path) {
        tracing::info!("Opening {}", file_url(result));
        if let Err(e) = open::that(result) {
            tracing::warn!("Failed to open {} in viewer: {}", result.display(), e);
        }
        self.last = Some(result.to_path_buf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_file_url_absolute() {
        assert_eq!(
            file_url(Path::new("/tmp/paper.pdf")),
            "file:///tmp/paper.pdf"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_file_url_escapes_spaces() {
        assert_eq!(
            file_url(Path::new("/tmp/my paper#1.pdf")),
            "file:///tmp/my%20paper%231.pdf"
        );
    }

    #[test]
    fn test_file_url_relative_is_absolutized() {
        let url = file_url(Path::new("paper.pdf"));
        assert!(url.starts_with("file:///"));
        assert!(url.ends_with("/paper.pdf"));
    }
}
