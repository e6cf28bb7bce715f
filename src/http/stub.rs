//! Static stub responses.
//!
//! A stub endpoint answers with the raw bytes of a file instead of calling a
//! handler. The file path is looked up relative to each search directory in
//! turn (working directory, then the executable's directory); the first
//! readable file wins.
//!
//! Files are read with `tokio::fs`.

use std::path::{Component, Path, PathBuf};

use axum::body::Bytes;
use thiserror::Error;

/// Per-request stub failures. Rendered as 400: the endpoint exists but its
/// backing data does not.
#[derive(Debug, Error)]
pub enum StubError {
    #[error("stub path `{0}` must be relative and stay inside its search directory")]
    UnsafePath(PathBuf),

    #[error("stub file `{path}` not found in {searched:?}")]
    Missing { path: PathBuf, searched: Vec<PathBuf> },
}

impl StubError {
    /// The stub path as declared on the endpoint.
    pub fn path(&self) -> &Path {
        match self {
            StubError::UnsafePath(path) => path,
            StubError::Missing { path, .. } => path,
        }
    }

    /// Message safe to send to clients: names the declared path only, never
    /// the server directories that were searched.
    pub fn client_message(&self) -> String {
        format!("stub file `{}` unavailable", self.path().display())
    }
}

/// A resolved stub file.
#[derive(Debug, Clone)]
pub struct StubPayload {
    pub bytes: Bytes,
    pub content_type: &'static str,
    pub source: PathBuf,
}

#[derive(Debug, Clone)]
pub struct StubResolver {
    search_dirs: Vec<PathBuf>,
}

impl StubResolver {
    /// Search `dirs` in order.
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// Search the working directory, then the executable's directory.
    pub fn from_process() -> Self {
        let cwd = std::env::current_dir().ok();
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        Self::new(cwd.into_iter().chain(exe_dir).collect())
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    pub async fn resolve(&self, stub: &Path) -> Result<StubPayload, StubError> {
        let relative = sanitize(stub).ok_or_else(|| StubError::UnsafePath(stub.to_path_buf()))?;

        for dir in &self.search_dirs {
            let candidate = dir.join(&relative);
            match tokio::fs::read(&candidate).await {
                Ok(bytes) => {
                    return Ok(StubPayload {
                        bytes: Bytes::from(bytes),
                        content_type: content_type(&candidate),
                        source: candidate,
                    });
                }
                Err(e) => {
                    tracing::trace!(path = %candidate.display(), error = %e, "Stub candidate unreadable");
                }
            }
        }

        Err(StubError::Missing {
            path: stub.to_path_buf(),
            searched: self.search_dirs.clone(),
        })
    }
}

impl Default for StubResolver {
    fn default() -> Self {
        Self::from_process()
    }
}

fn sanitize(stub: &Path) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for component in stub.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    (!clean.as_os_str().is_empty()).then_some(clean)
}

fn content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
        .as_str()
    {
        "json" => "application/json",
        "txt" => "text/plain",
        "html" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "xml" => "application/xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_sanitize_prevents_traversal() {
        assert!(sanitize(Path::new("../Cargo.toml")).is_none());
        assert!(sanitize(Path::new("mocks/../../x")).is_none());
        assert!(sanitize(Path::new("/etc/passwd")).is_none());
        assert!(sanitize(Path::new("")).is_none());
        assert_eq!(
            sanitize(Path::new("./mocks/mock.json")),
            Some(PathBuf::from("mocks/mock.json"))
        );
    }

    #[tokio::test]
    async fn test_first_directory_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::create_dir_all(first.path().join("mocks")).unwrap();
        fs::create_dir_all(second.path().join("mocks")).unwrap();
        fs::write(first.path().join("mocks/a.json"), "first").unwrap();
        fs::write(second.path().join("mocks/a.json"), "second").unwrap();
        fs::write(second.path().join("mocks/b.txt"), "only second").unwrap();

        let resolver = StubResolver::new(vec![first.path().into(), second.path().into()]);

        let a = resolver.resolve(Path::new("mocks/a.json")).await.unwrap();
        assert_eq!(a.bytes.as_ref(), b"first");
        assert_eq!(a.content_type, "application/json");

        let b = resolver.resolve(Path::new("mocks/b.txt")).await.unwrap();
        assert_eq!(b.bytes.as_ref(), b"only second");
        assert_eq!(b.content_type, "text/plain");
        assert_eq!(b.source, second.path().join("mocks/b.txt"));
    }

    #[tokio::test]
    async fn test_missing_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = StubResolver::new(vec![dir.path().into()]);
        let err = resolver.resolve(Path::new("mocks/missing.json")).await.unwrap_err();
        assert!(matches!(err, StubError::Missing { .. }));
        assert!(err.to_string().contains(&dir.path().display().to_string()));

        let message = err.client_message();
        assert_eq!(message, "stub file `mocks/missing.json` unavailable");
        assert!(!message.contains(&dir.path().display().to_string()));
    }

    #[tokio::test]
    async fn test_unsafe_path_message() {
        let resolver = StubResolver::new(vec![std::env::current_dir().unwrap()]);
        let err = resolver.resolve(Path::new("../secret.json")).await.unwrap_err();
        assert!(matches!(err, StubError::UnsafePath(_)));
        assert_eq!(err.path(), Path::new("../secret.json"));
    }

    #[tokio::test]
    async fn test_directory_is_not_a_stub() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("mocks")).unwrap();
        let resolver = StubResolver::new(vec![dir.path().into()]);
        assert!(resolver.resolve(Path::new("mocks")).await.is_err());
    }

    #[test]
    fn test_from_process_searches_cwd_first() {
        let resolver = StubResolver::from_process();
        assert_eq!(resolver.search_dirs()[0], std::env::current_dir().unwrap());
        assert_eq!(resolver.search_dirs().len(), 2);
    }
}
