#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorklogURL(String);

impl AsRef<str> for WorklogURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl WorklogURL {
    /// Creates a new URL rooted at the given service base, e.g. `http://localhost:8080`.
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Append a single path segment, percent-encoding anything that is not URL safe.
    pub fn append_segment(&self, segment: &str) -> Self {
        self.append_path(&urlencoding::encode(segment))
    }
}
