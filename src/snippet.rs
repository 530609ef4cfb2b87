use crate::datastore::Key;
use crate::error::SnippetError;
use std::ffi::OsStr;
use std::fmt;

/// Entity kind under which the playground stores snippets.
pub const SNIPPET_KIND: &str = "Snippet";

/// Share-link prefixes accepted in place of a bare ID. First match wins.
pub const URL_PREFIXES: [&str; 4] = [
    "https://play.golang.org/p/",
    "http://play.golang.org/p/",
    "https://go.dev/play/p/",
    "http://go.dev/play/p/",
];

/// Strip a recognized share-link prefix, or return the input unchanged.
pub fn extract_id(target: &str) -> &str {
    URL_PREFIXES
        .iter()
        .find_map(|prefix| target.strip_prefix(prefix))
        .unwrap_or(target)
}

/// A validated snippet identifier: non-empty and free of `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetId(String);

impl SnippetId {
    /// Parse a share URL or bare ID into a snippet identifier.
    pub fn parse(target: &str) -> Result<Self, SnippetError> {
        let id = extract_id(target);
        if id.is_empty() {
            return Err(SnippetError::EmptyId);
        }
        if id.contains('/') {
            return Err(SnippetError::InvalidId(id.to_string()));
        }
        Ok(Self(id.to_string()))
    }

    /// Like `parse`, for a raw command-line argument.
    pub fn parse_os(target: &OsStr) -> Result<Self, SnippetError> {
        match target.to_str() {
            Some(target) => Self::parse(target),
            None => Err(SnippetError::NonUtf8Id(target.to_string_lossy().into_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Datastore key for this snippet: kind `Snippet`, named, no parent.
    pub fn key(&self) -> Key {
        Key::named(SNIPPET_KIND, &self.0)
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
