use std::path::PathBuf;

/// Failures of the snippet removal flow as a whole.
#[derive(Debug, thiserror::Error)]
pub enum SnippetError {
    #[error("empty Snippet ID")]
    EmptyId,
    #[error("Invalid Snippet ID {0:?} (contains slash)")]
    InvalidId(String),
    #[error("Invalid Snippet ID {0:?} (not valid UTF-8)")]
    NonUtf8Id(String),
    #[error("{0}")]
    Credentials(#[from] CredentialsError),
    #[error("Failed to clear env var DATASTORE_EMULATOR_HOST: {0}")]
    EmulatorHost(String),
    #[error("Failed to create Datastore client: {0}")]
    Connect(StoreError),
    #[error("Unable to delete Snippet with ID {id:?}: {source}")]
    Delete { id: String, source: StoreError },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SnippetError {
    /// Process exit status for this failure: 2 for usage errors, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            SnippetError::EmptyId | SnippetError::InvalidId(_) | SnippetError::NonUtf8Id(_) => 2,
            _ => 1,
        }
    }

    /// Lines of guidance printed after the message on stderr.
    pub fn hint_lines(&self) -> &'static [&'static str] {
        match self {
            SnippetError::Credentials(_) | SnippetError::Connect(StoreError::Credentials(_)) => &[
                "Run `gcloud auth application-default login` to set up Application Default Credentials.",
            ],
            SnippetError::Delete { .. } => &[
                "rmplaysnippet requires Application Default Credentials.",
                "Did you run `gcloud auth application-default login`?",
            ],
            _ => &[],
        }
    }
}

/// Errors reported by a snippet store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("datastore: no such entity")]
    NoSuchEntity,
    #[error("rpc error: code = {status} desc = {message}")]
    Api {
        code: u16,
        status: String,
        message: String,
    },
    #[error("context deadline exceeded")]
    DeadlineExceeded,
    #[error("{0}")]
    Credentials(CredentialsError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Problems locating or using application default credentials.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("could not find default credentials (looked in {})", .0.display())]
    NotFound(PathBuf),
    #[error("could not determine a home directory to look for default credentials")]
    NoHome,
    #[error("failed to read credentials file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse credentials file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("credentials file {} is missing {field}", .path.display())]
    MissingField { path: PathBuf, field: &'static str },
    #[error("{0} credentials cannot mint access tokens here")]
    Unsupported(&'static str),
    #[error("token endpoint rejected credentials: {0}")]
    Token(String),
}
