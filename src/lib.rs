pub mod cli;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod credentials;
pub mod datastore;
pub mod env;
pub mod error;
pub mod snippet;

pub use commands::remove::{Console, Outcome};
pub use config::Config;
pub use credentials::Credentials;
pub use datastore::{Connector, GoogleConnector, Key, RestDatastore, SnippetStore};
pub use error::{CredentialsError, SnippetError, StoreError};
pub use snippet::{extract_id, SnippetId};
