use std::time::Duration;

/// Production project that hosts the playground datastore.
pub const PROJECT_ID: &str = "golang-org";

/// Bound on client construction, lookup and delete taken together.
pub const DEADLINE: Duration = Duration::from_secs(30);

pub const DATASTORE_ENDPOINT: &str = "https://datastore.googleapis.com";
pub const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Where and how the tool talks to the datastore.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_id: String,
    pub deadline: Duration,
    pub datastore_endpoint: String,
    pub token_endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_id: PROJECT_ID.to_string(),
            deadline: DEADLINE,
            datastore_endpoint: DATASTORE_ENDPOINT.to_string(),
            token_endpoint: TOKEN_ENDPOINT.to_string(),
        }
    }
}
