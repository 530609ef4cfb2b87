use crate::error::CredentialsError;
use serde::Deserialize;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Explicit credentials file, takes precedence over the gcloud location.
pub const CREDENTIALS_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";
/// Overrides the gcloud configuration directory.
pub const CLOUDSDK_CONFIG_VAR: &str = "CLOUDSDK_CONFIG";

const WELL_KNOWN_FILE: &str = "application_default_credentials.json";

/// Contents of an application default credentials file.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credentials {
    /// Written by `gcloud auth application-default login`.
    AuthorizedUser {
        client_id: String,
        client_secret: String,
        refresh_token: String,
        #[serde(default)]
        quota_project_id: Option<String>,
    },
    ServiceAccount {
        client_email: String,
        private_key: String,
    },
}

impl Credentials {
    pub fn kind(&self) -> &'static str {
        match self {
            Credentials::AuthorizedUser { .. } => "authorized_user",
            Credentials::ServiceAccount { .. } => "service_account",
        }
    }

    pub fn quota_project_id(&self) -> Option<&str> {
        match self {
            Credentials::AuthorizedUser { quota_project_id, .. } => quota_project_id.as_deref(),
            Credentials::ServiceAccount { .. } => None,
        }
    }

    fn validate(&self, path: &Path) -> Result<(), CredentialsError> {
        let required: Vec<(&'static str, &String)> = match self {
            Credentials::AuthorizedUser {
                client_id,
                client_secret,
                refresh_token,
                ..
            } => vec![
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("refresh_token", refresh_token),
            ],
            Credentials::ServiceAccount {
                client_email,
                private_key,
                ..
            } => vec![("client_email", client_email), ("private_key", private_key)],
        };

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CredentialsError::MissingField {
                    path: path.to_path_buf(),
                    field,
                });
            }
        }
        Ok(())
    }
}

/// Confirm the operator has application default credentials configured.
///
/// Looks in `$GOOGLE_APPLICATION_CREDENTIALS` first, then the file written by
/// `gcloud auth application-default login`.
pub fn check_user_credentials() -> Result<Credentials, CredentialsError> {
    let path = credentials_path(
        env::var_os(CREDENTIALS_VAR),
        env::var_os(CLOUDSDK_CONFIG_VAR),
        gcloud_default_dir(),
    )?;
    tracing::debug!(path = %path.display(), "using application default credentials");
    load(&path)
}

/// Resolve the credentials file location from the given environment values.
pub fn credentials_path(
    explicit: Option<OsString>,
    cloudsdk_config: Option<OsString>,
    gcloud_dir: Option<PathBuf>,
) -> Result<PathBuf, CredentialsError> {
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let dir = match cloudsdk_config.filter(|p| !p.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => gcloud_dir.ok_or(CredentialsError::NoHome)?,
    };
    Ok(dir.join(WELL_KNOWN_FILE))
}

/// Read and validate a credentials file.
pub fn load(path: &Path) -> Result<Credentials, CredentialsError> {
    let data = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            CredentialsError::NotFound(path.to_path_buf())
        } else {
            CredentialsError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let credentials: Credentials =
        serde_json::from_slice(&data).map_err(|source| CredentialsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    credentials.validate(path)?;
    Ok(credentials)
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct TokenError {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Exchange credentials for an OAuth2 access token.
pub async fn fetch_access_token(
    http: &reqwest::Client,
    token_endpoint: &str,
    credentials: &Credentials,
) -> Result<String, CredentialsError> {
    let (client_id, client_secret, refresh_token) = match credentials {
        Credentials::AuthorizedUser {
            client_id,
            client_secret,
            refresh_token,
            ..
        } => (client_id, client_secret, refresh_token),
        Credentials::ServiceAccount { .. } => {
            return Err(CredentialsError::Unsupported(credentials.kind()));
        }
    };

    tracing::debug!(endpoint = token_endpoint, "refreshing access token");
    let response = http
        .post(token_endpoint)
        .form(&[
            ("grant_type", "refresh_token"),
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("refresh_token", refresh_token.as_str()),
        ])
        .send()
        .await
        .map_err(|e| CredentialsError::Token(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| CredentialsError::Token(e.to_string()))?;

    if !status.is_success() {
        let message = match serde_json::from_str::<TokenError>(&body) {
            Ok(TokenError {
                error,
                error_description: Some(description),
            }) => format!("{}: {}", error, description),
            Ok(TokenError { error, .. }) => error,
            Err(_) => format!("{} {}", status, body),
        };
        return Err(CredentialsError::Token(message));
    }

    let token: TokenResponse =
        serde_json::from_str(&body).map_err(|e| CredentialsError::Token(e.to_string()))?;
    Ok(token.access_token)
}

#[cfg(windows)]
fn gcloud_default_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gcloud"))
}

#[cfg(not(windows))]
fn gcloud_default_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("gcloud"))
}
