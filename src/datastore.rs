use crate::config::Config;
use crate::credentials::{self, Credentials};
use crate::error::{CredentialsError, StoreError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named, parentless datastore key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub kind: String,
    pub name: String,
}

impl Key {
    pub fn named(kind: &str, name: &str) -> Self {
        Self {
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }
}

/// Where snippets live. `get` only probes for existence.
#[async_trait]
pub trait SnippetStore: Send + Sync {
    /// `Ok(())` if the entity exists, `StoreError::NoSuchEntity` if not.
    async fn get(&self, key: &Key) -> Result<(), StoreError>;

    async fn delete(&self, key: &Key) -> Result<(), StoreError>;
}

/// Produces a connected store once the operator's credentials check out.
#[async_trait]
pub trait Connector: Send + Sync {
    fn check_credentials(&self) -> Result<Credentials, CredentialsError>;

    async fn connect(&self, credentials: Credentials) -> Result<Box<dyn SnippetStore>, StoreError>;
}

/// Connects to Cloud Datastore using application default credentials.
pub struct GoogleConnector {
    config: Config,
}

impl GoogleConnector {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Connector for GoogleConnector {
    fn check_credentials(&self) -> Result<Credentials, CredentialsError> {
        credentials::check_user_credentials()
    }

    async fn connect(&self, credentials: Credentials) -> Result<Box<dyn SnippetStore>, StoreError> {
        let store = RestDatastore::connect(&self.config, &credentials).await?;
        Ok(Box::new(store))
    }
}

// Wire shapes for the Datastore v1 REST API.

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireKey<'a> {
    partition_id: PartitionId<'a>,
    path: [PathElement<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PartitionId<'a> {
    project_id: &'a str,
}

#[derive(Serialize)]
struct PathElement<'a> {
    kind: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct LookupRequest<'a> {
    keys: [WireKey<'a>; 1],
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    found: Vec<Value>,
    #[serde(default)]
    missing: Vec<Value>,
}

#[derive(Serialize)]
struct CommitRequest<'a> {
    mode: &'static str,
    mutations: [Mutation<'a>; 1],
}

#[derive(Serialize)]
struct Mutation<'a> {
    delete: WireKey<'a>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Cloud Datastore client speaking the v1 REST API.
pub struct RestDatastore {
    http: Client,
    base_url: String,
    project_id: String,
    token: String,
}

impl RestDatastore {
    /// Build a client for `config.project_id`, minting an access token up front.
    pub async fn connect(config: &Config, credentials: &Credentials) -> Result<Self, StoreError> {
        let http = build_client(credentials)?;
        let token = credentials::fetch_access_token(&http, &config.token_endpoint, credentials)
            .await
            .map_err(StoreError::Credentials)?;

        Ok(Self {
            http,
            base_url: config.datastore_endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            token,
        })
    }

    fn wire_key<'a>(&'a self, key: &'a Key) -> WireKey<'a> {
        WireKey {
            partition_id: PartitionId {
                project_id: &self.project_id,
            },
            path: [PathElement {
                kind: &key.kind,
                name: &key.name,
            }],
        }
    }

    async fn call<B: Serialize + ?Sized>(&self, method: &str, body: &B) -> Result<String, StoreError> {
        let url = format!("{}/v1/projects/{}:{}", self.base_url, self.project_id, method);
        tracing::debug!(%url, "datastore request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(status = status.as_u16(), "datastore response");

        if status.is_success() {
            Ok(text)
        } else {
            Err(parse_api_error(status, &text))
        }
    }
}

#[async_trait]
impl SnippetStore for RestDatastore {
    async fn get(&self, key: &Key) -> Result<(), StoreError> {
        let request = LookupRequest {
            keys: [self.wire_key(key)],
        };
        let text = self.call("lookup", &request).await?;
        let response: LookupResponse = serde_json::from_str(&text)?;

        if !response.found.is_empty() {
            Ok(())
        } else if !response.missing.is_empty() {
            Err(StoreError::NoSuchEntity)
        } else {
            Err(StoreError::Api {
                code: 0,
                status: "UNAVAILABLE".to_string(),
                message: "lookup was deferred".to_string(),
            })
        }
    }

    async fn delete(&self, key: &Key) -> Result<(), StoreError> {
        let request = CommitRequest {
            mode: "NON_TRANSACTIONAL",
            mutations: [Mutation {
                delete: self.wire_key(key),
            }],
        };
        self.call("commit", &request).await?;
        Ok(())
    }
}

fn build_client(credentials: &Credentials) -> Result<Client, StoreError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("rmplaysnippet/", env!("CARGO_PKG_VERSION"))),
    );

    if let Some(project) = credentials.quota_project_id() {
        if let Ok(value) = HeaderValue::from_str(project) {
            headers.insert("x-goog-user-project", value);
        }
    }

    Ok(Client::builder().default_headers(headers).build()?)
}

/// Turn a non-2xx response into a `StoreError::Api`.
pub fn parse_api_error(status: reqwest::StatusCode, body: &str) -> StoreError {
    if let Ok(ApiErrorBody { error }) = serde_json::from_str::<ApiErrorBody>(body) {
        return StoreError::Api {
            code: if error.code == 0 { status.as_u16() } else { error.code },
            status: error.status,
            message: error.message,
        };
    }

    StoreError::Api {
        code: status.as_u16(),
        status: status.canonical_reason().unwrap_or("UNKNOWN").to_string(),
        message: body.trim().to_string(),
    }
}
