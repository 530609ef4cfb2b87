#![allow(dead_code)]

pub mod http_server;

use async_trait::async_trait;
use rmplaysnippet::{Config, Connector, Console, Credentials, CredentialsError, Key, SnippetStore, StoreError};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get(Key),
    Delete(Key),
}

#[derive(Debug, Clone, Copy)]
pub enum GetBehavior {
    Found,
    Missing,
    Unavailable,
    Hang,
}

#[derive(Debug, Clone, Copy)]
pub enum DeleteBehavior {
    Ok,
    PermissionDenied,
}

pub struct FakeStore {
    calls: Arc<Mutex<Vec<Call>>>,
    get: GetBehavior,
    delete: DeleteBehavior,
}

#[async_trait]
impl SnippetStore for FakeStore {
    async fn get(&self, key: &Key) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(Call::Get(key.clone()));
        match self.get {
            GetBehavior::Found => Ok(()),
            GetBehavior::Missing => Err(StoreError::NoSuchEntity),
            GetBehavior::Unavailable => Err(StoreError::Api {
                code: 503,
                status: "UNAVAILABLE".into(),
                message: "try again".into(),
            }),
            GetBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            }
        }
    }

    async fn delete(&self, key: &Key) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(Call::Delete(key.clone()));
        match self.delete {
            DeleteBehavior::Ok => Ok(()),
            DeleteBehavior::PermissionDenied => Err(StoreError::Api {
                code: 403,
                status: "PERMISSION_DENIED".into(),
                message: "Missing or insufficient permissions.".into(),
            }),
        }
    }
}

/// Hands out a `FakeStore` and records every store call it sees.
pub struct FakeConnector {
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub connects: Arc<Mutex<usize>>,
    pub credentials_ok: bool,
    pub get: GetBehavior,
    pub delete: DeleteBehavior,
}

impl FakeConnector {
    pub fn new(get: GetBehavior, delete: DeleteBehavior) -> Self {
        Self {
            calls: Arc::default(),
            connects: Arc::default(),
            credentials_ok: true,
            get,
            delete,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn connects(&self) -> usize {
        *self.connects.lock().unwrap()
    }
}

#[async_trait]
impl Connector for FakeConnector {
    fn check_credentials(&self) -> Result<Credentials, CredentialsError> {
        if self.credentials_ok {
            Ok(user_credentials())
        } else {
            Err(CredentialsError::NotFound(PathBuf::from(
                "/home/gopher/.config/gcloud/application_default_credentials.json",
            )))
        }
    }

    async fn connect(&self, _credentials: Credentials) -> Result<Box<dyn SnippetStore>, StoreError> {
        *self.connects.lock().unwrap() += 1;
        Ok(Box::new(FakeStore {
            calls: self.calls.clone(),
            get: self.get,
            delete: self.delete,
        }))
    }
}

pub fn user_credentials() -> Credentials {
    Credentials::AuthorizedUser {
        client_id: "client-id".into(),
        client_secret: "client-secret".into(),
        refresh_token: "refresh-token".into(),
        quota_project_id: None,
    }
}

pub fn snippet_key(id: &str) -> Key {
    Key::named("Snippet", id)
}

pub struct RunResult {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub async fn run_with(target: &str, answer: &str, config: &Config, connector: &FakeConnector) -> RunResult {
    run_with_bytes(target, answer.as_bytes(), config, connector).await
}

pub async fn run_with_bytes(target: &str, answer: &[u8], config: &Config, connector: &FakeConnector) -> RunResult {
    run_os(OsStr::new(target), answer, config, connector).await
}

pub async fn run_os(target: &OsStr, answer: &[u8], config: &Config, connector: &FakeConnector) -> RunResult {
    let mut console = Console {
        input: answer,
        out: Vec::new(),
        err: Vec::new(),
    };
    let code = rmplaysnippet::commands::remove::run(target, config, connector, &mut console).await;
    RunResult {
        code,
        stdout: String::from_utf8(console.out).expect("stdout is utf-8"),
        stderr: String::from_utf8(console.err).expect("stderr is utf-8"),
    }
}
