use crate::{
    config::RemoteConfig,
    error::{EtlError, Result},
};
use reqwest::Client;
use serde_json::json;
use std::future::Future;
use tracing::debug;
use url::Url;

pub const EXECUTE_SQL_RPC: &str = "rest/v1/rpc/execute_sql";

/// Something that runs one raw SQL statement remotely and reports only
/// success or failure.
pub trait SqlExecutor {
    fn execute(&self, query: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Calls the `execute_sql` stored procedure over the PostgREST RPC route.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: Client,
    endpoint: Url,
    key: String,
}

impl RpcClient {
    pub fn new(http: Client, remote: &RemoteConfig) -> Result<Self> {
        let mut base = Url::parse(&remote.url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            http,
            endpoint: base.join(EXECUTE_SQL_RPC)?,
            key: remote.key.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl SqlExecutor for RpcClient {
    async fn execute(&self, query: &str) -> Result<()> {
        debug!(endpoint = %self.endpoint, bytes = query.len(), "execute_sql");
        let resp = self
            .http
            .post(self.endpoint.clone())
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .json(&json!({ "query": query }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(EtlError::Remote { status, body });
        }
        Ok(())
    }
}
