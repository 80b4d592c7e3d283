use async_trait::async_trait;
use crate::errors::GateResult;
use crate::structs::http_reply::HttpReply;

/// GET access to the Sonar web API. Non-2xx replies are returned, not
/// raised, so callers can read the server's error payload.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SonarTransport: Send + Sync {
    async fn get(&self, url: &str, query: &[(String, String)]) -> GateResult<HttpReply>;
}
