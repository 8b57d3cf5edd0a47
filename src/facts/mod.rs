//! Number-fact lookup used by the counter feature.

mod error;
mod http;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::effect::BoxFuture;

pub use error::FactError;
pub use http::HttpFactClient;

/// Looks up a trivia fact about a non-negative number.
#[async_trait]
pub trait FactClient: Send + Sync {
    async fn fetch(&self, number: u64) -> Result<String, FactError>;
}

type FetchFn = dyn Fn(u64) -> BoxFuture<Result<String, FactError>> + Send + Sync;

/// Fact client backed by a closure. Used to stub the service in tests.
#[derive(Clone)]
pub struct FnFactClient {
    fetch: Arc<FetchFn>,
}

impl FnFactClient {
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn(u64) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, FactError>> + Send + 'static,
    {
        Self {
            fetch: Arc::new(move |number| Box::pin(fetch(number))),
        }
    }
}

#[async_trait]
impl FactClient for FnFactClient {
    async fn fetch(&self, number: u64) -> Result<String, FactError> {
        (self.fetch)(number).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fn_client_calls_closure() {
        let client = FnFactClient::new(|n| async move { Ok(format!("{n} is a good number.")) });
        assert_eq!(client.fetch(0).await, Ok("0 is a good number.".to_string()));
    }

    #[tokio::test]
    async fn fn_client_passes_errors_through() {
        let client = FnFactClient::new(|_| async { Err(FactError::Status { status: 404 }) });
        assert_eq!(
            client.fetch(7).await,
            Err(FactError::Status { status: 404 })
        );
    }
}
