use async_trait::async_trait;
use reqwest::{Client, Request, Response};

/// Performs one HTTP exchange. Timeouts, redirects and TLS belong to the implementor.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response, reqwest::Error>;
}

#[async_trait]
impl Transport for Client {
    async fn execute(&self, request: Request) -> Result<Response, reqwest::Error> {
        Client::execute(self, request).await
    }
}
