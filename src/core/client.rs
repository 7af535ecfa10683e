use crate::config::ClientConfig;
use crate::core::discovery::discover_in_markup;
use crate::domain::model::{DeliveryOutcome, Notification};
use crate::domain::ports::Transport;
use crate::utils::error::{Result, WebmentionError};
use reqwest::{Client, Method, Request, StatusCode};
use url::Url;

/// Sends Webmentions over a [`Transport`], one request in flight per call.
pub struct WebmentionClient<T: Transport = Client> {
    transport: T,
}

impl WebmentionClient<Client> {
    pub fn new() -> Self {
        Self::with_transport(Client::new())
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(config.build_http_client()?))
    }
}

impl Default for WebmentionClient<Client> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> WebmentionClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Fetches `document_url` and returns the endpoint it declares, if any.
    ///
    /// A malformed `document_url` is `InvalidDocumentUrl`.
    pub async fn discover(&self, document_url: &str) -> Result<Option<Url>> {
        let url = Url::parse(document_url).map_err(|source| WebmentionError::InvalidDocumentUrl {
            url: document_url.to_string(),
            source,
        })?;

        tracing::debug!("Fetching discovery document: {}", url);
        let response = self.transport.execute(Request::new(Method::GET, url)).await?;

        tracing::debug!("Discovery response status: {}", response.status());
        if response.status() != StatusCode::OK {
            return Err(WebmentionError::FetchFailure {
                url: document_url.to_string(),
                status: response.status(),
            });
        }

        let body = response.bytes().await?;
        let endpoint = discover_in_markup(&body)?;

        match &endpoint {
            Some(endpoint) => tracing::debug!("Discovered endpoint {} for {}", endpoint, document_url),
            None => tracing::debug!("No webmention endpoint declared by {}", document_url),
        }
        Ok(endpoint)
    }

    /// Sends `source` -> `destination` to `endpoint`. Any 2xx status is success.
    ///
    /// Redirects are followed by the transport up to its configured limit, so a
    /// 3xx with `Location` is judged by the final response (reqwest re-issues
    /// 301/302/303 as `GET`). With `max_redirects = 0` every 3xx is a
    /// `DeliveryFailure`.
    pub async fn send_notification(
        &self,
        endpoint: &str,
        source: &str,
        destination: &str,
    ) -> Result<StatusCode> {
        let request = Notification::new(source, destination).to_request(endpoint)?;

        tracing::debug!("Posting webmention to {}", request.url());
        let response = self.transport.execute(request).await?;
        let status = response.status();
        tracing::debug!("Webmention response status: {}", status);

        if !status.is_success() {
            return Err(WebmentionError::DeliveryFailure {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        tracing::info!("Webmention from {} to {} accepted by {}", source, destination, endpoint);
        Ok(status)
    }

    /// Discovers the endpoint of `destination` and sends the mention there.
    pub async fn discover_and_notify(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<DeliveryOutcome> {
        let discovered = self.discover(destination).await.map_err(|e| match e {
            WebmentionError::InvalidDocumentUrl { url, source } => {
                WebmentionError::InvalidDestinationUrl { url, source }
            }
            other => other,
        })?;
        let Some(endpoint) = discovered else {
            tracing::info!("{} declares no webmention endpoint", destination);
            return Ok(DeliveryOutcome::NoEndpoint);
        };

        let status = self
            .send_notification(endpoint.as_str(), source, destination)
            .await?;

        Ok(DeliveryOutcome::Delivered {
            endpoint,
            status: status.as_u16(),
        })
    }
}
