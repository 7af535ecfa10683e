//! Construction of outbound Webmention requests.

use crate::domain::model::Notification;
use crate::utils::error::{Result, WebmentionError};
use crate::utils::validation::is_http_family;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Body, Method, Request};
use url::{form_urlencoded, Url};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint).map_err(|e| WebmentionError::InvalidEndpointUrl {
        url: endpoint.to_string(),
        reason: e.to_string(),
    })?;
    if !is_http_family(&url) {
        return Err(WebmentionError::InvalidEndpointUrl {
            url: endpoint.to_string(),
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(url)
}

impl Notification {
    /// Builds the `POST` for `endpoint` without sending it.
    ///
    /// Arguments are checked in the order endpoint, source, destination and the
    /// first rejected one determines the error variant. The form body carries the
    /// re-serialized URLs rather than the caller's strings.
    pub fn to_request(&self, endpoint: &str) -> Result<Request> {
        let endpoint = parse_endpoint(endpoint)?;

        let source = Url::parse(&self.source).map_err(|source| WebmentionError::InvalidSourceUrl {
            url: self.source.clone(),
            source,
        })?;

        let target =
            Url::parse(&self.destination).map_err(|source| WebmentionError::InvalidDestinationUrl {
                url: self.destination.clone(),
                source,
            })?;

        let form = form_urlencoded::Serializer::new(String::new())
            .append_pair("source", source.as_str())
            .append_pair("target", target.as_str())
            .finish();

        let mut request = Request::new(Method::POST, endpoint);
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        *request.body_mut() = Some(Body::from(form));

        Ok(request)
    }
}
