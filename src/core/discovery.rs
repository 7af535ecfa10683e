//! Webmention endpoint discovery from HTML documents.
//!
//! A page declares its receiver with `<link rel="webmention" href="...">` (or an
//! `<a>` carrying the same relation). When a page declares more than one, the
//! last declaration in document order is used.
//!
//! Declarations that cannot be used (unparseable or non-HTTP `href`) resolve to
//! "no endpoint" rather than an error. Only a body that is not markup at all, or
//! a matching element without an `href`, is reported as a failure.

use crate::utils::error::{MarkupError, Result, WebmentionError};
use crate::utils::validation::is_http_family;
use scraper::{ElementRef, Html};
use url::Url;

pub const WEBMENTION_REL: &str = "webmention";

/// html5ever accepts anything, so plain text has to be rejected up front.
fn looks_like_markup(text: &str) -> bool {
    text.as_bytes().windows(2).any(|pair| {
        pair[0] == b'<' && (pair[1].is_ascii_alphabetic() || matches!(pair[1], b'!' | b'/' | b'?'))
    })
}

/// Legacy-encoded pages (latin-1, windows-1252) decode lossily; only ASCII
/// matters for locating the declaration.
pub fn parse_document(body: &[u8]) -> std::result::Result<Html, MarkupError> {
    let text = String::from_utf8_lossy(body);
    if !looks_like_markup(&text) {
        return Err(MarkupError::NoMarkup);
    }
    Ok(Html::parse_document(&text))
}

fn declares_webmention(element: &ElementRef<'_>) -> bool {
    matches!(element.value().name(), "link" | "a")
        && element.value().attr("rel").is_some_and(|rel| {
            rel.split_ascii_whitespace()
                .any(|token| token.eq_ignore_ascii_case(WEBMENTION_REL))
        })
}

/// Elements declaring a webmention relation, lazily, in document order.
pub fn webmention_links(document: &Html) -> impl Iterator<Item = ElementRef<'_>> + '_ {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| declares_webmention(element))
}

pub fn endpoint_from_document(document: &Html) -> Result<Option<Url>> {
    let Some(element) = webmention_links(document).last() else {
        tracing::debug!("No webmention relation declared in document");
        return Ok(None);
    };

    let href = element
        .value()
        .attr("href")
        .ok_or(WebmentionError::MissingReference)?;

    match Url::parse(href) {
        Ok(url) if is_http_family(&url) => Ok(Some(url)),
        Ok(url) => {
            tracing::warn!("Ignoring webmention endpoint with scheme {}: {}", url.scheme(), href);
            Ok(None)
        }
        Err(e) => {
            tracing::warn!("Ignoring unparseable webmention endpoint {:?}: {}", href, e);
            Ok(None)
        }
    }
}

/// Runs discovery over an already fetched document body.
pub fn discover_in_markup(body: &[u8]) -> Result<Option<Url>> {
    let document = parse_document(body)?;
    endpoint_from_document(&document)
}
