use anyhow::Result;
use httpmock::prelude::*;
use std::time::Duration;
use tempfile::TempDir;
use webmention_tools::utils::error::MarkupError;
use webmention_tools::utils::validation::Validate;
use webmention_tools::{ClientConfig, DeliveryOutcome, WebmentionClient, WebmentionError};

fn page(endpoint: Option<&str>) -> String {
    let link = endpoint
        .map(|e| format!(r#"<link href="{}" rel="webmention" />"#, e))
        .unwrap_or_default();
    format!(
        r#"
<!doctype html>
<html>
	<head>
		{}
	</head>
	<body>
		<span> Some Content </span>
	</body>
</html>
"#,
        link
    )
}

#[tokio::test]
async fn test_discover_returns_declared_endpoint() -> Result<()> {
    let server = MockServer::start_async().await;
    let endpoint = server.url("/webmention");
    let document = server
        .mock_async(|when, then| {
            when.method(GET).path("/post");
            then.status(200)
                .header("Content-Type", "text/html; charset=utf-8")
                .body(page(Some(&endpoint)));
        })
        .await;

    let discovered = WebmentionClient::new().discover(&server.url("/post")).await?;

    assert_eq!(discovered.map(String::from), Some(endpoint));
    document.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_discover_without_declaration_is_empty() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/post");
            then.status(200).body(page(None));
        })
        .await;

    let discovered = WebmentionClient::new().discover(&server.url("/post")).await?;
    assert!(discovered.is_none());
    Ok(())
}

#[tokio::test]
async fn test_discover_non_200_is_fetch_failure() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        })
        .await;

    let err = WebmentionClient::new()
        .discover(&server.url("/missing"))
        .await
        .unwrap_err();

    match err {
        WebmentionError::FetchFailure { status, .. } => assert_eq!(status.as_u16(), 404),
        other => panic!("expected FetchFailure, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_discover_plain_text_is_markup_failure() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/robots.txt");
            then.status(200).body("test");
        })
        .await;

    let err = WebmentionClient::new()
        .discover(&server.url("/robots.txt"))
        .await
        .unwrap_err();

    assert!(matches!(err, WebmentionError::MarkupParse(MarkupError::NoMarkup)));
    assert!(err.to_string().starts_with("Failed to parse HTML"));
    Ok(())
}

#[tokio::test]
async fn test_discover_and_notify_end_to_end() -> Result<()> {
    let server = MockServer::start_async().await;
    let target = server.url("/post");
    let endpoint = server.url("/webmention");
    let source = "https://blog.example/replies/1";

    let document = server
        .mock_async(|when, then| {
            when.method(GET).path("/post");
            then.status(200).body(page(Some(&endpoint)));
        })
        .await;
    let receiver = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/webmention")
                .x_www_form_urlencoded_tuple("source", source)
                .x_www_form_urlencoded_tuple("target", &target);
            then.status(201);
        })
        .await;

    let outcome = WebmentionClient::new()
        .discover_and_notify(source, &target)
        .await?;

    assert!(outcome.is_delivered());
    match outcome {
        DeliveryOutcome::Delivered { endpoint: used, status } => {
            assert_eq!(used.as_str(), endpoint);
            assert_eq!(status, 201);
        }
        DeliveryOutcome::NoEndpoint => unreachable!(),
    }
    document.assert_async().await;
    receiver.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_discover_and_notify_without_endpoint_sends_nothing() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/post");
            then.status(200)
                .body(page(Some(":example.com/webmention")));
        })
        .await;
    let receiver = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200);
        })
        .await;

    let outcome = WebmentionClient::new()
        .discover_and_notify("https://blog.example/replies/1", &server.url("/post"))
        .await?;

    assert_eq!(outcome, DeliveryOutcome::NoEndpoint);
    receiver.assert_hits_async(0).await;
    Ok(())
}

#[tokio::test]
async fn test_client_from_config_file_applies_timeout_and_user_agent() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("webmention.toml");
    tokio::fs::write(
        &config_path,
        r#"
[http]
timeout_seconds = 1
user_agent = "integration-test/1.0"
"#,
    )
    .await?;

    let config = ClientConfig::from_file(&config_path)?;
    config.validate()?;
    let client = WebmentionClient::from_config(&config)?;

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/slow")
                .header("user-agent", "integration-test/1.0");
            then.status(200)
                .body(page(None))
                .delay(Duration::from_secs(3));
        })
        .await;

    let err = client.discover(&server.url("/slow")).await.unwrap_err();
    match err {
        WebmentionError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_malformed_document_url_is_labelled_by_role() {
    let client = WebmentionClient::new();

    let err = client.discover(":example.com/post").await.unwrap_err();
    assert!(matches!(err, WebmentionError::InvalidDocumentUrl { .. }));
    assert!(err.to_string().starts_with("Document URL cannot be parsed"));

    let err = client
        .discover_and_notify("https://blog.example/replies/1", ":example.com/post")
        .await
        .unwrap_err();
    assert!(matches!(err, WebmentionError::InvalidDestinationUrl { .. }));
}
