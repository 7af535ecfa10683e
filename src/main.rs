use clap::Parser;
use webmention_tools::config::Command;
use webmention_tools::utils::{logger, validation::Validate};
use webmention_tools::{CliConfig, DeliveryOutcome, WebmentionClient, WebmentionError};

fn fail(e: &WebmentionError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Status: {:?})",
        e,
        e.category(),
        e.status()
    );
    eprintln!("❌ {}", e);
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.client_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    if cli.log_json {
        logger::init_json_logger(config.logging.level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, config.logging.level.as_deref());
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    let client = match WebmentionClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => fail(&e),
    };

    match &cli.command {
        Command::Discover { url } => match client.discover(url).await {
            Ok(endpoint) => {
                if cli.json {
                    println!("{}", serde_json::json!({ "url": url, "endpoint": endpoint }));
                } else {
                    match endpoint {
                        Some(endpoint) => println!("{}", endpoint),
                        None => println!("No webmention endpoint declared by {}", url),
                    }
                }
            }
            Err(e) => fail(&e),
        },
        Command::Send {
            endpoint,
            source,
            target,
        } => match client.send_notification(endpoint, source, target).await {
            Ok(status) => {
                let outcome = DeliveryOutcome::Delivered {
                    endpoint: url::Url::parse(endpoint)?,
                    status: status.as_u16(),
                };
                report(&outcome, cli.json)?;
            }
            Err(e) => fail(&e),
        },
        Command::Notify { source, target } => {
            match client.discover_and_notify(source, target).await {
                Ok(outcome) => report(&outcome, cli.json)?,
                Err(e) => fail(&e),
            }
        }
    }

    Ok(())
}

fn report(outcome: &DeliveryOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(outcome)?);
        return Ok(());
    }

    match outcome {
        DeliveryOutcome::Delivered { endpoint, status } => {
            println!("✅ Webmention accepted by {} [Status {}]", endpoint, status);
        }
        DeliveryOutcome::NoEndpoint => {
            println!("ℹ️ Target declares no webmention endpoint, nothing sent");
        }
    }
    Ok(())
}
