#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use relyingparty::{
    coordinator::AuthCoordinator, identity::HttpIdentityProvider, models::AuthIntent,
    navigation::LoggingNavigator, settings::CoordinatorSettings, AuthOutcome, Credentials,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration from Settings.toml and environment variables
    // This also loads .env file and initializes the logger
    let settings = CoordinatorSettings::load().context("Failed to load settings")?;
    let idp_config = settings
        .identity_provider_config()
        .context("Failed to configure identity provider")?;

    print_startup_info(&settings);

    let coordinator = AuthCoordinator::builder(
        Arc::new(HttpIdentityProvider::new(idp_config)),
        Arc::new(LoggingNavigator),
    )
    .with_root_path(settings.navigation.root_path.clone())
    .build();

    let printer = tokio::spawn(print_outcomes(coordinator.subscribe()));
    let (intent_tx, intent_rx) = mpsc::channel(32);
    let runner = tokio::spawn(coordinator.run(intent_rx));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_intent(&line) {
            Some(intent) => {
                if intent_tx.send(intent).await.is_err() {
                    break;
                }
            }
            None if line.trim().is_empty() => {}
            None => log::warn!(
                "Ignoring unrecognised input; expected `login|signup <email> <password>`"
            ),
        }
    }

    drop(intent_tx);
    runner.await?;
    // Completes once every in-flight login has published
    printer.await?;
    Ok(())
}

/// Parse `login <email> <password>` or `signup <email> <password>`
fn parse_intent(line: &str) -> Option<AuthIntent> {
    let mut parts = line.split_whitespace();
    let command = parts.next()?;
    let email = parts.next().unwrap_or_default();
    let password = parts.next().unwrap_or_default();
    let credentials = Credentials::new(email, password);

    match command {
        "login" => Some(AuthIntent::Login(credentials)),
        "signup" => Some(AuthIntent::Signup(credentials)),
        _ => None,
    }
}

/// Stand-in session store: write each outcome as a JSON line
async fn print_outcomes(mut outcomes: broadcast::Receiver<AuthOutcome>) {
    loop {
        match outcomes.recv().await {
            Ok(outcome) => match serde_json::to_string(&outcome) {
                Ok(json) => println!("{json}"),
                Err(e) => log::error!("Failed to serialize outcome: {e}"),
            },
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                log::warn!("Outcome printer lagged, {skipped} outcomes skipped");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

fn print_startup_info(settings: &CoordinatorSettings) {
    log::info!("Starting relyingparty {}", relyingparty::VERSION);
    log::info!("Identity provider: {}", settings.identity_provider.base_url);
    log::info!("Post-login destination: {}", settings.navigation.root_path);
    log::info!("Reading `login|signup <email> <password>` lines from stdin");
}
