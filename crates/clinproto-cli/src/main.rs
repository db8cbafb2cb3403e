use std::sync::Arc;

use clap::Parser;
use clinproto_api::ApiClient;
use clinproto_auth::{CredentialStore, FileCredentialStore};
use clinproto_cli::cli::Cli;
use clinproto_cli::commands::{self, Context};
use clinproto_cli::config::{self, env_base_url, resolve_base_url};
use clinproto_cli::logging::{LogConfig, init_logging};
use clinproto_cli::render;
use clinproto_store::Store;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(&LogConfig::from_flags(cli.log_format, cli.verbose, cli.quiet));

    let config_path = config::config_path()?;
    let config = config::load_or_default(&config_path)?;
    let base_url = resolve_base_url(&config, cli.api_url.as_deref(), env_base_url().as_deref());

    let credentials: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::default_location()?);
    let api = ApiClient::new(config.api_config(base_url), Arc::clone(&credentials))?;

    let store = Store::new();
    store.restore_session(&credentials.load());

    tracing::debug!(api = api.base_url(), "clinproto starting");

    let mut ctx = Context {
        api,
        store,
        config,
        config_path,
    };

    if let Err(report) = commands::run(&mut ctx, cli.command).await {
        eprintln!("error: {}", render::banner(&report));
        tracing::debug!(error = ?report, "command failed");
        std::process::exit(1);
    }
    Ok(())
}
