//! Command handlers. Each page-backed command is checked against the route
//! table before any request goes out.

mod admin;
mod auth;
mod patient;
mod settings;
mod therapist;

use std::io::Write;
use std::path::PathBuf;

use clinproto_api::ApiClient;
use clinproto_store::Store;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;

use crate::cli::Command;
use crate::config::ClinprotoConfig;
use crate::routes::{Access, Route, guard};

/// Everything a command needs: the API client, the store, and the loaded
/// config with where it lives.
pub struct Context {
    pub api: ApiClient,
    pub store: Store,
    pub config: ClinprotoConfig,
    pub config_path: PathBuf,
}

impl Context {
    /// Refuse with a banner unless the stored session may open `route`.
    pub fn gate(&self, route: Route) -> eyre::Result<()> {
        let credentials = self.api.credentials().load();
        let access = guard(route, &credentials);
        debug!(route = %route, ?access, "route guard");
        match access {
            Access::Allow => Ok(()),
            Access::RedirectToLogin => Err(eyre::eyre!(
                "Please sign in to continue: clinproto login <email>"
            )),
            Access::Forbidden => Err(eyre::eyre!(
                "Your account does not have access to {route}"
            )),
        }
    }
}

pub async fn run(ctx: &mut Context, command: Command) -> eyre::Result<()> {
    if let Some(route) = command.route() {
        ctx.gate(route)?;
    }

    match command {
        Command::Login(args) => auth::login(ctx, args).await,
        Command::Register(args) => auth::register(ctx, args).await,
        Command::Logout => auth::logout(ctx).await,
        Command::Whoami => auth::whoami(ctx),
        Command::Nav => auth::nav(ctx),
        Command::Protocols(cmd) => patient::protocols(ctx, cmd).await,
        Command::Prescreen(cmd) => patient::prescreen(ctx, cmd).await,
        Command::Plans(cmd) => patient::plans(ctx, cmd).await,
        Command::Consent(args) => patient::consent(ctx, args).await,
        Command::Providers(cmd) => patient::providers(ctx, cmd).await,
        Command::Therapist(cmd) => therapist::run(ctx, cmd).await,
        Command::Admin(cmd) => admin::run(ctx, cmd).await,
        Command::Config(cmd) => settings::run(ctx, cmd),
    }
}

/// Line-oriented stdin for prompts and the screening chat.
pub(crate) struct Input {
    lines: Lines<BufReader<Stdin>>,
}

impl Input {
    pub(crate) fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// `None` at end of input.
    pub(crate) async fn line(&mut self, prompt: &str) -> eyre::Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?)
    }

    pub(crate) async fn required(&mut self, prompt: &str) -> eyre::Result<String> {
        self.line(prompt)
            .await?
            .ok_or_else(|| eyre::eyre!("input closed"))
    }
}
