use super::Context;
use crate::cli::ConfigCommand;
use crate::config::{API_URL_ENV, env_base_url, save_config};

pub(super) fn run(ctx: &mut Context, cmd: ConfigCommand) -> eyre::Result<()> {
    match cmd {
        ConfigCommand::Show => {
            println!("Config file:     {}", ctx.config_path.display());
            println!("Saved API URL:   {}", ctx.config.api_base_url);
            println!("Active API URL:  {}", ctx.api.base_url());
            if let Some(url) = env_base_url() {
                println!("{API_URL_ENV}: {url}");
            }
            println!("Timeout:         {}s", ctx.config.request_timeout_secs);
            println!("Config version:  {}", ctx.config.config_version);
        }
        ConfigCommand::SetUrl { url } => {
            let url = url.trim().trim_end_matches('/').to_string();
            if url.is_empty() {
                return Err(eyre::eyre!("API URL cannot be empty"));
            }
            ctx.config.api_base_url = url;
            save_config(&ctx.config_path, &ctx.config)?;
            println!("API URL set to {}", ctx.config.api_base_url);
        }
    }
    Ok(())
}
