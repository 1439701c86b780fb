use anyhow::Result;
use problem_bot::{bot, http, Config, ProblemService};
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    let service = Arc::new(ProblemService::from_config(&config)?);

    let server = http::serve(config.http_addr, service.clone());
    match config.discord {
        Some(discord) => {
            tokio::try_join!(server, bot::run(discord, service))?;
        }
        None => {
            warn!("DISCORD_BOT_TOKEN is not set, serving HTTP only");
            server.await?;
        }
    }
    Ok(())
}
