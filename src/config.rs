use crate::problemset::{PROBLEMSET_URL, PROBLEM_BASE_URL};
use anyhow::{bail, Context, Result};
use std::env;
use std::net::SocketAddr;

pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub http_addr: SocketAddr,
    pub problemset_url: String,
    pub problem_base_url: String,
    pub discord: Option<DiscordConfig>,
}

#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub token: String,
    pub guild_id: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            problemset_url: PROBLEMSET_URL.to_owned(),
            problem_base_url: PROBLEM_BASE_URL.to_owned(),
            discord: None,
        }
    }
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let http_addr = lookup("HTTP_ADDR").unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_owned());
        let http_addr = http_addr
            .parse()
            .with_context(|| format!("HTTP_ADDR is not a socket address: {}", http_addr))?;

        let discord = match lookup("DISCORD_BOT_TOKEN").filter(|token| !token.is_empty()) {
            Some(token) => {
                let guild_id = lookup("GUILD_ID").context("GUILD_ID is not set")?;
                Some(DiscordConfig {
                    token,
                    guild_id: parse_guild_id(&guild_id)?,
                })
            }
            None => None,
        };

        Ok(Self {
            http_addr,
            problemset_url: lookup("PROBLEMSET_URL").unwrap_or_else(|| PROBLEMSET_URL.to_owned()),
            problem_base_url: lookup("PROBLEM_BASE_URL")
                .unwrap_or_else(|| PROBLEM_BASE_URL.to_owned()),
            discord,
        })
    }
}

fn parse_guild_id(value: &str) -> Result<u64> {
    let id = value
        .trim()
        .parse::<u64>()
        .with_context(|| format!("GUILD_ID is not a number: {}", value))?;
    if id == 0 {
        bail!("GUILD_ID must not be zero");
    }
    Ok(id)
}
