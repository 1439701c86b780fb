use crate::config::DiscordConfig;
use crate::error::LookupError;
use crate::service::{ProblemPayload, ProblemService};
use anyhow::Result;
use serenity::all::{
    Client, CommandInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseMessage, EventHandler, GatewayIntents, GuildId, Interaction, Ready,
};
use serenity::async_trait;
use std::sync::Arc;
use strum::{Display, EnumString};
use tracing::{error, info, warn};

/// Discord rejects message contents above this many characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum BotCommand {
    #[strum(serialize = "problem")]
    Problem,
}

impl BotCommand {
    fn description(&self) -> &'static str {
        match self {
            BotCommand::Problem => "Search for a programming problem",
        }
    }

    fn register(&self) -> CreateCommand {
        CreateCommand::new(self.to_string()).description(self.description())
    }
}

pub struct Handler {
    service: Arc<ProblemService>,
    guild_id: GuildId,
}

impl Handler {
    pub fn new(service: Arc<ProblemService>, guild_id: u64) -> Self {
        Self {
            service,
            guild_id: GuildId::new(guild_id),
        }
    }

    async fn answer(&self, ctx: &Context, command: &CommandInteraction) {
        let content = match command.data.name.parse::<BotCommand>() {
            Ok(BotCommand::Problem) => problem_reply(self.service.random_problem().await),
            Err(_) => {
                warn!("Ignoring unknown command /{}", command.data.name);
                return;
            }
        };

        let message = CreateInteractionResponseMessage::new().content(content);
        let response = CreateInteractionResponse::Message(message);
        if let Err(err) = command.create_response(&ctx.http, response).await {
            error!("Failed to reply to /{}: {}", command.data.name, err);
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Logged in as {}!", ready.user.tag());

        // Bulk overwrite drops every guild command not listed here.
        let commands = vec![BotCommand::Problem.register()];
        match self.guild_id.set_commands(&ctx.http, commands).await {
            Ok(commands) => info!(
                "Registered {} slash command(s) in guild {}",
                commands.len(),
                self.guild_id
            ),
            Err(err) => error!("Error registering slash commands: {}", err),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            self.answer(&ctx, &command).await;
        }
    }
}

pub fn problem_reply(lookup: Result<ProblemPayload, LookupError>) -> String {
    match lookup {
        Ok(problem) => {
            let message = format!("Here's a problem: {}\n\n{}", problem.url, problem.description);
            message.chars().take(MAX_MESSAGE_CHARS).collect()
        }
        Err(_) => LookupError::NotFound.to_string(),
    }
}

pub async fn run(config: DiscordConfig, service: Arc<ProblemService>) -> Result<()> {
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;
    let handler = Handler::new(service, config.guild_id);
    let mut client = Client::builder(&config.token, intents)
        .event_handler(handler)
        .await?;
    client.start().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(description: &str) -> ProblemPayload {
        ProblemPayload {
            url: "https://codeforces.com/problemset/problem/4/A".to_owned(),
            description: description.to_owned(),
        }
    }

    #[test]
    fn command_names_should_round_trip() {
        assert_eq!("problem".parse::<BotCommand>().unwrap(), BotCommand::Problem);
        assert_eq!(BotCommand::Problem.to_string(), "problem");
        assert!("contest".parse::<BotCommand>().is_err());
    }

    #[test]
    fn problem_reply_should_work() {
        let reply = problem_reply(Ok(payload("**A. Watermelon**")));

        assert_eq!(
            reply,
            "Here's a problem: https://codeforces.com/problemset/problem/4/A\n\n**A. Watermelon**"
        );
    }

    #[test]
    fn problem_reply_should_fit_message_limit() {
        let reply = problem_reply(Ok(payload(&"≤".repeat(3000))));

        assert_eq!(reply.chars().count(), MAX_MESSAGE_CHARS);
        assert!(reply.starts_with(
            "Here's a problem: https://codeforces.com/problemset/problem/4/A\n\n≤"
        ));
    }

    #[test]
    fn problem_reply_should_report_failures() {
        assert_eq!(problem_reply(Err(LookupError::NotFound)), "No problem found.");
        assert_eq!(
            problem_reply(Err(LookupError::ExtractionFailed {
                url: "https://codeforces.com/problemset/problem/4/A".to_owned()
            })),
            "No problem found."
        );
    }
}
