mod events;

use std::env;
use std::time::Duration;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;

use ffinfo_api::FreeFireClient;
use ffinfo_core::{Data, Error, GuildWhitelist};
use ffinfo_store::{ConfigStore, CooldownTracker, DEFAULT_CONFIG_PATH};
use ffinfo_utils::parse::parse_id_list;

const DEFAULT_COOLDOWN_SWEEP_SECONDS: u64 = 300;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN")?;
    let guild_id = match env::var("DISCORD_GUILD_ID") {
        Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<u64>()?),
        _ => None,
    };

    let config_path =
        env::var("INFO_CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let store = ConfigStore::load(&config_path).await;
    let (guild_count, default_cooldown) = store
        .read(|doc| (doc.servers.len(), doc.global_settings.default_cooldown))
        .await;
    info!(
        path = %config_path,
        guild_count,
        default_cooldown,
        "Info channel config loaded."
    );

    let api = FreeFireClient::from_env()?;

    let guild_whitelist = GuildWhitelist::new(parse_id_list(
        &env::var("ALLOWED_GUILD_IDS").unwrap_or_default(),
    ));
    if guild_whitelist.is_enabled() {
        info!("Guild whitelist enabled.");
    } else {
        info!("Guild whitelist disabled (set ALLOWED_GUILD_IDS to restrict guilds).");
    }

    let cooldowns = CooldownTracker::new();
    let sweep_seconds = env_u64("COOLDOWN_SWEEP_SECONDS", DEFAULT_COOLDOWN_SWEEP_SECONDS).max(1);
    events::cooldown_sweep::spawn_cooldown_sweeper(
        store.clone(),
        cooldowns.clone(),
        Duration::from_secs(sweep_seconds),
    );
    info!(sweep_seconds, "Cooldown sweeper started.");

    let data = Data {
        store,
        cooldowns,
        api,
        guild_whitelist,
    };

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: ffinfo_commands::commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(ffinfo_utils::COMMAND_PREFIX.to_string()),
                mention_as_prefix: false,
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!(user = %ready.user.name, "Bot is online.");

                match guild_id {
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            serenity::GuildId::new(guild_id),
                        )
                        .await?;
                        info!(guild_id, "Commands registered in guild.");
                    }
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await?;
                        info!("Commands registered globally.");
                    }
                }

                Ok(data)
            })
        })
        .build();

    info!("Connecting to Discord...");

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(?error, command = %ctx.command().qualified_name, "command error");

            let embed = serenity::CreateEmbed::new()
                .title("Command Error")
                .description("Something went wrong while running this command.")
                .color(ffinfo_utils::embed::WARNING_EMBED_COLOR);

            let _ = ctx
                .send(poise::CreateReply::default().ephemeral(true).embed(embed))
                .await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let usage = format!("Usage: `!{}`", ctx.command().qualified_name);
            let description = if let Some(input) = input {
                format!("Invalid argument: `{}`\n{}", input, usage)
            } else {
                format!("Missing required argument.\n{}", usage)
            };

            let _ = ctx.say(description).await;
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            debug!("unknown command invocation");
        }
        other => {
            if let Err(source) = poise::builtins::on_error(other).await {
                error!(?source, "failed to report framework error");
            }
        }
    }
}

async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::GuildCreate { guild, .. } = event {
        events::guild_whitelist::handle_guild_create_whitelist(ctx, data, guild).await;
    }

    Ok(())
}
