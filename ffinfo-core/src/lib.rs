use ffinfo_api::FreeFireClient;
use ffinfo_store::{ConfigStore, CooldownTracker};

pub type Error = anyhow::Error;

/// State shared by every command invocation.
#[derive(Clone, Debug)]
pub struct Data {
    pub store: ConfigStore,
    pub cooldowns: CooldownTracker,
    pub api: FreeFireClient,
    pub guild_whitelist: GuildWhitelist,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Guilds the bot may stay in. An empty list admits every guild.
#[derive(Clone, Debug, Default)]
pub struct GuildWhitelist {
    allowed: Vec<u64>,
}

impl GuildWhitelist {
    pub fn new(allowed: Vec<u64>) -> Self {
        Self { allowed }
    }

    pub fn is_enabled(&self) -> bool {
        !self.allowed.is_empty()
    }

    pub fn permits(&self, guild_id: u64) -> bool {
        self.allowed.is_empty() || self.allowed.contains(&guild_id)
    }
}
