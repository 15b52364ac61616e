use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_COOLDOWN_SECS: u64 = 30;
pub const DEFAULT_DAILY_LIMIT: u64 = 30;

/// The whole persisted document: per-guild settings keyed by guild id string,
/// plus process-wide defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoConfig {
    #[serde(default)]
    pub servers: BTreeMap<String, GuildConfig>,
    #[serde(default)]
    pub global_settings: GlobalSettings,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildConfig {
    /// Channel ids where `info` may run. Empty means unrestricted.
    #[serde(default, deserialize_with = "lenient_id_list")]
    pub info_channels: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: GuildOverrides,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildOverrides {
    /// `null`, negative or non-numeric values read as "no override".
    #[serde(
        default,
        deserialize_with = "lenient_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub cooldown: Option<u64>,
    /// Carried through load/save untouched; nothing enforces it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_limit: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub default_all_channels: bool,
    #[serde(default = "default_cooldown", deserialize_with = "lenient_default_cooldown")]
    pub default_cooldown: u64,
    #[serde(
        default = "default_daily_limit",
        deserialize_with = "lenient_default_daily_limit"
    )]
    pub default_daily_limit: u64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            default_all_channels: false,
            default_cooldown: DEFAULT_COOLDOWN_SECS,
            default_daily_limit: DEFAULT_DAILY_LIMIT,
        }
    }
}

fn default_cooldown() -> u64 {
    DEFAULT_COOLDOWN_SECS
}

fn default_daily_limit() -> u64 {
    DEFAULT_DAILY_LIMIT
}

/// Whole seconds from a JSON number or numeric string; anything else is `None`.
fn seconds_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|secs| secs.is_finite() && *secs >= 0.0)
                .map(|secs| secs as u64)
        }),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn lenient_seconds<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(seconds_from_value))
}

fn lenient_default_cooldown<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_seconds(deserializer)?.unwrap_or(DEFAULT_COOLDOWN_SECS))
}

fn lenient_default_daily_limit<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_seconds(deserializer)?.unwrap_or(DEFAULT_DAILY_LIMIT))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(matches!(value, Some(Value::Bool(true))))
}

/// Ids may have been written as strings or bare numbers; other entries are dropped.
fn lenient_id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(entries)) = value else {
        return Ok(Vec::new());
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(text) => Some(text),
            Value::Number(number) => number.as_u64().map(|id| id.to_string()),
            _ => None,
        })
        .collect())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Result of decoding a document that may be partly damaged.
#[derive(Debug, Default)]
pub struct DecodedConfig {
    pub config: InfoConfig,
    /// Keys (guild ids, `global_settings`, or `<document>`) that had to be
    /// replaced by defaults or dropped.
    pub discarded: Vec<String>,
}

impl DecodedConfig {
    pub fn is_lossless(&self) -> bool {
        self.discarded.is_empty()
    }
}

impl InfoConfig {
    /// Decode a parsed document one section at a time so a single bad guild
    /// entry does not discard the rest of the file.
    pub fn decode_lenient(value: Value) -> DecodedConfig {
        let Value::Object(mut root) = value else {
            return DecodedConfig {
                config: InfoConfig::default(),
                discarded: vec!["<document>".to_string()],
            };
        };

        let mut decoded = DecodedConfig::default();

        match root.remove("servers") {
            None | Some(Value::Null) => {}
            Some(Value::Object(servers)) => {
                for (guild_id, entry) in servers {
                    match serde_json::from_value::<GuildConfig>(entry) {
                        Ok(guild) => {
                            decoded.config.servers.insert(guild_id, guild);
                        }
                        Err(_) => decoded.discarded.push(guild_id),
                    }
                }
            }
            Some(_) => decoded.discarded.push("servers".to_string()),
        }

        match root.remove("global_settings") {
            None | Some(Value::Null) => {}
            Some(settings) => match serde_json::from_value::<GlobalSettings>(settings) {
                Ok(settings) => decoded.config.global_settings = settings,
                Err(_) => decoded.discarded.push("global_settings".to_string()),
            },
        }

        decoded
    }
}

impl GuildConfig {
    pub fn allows_channel(&self, channel_id: u64) -> bool {
        if self.info_channels.is_empty() {
            return true;
        }

        let wanted = channel_id.to_string();
        self.info_channels.iter().any(|entry| *entry == wanted)
    }

    /// Parsed channel ids; entries that are not valid ids are skipped.
    pub fn channel_ids(&self) -> Vec<u64> {
        self.info_channels
            .iter()
            .filter_map(|entry| entry.trim().parse::<u64>().ok())
            .collect()
    }
}

impl InfoConfig {
    pub fn guild(&self, guild_id: u64) -> Option<&GuildConfig> {
        self.servers.get(&guild_id.to_string())
    }

    pub fn guild_mut_or_default(&mut self, guild_id: u64) -> &mut GuildConfig {
        self.servers.entry(guild_id.to_string()).or_default()
    }

    /// Guild override if present, otherwise the global default.
    pub fn cooldown_for(&self, guild_id: u64) -> u64 {
        self.guild(guild_id)
            .and_then(|guild| guild.config.cooldown)
            .unwrap_or(self.global_settings.default_cooldown)
    }

    /// Largest cooldown any guild can apply; entries older than this can never
    /// deny an invocation.
    pub fn max_cooldown(&self) -> u64 {
        self.servers
            .values()
            .filter_map(|guild| guild.config.cooldown)
            .fold(self.global_settings.default_cooldown, u64::max)
    }
}
