use crate::model::config::GuildConfig;
use crate::store::ConfigStore;

/// Decide whether a restricted command may run in `channel_id`.
///
/// A guild with no stored config, or with an empty allow-list, is
/// unrestricted.
pub fn is_channel_allowed(guild_config: Option<&GuildConfig>, channel_id: u64) -> bool {
    guild_config.is_none_or(|guild| guild.allows_channel(channel_id))
}

pub async fn info_channel_allowed(store: &ConfigStore, guild_id: u64, channel_id: u64) -> bool {
    store
        .read(|doc| is_channel_allowed(doc.guild(guild_id), channel_id))
        .await
}

pub async fn list_info_channels(store: &ConfigStore, guild_id: u64) -> Vec<u64> {
    store
        .read(|doc| doc.guild(guild_id).map(GuildConfig::channel_ids).unwrap_or_default())
        .await
}

/// Add `channel_id` to the guild's allow-list. Returns `false` when it was
/// already present.
pub async fn add_info_channel(
    store: &ConfigStore,
    guild_id: u64,
    channel_id: u64,
) -> anyhow::Result<bool> {
    let channel = channel_id.to_string();
    store
        .update(|doc| {
            let guild = doc.guild_mut_or_default(guild_id);
            if guild.info_channels.contains(&channel) {
                return false;
            }
            guild.info_channels.push(channel);
            true
        })
        .await
}

/// Remove `channel_id` from the guild's allow-list. Returns `false` when it
/// was not present.
pub async fn remove_info_channel(
    store: &ConfigStore,
    guild_id: u64,
    channel_id: u64,
) -> anyhow::Result<bool> {
    let channel = channel_id.to_string();
    store
        .update(|doc| {
            let guild = doc.guild_mut_or_default(guild_id);
            let before = guild.info_channels.len();
            guild.info_channels.retain(|entry| *entry != channel);
            guild.info_channels.len() != before
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::{
        add_info_channel, info_channel_allowed, is_channel_allowed, list_info_channels,
        remove_info_channel,
    };
    use crate::model::config::GuildConfig;
    use crate::store::ConfigStore;

    fn guild_with(channels: &[&str]) -> GuildConfig {
        GuildConfig {
            info_channels: channels.iter().map(|c| (*c).to_owned()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn missing_or_empty_config_is_unrestricted() {
        assert!(is_channel_allowed(None, 1));
        assert!(is_channel_allowed(Some(&GuildConfig::default()), 1));
        assert!(is_channel_allowed(Some(&guild_with(&[])), 987_654));
    }

    #[test]
    fn non_empty_allow_list_is_exact_membership() {
        let guild = guild_with(&["10", "20"]);
        assert!(is_channel_allowed(Some(&guild), 10));
        assert!(is_channel_allowed(Some(&guild), 20));
        assert!(!is_channel_allowed(Some(&guild), 30));
        assert!(!is_channel_allowed(Some(&guild), 1));
    }

    #[tokio::test]
    async fn add_save_reload_keeps_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("info_channels.json");
        let store = ConfigStore::load(&path).await;

        assert!(add_info_channel(&store, 1, 500).await.unwrap());
        assert!(!add_info_channel(&store, 1, 500).await.unwrap());

        let reloaded = ConfigStore::load(&path).await;
        assert_eq!(list_info_channels(&reloaded, 1).await, vec![500]);
        assert!(info_channel_allowed(&reloaded, 1, 500).await);
        assert!(!info_channel_allowed(&reloaded, 1, 501).await);
        assert_eq!(reloaded.snapshot().await, store.snapshot().await);
    }

    #[tokio::test]
    async fn removing_last_channel_unrestricts_guild() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::load(dir.path().join("c.json")).await;

        add_info_channel(&store, 1, 500).await.unwrap();
        assert!(!info_channel_allowed(&store, 1, 600).await);

        assert!(remove_info_channel(&store, 1, 500).await.unwrap());
        assert!(!remove_info_channel(&store, 1, 500).await.unwrap());
        assert!(info_channel_allowed(&store, 1, 600).await);
        assert!(list_info_channels(&store, 1).await.is_empty());
    }

    #[tokio::test]
    async fn loose_guild_override_does_not_wipe_other_guilds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("info_channels.json");
        std::fs::write(
            &path,
            r#"{"servers": {
                "1": {"info_channels": ["10"]},
                "2": {"info_channels": [], "config": {"cooldown": null, "daily_limit": 30.0}}
            }}"#,
        )
        .unwrap();

        let store = ConfigStore::load(&path).await;
        assert_eq!(list_info_channels(&store, 1).await, vec![10]);

        assert!(add_info_channel(&store, 3, 30).await.unwrap());
        assert_eq!(list_info_channels(&store, 1).await, vec![10]);

        let reloaded = ConfigStore::load(&path).await;
        assert_eq!(list_info_channels(&reloaded, 1).await, vec![10]);
        assert_eq!(list_info_channels(&reloaded, 3).await, vec![30]);
        assert!(reloaded.snapshot().await.guild(2).is_some());
        assert!(!store.backup_path().exists());
    }
}
