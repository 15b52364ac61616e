use crate::store::ConfigStore;

/// Cooldown in seconds that applies to `guild_id`.
pub async fn guild_cooldown(store: &ConfigStore, guild_id: u64) -> u64 {
    store.read(|doc| doc.cooldown_for(guild_id)).await
}

pub async fn get_cooldown_override(store: &ConfigStore, guild_id: u64) -> Option<u64> {
    store
        .read(|doc| doc.guild(guild_id).and_then(|guild| guild.config.cooldown))
        .await
}

/// Set or clear (`None`) the guild's cooldown override.
pub async fn set_cooldown_override(
    store: &ConfigStore,
    guild_id: u64,
    cooldown_secs: Option<u64>,
) -> anyhow::Result<()> {
    store
        .update(|doc| doc.guild_mut_or_default(guild_id).config.cooldown = cooldown_secs)
        .await
}

/// Largest cooldown currently configured anywhere.
pub async fn max_cooldown(store: &ConfigStore) -> u64 {
    store.read(|doc| doc.max_cooldown()).await
}

#[cfg(test)]
mod tests {
    use super::{get_cooldown_override, guild_cooldown, max_cooldown, set_cooldown_override};
    use crate::store::ConfigStore;

    #[tokio::test]
    async fn override_takes_precedence_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.json");
        let store = ConfigStore::load(&path).await;

        assert_eq!(guild_cooldown(&store, 1).await, 30);

        set_cooldown_override(&store, 1, Some(90)).await.unwrap();
        assert_eq!(guild_cooldown(&store, 1).await, 90);
        assert_eq!(guild_cooldown(&store, 2).await, 30);
        assert_eq!(max_cooldown(&store).await, 90);

        let reloaded = ConfigStore::load(&path).await;
        assert_eq!(get_cooldown_override(&reloaded, 1).await, Some(90));

        set_cooldown_override(&store, 1, None).await.unwrap();
        assert_eq!(get_cooldown_override(&store, 1).await, None);
        assert_eq!(guild_cooldown(&store, 1).await, 30);
    }
}
