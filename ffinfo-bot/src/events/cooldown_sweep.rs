use std::time::Duration;

use tracing::debug;

use ffinfo_store::impls::cooldown_config::max_cooldown;
use ffinfo_store::{ConfigStore, CooldownTracker};
use ffinfo_utils::time::now_unix_millis;

/// Periodically drop cooldown entries older than the largest configured
/// cooldown so the map stays bounded by recently active users.
pub fn spawn_cooldown_sweeper(
    store: ConfigStore,
    cooldowns: CooldownTracker,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let window = max_cooldown(&store).await;
            let removed = cooldowns.purge_expired(now_unix_millis(), window);
            debug!(removed, tracked = cooldowns.len(), window, "cooldown sweep finished");
        }
    })
}
