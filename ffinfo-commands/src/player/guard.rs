use ffinfo_store::impls::info_channels::is_channel_allowed;
use ffinfo_store::model::config::InfoConfig;
use ffinfo_store::{CooldownDecision, CooldownTracker};
use ffinfo_utils::parse::{MIN_UID_LEN, is_valid_uid};

/// Everything needed to decide whether an `info` invocation may proceed.
#[derive(Clone, Copy, Debug)]
pub struct Invocation<'a> {
    pub guild_id: u64,
    pub channel_id: u64,
    pub user_id: u64,
    pub uid: &'a str,
}

/// Why an invocation was turned away before any network call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    InvalidUid,
    ChannelNotAllowed,
    OnCooldown { remaining_secs: u64 },
}

impl Rejection {
    pub fn message(&self) -> String {
        match self {
            Self::InvalidUid => {
                format!("❌ Invalid UID! Use digits only (at least {MIN_UID_LEN}).")
            }
            Self::ChannelNotAllowed => {
                "🚫 This command is not allowed in this channel.".to_owned()
            }
            Self::OnCooldown { remaining_secs } => {
                format!("⌛ Please wait {remaining_secs}s before using again.")
            }
        }
    }
}

/// Validate the UID, then the channel allow-list, then consume the caller's
/// cooldown. Only a fully admitted invocation touches the cooldown map.
pub fn admit(
    config: &InfoConfig,
    cooldowns: &CooldownTracker,
    invocation: &Invocation<'_>,
    now_ms: u64,
) -> Result<(), Rejection> {
    if !is_valid_uid(invocation.uid) {
        return Err(Rejection::InvalidUid);
    }

    if !is_channel_allowed(config.guild(invocation.guild_id), invocation.channel_id) {
        return Err(Rejection::ChannelNotAllowed);
    }

    let cooldown = config.cooldown_for(invocation.guild_id);
    match cooldowns.check_and_consume(invocation.user_id, cooldown, now_ms) {
        CooldownDecision::Allowed => Ok(()),
        CooldownDecision::Denied { remaining_secs } => {
            Err(Rejection::OnCooldown { remaining_secs })
        }
    }
}

#[cfg(test)]
mod tests {
    use ffinfo_store::CooldownTracker;
    use ffinfo_store::model::config::InfoConfig;

    use super::{Invocation, Rejection, admit};

    const SEC: u64 = 1_000;

    fn invocation(uid: &str, channel_id: u64) -> Invocation<'_> {
        Invocation {
            guild_id: 1,
            channel_id,
            user_id: 77,
            uid,
        }
    }

    fn restricted_config() -> InfoConfig {
        let mut config = InfoConfig::default();
        config.guild_mut_or_default(1).info_channels = vec!["10".to_owned()];
        config
    }

    #[test]
    fn invalid_uid_leaves_cooldown_untouched() {
        let tracker = CooldownTracker::new();
        let result = admit(&InfoConfig::default(), &tracker, &invocation("12ab", 10), 0);
        assert_eq!(result, Err(Rejection::InvalidUid));
        assert!(tracker.is_empty());
    }

    #[test]
    fn disallowed_channel_leaves_cooldown_untouched() {
        let tracker = CooldownTracker::new();
        let result = admit(&restricted_config(), &tracker, &invocation("123456", 11), 0);
        assert_eq!(result, Err(Rejection::ChannelNotAllowed));
        assert!(tracker.is_empty());
    }

    #[test]
    fn allowed_channel_consumes_cooldown() {
        let tracker = CooldownTracker::new();
        let result = admit(&restricted_config(), &tracker, &invocation("123456", 10), 5 * SEC);
        assert_eq!(result, Ok(()));
        assert_eq!(tracker.last_used(77), Some(5 * SEC));
    }

    #[test]
    fn guild_override_drives_the_window() {
        let mut config = InfoConfig::default();
        config.guild_mut_or_default(1).config.cooldown = Some(60);
        let tracker = CooldownTracker::new();

        assert_eq!(admit(&config, &tracker, &invocation("123456", 10), 0), Ok(()));
        assert_eq!(
            admit(&config, &tracker, &invocation("123456", 10), 45 * SEC),
            Err(Rejection::OnCooldown { remaining_secs: 15 })
        );
        assert_eq!(admit(&config, &tracker, &invocation("123456", 10), 60 * SEC), Ok(()));
    }

    #[test]
    fn default_cooldown_end_to_end() {
        let config = InfoConfig::default();
        let tracker = CooldownTracker::new();

        assert_eq!(admit(&config, &tracker, &invocation("123456", 10), 0), Ok(()));
        assert_eq!(
            admit(&config, &tracker, &invocation("123456", 10), 10 * SEC),
            Err(Rejection::OnCooldown { remaining_secs: 20 })
        );
        assert_eq!(admit(&config, &tracker, &invocation("123456", 10), 31 * SEC), Ok(()));
    }

    #[test]
    fn rejection_messages() {
        assert_eq!(
            Rejection::OnCooldown { remaining_secs: 20 }.message(),
            "⌛ Please wait 20s before using again."
        );
        assert!(Rejection::InvalidUid.message().contains("at least 6"));
    }
}
