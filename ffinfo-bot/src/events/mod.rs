pub mod cooldown_sweep;
pub mod guild_whitelist;
