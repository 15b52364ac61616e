pub mod cooldown_config;
pub mod info_channels;
