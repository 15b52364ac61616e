use poise::serenity_prelude as serenity;

/// Default embed color used across the bot UI (blurple).
pub const DEFAULT_EMBED_COLOR: u32 = 0x58_65_F2;
/// Color for "not found" style embeds.
pub const ERROR_EMBED_COLOR: u32 = 0xED_42_45;
/// Color for upstream failure embeds.
pub const WARNING_EMBED_COLOR: u32 = 0xE6_7E_22;

/// Build a titled embed with a description in the given color.
pub fn notice_embed(
    title: &str,
    description: impl Into<String>,
    color: u32,
) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title.to_owned())
        .description(description)
        .color(color)
}
