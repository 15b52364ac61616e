use poise::serenity_prelude as serenity;

use ffinfo_api::model::{CaptainInfo, ClanInfo};
use ffinfo_api::{ApiError, OutfitError, PlayerInfo, Scalar};
use ffinfo_utils::embed::{
    DEFAULT_EMBED_COLOR, ERROR_EMBED_COLOR, WARNING_EMBED_COLOR, notice_embed,
};
use ffinfo_utils::time::format_unix_timestamp;

const FOOTER_TEXT: &str = "Free Fire Info";

fn show(value: &Option<Scalar>, fallback: &str) -> String {
    match value {
        Some(value) => value.to_string(),
        None => fallback.to_owned(),
    }
}

fn show_time(value: &Option<Scalar>) -> String {
    format_unix_timestamp(value.as_ref().and_then(Scalar::as_i64))
}

pub fn player_title(info: &PlayerInfo, uid: &str) -> String {
    let nickname = info
        .basic_info
        .as_ref()
        .map(|basic| show(&basic.nickname, "Unknown"))
        .unwrap_or_else(|| "Unknown".to_owned());
    format!("🎯 {nickname} - UID: {uid}")
}

pub fn account_field(info: &PlayerInfo) -> String {
    let basic = info.basic_info.clone().unwrap_or_default();
    let credit = info.credit_score_info.clone().unwrap_or_default();
    let signature = info
        .social_info
        .as_ref()
        .and_then(|social| social.signature.as_ref())
        .filter(|signature| !signature.is_blank())
        .map(Scalar::to_string)
        .unwrap_or_else(|| "None".to_owned());

    [
        format!(
            "**Level:** {} (Exp: {})",
            show(&basic.level, "?"),
            show(&basic.exp, "?")
        ),
        format!("**Region:** {}", show(&basic.region, "?")),
        format!("**Likes:** ❤️ {}", show(&basic.liked, "?")),
        format!("**Honor:** {}", show(&credit.credit_score, "?")),
        format!("**Signature:** {signature}"),
    ]
    .join("\n")
}

pub fn activity_field(info: &PlayerInfo) -> String {
    let basic = info.basic_info.clone().unwrap_or_default();

    [
        format!("**OB Version:** {}", show(&basic.release_version, "?")),
        format!("**BP Badges:** {}", show(&basic.badge_cnt, "?")),
        format!("**BR Rank:** {}", show(&basic.ranking_points, "?")),
        format!("**CS Rank:** {}", show(&basic.cs_ranking_points, "?")),
        format!("**Created:** {}", show_time(&basic.create_at)),
        format!("**Last Login:** {}", show_time(&basic.last_login_at)),
    ]
    .join("\n")
}

pub fn pet_field(info: &PlayerInfo) -> String {
    let pet = info.pet_info.clone().unwrap_or_default();
    let equipped = if pet.is_selected.as_ref().is_some_and(Scalar::is_truthy) {
        "✅ Yes"
    } else {
        "❌ No"
    };

    [
        format!("**Pet Name:** {}", show(&pet.name, "N/A")),
        format!("**Level:** {}", show(&pet.level, "N/A")),
        format!("**Exp:** {}", show(&pet.exp, "N/A")),
        format!("**Equipped:** {equipped}"),
    ]
    .join("\n")
}

/// Guild section with an optional leader block. `None` when the player has no
/// clan data.
pub fn guild_field(info: &PlayerInfo) -> Option<String> {
    let clan = info.clan_basic_info.as_ref()?;
    let mut lines = clan_lines(clan);

    if let Some(captain) = info.captain_basic_info.as_ref() {
        lines.push(String::new());
        lines.push("👑 **LEADER INFO**".to_owned());
        lines.extend(captain_lines(captain));
    }

    Some(lines.join("\n"))
}

fn clan_lines(clan: &ClanInfo) -> Vec<String> {
    vec![
        format!("**Guild Name:** {}", show(&clan.clan_name, "?")),
        format!("**Guild ID:** `{}`", show(&clan.clan_id, "?")),
        format!("**Level:** {}", show(&clan.clan_level, "?")),
        format!(
            "**Members:** {}/{}",
            show(&clan.member_num, "?"),
            show(&clan.capacity, "?")
        ),
    ]
}

fn captain_lines(captain: &CaptainInfo) -> Vec<String> {
    vec![
        format!("**Name:** {}", show(&captain.nickname, "?")),
        format!("**UID:** `{}`", show(&captain.account_id, "?")),
        format!(
            "**Level:** {} (Exp: {})",
            show(&captain.level, "?"),
            show(&captain.exp, "?")
        ),
        format!("**Last Login:** {}", show_time(&captain.last_login_at)),
        format!("**Title:** {}", show(&captain.title, "?")),
        format!("**BP Badges:** {}", show(&captain.badge_cnt, "?")),
        format!("**BR Rank:** {}", show(&captain.ranking_points, "?")),
        format!("**CS Rank:** {}", show(&captain.cs_ranking_points, "?")),
    ]
}

pub fn player_embed(info: &PlayerInfo, uid: &str, thumbnail_url: String) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title(player_title(info, uid))
        .color(DEFAULT_EMBED_COLOR)
        .timestamp(serenity::Timestamp::now())
        .thumbnail(thumbnail_url)
        .field("👤 ACCOUNT INFO", account_field(info), false)
        .field("⚙️ ACTIVITY", activity_field(info), false)
        .field("🐾 PET INFO", pet_field(info), false);

    if let Some(guild) = guild_field(info) {
        embed = embed.field("🛡️ GUILD INFO", guild, false);
    }

    embed.footer(serenity::CreateEmbedFooter::new(FOOTER_TEXT))
}

/// Embed or plain message for a failed lookup.
pub enum LookupFailure {
    Embed(serenity::CreateEmbed),
    Message(&'static str),
}

pub fn lookup_failure(error: &ApiError, uid: &str) -> LookupFailure {
    match error {
        ApiError::NotFound { .. } => LookupFailure::Embed(notice_embed(
            "❌ Player Not Found",
            format!("UID `{uid}` not found or unavailable."),
            ERROR_EMBED_COLOR,
        )),
        ApiError::Status { .. } => LookupFailure::Embed(notice_embed(
            "⚠️ API Error",
            "Free Fire API not responding. Try again later.",
            WARNING_EMBED_COLOR,
        )),
        ApiError::Timeout => LookupFailure::Message("⏱️ Request timed out."),
        ApiError::Decode(_) | ApiError::Transport(_) => {
            LookupFailure::Message("⚠️ Unexpected error while fetching player data.")
        }
    }
}

pub fn outfit_failure_message(error: &OutfitError) -> &'static str {
    match error {
        OutfitError::Status { .. } => "⚠️ Outfit image API error.",
        OutfitError::MissingLink => "❌ No image link found in response.",
        OutfitError::LinkUnreachable { .. } => "⚠️ Image link not reachable.",
        OutfitError::UnexpectedFormat { .. } => "⚠️ Unexpected outfit image format.",
        OutfitError::Timeout | OutfitError::Decode(_) | OutfitError::Transport(_) => {
            "⚠️ Failed to load outfit image."
        }
    }
}
