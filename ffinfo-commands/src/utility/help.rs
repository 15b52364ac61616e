use poise::serenity_prelude as serenity;

use crate::utility::embeds::{
    grouped_help_description, no_commands_message, unknown_category_message,
};
use crate::{COMMANDS, CommandMeta};
use ffinfo_core::{Context, Error};
use ffinfo_utils::embed::DEFAULT_EMBED_COLOR;

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [category]",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Category"]
    #[rest]
    category: Option<String>,
) -> Result<(), Error> {
    let category = category
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(str::to_ascii_lowercase);
    let category = category.as_deref();

    let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();

    if let Some(wanted_category) = category
        && !categories.contains(&wanted_category)
    {
        ctx.say(unknown_category_message(wanted_category, &categories))
            .await?;
        return Ok(());
    }

    let commands = sorted_commands(category);
    if commands.is_empty() {
        ctx.say(no_commands_message(category)).await?;
        return Ok(());
    }

    let embed = serenity::CreateEmbed::new()
        .title("Available Commands")
        .color(DEFAULT_EMBED_COLOR)
        .description(grouped_help_description(&commands));
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| match category {
            Some(wanted) => cmd.category == wanted,
            None => true,
        })
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}

#[cfg(test)]
mod tests {
    use super::sorted_commands;

    #[test]
    fn commands_sorted_by_category_then_name() {
        let all = sorted_commands(None);
        let keys: Vec<_> = all.iter().map(|c| (c.category, c.name)).collect();
        let mut expected = keys.clone();
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }

    #[test]
    fn category_filter() {
        let config = sorted_commands(Some("config"));
        assert!(!config.is_empty());
        assert!(config.iter().all(|c| c.category == "config"));
        assert!(sorted_commands(Some("nope")).is_empty());
    }
}
