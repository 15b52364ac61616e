use ffinfo_core::{Context, Error};

use crate::{COMMANDS, CommandMeta};

pub const META: CommandMeta = CommandMeta {
    name: "usage",
    desc: "Show usage syntax for a specific command.",
    category: "utility",
    usage: "!usage <command>",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn usage(
    ctx: Context<'_>,
    #[description = "Command name"] command: Option<String>,
) -> Result<(), Error> {
    let Some(raw_name) = command.as_deref() else {
        ctx.say(format!("Usage: `{}`", META.usage)).await?;
        return Ok(());
    };

    match find_command(raw_name) {
        Some(command) => ctx.say(format!("Usage: `{}`", command.usage)).await?,
        None => {
            ctx.say(format!("Unknown command: `{}`", normalize_name(raw_name)))
                .await?
        }
    };

    Ok(())
}

fn normalize_name(raw: &str) -> String {
    raw.trim()
        .trim_start_matches(['!', '/'])
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn find_command(raw: &str) -> Option<&'static CommandMeta> {
    let lookup = normalize_name(raw);
    COMMANDS.iter().find(|command| command.name == lookup)
}

#[cfg(test)]
mod tests {
    use super::find_command;

    #[test]
    fn finds_commands_with_prefixes_and_subcommands() {
        assert_eq!(find_command("info").map(|c| c.name), Some("info"));
        assert_eq!(find_command("!INFO").map(|c| c.name), Some("info"));
        assert_eq!(
            find_command("/infochannel add").map(|c| c.name),
            Some("infochannel")
        );
        assert!(find_command("ban").is_none());
        assert!(find_command("   ").is_none());
    }
}
