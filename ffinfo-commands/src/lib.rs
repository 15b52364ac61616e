pub mod config;
pub mod player;
pub mod utility;

use ffinfo_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::usage::META,
    player::info::META,
    config::infochannel::META,
    config::infocooldown::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        utility::ping::ping(),
        utility::help::help(),
        utility::usage::usage(),
        player::info::info(),
        config::infochannel::infochannel(),
        config::infocooldown::infocooldown(),
    ]
}

#[cfg(test)]
mod tests {
    use super::{COMMANDS, commands};

    #[test]
    fn every_registered_command_has_meta() {
        let registered = commands();
        assert_eq!(registered.len(), COMMANDS.len());
        for command in &registered {
            assert!(
                COMMANDS.iter().any(|meta| meta.name == command.name),
                "missing META for `{}`",
                command.name
            );
        }
    }
}
