pub mod embeds;
pub mod guard;
pub mod info;
