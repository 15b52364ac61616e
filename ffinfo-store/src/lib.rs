pub mod cooldown;
pub mod impls;
pub mod model;
pub mod store;

pub use cooldown::{CooldownDecision, CooldownTracker};
pub use store::{ConfigStore, DEFAULT_CONFIG_PATH};
