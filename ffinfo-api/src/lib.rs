pub mod client;
pub mod error;
pub mod model;

pub use client::{FreeFireClient, OutfitImage};
pub use error::{ApiError, OutfitError};
pub use model::{PlayerInfo, Scalar};
