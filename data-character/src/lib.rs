pub mod client;
pub mod id;
pub mod model;

pub use client::{CharacterSource, HttpCharacterClient, API_BASE_URL};
pub use id::{character_id, derive_id, initials};
pub use model::{Character, CharacterDetail, Wand, HOUSES};
