//! Editor core for the MongoDB custom search allow-list setting.
//!
//! The [`editor::SettingsEditor`] mediates between an editing surface and a
//! remote key/value [`store::SettingsStore`] for exactly one key,
//! [`setting::ALLOWED_KEY`].

pub mod allowed;
pub mod config;
pub mod editor;
pub mod error;
pub mod notify;
pub mod setting;
pub mod store;

pub use error::{SettingsError, SettingsResult};
