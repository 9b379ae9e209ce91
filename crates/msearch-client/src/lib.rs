//! HTTP implementation of [`msearch_core::store::SettingsStore`] for the
//! plugin host's REST API.

pub mod rest;

pub use rest::RestSettingsStore;
