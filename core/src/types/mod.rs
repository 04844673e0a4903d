//! Shared data types: profiles, display geometry, settings.

pub mod config;
pub mod profile;
