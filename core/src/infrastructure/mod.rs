//! External process integrations.

pub mod placer;
