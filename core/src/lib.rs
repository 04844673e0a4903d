//! DisplayDeck core — capture, store, preview and re-apply displayplacer
//! arrangements.
//!
//! `Sys` is the entry point: it takes a typed `Command` and returns a
//! `Response`. Everything below it is usable on its own: the `data` parsers
//! are pure functions over `displayplacer list` output, `layout` scales and
//! tracks arrangements, `store` owns the JSON documents, and
//! `infrastructure` runs the executable.

pub mod command;
pub mod data;
pub mod error;
pub mod help;
pub mod infrastructure;
pub mod layout;
pub mod response;
pub mod store;
pub mod sys;
pub mod types;
