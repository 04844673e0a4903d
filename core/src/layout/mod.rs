//! Layout management — capture, preview, profile selection, apply timing.
//!
//! The `capture` module turns raw `displayplacer list` output into a
//! saveable arrangement. The `preview` module scales a profile's displays
//! into a bounded canvas. The `targeting` module resolves user selectors to
//! stored profiles. The `timer` module tracks applies that are still settling.

pub mod capture;
pub mod preview;
pub mod targeting;
pub mod timer;
