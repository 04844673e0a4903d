//! Token parser — pure scanners over `displayplacer list` output.
//!
//! `invocation` pulls the ready-made `displayplacer ...` command line out of
//! the listing and splits it into arguments. `identity` maps persistent
//! screen ids to their `Type:` labels. `rect` turns one argument token into
//! display geometry.

pub mod identity;
pub mod invocation;
pub mod rect;
