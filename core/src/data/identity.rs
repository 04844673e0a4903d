//! Display identity scanner — persistent screen id → `Type:` label.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::profile::DisplayIdentities;

/// Literal header that opens every per-display block in `displayplacer list`.
pub const BLOCK_SEPARATOR: &str = "Persistent screen id:";

static IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*([A-F0-9-]+)").expect("identifier pattern"));

static TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*Type:(.*)$").expect("type pattern"));

/// Map each persistent screen id to the display type reported in its block.
///
/// Blocks missing either capture are skipped. A repeated id keeps the last
/// block's type.
pub fn extract_display_identities(raw: &str) -> DisplayIdentities {
    let mut identities = DisplayIdentities::new();
    for block in raw.split(BLOCK_SEPARATOR).skip(1) {
        if let Some((id, kind)) = parse_block(block) {
            identities.insert(id, kind);
        }
    }
    identities
}

fn parse_block(block: &str) -> Option<(String, String)> {
    let id = IDENT_RE.captures(block)?.get(1)?.as_str().to_string();
    let kind = TYPE_RE.captures(block)?.get(1)?.as_str().trim().to_string();
    Some((id, kind))
}
