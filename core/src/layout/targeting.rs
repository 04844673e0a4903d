//! Profile selector — resolve a user-supplied string to one stored profile.
//!
//! Accepts, in order of precedence:
//!
//! - **Full id:** the profile's UUID, in any letter case.
//! - **Name:** an exact profile name, if exactly one profile carries it.
//! - **Id prefix:** the leading characters of an id (e.g. `6f96`), if they
//!   identify exactly one profile.

use crate::types::profile::Profile;

/// Shortest id prefix accepted, so a stray digit doesn't select something.
pub const MIN_PREFIX_LEN: usize = 4;

/// Resolve `selector` against `profiles`.
///
/// # Returns
///
/// The matching profile or a message explaining why nothing (or more than
/// one thing) matched.
pub fn resolve<'a>(selector: &str, profiles: &'a [Profile]) -> Result<&'a Profile, String> {
    let trimmed = selector.trim();
    if trimmed.is_empty() {
        return Err("empty profile selector".to_string());
    }

    let lowered = trimmed.to_ascii_lowercase();

    if let Some(p) = profiles.iter().find(|p| p.id.to_string() == lowered) {
        return Ok(p);
    }

    let by_name: Vec<&Profile> = profiles.iter().filter(|p| p.name == trimmed).collect();
    match by_name.len() {
        1 => return Ok(by_name[0]),
        0 => {}
        n => {
            return Err(format!(
                "{} profiles are named '{}'; select one by id",
                n, trimmed
            ))
        }
    }

    if lowered.len() >= MIN_PREFIX_LEN {
        let by_prefix: Vec<&Profile> = profiles
            .iter()
            .filter(|p| p.id.to_string().starts_with(&lowered))
            .collect();
        match by_prefix.len() {
            1 => return Ok(by_prefix[0]),
            0 => {}
            n => {
                return Err(format!(
                    "id prefix '{}' is ambiguous ({} profiles match)",
                    trimmed, n
                ))
            }
        }
    }

    Err(format!("no profile matches '{}'", trimmed))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
