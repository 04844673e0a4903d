//! Display capture pipeline — parse `displayplacer list`, resolve geometry,
//! compare against the applied arrangement.
//!
//! Wires together the invocation extractor, the identity scanner and the
//! per-token geometry parser to produce a `CaptureResult` that is ready to
//! be saved as a profile.

use serde::Serialize;

use crate::data::identity::extract_display_identities;
use crate::data::invocation::extract_invocation_arguments;
use crate::data::rect::parse_display_rect;
use crate::types::profile::{DisplayIdentities, Profile};


/// One display as seen during capture.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CapturedDisplay {
    pub name: String,
    pub id: Option<String>,
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    pub degree: u32,
}


/// Result of a display capture.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureResult {
    pub arguments: Vec<String>,
    pub identities: DisplayIdentities,
    pub displays: Vec<CapturedDisplay>,
    pub changed: bool,
    pub timestamp_ms: u64,
}


impl CaptureResult {
    /// Turn this capture into a new profile carrying its identities.
    pub fn into_profile(self, name: impl Into<String>) -> Profile {
        Profile::new(name, self.arguments, self.identities)
    }
}


/// Parse raw `displayplacer list` output.
///
/// `previous_arguments` is the argument list of the currently applied
/// profile, if any; `changed` reports whether the live arrangement differs
/// from it. An output with no invocation line still yields a result with an
/// empty argument list.
pub fn capture_displays(
    raw_output: &str,
    previous_arguments: Option<&[String]>,
    now_ms: u64,
) -> CaptureResult {
    // 1. Invocation line -> argument list
    let arguments = extract_invocation_arguments(raw_output);
    // 2. Per-display blocks -> id/type map
    let identities = extract_display_identities(raw_output);
    // 3. Geometry for each argument
    let displays: Vec<CapturedDisplay> = arguments
        .iter()
        .filter_map(|token| parse_display_rect(token, &identities))
        .map(|r| CapturedDisplay {
            name: r.name,
            id: r.id,
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
            degree: r.degree,
        })
        .collect();
    // 4. Compare against what was last applied
    let changed = match previous_arguments {
        Some(prev) => prev != arguments.as_slice(),
        None => true,
    };
    log::debug!(
        "captured {} argument(s), {} identity entr(ies), {} display(s)",
        arguments.len(),
        identities.len(),
        displays.len()
    );
    CaptureResult {
        arguments,
        identities,
        displays,
        changed,
        timestamp_ms: now_ms,
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
Persistent screen id: 37D8832A-2D66-02CA-B9F7-8F30A301B230
Contextual screen id: 1
Type: MacBook built in screen
Resolution: 1440x900

Persistent screen id: A1B2C3D4-0000-1111-2222-333344445555
Contextual screen id: 2
Type: 27 inch external screen
Resolution: 2560x1440

Execute the command below to set your screens to the current arrangement.

displayplacer \"id:37D8832A-2D66-02CA-B9F7-8F30A301B230 res:1440x900 origin:(0,0) degree:0\" \"id:A1B2C3D4-0000-1111-2222-333344445555 res:2560x1440 origin:(-2560,-300) degree:0\"
";

    #[test]
    fn two_display_listing() {
        let result = capture_displays(LISTING, None, 1000);
        assert_eq!(result.arguments.len(), 2);
        assert_eq!(result.identities.len(), 2);
        assert_eq!(result.displays.len(), 2);
        assert_eq!(result.displays[0].name, "MacBook built in screen");
        assert_eq!(result.displays[1].name, "27 inch external screen");
        assert_eq!((result.displays[1].x, result.displays[1].y), (-2560, -300));
        assert!(result.changed);
        assert_eq!(result.timestamp_ms, 1000);
    }

    #[test]
    fn empty_output_is_degenerate_not_error() {
        let result = capture_displays("", None, 1000);
        assert!(result.arguments.is_empty());
        assert!(result.displays.is_empty());
        assert!(result.identities.is_empty());
    }

    #[test]
    fn same_arrangement_is_unchanged() {
        let first = capture_displays(LISTING, None, 1000);
        let second = capture_displays(LISTING, Some(first.arguments.as_slice()), 2000);
        assert!(!second.changed);
    }

    #[test]
    fn different_arrangement_is_changed() {
        let prev = vec!["id:37D8832A-2D66-02CA-B9F7-8F30A301B230 res:1440x900 origin:(0,0) degree:0".to_string()];
        let result = capture_displays(LISTING, Some(prev.as_slice()), 2000);
        assert!(result.changed);
    }

    #[test]
    fn into_profile_keeps_arguments_and_identities() {
        let result = capture_displays(LISTING, None, 1000);
        let args = result.arguments.clone();
        let profile = result.into_profile("Desk");
        assert_eq!(profile.name, "Desk");
        assert_eq!(profile.arguments, args);
        assert_eq!(profile.identities().len(), 2);
    }

    #[test]
    fn capture_serializes_to_json() {
        let result = capture_displays(LISTING, None, 1000);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["displays"].as_array().unwrap().len(), 2);
        assert_eq!(json["changed"], true);
    }
}
