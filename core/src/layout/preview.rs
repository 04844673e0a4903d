//! Layout preview — scale a profile's absolute display geometry into a
//! bounded canvas.
//!
//! displayplacer reports origins relative to the main display, so displays
//! left of or above it have negative coordinates. The preview removes that
//! offset, fits the whole arrangement into the target canvas with a single
//! uniform scale, and centers it.

use std::collections::HashMap;

use uuid::Uuid;

use crate::data::rect::parse_display_rects;
use crate::types::profile::{DisplayRect, PreviewRect, Profile};

/// Fit `rects` into `target` (width, height), preserving aspect ratio.
///
/// # Algorithm
///
/// 1. Translate so the minimum x and minimum y become 0.
/// 2. Take the union bounding box of the translated rects.
/// 3. Scale = min(target.w / union.w, target.h / union.h). A zero-length
///    union axis does not constrain the scale; if both are zero the scale is 1.
/// 4. Center the scaled union inside `target`.
///
/// Output order matches input order.
pub fn normalize(rects: &[DisplayRect], target: (f64, f64)) -> Vec<PreviewRect> {
    if rects.is_empty() {
        return Vec::new();
    }

    let min_x = rects.iter().map(|r| r.x).min().unwrap_or(0);
    let min_y = rects.iter().map(|r| r.y).min().unwrap_or(0);

    // Offsets are taken in f64; i64 subtraction overflows on extreme origins.
    let offset = |v: i64, min: i64| v as f64 - min as f64;

    let union_w = rects
        .iter()
        .map(|r| offset(r.x, min_x) + r.width as f64)
        .fold(0.0, f64::max);
    let union_h = rects
        .iter()
        .map(|r| offset(r.y, min_y) + r.height as f64)
        .fold(0.0, f64::max);

    let scale = fit_scale(union_w, union_h, target);
    let offset_x = (target.0 - union_w * scale) / 2.0;
    let offset_y = (target.1 - union_h * scale) / 2.0;

    rects
        .iter()
        .map(|r| PreviewRect {
            name: r.name.clone(),
            x: offset(r.x, min_x) * scale + offset_x,
            y: offset(r.y, min_y) * scale + offset_y,
            width: r.width as f64 * scale,
            height: r.height as f64 * scale,
        })
        .collect()
}

/// Parse a profile's arguments with its saved identities and normalize them.
/// Tokens without geometry are skipped.
pub fn preview_profile(profile: &Profile, target: (f64, f64)) -> Vec<PreviewRect> {
    let rects = parse_display_rects(&profile.arguments, &profile.identities());
    normalize(&rects, target)
}

/// Memoized previews for one preview session (the lifetime of a `Sys`).
///
/// Profiles are immutable, so a preview for a given id and canvas only goes
/// stale when the profile is deleted.
#[derive(Debug, Default)]
pub struct PreviewCache {
    entries: HashMap<(Uuid, u32, u32), Vec<PreviewRect>>,
}

impl PreviewCache {
    pub fn new() -> Self {
        PreviewCache::default()
    }

    /// Return the cached preview, computing it on first request.
    pub fn get_or_build(&mut self, profile: &Profile, width: u32, height: u32) -> &[PreviewRect] {
        self.entries
            .entry((profile.id, width, height))
            .or_insert_with(|| {
                log::debug!("building preview for profile {} at {}x{}", profile.id, width, height);
                preview_profile(profile, (width as f64, height as f64))
            })
    }

    /// Drop a single profile's previews (e.g. after it is deleted).
    pub fn forget(&mut self, id: Uuid) {
        self.entries.retain(|(pid, _, _), _| *pid != id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Largest uniform scale that fits `(w, h)` inside `target`.
fn fit_scale(w: f64, h: f64, target: (f64, f64)) -> f64 {
    match (w > 0.0, h > 0.0) {
        (true, true) => (target.0 / w).min(target.1 / h),
        (true, false) => target.0 / w,
        (false, true) => target.1 / h,
        (false, false) => 1.0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
