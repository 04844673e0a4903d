//! Per-display geometry from a single displayplacer argument token.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::profile::{DisplayIdentities, DisplayRect};

/// Name used when a token carries no id or the id has no known type.
pub const FALLBACK_NAME: &str = "Display";

static RES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"res:(\d+)x(\d+)").expect("res pattern"));

static ORIGIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"origin:\((-?\d+),(-?\d+)\)").expect("origin pattern"));

static ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)id:(\S+)").expect("id pattern"));

static DEGREE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"degree:(\d+)").expect("degree pattern"));

/// Parse `res:WxH`, `origin:(X,Y)`, and optional `id:` / `degree:` fragments.
///
/// Fragment order does not matter. Returns `None` unless both `res:` and
/// `origin:` are present and numeric.
pub fn parse_display_rect(token: &str, identities: &DisplayIdentities) -> Option<DisplayRect> {
    let res = RES_RE.captures(token)?;
    let width = res[1].parse::<u32>().ok()?;
    let height = res[2].parse::<u32>().ok()?;

    let origin = ORIGIN_RE.captures(token)?;
    let x = origin[1].parse::<i64>().ok()?;
    let y = origin[2].parse::<i64>().ok()?;

    let id = ID_RE.captures(token).map(|c| c[1].to_string());
    let name = id
        .as_ref()
        .and_then(|id| identities.get(id))
        .cloned()
        .unwrap_or_else(|| FALLBACK_NAME.to_string());
    let degree = DEGREE_RE
        .captures(token)
        .and_then(|c| c[1].parse::<u32>().ok())
        .unwrap_or(0);

    Some(DisplayRect { x, y, width, height, name, id, degree })
}

/// Parse every token, dropping the ones that carry no usable geometry.
pub fn parse_display_rects(arguments: &[String], identities: &DisplayIdentities) -> Vec<DisplayRect> {
    arguments
        .iter()
        .filter_map(|token| {
            let rect = parse_display_rect(token, identities);
            if rect.is_none() {
                log::warn!("skipping display token without geometry: {}", token);
            }
            rect
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identities() -> DisplayIdentities {
        let mut ids = DisplayIdentities::new();
        ids.insert("37D8832A".into(), "MacBook built in screen".into());
        ids
    }

    #[test]
    fn full_token_parses() {
        let token = "id:37D8832A res:1440x900 hz:60 color_depth:4 enabled:true scaling:on origin:(0,0) degree:0";
        let rect = parse_display_rect(token, &identities()).unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (0, 0, 1440, 900));
        assert_eq!(rect.name, "MacBook built in screen");
        assert_eq!(rect.id.as_deref(), Some("37D8832A"));
        assert_eq!(rect.degree, 0);
    }

    #[test]
    fn negative_origin_and_any_order() {
        let token = "origin:(-1920,-300) degree:90 res:1920x1080 id:FFFF";
        let rect = parse_display_rect(token, &identities()).unwrap();
        assert_eq!((rect.x, rect.y), (-1920, -300));
        assert_eq!(rect.degree, 90);
    }

    #[test]
    fn unmapped_id_falls_back() {
        let rect = parse_display_rect("id:FFFF res:800x600 origin:(0,0)", &identities()).unwrap();
        assert_eq!(rect.name, FALLBACK_NAME);
    }

    #[test]
    fn missing_id_falls_back() {
        let rect = parse_display_rect("res:800x600 origin:(10,20)", &identities()).unwrap();
        assert_eq!(rect.name, FALLBACK_NAME);
        assert!(rect.id.is_none());
    }

    #[test]
    fn missing_origin_fails() {
        assert!(parse_display_rect("id:37D8832A res:1440x900", &identities()).is_none());
    }

    #[test]
    fn missing_res_fails() {
        assert!(parse_display_rect("id:37D8832A origin:(0,0)", &identities()).is_none());
    }

    #[test]
    fn non_numeric_fragments_fail() {
        assert!(parse_display_rect("res:widexhigh origin:(0,0)", &identities()).is_none());
        assert!(parse_display_rect("res:10x10 origin:(a,b)", &identities()).is_none());
    }

    #[test]
    fn overflowing_size_fails() {
        assert!(parse_display_rect("res:99999999999x10 origin:(0,0)", &identities()).is_none());
    }

    #[test]
    fn rects_skip_bad_tokens_and_keep_order() {
        let args: Vec<String> = vec![
            "id:37D8832A res:1440x900 origin:(0,0)".into(),
            "garbage".into(),
            "res:1920x1080 origin:(1440,0)".into(),
        ];
        let rects = parse_display_rects(&args, &identities());
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].name, "MacBook built in screen");
        assert_eq!(rects[1].x, 1440);
    }
}
