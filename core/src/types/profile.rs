//! Profile and display geometry types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;


/// Persistent screen id → human-readable display type.
pub type DisplayIdentities = BTreeMap<String, String>;


/// A saved display arrangement.
///
/// `arguments` is the exact argv handed back to displayplacer when the
/// profile is applied; its order matches the tool's own output and must not
/// be rearranged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub arguments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_identity: Option<DisplayIdentities>,
}


impl Profile {
    /// Create a profile with a fresh id.
    pub fn new(name: impl Into<String>, arguments: Vec<String>, identities: DisplayIdentities) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            name: name.into(),
            arguments,
            display_identity: if identities.is_empty() { None } else { Some(identities) },
        }
    }

    /// Identity map captured at save time, empty for profiles saved without one.
    pub fn identities(&self) -> DisplayIdentities {
        self.display_identity.clone().unwrap_or_default()
    }

    /// One argument per display.
    pub fn display_count(&self) -> usize {
        self.arguments.len()
    }
}


/// Absolute geometry of one display, as parsed from a displayplacer token.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    pub name: String,
    pub id: Option<String>,
    pub degree: u32,
}


/// A display scaled into preview space.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PreviewRect {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}
