//! Command — the typed interface for all DisplayDeck operations.

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command")]
pub enum Command {
    // -----------------------------------------------------------------
    // Top-level commands
    // -----------------------------------------------------------------

    #[serde(rename = "status")]
    Status,

    #[serde(rename = "help")]
    Help {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        topic: Option<String>,
    },

    // -----------------------------------------------------------------
    // Capture / save
    // -----------------------------------------------------------------

    #[serde(rename = "capture")]
    Capture,

    #[serde(rename = "profile.save")]
    Save {
        name: String,
    },

    // -----------------------------------------------------------------
    // Profile commands
    // -----------------------------------------------------------------

    #[serde(rename = "profile.list")]
    List {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },

    #[serde(rename = "profile.preview")]
    Preview {
        profile: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
    },

    #[serde(rename = "profile.apply")]
    Apply {
        profile: String,
    },

    #[serde(rename = "profile.delete")]
    Delete {
        profile: String,
    },

    #[serde(rename = "profile.applied")]
    Applied,
}
