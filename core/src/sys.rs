use uuid::Uuid;

use crate::command::Command;
use crate::infrastructure::placer::{DisplayTool, Placer, PlacerCommandBuilder};
use crate::layout::capture::{capture_displays, CaptureResult};
use crate::layout::preview::PreviewCache;
use crate::layout::targeting;
use crate::layout::timer::{self, ApplyTimer};
use crate::response::Response;
use crate::store::ProfileStore;
use crate::types::config::DeckSettings;
use crate::types::profile::Profile;


/// Central runtime for DisplayDeck. Dispatches capture, profile and preview
/// commands against the store and the display tool.
pub struct Sys {
    settings: DeckSettings,
    store: ProfileStore,
    tool: Box<dyn DisplayTool>,
    pending: Option<CaptureResult>,
    previews: PreviewCache,
    timer: ApplyTimer,
    clock: fn() -> u64,
}


impl Sys {
    /// Runtime backed by the real displayplacer executable.
    pub fn new(settings: DeckSettings) -> Sys {
        let tool = Placer::locate(settings.placer_path.as_deref());
        Sys::with_tool(settings, Box::new(tool))
    }

    /// Runtime backed by any `DisplayTool`.
    pub fn with_tool(settings: DeckSettings, tool: Box<dyn DisplayTool>) -> Sys {
        let store = ProfileStore::new(settings.data_dir.clone());
        let timer = ApplyTimer::new(settings.apply_settle_ms);
        Sys {
            settings,
            store,
            tool,
            pending: None,
            previews: PreviewCache::new(),
            timer,
            clock: timer::now_ms,
        }
    }

    /// Replace the wall clock (milliseconds since epoch).
    pub fn with_clock(mut self, clock: fn() -> u64) -> Sys {
        self.clock = clock;
        self
    }

    /// Return a reference to the current settings.
    pub fn settings(&self) -> &DeckSettings {
        &self.settings
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Capture waiting to be saved, if any.
    pub fn pending_capture(&self) -> Option<&CaptureResult> {
        self.pending.as_ref()
    }

    /// True while a recent apply is still inside its settle window.
    pub fn is_applying(&self) -> bool {
        self.timer.is_applying((self.clock)())
    }

    /// Milliseconds until every recent apply has settled.
    pub fn apply_remaining_ms(&self) -> u64 {
        self.timer.remaining_ms((self.clock)())
    }

    /// The single dispatch method.
    pub fn execute(&mut self, cmd: Command) -> Response {
        let now = (self.clock)();
        self.timer.clear_settled(now);
        match cmd {
            Command::Status => self.cmd_status(now),
            Command::Help { topic } => self.cmd_help(topic),
            Command::Capture => self.cmd_capture(now),
            Command::Save { name } => self.cmd_save(name, now),
            Command::List { format } => self.cmd_list(format),
            Command::Preview { profile, width, height } => self.cmd_preview(profile, width, height),
            Command::Apply { profile } => self.cmd_apply(profile, now),
            Command::Delete { profile } => self.cmd_delete(profile),
            Command::Applied => self.cmd_applied(),
        }
    }

    // -----------------------------------------------------------------------
    // Status / Help
    // -----------------------------------------------------------------------

    fn cmd_status(&self, now: u64) -> Response {
        let profiles = self.store.load();
        let applied = match self.store.load_applied_id() {
            Some(id) => match profiles.iter().find(|p| p.id == id) {
                Some(p) => format!("{} ({})", p.name, p.id),
                None => format!("{} (missing)", id),
            },
            None => "none".to_string(),
        };
        let applying = if self.timer.is_applying(now) {
            format!("yes ({} ms left)", self.timer.remaining_ms(now))
        } else {
            format!("no (settle window {} ms)", self.timer.settle_ms())
        };
        Response::ok(format!(
            "DisplayDeck status\n  data dir:  {}\n  tool:      {}\n  profiles:  {}\n  applied:   {}\n  applying:  {}",
            self.store.dir().display(),
            self.tool.location().display(),
            profiles.len(),
            applied,
            applying,
        ))
    }

    fn cmd_help(&self, topic: Option<String>) -> Response {
        Response::ok(crate::help::help_text(topic.as_deref()))
    }

    // -----------------------------------------------------------------------
    // Capture / Save
    // -----------------------------------------------------------------------

    fn cmd_capture(&mut self, now: u64) -> Response {
        self.pending = None;
        let result = match self.run_capture(now) {
            Ok(r) => r,
            Err(message) => return Response::error(message),
        };
        let output = serde_json::json!({
            "arguments": result.arguments,
            "identities": result.identities,
            "displays": result.displays,
            "matches_applied": !result.changed,
            "captured_at_ms": result.timestamp_ms,
            "command": PlacerCommandBuilder::new().apply(&result.arguments),
        });
        self.pending = Some(result);
        Response::ok(pretty(&output))
    }

    fn cmd_save(&mut self, name: String, now: u64) -> Response {
        let name = name.trim();
        if name.is_empty() {
            return Response::error("profile name must not be empty");
        }
        let capture = match self.pending.take() {
            Some(c) => c,
            None => match self.run_capture(now) {
                Ok(c) => c,
                Err(message) => return Response::error(message),
            },
        };
        if capture.arguments.is_empty() {
            log::warn!("saving profile '{}' with no display arguments", name);
        }
        let profile = capture.into_profile(name);
        match self.store.save(profile.clone()) {
            Ok(_) => Response::ok(pretty(&profile)),
            Err(e) => Response::error(format!("profile '{}' not saved: {}", name, e)),
        }
    }

    fn run_capture(&self, now: u64) -> Result<CaptureResult, String> {
        let raw = self.tool.capture().map_err(|e| e.to_string())?;
        let previous = self.applied_profile().map(|p| p.arguments);
        Ok(capture_displays(&raw, previous.as_deref(), now))
    }

    // -----------------------------------------------------------------------
    // Profile commands
    // -----------------------------------------------------------------------

    fn cmd_list(&self, format: Option<String>) -> Response {
        let profiles = self.store.load();
        let applied = self.store.load_applied_id();

        if format.as_deref() == Some("json") {
            let rows: Vec<serde_json::Value> = profiles
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "id": p.id,
                        "name": p.name,
                        "displays": p.display_count(),
                        "applied": Some(p.id) == applied,
                    })
                })
                .collect();
            return Response::ok(serde_json::Value::Array(rows).to_string());
        }

        if profiles.is_empty() {
            return Response::ok("No saved profiles.");
        }
        let lines: Vec<String> = profiles
            .iter()
            .map(|p| {
                let marker = if Some(p.id) == applied { '*' } else { ' ' };
                format!(
                    "{} {}  {}  ({} display{})",
                    marker,
                    p.id,
                    p.name,
                    p.display_count(),
                    if p.display_count() == 1 { "" } else { "s" }
                )
            })
            .collect();
        Response::ok(lines.join("\n"))
    }

    fn cmd_preview(&mut self, selector: String, width: Option<u32>, height: Option<u32>) -> Response {
        let profile = match self.select(&selector) {
            Ok(p) => p,
            Err(message) => return Response::error(message),
        };
        let width = width.unwrap_or(self.settings.preview_width);
        let height = height.unwrap_or(self.settings.preview_height);
        let displays = self.previews.get_or_build(&profile, width, height).to_vec();
        let output = serde_json::json!({
            "profile": { "id": profile.id, "name": profile.name },
            "width": width,
            "height": height,
            "displays": displays,
            "command": PlacerCommandBuilder::new().apply(&profile.arguments),
        });
        Response::ok(pretty(&output))
    }

    fn cmd_apply(&mut self, selector: String, now: u64) -> Response {
        let profile = match self.select(&selector) {
            Ok(p) => p,
            Err(message) => return Response::error(message),
        };
        if let Err(e) = self.tool.apply(&profile.arguments) {
            return Response::error(e.to_string());
        }
        log::info!("applied profile '{}' ({})", profile.name, profile.id);
        match self.store.save_applied_id(Some(profile.id)) {
            Ok(_) => {
                self.timer.record_apply(profile.id, now);
                Response::ok(format!("Applied profile '{}' ({})", profile.name, profile.id))
            }
            Err(e) => Response::error(format!(
                "profile '{}' launched but not marked applied: {}",
                profile.name, e
            )),
        }
    }

    fn cmd_delete(&mut self, selector: String) -> Response {
        let profile = match self.select(&selector) {
            Ok(p) => p,
            Err(message) => return Response::error(message),
        };
        let was_applied = self.store.load_applied_id() == Some(profile.id);
        match self.store.delete(profile.id) {
            Ok(_) => {
                self.previews.forget(profile.id);
                let suffix = if was_applied { "; applied marker cleared" } else { "" };
                Response::ok(format!("Deleted profile '{}' ({}){}", profile.name, profile.id, suffix))
            }
            Err(e) => Response::error(format!("profile '{}' not deleted: {}", profile.name, e)),
        }
    }

    fn cmd_applied(&self) -> Response {
        let id = match self.store.load_applied_id() {
            Some(id) => id,
            None => return Response::ok("none"),
        };
        match self.store.load().into_iter().find(|p| p.id == id) {
            Some(p) => Response::ok(format!("{} ({})", p.name, p.id)),
            None => {
                // Marker outlived its profile.
                if let Err(e) = self.store.save_applied_id(None) {
                    log::warn!("failed to clear stale applied marker {}: {}", id, e);
                }
                Response::ok("none")
            }
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn select(&self, selector: &str) -> Result<Profile, String> {
        let profiles = self.store.load();
        targeting::resolve(selector, &profiles).cloned()
    }

    fn applied_profile(&self) -> Option<Profile> {
        let id: Uuid = self.store.load_applied_id()?;
        self.store.load().into_iter().find(|p| p.id == id)
    }
}


fn pretty(value: &impl serde::Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
