//! Profile store — `profiles.json` plus the `applied_profile.json` marker.
//!
//! Every operation reads and rewrites the whole document. Mutations return
//! the new on-disk state so callers never keep a stale copy. Writes go
//! through a sibling temp file and a rename, so a reader sees either the old
//! document or the new one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::profile::Profile;

pub const PROFILES_FILE: &str = "profiles.json";
pub const APPLIED_FILE: &str = "applied_profile.json";


#[derive(Debug, Serialize, Deserialize)]
struct AppliedDocument {
    #[serde(rename = "appliedProfileID")]
    applied_profile_id: String,
}


/// File-backed profile storage rooted at one application directory.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}


impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> ProfileStore {
        ProfileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn profiles_path(&self) -> PathBuf {
        self.dir.join(PROFILES_FILE)
    }

    pub fn applied_path(&self) -> PathBuf {
        self.dir.join(APPLIED_FILE)
    }

    /// All profiles in save order. A missing or unreadable document yields
    /// an empty list.
    pub fn load(&self) -> Vec<Profile> {
        let path = self.profiles_path();
        let text = match std::fs::read_to_string(&path) {
            Ok(t) => t,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str::<Vec<Profile>>(&text) {
            Ok(profiles) => profiles,
            Err(e) => {
                log::warn!("ignoring unreadable {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    /// Append `profile` and rewrite the document.
    pub fn save(&self, profile: Profile) -> Result<Vec<Profile>, StoreError> {
        let mut profiles = self.load();
        log::info!("saving profile '{}' ({})", profile.name, profile.id);
        profiles.push(profile);
        self.write_json(&self.profiles_path(), &profiles)?;
        Ok(profiles)
    }

    /// Remove every profile with `id`. Clears the applied marker when it
    /// pointed at the removed profile.
    pub fn delete(&self, id: Uuid) -> Result<Vec<Profile>, StoreError> {
        let mut profiles = self.load();
        let before = profiles.len();
        profiles.retain(|p| p.id != id);
        log::info!("deleting profile {} ({} removed)", id, before - profiles.len());
        self.write_json(&self.profiles_path(), &profiles)?;

        if self.load_applied_id() == Some(id) {
            self.save_applied_id(None)?;
        }
        Ok(profiles)
    }

    /// Id of the last applied profile, if recorded and well-formed.
    pub fn load_applied_id(&self) -> Option<Uuid> {
        let text = std::fs::read_to_string(self.applied_path()).ok()?;
        let doc: AppliedDocument = match serde_json::from_str(&text) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("ignoring unreadable {}: {}", APPLIED_FILE, e);
                return None;
            }
        };
        Uuid::parse_str(&doc.applied_profile_id).ok()
    }

    /// Record (`Some`) or clear (`None`) the applied profile. Clearing
    /// removes the file.
    pub fn save_applied_id(&self, id: Option<Uuid>) -> Result<Option<Uuid>, StoreError> {
        let path = self.applied_path();
        match id {
            Some(id) => {
                let doc = AppliedDocument {
                    applied_profile_id: id.to_string(),
                };
                self.write_json(&path, &doc)?;
            }
            None => match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => return Err(StoreError::Io { path, source }),
            },
        }
        Ok(id)
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let bytes = serde_json::to_vec_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
