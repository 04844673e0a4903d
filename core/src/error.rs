//! Error types for DisplayDeck.
//!
//! Parse misses are not errors: the token parser reports them as empty
//! vectors or `None`. Everything that can actually fail (launching the
//! display tool, writing the profile store, reading settings) has its own
//! enum here.

use std::path::PathBuf;

use thiserror::Error;


/// The display tool could not be located or started.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("displayplacer not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to launch {}: {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}


/// A profile store document could not be written.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile store I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode profile store document: {0}")]
    Encode(#[from] serde_json::Error),
}


/// The settings file exists but cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_not_found_names_path() {
        let err = LaunchError::NotFound {
            path: PathBuf::from("/opt/bin/displayplacer"),
        };
        assert_eq!(err.to_string(), "displayplacer not found at /opt/bin/displayplacer");
    }

    #[test]
    fn store_io_keeps_source() {
        let err = StoreError::Io {
            path: PathBuf::from("/tmp/profiles.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/profiles.json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
