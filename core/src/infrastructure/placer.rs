//! displayplacer process plumbing.
//!
//! `DisplayTool` is the seam between the orchestrator and the real
//! executable. `Placer` runs displayplacer; tests substitute a recorder.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::data::invocation::{join_quoted, PLACER_PREFIX};
use crate::error::LaunchError;


/// Anything that can list and apply display arrangements.
pub trait DisplayTool {
    /// Run `list` and return its combined output once the process exits.
    fn capture(&self) -> Result<String, LaunchError>;

    /// Launch the tool with `arguments` without waiting for it to finish.
    fn apply(&self, arguments: &[String]) -> Result<(), LaunchError>;

    /// Where the executable is expected to be.
    fn location(&self) -> &Path;
}


/// The real displayplacer executable.
#[derive(Debug, Clone)]
pub struct Placer {
    path: PathBuf,
    explicit: bool,
}


impl Placer {
    /// Locate displayplacer: an explicit path wins, then a copy bundled next
    /// to the running binary, then whatever `PATH` resolves.
    ///
    /// A bare configured name such as `displayplacer` is still looked up on
    /// `PATH`.
    pub fn locate(configured: Option<&Path>) -> Placer {
        if let Some(path) = configured {
            return Placer {
                path: path.to_path_buf(),
                explicit: path.components().count() > 1,
            };
        }
        let bundled = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(PLACER_PREFIX)))
            .filter(|p| p.is_file());
        match bundled {
            Some(path) => Placer {
                path,
                explicit: true,
            },
            None => Placer {
                path: PathBuf::from(PLACER_PREFIX),
                explicit: false,
            },
        }
    }

    fn command(&self) -> Result<Command, LaunchError> {
        if self.explicit && !self.path.is_file() {
            return Err(LaunchError::NotFound {
                path: self.path.clone(),
            });
        }
        Ok(Command::new(&self.path))
    }

    fn spawn_error(&self, source: std::io::Error) -> LaunchError {
        if source.kind() == std::io::ErrorKind::NotFound {
            LaunchError::NotFound {
                path: self.path.clone(),
            }
        } else {
            LaunchError::Spawn {
                path: self.path.clone(),
                source,
            }
        }
    }
}


impl DisplayTool for Placer {
    fn capture(&self) -> Result<String, LaunchError> {
        log::debug!("running {} list", self.path.display());
        let output = self
            .command()?
            .arg("list")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }

    fn apply(&self, arguments: &[String]) -> Result<(), LaunchError> {
        log::debug!("launching {} with {} argument(s)", self.path.display(), arguments.len());
        let mut child = self
            .command()?
            .args(arguments)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;
        // Reap in the background; the result is informational only.
        std::thread::spawn(move || match child.wait() {
            Ok(status) => log::debug!("displayplacer exited with {}", status),
            Err(e) => log::debug!("failed waiting for displayplacer: {}", e),
        });
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}


/// Builds human-readable displayplacer command lines.
pub struct PlacerCommandBuilder;


impl PlacerCommandBuilder {
    pub fn new() -> Self {
        PlacerCommandBuilder
    }

    /// The command line an apply of `arguments` runs.
    pub fn apply(&self, arguments: &[String]) -> String {
        if arguments.is_empty() {
            return PLACER_PREFIX.to_string();
        }
        format!("{} {}", PLACER_PREFIX, join_quoted(arguments))
    }
}


impl Default for PlacerCommandBuilder {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::invocation::extract_invocation_arguments;

    #[test]
    fn explicit_missing_path_is_not_found() {
        let placer = Placer::locate(Some(Path::new("/nonexistent/dir/displayplacer")));
        match placer.capture() {
            Err(LaunchError::NotFound { path }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/dir/displayplacer"))
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(matches!(
            placer.apply(&["x".to_string()]),
            Err(LaunchError::NotFound { .. })
        ));
    }

    #[test]
    fn configured_path_is_reported() {
        let placer = Placer::locate(Some(Path::new("/opt/displayplacer")));
        assert_eq!(placer.location(), Path::new("/opt/displayplacer"));
        assert!(placer.explicit);
    }

    #[test]
    fn bare_configured_name_defers_to_path_lookup() {
        let placer = Placer::locate(Some(Path::new("displayplacer")));
        assert_eq!(placer.location(), Path::new("displayplacer"));
        assert!(!placer.explicit);
        assert!(placer.command().is_ok());

        let nested = Placer::locate(Some(Path::new("bin/displayplacer")));
        assert!(nested.explicit);
    }

    #[test]
    fn builder_apply_round_trips_through_extractor() {
        let args: Vec<String> = vec![
            "id:AB res:1920x1080 origin:(0,0) degree:0".into(),
            "id:CD res:1280x800 origin:(-1280,0) degree:0".into(),
        ];
        let line = PlacerCommandBuilder::new().apply(&args);
        assert!(line.starts_with("displayplacer \"id:AB"));
        assert_eq!(extract_invocation_arguments(&line), args);
    }

    #[test]
    fn builder_apply_empty() {
        assert_eq!(PlacerCommandBuilder::new().apply(&[]), "displayplacer");
    }

    #[cfg(unix)]
    #[test]
    fn capture_runs_script_and_combines_streams() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("displayplacer");
        std::fs::write(
            &script,
            "#!/bin/sh\necho \"Persistent screen id: AB\"\necho \"warn: $1\" 1>&2\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let placer = Placer::locate(Some(script.as_path()));
        let out = placer.capture().unwrap();
        assert!(out.contains("Persistent screen id: AB"));
        assert!(out.contains("warn: list"));
    }
}
