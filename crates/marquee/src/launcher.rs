//! External game launching.

use crate::error::ShellError;
use std::path::PathBuf;
use std::process::Command;
use std::sync::Mutex;

/// Placeholder in a system command replaced by the game path.
pub const ROM_PLACEHOLDER: &str = "%ROM%";

/// Everything a launcher needs to start one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// System name
    pub system: String,
    /// System launch command
    pub command: String,
    /// Game path
    pub game: PathBuf,
    /// Game display name
    pub name: String,
}

impl LaunchRequest {
    /// The system command with `%ROM%` replaced by the quoted game path.
    #[must_use]
    pub fn command_line(&self) -> String {
        let quoted = format!("\"{}\"", self.game.display());
        self.command.replace(ROM_PLACEHOLDER, &quoted)
    }
}

/// Runs games. Blocks until the game exits.
pub trait Launcher: Send + Sync {
    /// Launch `request`.
    fn launch(&self, request: &LaunchRequest) -> Result<(), ShellError>;
}

/// Runs the system's command through the shell.
#[derive(Debug, Clone)]
pub struct CommandLauncher {
    shell: String,
}

impl Default for CommandLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandLauncher {
    /// Launcher using `sh -c`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shell: "sh".to_string(),
        }
    }

    /// Use another shell binary.
    #[must_use]
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }
}

impl Launcher for CommandLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<(), ShellError> {
        let failed = |reason: String| ShellError::LaunchFailed {
            game: request.game.clone(),
            reason,
        };
        if request.command.trim().is_empty() {
            return Err(failed(format!("system {} has no launch command", request.system)));
        }

        let line = request.command_line();
        log::info!("launching: {line}");
        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(&line)
            .status()
            .map_err(|e| failed(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(failed(status.to_string()))
        }
    }
}

/// In-memory launcher for testing.
#[derive(Debug, Default)]
pub struct MemoryLauncher {
    launches: Mutex<Vec<LaunchRequest>>,
    fail: bool,
}

impl MemoryLauncher {
    /// Launcher that records every request and succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Launcher that records every request and fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Requests in launch order.
    #[must_use]
    pub fn launches(&self) -> Vec<LaunchRequest> {
        self.launches
            .lock()
            .expect("MemoryLauncher mutex poisoned")
            .clone()
    }

    /// Number of launches.
    #[must_use]
    pub fn launch_count(&self) -> usize {
        self.launches
            .lock()
            .expect("MemoryLauncher mutex poisoned")
            .len()
    }
}

impl Launcher for MemoryLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<(), ShellError> {
        self.launches
            .lock()
            .expect("MemoryLauncher mutex poisoned")
            .push(request.clone());
        if self.fail {
            return Err(ShellError::LaunchFailed {
                game: request.game.clone(),
                reason: "launcher configured to fail".to_string(),
            });
        }
        Ok(())
    }
}
