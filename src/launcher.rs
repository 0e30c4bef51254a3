//! Starts the editor and waits for it.

use tokio::process::Command;
use tracing::{info, warn};

use crate::error::{LauncherError, Result};
use crate::launch_setup::setup_utils::CommandSpec;

/// Exit status reported when the launch is interrupted with Ctrl-C.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Asynchronously runs the editor described by `spec`.
///
/// # Returns
/// * `Ok(code)` with the editor's exit code, 1 if it died from a signal, or
///   `INTERRUPTED_EXIT_CODE` after Ctrl-C.
/// * `Err(LauncherError::CommandSpawn)` if the process could not be started.
pub async fn launch(spec: &CommandSpec) -> Result<i32> {
    info!(command = %spec, "launching");
    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args).kill_on_drop(true);
    if let Some(cwd) = &spec.cwd {
        cmd.current_dir(cwd);
    }

    let mut child = cmd.spawn().map_err(|source| LauncherError::CommandSpawn {
        command: spec.to_string(),
        source,
    })?;

    tokio::select! {
        status = child.wait() => {
            let status = status?;
            let code = status.code().unwrap_or(1);
            info!(code, "editor exited");
            Ok(code)
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted, stopping editor");
            child.kill().await?;
            Ok(INTERRUPTED_EXIT_CODE)
        }
    }
}
