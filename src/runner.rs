//! Executes install plans.

use std::process::Command;

use tempfile::TempDir;
use tracing::{info, warn};

use crate::error::{LauncherError, Result};
use crate::launch_setup::setup_utils::{CommandSpec, InstallPlan, InstallStep};
use crate::utils::downloads::Downloader;

pub trait CommandRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<()>;
}

/// Runs commands in the foreground with inherited stdio, so installers can prompt.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<()> {
        info!(command = %spec, "running");
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }
        let status = cmd.status().map_err(|source| LauncherError::CommandSpawn {
            command: spec.to_string(),
            source,
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(LauncherError::CommandFailed { command: spec.to_string(), code: status.code() })
        }
    }
}

/// Records commands instead of running them.
#[derive(Debug, Default)]
pub struct DryRunRunner {
    pub executed: Vec<CommandSpec>,
}

impl CommandRunner for DryRunRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<()> {
        info!(command = %spec, "dry run");
        self.executed.push(spec.clone());
        Ok(())
    }
}

/// Runs every step of `plan` in order, stopping at the first failure.
///
/// # Returns
/// * `Ok(manual)` with the instructions of `Manual` steps, which cannot be automated.
/// * `Err(..)` from the first failing download or command.
pub fn execute_plan(
    plan: &InstallPlan,
    runner: &mut dyn CommandRunner,
    downloader: &dyn Downloader,
) -> Result<Vec<String>> {
    let mut manual = Vec::new();
    for step in &plan.steps {
        match step {
            InstallStep::Command(spec) => runner.run(spec)?,
            InstallStep::DownloadAndRun { url, file_name, program, args } => {
                // Kept alive until the installer has exited.
                let scratch = TempDir::new()?;
                let path = downloader.download(url, scratch.path(), file_name)?;
                let path = path.to_string_lossy().into_owned();
                let spec = match program {
                    Some(program) => {
                        let mut full_args = vec![path];
                        full_args.extend(args.iter().cloned());
                        CommandSpec::new(program.clone(), full_args)
                    }
                    None => CommandSpec::new(path, args.clone()),
                };
                runner.run(&spec)?;
            }
            InstallStep::Manual(text) => {
                warn!("manual step required: {}", text);
                manual.push(text.clone());
            }
        }
    }
    Ok(manual)
}
