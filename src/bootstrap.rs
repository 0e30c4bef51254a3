//! Toolchain check, optional install, and launch preparation.
//!
//! The application is only ever launched from a run that found the toolchain
//! already present. A run that had to install it stops afterwards, since the
//! current shell's PATH does not include the new toolchain yet.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::LauncherConfig;
use crate::error::{LauncherError, Result};
use crate::launch_setup::install_plan_for;
use crate::launch_setup::setup_utils::{CommandSpec, InstallPlan, LaunchSetup};
use crate::mapping::Mapping;
use crate::runner::{execute_plan, CommandRunner};
use crate::utils::dependencies::{locate_toolchain, Probe};
use crate::utils::downloads::Downloader;
use crate::utils::platform::{Architecture, Platform};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The toolchain is present; issue this command to start the editor.
    Ready(CommandSpec),
    /// The toolchain is missing and this run installed nothing.
    MissingToolchain { instructions: Vec<String> },
    /// The toolchain was just installed; steps left for the user are listed.
    Installed { manual_steps: Vec<String> },
}

pub struct Bootstrap<'a> {
    config: &'a LauncherConfig,
    platform: Platform,
    arch: Architecture,
    home: Option<PathBuf>,
    dry_run: bool,
}

impl<'a> Bootstrap<'a> {
    pub fn new(
        config: &'a LauncherConfig,
        platform: Platform,
        arch: Architecture,
        home: Option<PathBuf>,
    ) -> Self {
        Self { config, platform, arch, home, dry_run: false }
    }

    /// A dry run reports the install plan instead of executing it.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Bootstrap for the running host.
    pub fn for_host(config: &'a LauncherConfig) -> Self {
        Self::new(config, Platform::detect(), Architecture::detect(), dirs::home_dir())
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn locate_toolchain(&self, probe: &dyn Probe) -> Option<String> {
        locate_toolchain(probe, &self.config.toolchain, self.home.as_deref(), &self.platform)
    }

    pub fn install_plan(&self, probe: &dyn Probe) -> Result<InstallPlan> {
        install_plan_for(&self.platform, probe, self.arch, &self.config.installer)
    }

    /// Installs the toolchain whether or not it is already present.
    pub fn install(
        &self,
        probe: &dyn Probe,
        runner: &mut dyn CommandRunner,
        downloader: &dyn Downloader,
    ) -> Result<Vec<String>> {
        let plan = self.install_plan(probe)?;
        self.run_plan(&plan, runner, downloader)
    }

    fn run_plan(
        &self,
        plan: &InstallPlan,
        runner: &mut dyn CommandRunner,
        downloader: &dyn Downloader,
    ) -> Result<Vec<String>> {
        info!(
            platform = self.platform.as_str(),
            steps = plan.steps.len(),
            "executing install plan"
        );
        execute_plan(plan, runner, downloader)
    }

    /// Decides what this run does: launch, install, or report.
    pub fn prepare(
        &self,
        probe: &dyn Probe,
        runner: &mut dyn CommandRunner,
        downloader: &dyn Downloader,
    ) -> Result<Outcome> {
        let Some(toolchain) = self.locate_toolchain(probe) else {
            warn!(toolchain = %self.config.toolchain, "toolchain not found");
            let plan = match self.install_plan(probe) {
                Ok(plan) => plan,
                Err(LauncherError::UnsupportedPlatform(os)) => {
                    warn!(%os, "no installer for this platform");
                    let instructions = vec![format!(
                        "install {} from https://rustup.rs and make sure it is on PATH",
                        self.config.toolchain
                    )];
                    return Ok(Outcome::MissingToolchain { instructions });
                }
                Err(e) => return Err(e),
            };
            if !self.config.auto_install || self.dry_run {
                return Ok(Outcome::MissingToolchain { instructions: plan.instructions() });
            }
            let manual_steps = self.run_plan(&plan, runner, downloader)?;
            return Ok(Outcome::Installed { manual_steps });
        };

        info!(%toolchain, "toolchain found");
        if self.config.validate_mapping {
            self.check_mapping();
        }
        let setup = LaunchSetup::from_config(self.config, toolchain);
        Ok(Outcome::Ready(setup.launch_command()))
    }

    /// Mapping problems are reported, never fatal: the editor is where they get fixed.
    fn check_mapping(&self) {
        let path = self.config.mapping_path();
        if !path.exists() {
            return;
        }
        match Mapping::read(&path).and_then(|cfg| Mapping::validate(&cfg, None)) {
            Ok(()) => info!(path = %path.display(), "mapping ok"),
            Err(e) => warn!(path = %path.display(), error = %e, "mapping has problems"),
        }
    }
}
