pub mod linux_setup;
pub mod macos_setup;
pub mod setup_utils;
pub mod windows_setup;

use crate::config::InstallerConfig;
use crate::error::{LauncherError, Result};
use crate::utils::dependencies::{PackageManager, Probe};
use crate::utils::platform::{Architecture, Platform};
use setup_utils::InstallPlan;

/// Builds the install plan for `platform`, detecting its package manager.
pub fn install_plan_for(
    platform: &Platform,
    probe: &dyn Probe,
    arch: Architecture,
    installer: &InstallerConfig,
) -> Result<InstallPlan> {
    let pm = PackageManager::detect(probe, platform);
    match platform {
        Platform::Linux => Ok(linux_setup::install_plan(probe, pm, installer)),
        Platform::MacOs => Ok(macos_setup::install_plan(probe, pm, installer)),
        Platform::Windows => Ok(windows_setup::install_plan(pm, arch, installer)),
        Platform::Unsupported(os) => Err(LauncherError::UnsupportedPlatform(os.clone())),
    }
}
