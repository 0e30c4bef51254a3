//! Toolchain installation on macOS.

use tracing::warn;

use crate::config::InstallerConfig;
use crate::launch_setup::linux_setup::rustup_script_step;
use crate::launch_setup::setup_utils::{CommandSpec, InstallPlan, InstallStep};
use crate::utils::dependencies::{PackageManager, Probe};
use crate::utils::platform::Platform;

const HOMEBREW_HINT: &str =
    "install Homebrew from https://brew.sh, then run `brew install pkg-config libusb`";

/// Builds the macOS install plan.
///
/// The Xcode command line tools provide the linker; Homebrew, when present,
/// provides libusb and pkg-config.
pub fn install_plan(
    probe: &dyn Probe,
    pm: PackageManager,
    installer: &InstallerConfig,
) -> InstallPlan {
    let mut plan = InstallPlan::new(Platform::MacOs);

    if !probe.command_succeeds("xcode-select", &["-p"]) {
        plan.push(InstallStep::Command(CommandSpec::new("xcode-select", ["--install"])));
    }

    if installer.install_system_packages {
        match pm {
            PackageManager::Homebrew => {
                if let Some(cmd) = pm.install_command(pm.system_packages()) {
                    plan.push(InstallStep::Command(cmd));
                }
            }
            _ => {
                warn!("Homebrew not found");
                plan.push(InstallStep::Manual(HOMEBREW_HINT.to_string()));
            }
        }
    }

    plan.push(rustup_script_step(installer));
    plan
}
