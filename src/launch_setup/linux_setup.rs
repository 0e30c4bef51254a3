//! Toolchain installation on Linux.
//!
//! Native build dependencies come from the distribution's package manager,
//! the Rust toolchain itself from the rustup shell installer.

use tracing::warn;

use crate::config::InstallerConfig;
use crate::launch_setup::setup_utils::{CommandSpec, InstallPlan, InstallStep};
use crate::utils::dependencies::{is_root, PackageManager, Probe};
use crate::utils::platform::Platform;

/// Builds the Linux install plan.
///
/// # Arguments
/// * `probe` - Used to decide whether package installs need `sudo`.
/// * `pm` - Detected package manager.
/// * `installer` - Installer URLs and switches from config.
pub fn install_plan(
    probe: &dyn Probe,
    pm: PackageManager,
    installer: &InstallerConfig,
) -> InstallPlan {
    let mut plan = InstallPlan::new(Platform::Linux);

    if installer.install_system_packages {
        let packages = pm.system_packages();
        match pm.install_command(packages) {
            Some(cmd) if !packages.is_empty() => {
                let root = is_root(probe);
                let elevate = |cmd: CommandSpec| if root { cmd } else { cmd.elevated() };
                if let Some(refresh) = pm.refresh_command() {
                    plan.push(InstallStep::Command(elevate(refresh)));
                }
                plan.push(InstallStep::Command(elevate(cmd)));
            }
            _ => {
                warn!("no supported package manager found, install native dependencies by hand");
                plan.push(InstallStep::Manual(
                    "install a C compiler, pkg-config, and the libudev and libusb headers"
                        .to_string(),
                ));
            }
        }
    }

    plan.push(rustup_script_step(installer));
    plan
}

/// Download-and-run step for the `sh.rustup.rs` installer, shared with macOS.
pub(crate) fn rustup_script_step(installer: &InstallerConfig) -> InstallStep {
    InstallStep::DownloadAndRun {
        url: installer.rustup_sh_url.clone(),
        file_name: "rustup-init.sh".to_string(),
        program: Some("sh".to_string()),
        args: vec!["-y".to_string()],
    }
}
