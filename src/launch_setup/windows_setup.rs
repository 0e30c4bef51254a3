use crate::config::InstallerConfig;
use crate::launch_setup::setup_utils::{InstallPlan, InstallStep};
use crate::utils::dependencies::PackageManager;
use crate::utils::platform::{Architecture, Platform};

pub const RUSTUP_WINGET_ID: &str = "Rustlang.Rustup";

/// Builds the Windows install plan: winget when available, otherwise the
/// architecture-specific `rustup-init.exe`.
pub fn install_plan(
    pm: PackageManager,
    arch: Architecture,
    installer: &InstallerConfig,
) -> InstallPlan {
    let mut plan = InstallPlan::new(Platform::Windows);

    if pm == PackageManager::Winget {
        if let Some(cmd) = pm.install_command(&[RUSTUP_WINGET_ID]) {
            plan.push(InstallStep::Command(cmd));
            return plan;
        }
    }

    match arch.windows_triple() {
        Some(triple) => plan.push(InstallStep::DownloadAndRun {
            url: format!(
                "{}/{}/rustup-init.exe",
                installer.rustup_init_base_url.trim_end_matches('/'),
                triple
            ),
            file_name: "rustup-init.exe".to_string(),
            program: None,
            args: vec!["-y".to_string()],
        }),
        None => plan.push(InstallStep::Manual(
            "no rustup-init build for this architecture, see https://rustup.rs".to_string(),
        )),
    }
    plan
}
