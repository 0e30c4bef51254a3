use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::launch_setup::setup_utils::CommandSpec;
use crate::utils::platform::Platform;

/// Answers "does this command run?" questions about the host.
pub trait Probe {
    fn command_succeeds(&self, program: &str, args: &[&str]) -> bool;
    fn command_output(&self, program: &str, args: &[&str]) -> Option<String>;
}

/// Probe backed by real process spawns.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl Probe for SystemProbe {
    fn command_succeeds(&self, program: &str, args: &[&str]) -> bool {
        match Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) => status.success(),
            Err(e) => {
                debug!(program, error = %e, "probe failed to spawn");
                false
            }
        }
    }

    fn command_output(&self, program: &str, args: &[&str]) -> Option<String> {
        let output = Command::new(program).args(args).stdin(Stdio::null()).output().ok()?;
        if !output.status.success() {
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    Dnf,
    Yum,
    Zypper,
    Pacman,
    Homebrew,
    Winget,
    Unknown,
}

impl PackageManager {
    pub fn as_str(&self) -> &str {
        match self {
            PackageManager::Apt => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Yum => "yum",
            PackageManager::Zypper => "zypper",
            PackageManager::Pacman => "pacman",
            PackageManager::Homebrew => "brew",
            PackageManager::Winget => "winget",
            PackageManager::Unknown => "unknown",
        }
    }

    /// Picks the first package manager that answers `--version` on this platform.
    pub fn detect(probe: &dyn Probe, platform: &Platform) -> PackageManager {
        let candidates: &[PackageManager] = match platform {
            Platform::Linux => &[
                PackageManager::Apt,
                PackageManager::Dnf,
                PackageManager::Yum,
                PackageManager::Zypper,
                PackageManager::Pacman,
            ],
            Platform::MacOs => &[PackageManager::Homebrew],
            Platform::Windows => &[PackageManager::Winget],
            Platform::Unsupported(_) => &[],
        };
        candidates
            .iter()
            .copied()
            .find(|pm| is_command_available(probe, pm.as_str()))
            .unwrap_or(PackageManager::Unknown)
    }

    /// Native packages the editor needs to build: a C toolchain, pkg-config,
    /// and the udev/libusb headers behind its HID access.
    pub fn system_packages(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Apt => {
                &["build-essential", "pkg-config", "libudev-dev", "libusb-1.0-0-dev"]
            }
            PackageManager::Dnf | PackageManager::Yum => {
                &["gcc", "make", "pkgconf-pkg-config", "systemd-devel", "libusb1-devel"]
            }
            PackageManager::Zypper => {
                &["gcc", "make", "pkg-config", "libudev-devel", "libusb-1_0-devel"]
            }
            PackageManager::Pacman => &["base-devel", "pkgconf", "libusb"],
            PackageManager::Homebrew => &["pkg-config", "libusb"],
            PackageManager::Winget | PackageManager::Unknown => &[],
        }
    }

    /// Package index refresh that has to precede an install. Only apt ships
    /// fresh images without an index.
    pub fn refresh_command(&self) -> Option<CommandSpec> {
        match self {
            PackageManager::Apt => Some(CommandSpec::new(self.as_str(), ["update"])),
            _ => None,
        }
    }

    /// Non-interactive install invocation, or `None` when no manager was found.
    pub fn install_command(&self, packages: &[&str]) -> Option<CommandSpec> {
        let base: &[&str] = match self {
            PackageManager::Apt => &["install", "-y"],
            PackageManager::Dnf | PackageManager::Yum => &["install", "-y"],
            PackageManager::Zypper => &["--non-interactive", "install"],
            PackageManager::Pacman => &["-S", "--needed", "--noconfirm"],
            PackageManager::Homebrew => &["install"],
            PackageManager::Winget => &[
                "install",
                "-e",
                "--accept-source-agreements",
                "--accept-package-agreements",
                "--id",
            ],
            PackageManager::Unknown => return None,
        };
        let mut args: Vec<String> = base.iter().map(|s| s.to_string()).collect();
        args.extend(packages.iter().map(|s| s.to_string()));
        Some(CommandSpec::new(self.as_str(), args))
    }
}

/// A command counts as installed only when `<cmd> --version` exits successfully.
pub fn is_command_available(probe: &dyn Probe, cmd: &str) -> bool {
    probe.command_succeeds(cmd, &["--version"])
}

pub fn is_root(probe: &dyn Probe) -> bool {
    probe.command_output("id", &["-u"]).as_deref() == Some("0")
}

/// Finds an invocable toolchain: on PATH first, then rustup's default
/// `~/.cargo/bin` for shells that have not picked up the new PATH yet.
pub fn locate_toolchain(
    probe: &dyn Probe,
    toolchain: &str,
    home: Option<&Path>,
    platform: &Platform,
) -> Option<String> {
    if is_command_available(probe, toolchain) {
        return Some(toolchain.to_string());
    }
    let home = home?;
    let fallback = home
        .join(".cargo")
        .join("bin")
        .join(format!("{}{}", toolchain, platform.exe_suffix()));
    let fallback = fallback.to_string_lossy().into_owned();
    if is_command_available(probe, &fallback) {
        debug!(path = %fallback, "toolchain found outside PATH");
        Some(fallback)
    } else {
        None
    }
}
