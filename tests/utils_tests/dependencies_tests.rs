use std::path::Path;
use std::process::Command;

use macropad_launcher::utils::dependencies::{
    is_command_available, is_root, locate_toolchain, PackageManager, SystemProbe,
};
use macropad_launcher::utils::platform::Platform;

use crate::support::FakeProbe;

fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[test]
fn test_package_manager_as_str() {
    assert_eq!(PackageManager::Apt.as_str(), "apt-get");
    assert_eq!(PackageManager::Dnf.as_str(), "dnf");
    assert_eq!(PackageManager::Yum.as_str(), "yum");
    assert_eq!(PackageManager::Zypper.as_str(), "zypper");
    assert_eq!(PackageManager::Pacman.as_str(), "pacman");
    assert_eq!(PackageManager::Homebrew.as_str(), "brew");
    assert_eq!(PackageManager::Winget.as_str(), "winget");
    assert_eq!(PackageManager::Unknown.as_str(), "unknown");
}

#[test]
fn test_detect_prefers_apt_over_others() {
    let probe = FakeProbe::with(&["pacman", "dnf", "apt-get"]);
    assert_eq!(PackageManager::detect(&probe, &Platform::Linux), PackageManager::Apt);
}

#[test]
fn test_detect_order_on_linux() {
    let probe = FakeProbe::with(&["yum", "zypper"]);
    assert_eq!(PackageManager::detect(&probe, &Platform::Linux), PackageManager::Yum);
}

#[test]
fn test_detect_is_platform_specific() {
    let probe = FakeProbe::with(&["apt-get", "brew", "winget"]);
    assert_eq!(PackageManager::detect(&probe, &Platform::MacOs), PackageManager::Homebrew);
    assert_eq!(PackageManager::detect(&probe, &Platform::Windows), PackageManager::Winget);
    assert_eq!(
        PackageManager::detect(&probe, &Platform::Unsupported("haiku".to_string())),
        PackageManager::Unknown
    );
}

#[test]
fn test_detect_unknown_when_nothing_installed() {
    let probe = FakeProbe::default();
    assert_eq!(PackageManager::detect(&probe, &Platform::Linux), PackageManager::Unknown);
}

#[test]
fn test_detect_package_manager_matches_system() {
    if Platform::detect() != Platform::Linux {
        return;
    }
    let detected = PackageManager::detect(&SystemProbe, &Platform::Linux);

    let available = [
        ("apt-get", PackageManager::Apt),
        ("dnf", PackageManager::Dnf),
        ("yum", PackageManager::Yum),
        ("zypper", PackageManager::Zypper),
        ("pacman", PackageManager::Pacman),
    ];

    for (cmd, expected_pm) in &available {
        if command_exists(cmd) {
            assert_eq!(
                detected, *expected_pm,
                "Expected {:?} due to presence of `{}`, but got {:?}",
                expected_pm, cmd, detected
            );
            return;
        }
    }

    assert_eq!(detected, PackageManager::Unknown);
}

#[test]
fn test_install_command_per_manager() {
    let apt = PackageManager::Apt.install_command(&["pkg-config"]).unwrap();
    assert_eq!(apt.to_string(), "apt-get install -y pkg-config");

    let zypper = PackageManager::Zypper.install_command(&["gcc", "make"]).unwrap();
    assert_eq!(zypper.to_string(), "zypper --non-interactive install gcc make");

    let pacman = PackageManager::Pacman.install_command(&["libusb"]).unwrap();
    assert_eq!(pacman.args, vec!["-S", "--needed", "--noconfirm", "libusb"]);

    assert!(PackageManager::Unknown.install_command(&["gcc"]).is_none());
}

#[test]
fn test_system_packages_include_usb_headers() {
    assert!(PackageManager::Apt.system_packages().contains(&"libusb-1.0-0-dev"));
    assert!(PackageManager::Dnf.system_packages().contains(&"libusb1-devel"));
    assert!(PackageManager::Homebrew.system_packages().contains(&"libusb"));
    assert!(PackageManager::Winget.system_packages().is_empty());
}

#[test]
fn test_is_command_available_on_real_system() {
    // Verifies the probe does not panic for a command that cannot exist.
    assert!(!is_command_available(&SystemProbe, "definitely-not-a-real-toolchain"));
}

#[test]
fn test_is_root_reads_id_output() {
    assert!(is_root(&FakeProbe::default().output("id", "0")));
    assert!(!is_root(&FakeProbe::default().output("id", "1000")));
    assert!(!is_root(&FakeProbe::default()));
}

#[test]
fn test_locate_toolchain_on_path() {
    let probe = FakeProbe::with(&["cargo"]);
    let found = locate_toolchain(&probe, "cargo", Some(Path::new("/home/pad")), &Platform::Linux);
    assert_eq!(found.as_deref(), Some("cargo"));
}

#[test]
fn test_locate_toolchain_falls_back_to_cargo_home() {
    let fallback = Path::new("/home/pad").join(".cargo").join("bin").join("cargo");
    let fallback = fallback.to_string_lossy().into_owned();
    let probe = FakeProbe::with(&[fallback.as_str()]);

    let found = locate_toolchain(&probe, "cargo", Some(Path::new("/home/pad")), &Platform::Linux);
    assert_eq!(found, Some(fallback));
}

#[test]
fn test_locate_toolchain_windows_suffix() {
    let fallback = Path::new("C:/Users/pad").join(".cargo").join("bin").join("cargo.exe");
    let fallback = fallback.to_string_lossy().into_owned();
    let probe = FakeProbe::with(&[fallback.as_str()]);

    let home = Path::new("C:/Users/pad");
    let found = locate_toolchain(&probe, "cargo", Some(home), &Platform::Windows);
    assert_eq!(found, Some(fallback));
}

#[test]
fn test_locate_toolchain_missing() {
    let probe = FakeProbe::default();
    let home = Path::new("/home/pad");
    assert!(locate_toolchain(&probe, "cargo", Some(home), &Platform::Linux).is_none());
    assert!(locate_toolchain(&probe, "cargo", None, &Platform::Linux).is_none());
}
