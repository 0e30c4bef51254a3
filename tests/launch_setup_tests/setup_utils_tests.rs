use std::fs::File;
use std::path::PathBuf;

use macropad_launcher::config::LauncherConfig;
use macropad_launcher::launch_setup::setup_utils::{
    CommandSpec, InstallPlan, InstallStep, LaunchSetup,
};
use macropad_launcher::utils::platform::Platform;
use tempfile::tempdir;

const PROJECT_DIR: &str = "/opt/macropad-editor";

#[test]
fn test_default_launch_is_release_show_gui() {
    let setup = LaunchSetup::new("cargo", PROJECT_DIR);
    let cmd = setup.launch_command();
    assert_eq!(cmd.program, "cargo");
    assert_eq!(cmd.args, vec!["run", "--release", "--", "show-gui"]);
    assert_eq!(cmd.cwd, Some(PathBuf::from(PROJECT_DIR)));
}

#[test]
fn test_debug_launch_drops_release_flag() {
    let cmd = LaunchSetup::new("cargo", PROJECT_DIR).with_release(false).launch_command();
    assert_eq!(cmd.args, vec!["run", "--", "show-gui"]);
}

#[test]
fn test_extra_args_follow_subcommand() {
    let cmd = LaunchSetup::new("/home/pad/.cargo/bin/cargo", PROJECT_DIR)
        .with_extra_args(vec!["--theme".to_string(), "dark".to_string()])
        .launch_command();
    assert_eq!(cmd.program, "/home/pad/.cargo/bin/cargo");
    assert_eq!(cmd.args, vec!["run", "--release", "--", "show-gui", "--theme", "dark"]);
}

#[test]
fn test_existing_prebuilt_binary_is_run_directly() {
    let dir = tempdir().unwrap();
    let binary = dir.path().join("macropad-editor");
    File::create(&binary).unwrap();

    let cmd = LaunchSetup::new("cargo", dir.path()).with_binary(&binary).launch_command();
    assert_eq!(cmd.program, binary.to_string_lossy());
    assert_eq!(cmd.args, vec!["show-gui"]);
}

#[test]
fn test_missing_prebuilt_binary_falls_back_to_toolchain() {
    let cmd = LaunchSetup::new("cargo", PROJECT_DIR)
        .with_binary("/nonexistent/macropad-editor")
        .launch_command();
    assert_eq!(cmd.program, "cargo");
}

#[test]
fn test_from_config() {
    let config = LauncherConfig {
        project_dir: PathBuf::from(PROJECT_DIR),
        release: false,
        subcommand: "show-gui".to_string(),
        ..Default::default()
    };
    let setup = LaunchSetup::from_config(&config, "cargo");
    assert!(!setup.is_release());
    assert_eq!(setup.get_toolchain(), "cargo");
    assert_eq!(setup.get_project_dir(), &PathBuf::from(PROJECT_DIR));
}

#[test]
fn test_command_spec_display_quotes_whitespace() {
    let spec = CommandSpec::new("C:\\Program Files\\cargo.exe", ["run", "--", "show gui", ""]);
    assert_eq!(spec.to_string(), "\"C:\\Program Files\\cargo.exe\" run -- \"show gui\" \"\"");
}

#[test]
fn test_elevated_prefixes_sudo() {
    let spec = CommandSpec::new("apt-get", ["install", "-y", "gcc"]).elevated();
    assert_eq!(spec.program, "sudo");
    assert_eq!(spec.args, vec!["apt-get", "install", "-y", "gcc"]);
}

#[test]
fn test_plan_instructions() {
    let mut plan = InstallPlan::new(Platform::Linux);
    plan.push(InstallStep::Command(CommandSpec::new("apt-get", ["install", "-y", "gcc"])));
    plan.push(InstallStep::DownloadAndRun {
        url: "https://sh.rustup.rs".to_string(),
        file_name: "rustup-init.sh".to_string(),
        program: Some("sh".to_string()),
        args: vec!["-y".to_string()],
    });
    plan.push(InstallStep::Manual("reboot".to_string()));

    assert_eq!(
        plan.instructions(),
        vec![
            "run apt-get install -y gcc".to_string(),
            "download https://sh.rustup.rs and run sh rustup-init.sh -y".to_string(),
            "manual: reboot".to_string(),
        ]
    );
}
