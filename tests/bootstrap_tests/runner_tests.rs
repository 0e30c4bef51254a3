use macropad_launcher::launch_setup::setup_utils::{CommandSpec, InstallPlan, InstallStep};
use macropad_launcher::runner::{execute_plan, CommandRunner, DryRunRunner, SystemRunner};
use macropad_launcher::utils::platform::Platform;
use macropad_launcher::LauncherError;

use crate::support::{PathDownloader, RecordingRunner};

fn plan(steps: Vec<InstallStep>) -> InstallPlan {
    InstallPlan { platform: Platform::Linux, steps }
}

#[test]
fn test_runs_steps_in_order_and_collects_manual() {
    let plan = plan(vec![
        InstallStep::Command(CommandSpec::new("apt-get", ["install", "-y", "gcc"])),
        InstallStep::Manual("log out and back in".to_string()),
        InstallStep::DownloadAndRun {
            url: "https://sh.rustup.rs".to_string(),
            file_name: "rustup-init.sh".to_string(),
            program: Some("sh".to_string()),
            args: vec!["-y".to_string()],
        },
    ]);
    let mut runner = RecordingRunner::default();

    let manual = execute_plan(&plan, &mut runner, &PathDownloader).unwrap();

    assert_eq!(manual, vec!["log out and back in".to_string()]);
    assert_eq!(runner.executed.len(), 2);
    assert_eq!(runner.executed[0].program, "apt-get");
    let installer = &runner.executed[1];
    assert_eq!(installer.program, "sh");
    assert!(installer.args[0].ends_with("rustup-init.sh"));
    assert_eq!(installer.args[1], "-y");
}

#[test]
fn test_downloaded_file_runs_directly_without_program() {
    let plan = plan(vec![InstallStep::DownloadAndRun {
        url: "https://static.rust-lang.org/rustup/dist/x86_64-pc-windows-msvc/rustup-init.exe".to_string(),
        file_name: "rustup-init.exe".to_string(),
        program: None,
        args: vec!["-y".to_string()],
    }]);
    let mut runner = RecordingRunner::default();

    execute_plan(&plan, &mut runner, &PathDownloader).unwrap();

    assert!(runner.executed[0].program.ends_with("rustup-init.exe"));
    assert_eq!(runner.executed[0].args, vec!["-y"]);
}

#[test]
fn test_stops_at_first_failure() {
    let plan = plan(vec![
        InstallStep::Command(CommandSpec::new("sudo", ["apt-get", "install", "-y", "gcc"])),
        InstallStep::Command(CommandSpec::new("sh", ["rustup-init.sh", "-y"])),
    ]);
    let mut runner = RecordingRunner { fail_on: Some("sudo".to_string()), ..Default::default() };

    let result = execute_plan(&plan, &mut runner, &PathDownloader);

    assert!(matches!(result, Err(LauncherError::CommandFailed { code: Some(1), .. })));
    assert_eq!(runner.executed.len(), 1);
}

#[test]
fn test_dry_run_records_without_running() {
    let mut runner = DryRunRunner::default();
    let spec = CommandSpec::new("definitely-not-a-real-installer", ["-y"]);
    runner.run(&spec).unwrap();
    assert_eq!(runner.executed, vec![spec]);
}

#[test]
fn test_system_runner_reports_missing_program() {
    let spec = CommandSpec::new("definitely-not-a-real-installer", ["-y"]);
    let result = SystemRunner.run(&spec);
    assert!(matches!(result, Err(LauncherError::CommandSpawn { .. })));
}

#[cfg(unix)]
#[test]
fn test_system_runner_reports_exit_code() {
    let spec = CommandSpec::new("sh", ["-c", "exit 4"]);
    let result = SystemRunner.run(&spec);
    assert!(matches!(result, Err(LauncherError::CommandFailed { code: Some(4), .. })));
    assert!(SystemRunner.run(&CommandSpec::new("sh", ["-c", "exit 0"])).is_ok());
}
