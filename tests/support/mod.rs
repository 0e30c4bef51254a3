#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use macropad_launcher::error::Result;
use macropad_launcher::launch_setup::setup_utils::CommandSpec;
use macropad_launcher::runner::CommandRunner;
use macropad_launcher::utils::dependencies::Probe;
use macropad_launcher::utils::downloads::Downloader;

/// Probe where only the listed programs exist.
#[derive(Default)]
pub struct FakeProbe {
    available: HashSet<String>,
    outputs: HashMap<String, String>,
}

impl FakeProbe {
    pub fn with(commands: &[&str]) -> FakeProbe {
        FakeProbe {
            available: commands.iter().map(|c| c.to_string()).collect(),
            outputs: HashMap::new(),
        }
    }

    pub fn output(mut self, program: &str, stdout: &str) -> FakeProbe {
        self.outputs.insert(program.to_string(), stdout.to_string());
        self
    }
}

impl Probe for FakeProbe {
    fn command_succeeds(&self, program: &str, _args: &[&str]) -> bool {
        self.available.contains(program)
    }

    fn command_output(&self, program: &str, _args: &[&str]) -> Option<String> {
        self.outputs.get(program).cloned()
    }
}

/// Runner that records commands and optionally fails on one program.
#[derive(Default)]
pub struct RecordingRunner {
    pub executed: Vec<CommandSpec>,
    pub fail_on: Option<String>,
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<()> {
        self.executed.push(spec.clone());
        if self.fail_on.as_deref() == Some(spec.program.as_str()) {
            return Err(macropad_launcher::LauncherError::CommandFailed {
                command: spec.to_string(),
                code: Some(1),
            });
        }
        Ok(())
    }
}

/// Downloader that only computes the destination path.
pub struct PathDownloader;

impl Downloader for PathDownloader {
    fn download(&self, _url: &str, dir: &Path, file_name: &str) -> Result<PathBuf> {
        Ok(dir.join(file_name))
    }
}
