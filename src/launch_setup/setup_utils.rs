use std::fmt;
use std::path::PathBuf;

use crate::config::LauncherConfig;
use crate::utils::platform::Platform;

/// A process invocation: program, arguments and optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new<P, I, S>(program: P, args: I) -> CommandSpec
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> CommandSpec {
        self.cwd = Some(cwd.into());
        self
    }

    /// Puts `sudo` in front of the command.
    pub fn elevated(self) -> CommandSpec {
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(self.program);
        args.extend(self.args);
        CommandSpec { program: "sudo".to_string(), args, cwd: self.cwd }
    }
}

fn quote(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '"') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Everything needed to start the editor once the toolchain is in place.
#[derive(Debug, Clone)]
pub struct LaunchSetup {
    /// Toolchain program, possibly a full path from `locate_toolchain`.
    toolchain: String,
    project_dir: PathBuf,
    release: bool,
    subcommand: String,
    /// Prebuilt binary to run instead of going through the toolchain.
    binary: Option<PathBuf>,
    extra_args: Vec<String>,
}

impl LaunchSetup {
    /// Create a new `LaunchSetup`.
    ///
    /// # Arguments
    /// * `toolchain` - Program that builds and runs the editor (usually `cargo`).
    /// * `project_dir` - Directory holding the editor's `Cargo.toml`.
    pub fn new(toolchain: impl Into<String>, project_dir: impl Into<PathBuf>) -> LaunchSetup {
        LaunchSetup {
            toolchain: toolchain.into(),
            project_dir: project_dir.into(),
            release: true,
            subcommand: crate::config::DEFAULT_SUBCOMMAND.to_string(),
            binary: None,
            extra_args: Vec::new(),
        }
    }

    /// Builds the setup from config, using `toolchain` as the resolved program.
    pub fn from_config(config: &LauncherConfig, toolchain: impl Into<String>) -> LaunchSetup {
        LaunchSetup {
            toolchain: toolchain.into(),
            project_dir: config.project_dir.clone(),
            release: config.release,
            subcommand: config.subcommand.clone(),
            binary: config.binary.clone(),
            extra_args: config.extra_args.clone(),
        }
    }

    pub fn with_release(mut self, release: bool) -> LaunchSetup {
        self.release = release;
        self
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> LaunchSetup {
        self.binary = Some(binary.into());
        self
    }

    pub fn with_extra_args(mut self, extra_args: Vec<String>) -> LaunchSetup {
        self.extra_args = extra_args;
        self
    }

    pub fn get_toolchain(&self) -> &str {
        &self.toolchain
    }

    pub fn get_project_dir(&self) -> &PathBuf {
        &self.project_dir
    }

    pub fn is_release(&self) -> bool {
        self.release
    }

    /// The command issued to start the editor.
    ///
    /// A configured prebuilt binary wins when it exists on disk; otherwise the
    /// toolchain builds and runs the project, in release mode by default.
    pub fn launch_command(&self) -> CommandSpec {
        if let Some(binary) = self.binary.as_ref().filter(|b| b.is_file()) {
            let mut args = vec![self.subcommand.clone()];
            args.extend(self.extra_args.iter().cloned());
            return CommandSpec::new(binary.to_string_lossy(), args).with_cwd(&self.project_dir);
        }

        let mut args = vec!["run".to_string()];
        if self.release {
            args.push("--release".to_string());
        }
        args.push("--".to_string());
        args.push(self.subcommand.clone());
        args.extend(self.extra_args.iter().cloned());
        CommandSpec::new(self.toolchain.clone(), args).with_cwd(&self.project_dir)
    }
}

/// One action of an install plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStep {
    Command(CommandSpec),
    /// Fetch an installer and run it. With `program == None` the downloaded
    /// file is executed directly; otherwise it is passed as the first argument.
    DownloadAndRun {
        url: String,
        file_name: String,
        program: Option<String>,
        args: Vec<String>,
    },
    /// Something the user has to do by hand.
    Manual(String),
}

impl fmt::Display for InstallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallStep::Command(spec) => write!(f, "run {}", spec),
            InstallStep::DownloadAndRun { url, file_name, program, args } => {
                write!(f, "download {} and run ", url)?;
                match program {
                    Some(program) => write!(f, "{} {}", program, file_name)?,
                    None => write!(f, "{}", file_name)?,
                }
                for arg in args {
                    write!(f, " {}", quote(arg))?;
                }
                Ok(())
            }
            InstallStep::Manual(text) => write!(f, "manual: {}", text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub platform: Platform,
    pub steps: Vec<InstallStep>,
}

impl InstallPlan {
    pub fn new(platform: Platform) -> InstallPlan {
        InstallPlan { platform, steps: Vec::new() }
    }

    pub fn push(&mut self, step: InstallStep) {
        self.steps.push(step);
    }

    /// Instructions for a user who turned automatic installation off.
    pub fn instructions(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.to_string()).collect()
    }
}
