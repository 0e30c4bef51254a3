//! Bootstrap launcher for Macropad Editor Pro.
//!
//! Makes sure a Rust toolchain is available (installing it per platform if
//! not), checks the editor's `mapping.ron`, then starts the editor's release
//! build with `show-gui`.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod launch_setup;
pub mod launcher;
pub mod mapping;
pub mod runner;
pub mod utils;

pub use bootstrap::{Bootstrap, Outcome};
pub use config::LauncherConfig;
pub use error::{LauncherError, Result};
