pub mod dependencies;
pub mod downloads;
pub mod platform;
