//! Configuration module — the optional project-level settings file.

pub mod settings;

pub use settings::Settings;
