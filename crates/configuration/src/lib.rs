use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, ProjectionSettings, YearlyRetention};

/// Loads the scenario configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, validates it, and returns it.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from("config.toml")
}

/// Loads the scenario configuration from an arbitrary TOML file.
pub fn load_config_from(path: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for the named TOML file.
        .add_source(config::File::with_name(path))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct.
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
