#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file (or defaults) and applies command-line overrides on top.
    pub fn resolve(&self) -> crate::utils::error::Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(model_path) = &self.model_path {
            config.model.path = model_path.clone();
        }
        if let Some(seed) = self.label_seed {
            config.training.label_seed = Some(seed);
        }
        if let Command::Score {
            output: Some(output),
            ..
        } = &self.command
        {
            config.output.path = output.clone();
        }

        Ok(config)
    }
}
