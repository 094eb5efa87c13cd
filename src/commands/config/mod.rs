use clap::Subcommand;

/// Configuration management commands.
#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print JSON Schema for ~/.config/git-ninja/config.yaml
    Schema,

    /// Print the path of the config file that is read (config.yaml when none exists)
    Path,
}

impl ConfigCommands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Schema => {
                let schema = crate::shared::config::generate_schema();
                let json = serde_json::to_string_pretty(&schema)?;
                println!("{json}");
            }
            Self::Path => match crate::shared::dirs::config_dir() {
                Some(dir) => println!(
                    "{}",
                    crate::shared::config::config_file_in(&dir).display()
                ),
                None => anyhow::bail!("cannot determine config directory: HOME is not set"),
            },
        }
        Ok(())
    }
}
