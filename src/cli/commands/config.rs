use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            if path.exists() {
                println!("📄 {}:\n", path.display());
                ConfigLogic::print(&path)?;
            } else {
                // no file yet: show the effective defaults
                println!("📄 Current configuration (defaults):\n");
                let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
                println!("{}", yaml);
            }
        }

        if *edit_config {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "{} does not exist, run `punchclock init` first",
                    path.display()
                )));
            }
            ConfigLogic::edit(&path, editor.as_deref())?;
            success("Configuration file edited.");
        }
    }

    Ok(())
}
