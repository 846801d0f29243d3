use crate::config::Config;
use crate::config::migrate::{fill_missing_keys, missing_keys};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration:\n");
        println!("{}", serde_yaml::to_string(cfg)?);
        Ok(())
    }

    /// Report the keys the file at `path` is missing. Returns their count.
    pub fn check(path: &Path) -> AppResult<usize> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let missing = missing_keys(&content)?;

        if missing.is_empty() {
            success(format!("Configuration file is complete: {}", path.display()));
        } else {
            warning(format!(
                "Configuration file is missing {} key(s): {}",
                missing.len(),
                missing.join(", ")
            ));
            info("Run `rtimesheet config --migrate` to add them with default values.");
        }

        Ok(missing.len())
    }

    pub fn migrate(path: &Path) -> AppResult<Vec<&'static str>> {
        let added = fill_missing_keys(path)?;

        if added.is_empty() {
            info("Configuration file already up to date.");
        } else {
            success(format!("Configuration file migrated; added: {}", added.join(", ")));
        }

        Ok(added)
    }

    /// Open `path` in the requested editor, falling back to $EDITOR/$VISUAL
    /// or the platform default.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = editor.map(str::to_string).unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration file edited successfully using '{editor_to_use}'"
                ));
                Ok(())
            }
            _ => {
                warning(format!(
                    "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
                ));

                match Command::new(&default_editor).arg(path).status() {
                    Ok(s) if s.success() => {
                        success(format!(
                            "Configuration file edited successfully using fallback '{default_editor}'"
                        ));
                        Ok(())
                    }
                    _ => Err(AppError::Config(format!(
                        "failed to edit configuration file using '{default_editor}'"
                    ))),
                }
            }
        }
    }
}
