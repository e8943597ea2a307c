#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::collections::HashMap;
use std::path;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use strum::EnumIter;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::Language;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiUrl,
    ConfigFile,
    Language,
    RequestTimeout,
    StorageFile,
}

/// Resolved configuration, passed explicitly to whoever needs it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    values: HashMap<ConfigKey, String>,
}

fn app_dir() -> path::PathBuf {
    return dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| path::PathBuf::from("."))
        .join("agro");
}

impl Config {
    pub fn defaults() -> Config {
        let values = ConfigKey::iter()
            .map(|key| (key, Config::default_value(key)))
            .collect();

        return Config { values };
    }

    pub fn default_value(key: ConfigKey) -> String {
        let res = match key {
            ConfigKey::ApiUrl => "http://localhost:3000".to_string(),
            ConfigKey::Language => "".to_string(),
            ConfigKey::RequestTimeout => "0".to_string(),

            // Paths
            ConfigKey::ConfigFile => app_dir().join("config.toml").display().to_string(),
            ConfigKey::StorageFile => app_dir().join("storage.json").display().to_string(),
        };

        return res;
    }

    pub fn get(&self, key: ConfigKey) -> &str {
        return self.values.get(&key).map(String::as_str).unwrap_or("");
    }

    pub fn set(&mut self, key: ConfigKey, value: &str) {
        self.values.insert(key, value.to_string());
    }

    pub fn api_url(&self) -> &str {
        return self.get(ConfigKey::ApiUrl);
    }

    pub fn storage_file(&self) -> path::PathBuf {
        return path::PathBuf::from(self.get(ConfigKey::StorageFile));
    }

    /// Language forced by configuration, if any.
    pub fn language(&self) -> Option<Language> {
        return self.get(ConfigKey::Language).parse().ok();
    }

    /// `None` means requests never time out.
    pub fn request_timeout(&self) -> Result<Option<Duration>> {
        let raw = self.get(ConfigKey::RequestTimeout).trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let seconds: u64 = match raw.parse() {
            Ok(seconds) => seconds,
            Err(_) => bail!("request-timeout must be a whole number of seconds, got '{raw}'"),
        };
        if seconds == 0 {
            return Ok(None);
        }

        return Ok(Some(Duration::from_secs(seconds)));
    }

    fn possible_values(cmd: &Command, key: ConfigKey) -> Vec<String> {
        return cmd
            .get_arguments()
            .find(|arg| arg.get_long() == Some(key.to_string().as_str()))
            .map(|arg| {
                arg.get_possible_values()
                    .iter()
                    .map(|value| value.get_name().to_string())
                    .collect()
            })
            .unwrap_or_default();
    }

    pub async fn load(cmd: &Command, clap_arg_matches: &[&ArgMatches]) -> Result<Config> {
        let mut config = Config::defaults();

        let mut config_file = Config::default_value(ConfigKey::ConfigFile);
        for matches in clap_arg_matches {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }
        config.set(ConfigKey::ConfigFile, &config_file);

        let config_path = path::PathBuf::from(&config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }
                let Some(val) = doc.get(&key.to_string()) else {
                    continue;
                };

                if let Some(val_int) = val.as_integer() {
                    config.set(key, &val_int.to_string());
                } else if let Some(val_str) = val.as_str() {
                    if val_str.is_empty() {
                        continue;
                    }
                    let possible_values = Config::possible_values(cmd, key);
                    if !possible_values.is_empty()
                        && !possible_values.contains(&val_str.to_string())
                    {
                        bail!(
                            "config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}",
                            possible_values.join(", ")
                        );
                    }
                    config.set(key, val_str);
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    config.set(key, val)
                }
            }
        }

        tracing::debug!(
            api_url = config.get(ConfigKey::ApiUrl),
            language = config.get(ConfigKey::Language),
            storage_file = config.get(ConfigKey::StorageFile),
            request_timeout = config.get(ConfigKey::RequestTimeout),
            "config"
        );

        return Ok(config);
    }

    /// A commented config file holding every default, as printed by `agro config`.
    pub fn serialize_default(cmd: &Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter(|key| *key != ConfigKey::ConfigFile)
            .map(|key| {
                let arg = cmd
                    .get_arguments()
                    .find(|arg| arg.get_long() == Some(key.to_string().as_str()));

                let mut description = arg
                    .and_then(|arg| arg.get_help())
                    .map(|help| help.to_string())
                    .unwrap_or_default();
                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let possible_values = Config::possible_values(cmd, key);
                if !possible_values.is_empty() {
                    description = format!(
                        "{description} [possible values: {}]",
                        possible_values.join(", ")
                    );
                }

                let mut val = Config::default_value(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return format!("# {description}\n{val}");
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
