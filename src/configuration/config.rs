#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::GeneratorName;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

// List values are stored one entry per line, so entries may contain commas.
const LIST_SEPARATOR: &str = "\n";

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    Generator,
    GeneratorHealthCheckTimeout,
    GeneratorTimeout,
    Model,
    ConfigFile,
    QuestionCount,
    Topic,
    Topics,
    #[strum(serialize = "ollama-url")]
    OllamaURL,
    #[strum(serialize = "openai-url")]
    OpenAiURL,
    #[strum(serialize = "openai-token")]
    OpenAiToken,
    #[strum(serialize = "gemini-url")]
    GeminiURL,
    GeminiToken,
    #[strum(serialize = "claude-url")]
    ClaudeURL,
    ClaudeToken,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    /// Preset topics offered on the welcome screen.
    pub fn topics() -> Vec<String> {
        return Config::split_list(&Config::get(ConfigKey::Topics), LIST_SEPARATOR);
    }

    fn split_list(val: &str, separator: &str) -> Vec<String> {
        return val
            .split(separator)
            .map(|e| return e.trim().to_string())
            .filter(|e| return !e.is_empty())
            .collect();
    }

    fn set_list(key: ConfigKey, items: Vec<String>) {
        Config::set(key, &items.join(LIST_SEPARATOR));
    }

    /// Sets a value given as text, from defaults, a TOML string or the
    /// command line. Lists are comma separated in that form.
    fn set_text(key: ConfigKey, val: &str) {
        if key == ConfigKey::Topics {
            Config::set_list(key, Config::split_list(val, ","));
            return;
        }

        Config::set(key, val);
    }

    fn list_from_toml(item: &toml_edit::Item) -> Option<Vec<String>> {
        let items = item
            .as_array()?
            .iter()
            .filter_map(|e| return e.as_str())
            .map(|e| return e.trim().to_string())
            .filter(|e| return !e.is_empty())
            .collect();

        return Some(items);
    }

    fn check_number(key: ConfigKey, val: &str) -> Result<()> {
        let number = match val.parse::<u64>() {
            Ok(number) => number,
            Err(_) => bail!(format!("'{key}' must be a positive number, got: {val}")),
        };

        if key == ConfigKey::QuestionCount && number == 0 {
            bail!("'question-count' must be at least 1");
        }

        return Ok(());
    }

    pub fn default(key: ConfigKey) -> String {
        let default_generator = GeneratorName::Ollama.to_string();

        #[cfg(not(target_os = "macos"))]
        let config_dir = dirs::config_dir().unwrap_or_else(|| return path::PathBuf::from("."));
        #[cfg(target_os = "macos")]
        let config_dir = dirs::home_dir()
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join(".config");
        let config_path = config_dir
            .join("quizmaster/config.toml")
            .to_string_lossy()
            .to_string();

        let res = match key {
            ConfigKey::Generator => &default_generator,
            ConfigKey::GeneratorHealthCheckTimeout => "1000",
            ConfigKey::GeneratorTimeout => "60000",
            ConfigKey::Model => "",
            ConfigKey::QuestionCount => "10",
            ConfigKey::Topics => "Photography,Yoga and meditation",
            ConfigKey::OllamaURL => "http://localhost:11434",
            ConfigKey::OpenAiURL => "https://api.openai.com",
            ConfigKey::OpenAiToken => "",
            ConfigKey::GeminiURL => "https://generativelanguage.googleapis.com",
            ConfigKey::GeminiToken => "",
            ConfigKey::ClaudeURL => "https://api.anthropic.com",
            ConfigKey::ClaudeToken => "",

            // Special
            ConfigKey::ConfigFile => &config_path,
            ConfigKey::Topic => "",
        };

        return res.to_string();
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set_text(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let mut possible_values = vec![];
                    if let Some(arg) = cmd
                        .get_arguments()
                        .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                    {
                        if !arg.get_possible_values().is_empty() {
                            possible_values = arg
                                .get_possible_values()
                                .iter()
                                .map(|e| return e.get_name().to_string())
                                .collect::<Vec<String>>();
                        }
                    }

                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        Config::set_text(key, val_str);
                    } else if let Some(items) = Config::list_from_toml(val) {
                        Config::set_list(key, items);
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set_text(key, val)
                }
            }
        }

        Config::validate()?;

        if Config::get(ConfigKey::Model).is_empty() {
            if let Some(generator) = GeneratorName::parse(Config::get(ConfigKey::Generator)) {
                Config::set(ConfigKey::Model, generator.default_model());
            }
        }

        tracing::debug!(
            generator = Config::get(ConfigKey::Generator),
            model = Config::get(ConfigKey::Model),
            question_count = Config::get(ConfigKey::QuestionCount),
            topics = ?Config::topics(),
            "config"
        );

        return Ok(());
    }

    fn validate() -> Result<()> {
        for key in [
            ConfigKey::GeneratorHealthCheckTimeout,
            ConfigKey::GeneratorTimeout,
            ConfigKey::QuestionCount,
        ] {
            Config::check_number(key, &Config::get(key))?;
        }

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile || key == ConfigKey::Topic {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg.get_help()?.to_string();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i32>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
