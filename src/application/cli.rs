use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::GeneratorName;
use crate::domain::services::actions::help_text;
use crate::infrastructure::generators::GeneratorManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

async fn print_models() -> Result<()> {
    let generator = GeneratorManager::get(&Config::get(ConfigKey::Generator))?;
    generator.health_check().await?;

    let models = generator.list_models().await?;
    if models.is_empty() {
        println!(
            "Generator {} has no models available.",
            Config::get(ConfigKey::Generator)
        );
        return Ok(());
    }

    let current = Config::get(ConfigKey::Model);
    let res = models
        .iter()
        .map(|model| {
            if *model == current {
                return format!("- {model} (current)");
            }
            return format!("- {model}");
        })
        .collect::<Vec<String>>()
        .join("\n");

    println!("{res}");
    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Quizmaster")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Quizmaster with environment variable RUST_LOG=quizmaster")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_play() -> Command {
    return Command::new("play").about("Start a new quiz.").arg(
        Arg::new(ConfigKey::Topic.to_string())
            .short('T')
            .long(ConfigKey::Topic.to_string())
            .env("QUIZMASTER_TOPIC")
            .num_args(1)
            .help("Skip topic selection and start a quiz on this topic right away."),
    );
}

fn subcommand_models() -> Command {
    return Command::new("models").about("List all models available on the configured generator.");
}

fn arg_generator() -> Arg {
    return Arg::new(ConfigKey::Generator.to_string())
        .short('g')
        .long(ConfigKey::Generator.to_string())
        .env("QUIZMASTER_GENERATOR")
        .num_args(1)
        .help(format!(
            "The generator hosting the model that writes your questions. [default: {}]",
            Config::default(ConfigKey::Generator)
        ))
        .value_parser(PossibleValuesParser::new(GeneratorName::VARIANTS))
        .global(true);
}

fn arg_generator_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::GeneratorHealthCheckTimeout.to_string())
        .long(ConfigKey::GeneratorHealthCheckTimeout.to_string())
        .env("QUIZMASTER_GENERATOR_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(
            format!("Time to wait in milliseconds before timing out when doing a healthcheck for a generator. [default: {}]", Config::default(ConfigKey::GeneratorHealthCheckTimeout)),
        )
        .global(true);
}

fn arg_generator_timeout() -> Arg {
    return Arg::new(ConfigKey::GeneratorTimeout.to_string())
        .long(ConfigKey::GeneratorTimeout.to_string())
        .env("QUIZMASTER_GENERATOR_TIMEOUT")
        .num_args(1)
        .help(
            format!("Time to wait in milliseconds for a generator to write a full question set. [default: {}]", Config::default(ConfigKey::GeneratorTimeout)),
        )
        .global(true);
}

fn arg_model() -> Arg {
    return Arg::new(ConfigKey::Model.to_string())
        .short('m')
        .long(ConfigKey::Model.to_string())
        .env("QUIZMASTER_MODEL")
        .num_args(1)
        .help("The model on the generator used to write questions. Defaults to a known model for the generator if not set.")
        .global(true);
}

fn arg_question_count() -> Arg {
    return Arg::new(ConfigKey::QuestionCount.to_string())
        .short('n')
        .long(ConfigKey::QuestionCount.to_string())
        .env("QUIZMASTER_QUESTION_COUNT")
        .num_args(1)
        .help(format!(
            "Number of questions requested from the generator for every quiz. [default: {}]",
            Config::default(ConfigKey::QuestionCount)
        ))
        .global(true);
}

fn arg_topics() -> Arg {
    return Arg::new(ConfigKey::Topics.to_string())
        .long(ConfigKey::Topics.to_string())
        .env("QUIZMASTER_TOPICS")
        .num_args(1)
        .help(format!(
            "Comma separated preset topics offered on the welcome screen. [default: {}]",
            Config::default(ConfigKey::Topics)
        ))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("HOTKEYS:") {
                return Paint::new(format!("QUIZ {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("quizmaster")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_play())
        .subcommand(subcommand_models())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("QUIZMASTER_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(arg_generator())
        .arg(arg_generator_health_check_timeout())
        .arg(arg_generator_timeout())
        .arg(arg_model())
        .arg(arg_question_count())
        .arg(arg_topics())
        .arg(
            Arg::new(ConfigKey::OllamaURL.to_string())
                .long(ConfigKey::OllamaURL.to_string())
                .env("QUIZMASTER_OLLAMA_URL")
                .num_args(1)
                .help(format!("Ollama API URL when using the Ollama generator. [default: {}]", Config::default(ConfigKey::OllamaURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OpenAiURL.to_string())
                .long(ConfigKey::OpenAiURL.to_string())
                .env("QUIZMASTER_OPENAI_URL")
                .num_args(1)
                .help(format!("OpenAI API URL when using the OpenAI generator. Can be swapped to a compatible proxy. [default: {}]", Config::default(ConfigKey::OpenAiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OpenAiToken.to_string())
                .long(ConfigKey::OpenAiToken.to_string())
                .env("QUIZMASTER_OPENAI_TOKEN")
                .num_args(1)
                .help("OpenAI API token when using the OpenAI generator.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiURL.to_string())
                .long(ConfigKey::GeminiURL.to_string())
                .env("QUIZMASTER_GEMINI_URL")
                .num_args(1)
                .help(format!("Google Gemini API URL when using the Gemini generator. [default: {}]", Config::default(ConfigKey::GeminiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiToken.to_string())
                .long(ConfigKey::GeminiToken.to_string())
                .env("QUIZMASTER_GEMINI_TOKEN")
                .num_args(1)
                .help("Google Gemini API token when using the Gemini generator.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ClaudeURL.to_string())
                .long(ConfigKey::ClaudeURL.to_string())
                .env("QUIZMASTER_CLAUDE_URL")
                .num_args(1)
                .help(format!("Anthropic API URL when using the Claude generator. [default: {}]", Config::default(ConfigKey::ClaudeURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ClaudeToken.to_string())
                .long(ConfigKey::ClaudeToken.to_string())
                .env("QUIZMASTER_CLAUDE_TOKEN")
                .num_args(1)
                .help("Anthropic's Claude API token when using the Claude generator.")
                .global(true),
        );
}

/// Parses the command line. Returns true when the quiz UI should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = dirs::cache_dir()
                        .unwrap_or_else(|| return path::PathBuf::from("."))
                        .join("quizmaster/debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("play", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("models", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            print_models().await?;
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
