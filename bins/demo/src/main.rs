//! Demo binary: initializes the process default from flags or a config file
//! and emits records through it. Used by the end-to-end tests to observe
//! exit codes and sink output.

use clap::{Args, Parser, Subcommand};
use logfacade::{
    BackendSelector, ErrorEnvelope, Fields, LogPanic, LogRecord, LoggerConfig, Severity,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Env var controlling the demo's own diagnostics (not the facade output).
const DIAGNOSTICS_ENV: &str = "LOGFACADE_DEMO_LOG";

const EXIT_INVALID_INPUT: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "logfacade-demo", version, about = "Exercise the logfacade API")]
struct Cli {
    #[command(flatten)]
    logger: LoggerArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct LoggerArgs {
    /// Config file (JSON/TOML). Flags below override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Backend: structured, tracing, or a numeric id.
    #[arg(long, global = true, default_value = "structured")]
    backend: BackendSelector,
    /// Disable the console sink.
    #[arg(long, global = true)]
    no_console: bool,
    /// Console level.
    #[arg(long, global = true)]
    console_level: Option<String>,
    /// JSON lines on the console.
    #[arg(long, global = true)]
    console_json: bool,
    /// Enable the file sink at this path.
    #[arg(long, global = true)]
    file: Option<PathBuf>,
    /// File level.
    #[arg(long, global = true)]
    file_level: Option<String>,
    /// Human-readable text in the file instead of JSON.
    #[arg(long, global = true)]
    file_text: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Emit one record.
    Emit {
        /// Severity (debug, info, warn, error).
        #[arg(long, default_value = "info")]
        level: Severity,
        /// Structured field as key=value; JSON values are parsed.
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, serde_json::Value)>,
        /// Message words, joined with spaces.
        words: Vec<String>,
    },
    /// Emit `info("starting", "v1")` then `debug("skip")`.
    Scenario,
    /// Log at fatal and exit with status 1.
    Fatal {
        /// Message words.
        words: Vec<String>,
    },
    /// Log and panic.
    Panic {
        /// Recover the panic and exit 0.
        #[arg(long)]
        catch: bool,
        /// Message words.
        words: Vec<String>,
    },
    /// Print the effective config as JSON.
    PrintConfig,
}

fn parse_field(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    if key.trim().is_empty() {
        return Err("field key must not be empty".to_string());
    }
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.trim().to_string(), value))
}

impl LoggerArgs {
    fn effective_config(&self) -> Result<LoggerConfig, ErrorEnvelope> {
        let mut config = match &self.config {
            Some(path) => logfacade::load_logger_config_from_path(path)?,
            None => LoggerConfig::default(),
        };
        if self.no_console {
            config.enable_console = false;
        }
        if let Some(level) = &self.console_level {
            config.console_level.clone_from(level);
        }
        if self.console_json {
            config.console_json_format = true;
        }
        if let Some(path) = &self.file {
            config.enable_file = true;
            config.file_location = path.to_string_lossy().to_string();
        }
        if let Some(level) = &self.file_level {
            config.file_level.clone_from(level);
        }
        if self.file_text {
            config.file_json_format = false;
        }
        Ok(config)
    }
}

fn init_diagnostics() {
    let filter =
        EnvFilter::try_from_env(DIAGNOSTICS_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn main() -> ExitCode {
    init_diagnostics();
    let cli = Cli::parse();

    let config = match cli.logger.effective_config() {
        Ok(config) => config,
        Err(error) => return report(&error),
    };
    if matches!(cli.command, Command::PrintConfig) {
        return print_config(&config);
    }
    if let Err(error) = logfacade::initialize(&config, cli.logger.backend) {
        return report(&ErrorEnvelope::from(error));
    }
    tracing::debug!(backend = %cli.logger.backend, "logger initialized");

    run(cli.command)
}

fn run(command: Command) -> ExitCode {
    match command {
        Command::Emit {
            level,
            fields,
            words,
        } => {
            let message = words.join(" ");
            let fields: Fields = fields
                .into_iter()
                .map(|(key, value)| (key.into_boxed_str(), value))
                .collect();
            if level == Severity::Fatal {
                logfacade::with_fields(fields).fatal(&[message.into()]);
            }
            logfacade::log(LogRecord::new(level, message).with_fields(fields));
        },
        Command::Scenario => {
            logfacade::log_info!("starting", "v1");
            logfacade::log_debug!("skip");
        },
        Command::Fatal { words } => {
            logfacade::fatalf!("{}", words.join(" "));
        },
        Command::Panic { catch, words } => {
            let message = words.join(" ");
            if !catch {
                logfacade::panicf!("{message}");
            }
            let outcome = std::panic::catch_unwind(|| logfacade::panicf!("{message}"));
            let Err(payload) = outcome;
            let recovered = payload
                .downcast_ref::<LogPanic>()
                .map_or("<unknown>", |panic| panic.message.as_str());
            println!("recovered: {recovered}");
        },
        Command::PrintConfig => {},
    }
    logfacade::flush();
    ExitCode::SUCCESS
}

fn print_config(config: &LoggerConfig) -> ExitCode {
    match logfacade::to_pretty_json(config) {
        Ok(json) => {
            print!("{json}");
            ExitCode::SUCCESS
        },
        Err(error) => report(&error),
    }
}

fn report(error: &ErrorEnvelope) -> ExitCode {
    match serde_json::to_string(error) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => eprintln!("{}: {}", error.code, error.message),
    }
    ExitCode::from(EXIT_INVALID_INPUT)
}
