// Folio CLI - site theme and blog settings administration
//
// Every command prints exactly one JSON value on stdout. Diagnostics go to
// stderr; see exit_codes.rs for the exit code contract.

mod exit_codes;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{json, Value};

use folio_config::{
    build_accent_palette, is_valid_hex_candidate, normalize_blog_settings, normalize_hex_color,
    normalize_theme_colors, serialize_settings_payload, CategoryStrategy, ColorMode, PayloadShape,
    SettingsPayload,
};
use folio_store::{config_file_path, load_settings, save_settings, Backend, SettingsStore, StoreConfig, StoreError};

use exit_codes::{store_exit_code, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Normalize, inspect and sync site theme and blog settings")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Store config file [default: ~/.config/folio/store.toml]
    #[arg(long, global = true, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// API key for the rest backend (overrides the config file)
    #[arg(long, global = true, env = "FOLIO_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Canonicalize a hex color
    #[command(after_help = "\
Examples:
  folio hex '#FFF'
  folio hex zzz --fallback '#000000'
  folio hex 12ab --check")]
    Hex {
        /// Candidate color, with or without '#'
        value: String,

        /// Returned when the candidate is invalid (assumed canonical)
        #[arg(long, default_value = folio_config::theme::DEFAULT_ACCENT)]
        fallback: String,

        /// Only report whether the candidate is valid
        #[arg(long)]
        check: bool,
    },

    /// Normalize theme colors (JSON object; stdin when omitted)
    Theme {
        json: Option<String>,
    },

    /// Normalize blog settings (JSON object; stdin when omitted)
    Blog {
        json: Option<String>,
    },

    /// Derive the accent palette for a theme (JSON object; stdin when omitted)
    #[command(after_help = "\
Examples:
  folio palette '{\"base\":\"#38bdf8\"}'
  folio palette '{\"base\":\"#000\"}' --mode dark --vars")]
    Palette {
        json: Option<String>,

        /// light or dark
        #[arg(long, short = 'm', default_value = "light")]
        mode: ColorMode,

        /// Print only the CSS custom properties
        #[arg(long)]
        vars: bool,
    },

    /// Decode a stored settings value (raw text; stdin when omitted)
    Parse {
        raw: Option<String>,

        /// Also report which payload shape was detected
        #[arg(long)]
        shape: bool,
    },

    /// Encode {theme, blog} into the canonical stored form (stdin when omitted)
    Serialize {
        json: Option<String>,
    },

    /// Derive a post category
    Category {
        #[arg(long, value_enum, default_value = "tag")]
        strategy: StrategyArg,

        #[arg(long, default_value = "")]
        title: String,

        /// Post tag; repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Read settings from the configured store
    Pull {
        /// Print the stored value as-is instead of decoding it
        #[arg(long)]
        raw: bool,
    },

    /// Normalize settings and write them to the configured store
    #[command(after_help = "\
Examples:
  folio push settings.json
  cat settings.json | folio push
  folio push '{\"base\":\"#112233\"}'    # legacy theme-only shape is accepted")]
    Push {
        /// JSON text, a path to a JSON file, or '-' for stdin
        input: Option<String>,
    },

    /// Write a store config file
    InitConfig {
        #[arg(long, value_enum, default_value = "file")]
        backend: BackendArg,

        /// File or database path (file/sqlite)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Project URL (rest)
        #[arg(long)]
        url: Option<String>,

        #[arg(long, default_value = "site_settings")]
        table: String,

        #[arg(long, default_value_t = 1)]
        row_id: i64,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Tag,
    Title,
}

impl From<StrategyArg> for CategoryStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Tag => CategoryStrategy::Tag,
            StrategyArg::Title => CategoryStrategy::Title,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    File,
    Sqlite,
    Rest,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::File => Backend::File,
            BackendArg::Sqlite => Backend::Sqlite,
            BackendArg::Rest => Backend::Rest,
        }
    }
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\ntarget:  ", env!("TARGET"),
    )
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
            writeln!(buf, "[{}] {} - {}", timestamp, record.level(), record.args())
        })
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Hex { value, fallback, check } => cmd_hex(value, fallback, *check),
        Commands::Theme { json } => cmd_theme(json.as_deref()),
        Commands::Blog { json } => cmd_blog(json.as_deref()),
        Commands::Palette { json, mode, vars } => cmd_palette(json.as_deref(), *mode, *vars),
        Commands::Parse { raw, shape } => cmd_parse(raw.as_deref(), *shape),
        Commands::Serialize { json } => cmd_serialize(json.as_deref()),
        Commands::Category { strategy, title, tags } => cmd_category((*strategy).into(), title, tags),
        Commands::Pull { raw } => cmd_pull(&cli, *raw),
        Commands::Push { input } => cmd_push(&cli, input.as_deref()),
        Commands::InitConfig { backend, path, url, table, row_id, force } => {
            cmd_init_config(&cli, (*backend).into(), path.clone(), url.clone(), table, *row_id, *force)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        let hint = match &err {
            StoreError::Unauthorized(_) => Some("set FOLIO_API_KEY or pass --api-key".to_string()),
            StoreError::Config(_) => Some("run `folio init-config` to create a store config".to_string()),
            _ => None,
        };
        Self { code: store_exit_code(&err), message: err.to_string(), hint }
    }
}

// ============================================================================
// Input / output helpers
// ============================================================================

/// Inline text, or stdin when absent or "-".
fn read_text_arg(arg: Option<&str>) -> Result<String, CliError> {
    match arg {
        Some(text) if text != "-" => Ok(text.to_string()),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CliError::usage(format!("failed to read stdin: {}", e)))?;
            Ok(buf)
        }
    }
}

fn read_json_arg(arg: Option<&str>) -> Result<Value, CliError> {
    let text = read_text_arg(arg)?;
    parse_json_input(&text)
}

fn parse_json_input(text: &str) -> Result<Value, CliError> {
    serde_json::from_str(text)
        .map_err(|e| CliError::usage(format!("invalid JSON input: {}", e)))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CliError { code: EXIT_ERROR, message: e.to_string(), hint: None })?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", text)
        .map_err(|e| CliError { code: EXIT_ERROR, message: format!("failed to write output: {}", e), hint: None })
}

fn open_store(cli: &Cli) -> Result<Box<dyn SettingsStore>, CliError> {
    let mut config = match &cli.config {
        Some(path) => StoreConfig::load_from(path)?,
        None => StoreConfig::load()?,
    };
    if let Some(key) = &cli.api_key {
        config.api_key = Some(key.clone());
    }
    let store = config.open()?;
    log::debug!("using store {}", store.describe());
    Ok(store)
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_hex(value: &str, fallback: &str, check: bool) -> Result<(), CliError> {
    let valid = is_valid_hex_candidate(value);
    if check {
        return print_json(&json!({ "input": value, "valid": valid }));
    }
    print_json(&json!({
        "input": value,
        "valid": valid,
        "normalized": normalize_hex_color(Some(value), fallback),
    }))
}

fn cmd_theme(input: Option<&str>) -> Result<(), CliError> {
    let value = read_json_arg(input)?;
    print_json(&normalize_theme_colors(&value))
}

fn cmd_blog(input: Option<&str>) -> Result<(), CliError> {
    let value = read_json_arg(input)?;
    print_json(&normalize_blog_settings(&value))
}

fn cmd_palette(input: Option<&str>, mode: ColorMode, vars_only: bool) -> Result<(), CliError> {
    let value = read_json_arg(input)?;
    let palette = build_accent_palette(&normalize_theme_colors(&value), mode);
    if vars_only {
        print_json(&palette.variables)
    } else {
        print_json(&palette)
    }
}

fn cmd_parse(raw: Option<&str>, with_shape: bool) -> Result<(), CliError> {
    let text = read_text_arg(raw)?;
    let shape = PayloadShape::classify(&Value::String(text));
    let label = shape_label(&shape);
    let payload = SettingsPayload::from_shape(shape);
    if with_shape {
        return print_json(&json!({ "shape": label, "settings": payload }));
    }
    print_json(&payload)
}

fn shape_label(shape: &PayloadShape) -> &'static str {
    match shape {
        PayloadShape::Empty => "empty",
        PayloadShape::Wrapped { .. } => "wrapped",
        PayloadShape::LegacyRawTheme(_) => "legacy_raw_theme",
        PayloadShape::Unrecognized => "unrecognized",
    }
}

fn cmd_serialize(input: Option<&str>) -> Result<(), CliError> {
    let value = read_json_arg(input)?;
    let text = serialize_settings_payload(&value["theme"], &value["blog"]);
    // Canonical text is itself the output value
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", text)
        .map_err(|e| CliError { code: EXIT_ERROR, message: format!("failed to write output: {}", e), hint: None })
}

fn cmd_category(strategy: CategoryStrategy, title: &str, tags: &[String]) -> Result<(), CliError> {
    print_json(&json!({
        "strategy": strategy,
        "category": strategy.derive(title, tags),
    }))
}

fn cmd_pull(cli: &Cli, raw: bool) -> Result<(), CliError> {
    let store = open_store(cli)?;
    if raw {
        let value = store.read()?;
        return print_json(&value.unwrap_or(Value::Null));
    }
    let payload = load_settings(store.as_ref())?;
    if let Some(updated) = store.updated_at()? {
        eprintln!("last updated {}", updated);
    }
    print_json(&payload)
}

fn cmd_push(cli: &Cli, input: Option<&str>) -> Result<(), CliError> {
    // An existing file wins; anything else is inline JSON
    let text = match input {
        Some(arg) if arg != "-" && Path::new(arg).is_file() => std::fs::read_to_string(arg)
            .map_err(|e| CliError::usage(format!("failed to read {}: {}", arg, e)))?,
        other => read_text_arg(other)?,
    };
    let value = parse_json_input(&text)?;

    // Writing defaults over the stored record is never implied by bad input
    let incoming = match PayloadShape::classify(&value) {
        PayloadShape::Unrecognized => {
            return Err(CliError::usage("unrecognized settings shape").with_hint(
                "expected {\"theme\": {...}, \"blog\": {...}} or a legacy theme object with \"base\"",
            ));
        }
        PayloadShape::Empty => {
            return Err(CliError::usage("nothing to push: input is empty or null")
                .with_hint("push {\"theme\": {}, \"blog\": {}} to reset to defaults"));
        }
        shape => SettingsPayload::from_shape(shape),
    };

    let store = open_store(cli)?;
    let saved = save_settings(store.as_ref(), &incoming.theme.to_value(), &incoming.blog.to_value())?;
    eprintln!("saved settings to {}", store.describe());
    print_json(&saved)
}

fn cmd_init_config(
    cli: &Cli,
    backend: Backend,
    path: Option<PathBuf>,
    url: Option<String>,
    table: &str,
    row_id: i64,
    force: bool,
) -> Result<(), CliError> {
    let target = match &cli.config {
        Some(p) => p.clone(),
        None => config_file_path()
            .ok_or_else(|| CliError::usage("could not determine config directory").with_hint("pass --config <path>"))?,
    };

    if target.exists() && !force {
        return Err(CliError::usage(format!("{} already exists", target.display()))
            .with_hint("pass --force to overwrite"));
    }

    let config = StoreConfig {
        backend,
        path,
        url,
        table: table.to_string(),
        row_id,
        api_key: None,
    };
    config.save_to(&target)?;
    print_json(&json!({ "config": target, "backend": config.backend }))
}
