use std::fmt::{self, Write as FmtWrite};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bizform::{
    FormUi, RenderOptions, SCREEN_IDS, UiOptions,
    ApiRequest,
    api::{ApiConfig, ApiResponse, RecordingTransport, send},
    io::{DocumentFormat, OutputDestination, OutputOptions, emit, parse_document_file},
    screen_by_id,
    store::{FileStore, KeyValueStore, USER_ID_KEY},
};
use clap::{ArgAction, Parser};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "bizform",
    version,
    about = "Fill in business forms (registration, customers, invoices) in the terminal"
)]
struct Cli {
    /// Screen to open; see --list-screens
    #[arg(short = 's', long = "screen", value_name = "ID", required_unless_present = "list_screens")]
    screen: Option<String>,

    /// Print the available screens and exit
    #[arg(long = "list-screens")]
    list_screens: bool,

    /// Initial form state (JSON, YAML or TOML file)
    #[arg(long = "state", value_name = "PATH")]
    state: Option<PathBuf>,

    /// Render options overriding labels, markers and messages
    #[arg(long = "options", value_name = "PATH")]
    options: Option<PathBuf>,

    /// Key-value store file holding the signed-in user id
    #[arg(long = "store", value_name = "PATH")]
    store: Option<PathBuf>,

    /// User id to send with business updates; saved to --store when given
    #[arg(long = "user-id", value_name = "ID")]
    user_id: Option<String>,

    /// Output destinations for the submitted payload ("-" writes to stdout)
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    force: bool,

    /// Quit without confirmation even with unsaved edits
    #[arg(long = "no-confirm")]
    no_confirm: bool,

    /// Hide the key help in the footer
    #[arg(long = "no-help")]
    no_help: bool,

    /// API settings file (`base_uri`, `timeout` in seconds)
    #[arg(long = "api", value_name = "PATH")]
    api: Option<PathBuf>,

    /// Base URI requests are addressed to; overrides the --api file
    #[arg(long = "api-base", value_name = "URI")]
    api_base: Option<String>,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long = "log", value_name = "PATH")]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if cli.list_screens {
        print_screens()?;
        return Ok(());
    }

    if let Some(path) = cli.log.as_deref() {
        init_logging(path)?;
    }

    let mut diagnostics = DiagnosticCollector::default();
    let seed = load_seed(cli.state.as_deref(), &mut diagnostics);
    let render = load_render_options(cli.options.as_deref(), &mut diagnostics);
    let user_id = resolve_user_id(&cli, &mut diagnostics);
    let api = load_api_config(&cli, &mut diagnostics);
    let output = build_output_options(&cli, &mut diagnostics);
    diagnostics.into_result()?;

    let id = cli
        .screen
        .as_deref()
        .ok_or_else(|| eyre!("--screen is required"))?;
    let screen = screen_by_id(id, seed, user_id).wrap_err_with(|| format!("cannot open screen '{id}'"))?;

    let options = UiOptions::default()
        .with_help(!cli.no_help)
        .with_confirm_exit(!cli.no_confirm)
        .with_render_options(render);
    let request = FormUi::new(screen).with_options(options).run().map_err(report)?;

    let transport = RecordingTransport::default();
    let response = send(&transport, &request).map_err(report)?;
    eprintln!("{}", describe_outcome(&api, &request, response).map_err(report)?);

    emit(&request.body, &output).map_err(report)?;
    Ok(())
}

/// Keeps the whole context chain of library errors.
fn report(err: impl fmt::Display) -> Report {
    eyre!("{err:#}")
}

fn print_screens() -> Result<()> {
    for id in SCREEN_IDS {
        let screen = screen_by_id(id, None, None)?;
        println!("{id:<16} {}", screen.title());
    }
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| eyre!("failed to install logger: {err}"))
}

fn load_seed(path: Option<&Path>, diagnostics: &mut DiagnosticCollector) -> Option<Value> {
    let path = path?;
    match parse_document_file(path) {
        Ok(value @ Value::Object(_)) => Some(value),
        Ok(_) => {
            diagnostics.push_input("state", format!("{} must contain an object", path.display()));
            None
        }
        Err(err) => {
            diagnostics.push_input("state", format!("{err:#}"));
            None
        }
    }
}

fn load_render_options(path: Option<&Path>, diagnostics: &mut DiagnosticCollector) -> RenderOptions {
    let Some(path) = path else {
        return RenderOptions::default();
    };
    let loaded = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))
        .and_then(|contents| {
            RenderOptions::from_document_str(&contents, DocumentFormat::from_path(path))
                .map_err(|err| format!("{err:#}"))
        });
    match loaded {
        Ok(options) => options,
        Err(message) => {
            diagnostics.push_input("options", message);
            RenderOptions::default()
        }
    }
}

fn resolve_user_id(cli: &Cli, diagnostics: &mut DiagnosticCollector) -> Option<String> {
    let Some(path) = cli.store.as_deref() else {
        return cli.user_id.clone();
    };
    let mut store = match FileStore::open(path) {
        Ok(store) => store,
        Err(err) => {
            diagnostics.push_input("store", format!("{err:#}"));
            return cli.user_id.clone();
        }
    };
    if let Some(user_id) = cli.user_id.as_deref() {
        if let Err(err) = store.set_item(USER_ID_KEY, user_id) {
            diagnostics.push_input("store", format!("{err:#}"));
        }
        return Some(user_id.to_string());
    }
    match store.get_item(USER_ID_KEY) {
        Ok(user_id) => user_id,
        Err(err) => {
            diagnostics.push_input("store", format!("{err:#}"));
            None
        }
    }
}

fn load_api_config(cli: &Cli, diagnostics: &mut DiagnosticCollector) -> ApiConfig {
    let mut config = match cli.api.as_deref() {
        None => ApiConfig::default(),
        Some(path) => match parse_document_file(path)
            .and_then(|value| serde_json::from_value(value).map_err(Into::into))
        {
            Ok(config) => config,
            Err(err) => {
                diagnostics.push_input("api", format!("{}: {err:#}", path.display()));
                ApiConfig::default()
            }
        },
    };
    if let Some(base) = cli.api_base.as_deref() {
        if base.trim().is_empty() {
            diagnostics.push_input("api", "--api-base cannot be empty");
        } else {
            config.base_uri = base.trim().to_string();
        }
    }
    config
}

/// One line for the operator: where the request went and what came back. A
/// rejected request turns into an error.
fn describe_outcome(api: &ApiConfig, request: &ApiRequest, response: ApiResponse<Value>) -> Result<String> {
    let url = api.url(request.endpoint);
    tracing::info!(%url, timeout_secs = api.timeout.as_secs(), "dry run finished");
    let message = response.message.clone();
    response
        .into_result()
        .wrap_err_with(|| format!("{} {url} failed", request.method))?;
    let outcome = if message.is_empty() { "ok" } else { message.as_str() };
    Ok(format!("{} {url} -> {outcome}", request.method))
}

fn build_output_options(cli: &Cli, diagnostics: &mut DiagnosticCollector) -> OutputOptions {
    let mut destinations = Vec::new();
    for raw in &cli.outputs {
        if raw.trim().is_empty() {
            diagnostics.push_output("output destination cannot be empty");
            continue;
        }
        destinations.push(OutputDestination::parse(raw));
    }
    if destinations.is_empty() {
        destinations.push(OutputDestination::Stdout);
    }

    let file_paths: Vec<&Path> = destinations
        .iter()
        .filter_map(|dest| match dest {
            OutputDestination::File(path) => Some(path.as_path()),
            OutputDestination::Stdout => None,
        })
        .collect();
    let format = infer_format(&file_paths, diagnostics);
    if !cli.force {
        for path in &file_paths {
            if path.exists() {
                diagnostics.push_output(format!(
                    "file {} already exists (pass --force to overwrite)",
                    path.display()
                ));
            }
        }
    }

    OutputOptions::new(format)
        .with_pretty(!cli.no_pretty)
        .with_overwrite(cli.force)
        .with_destinations(destinations)
}

fn infer_format(paths: &[&Path], diagnostics: &mut DiagnosticCollector) -> DocumentFormat {
    let mut detected: Option<DocumentFormat> = None;
    for path in paths {
        let format = DocumentFormat::from_path(path);
        match detected {
            Some(existing) if existing != format => diagnostics.push_output(format!(
                "output file {} uses {format} but other destinations use {existing}; align extensions",
                path.display()
            )),
            Some(_) => {}
            None => detected = Some(format),
        }
    }
    detected.unwrap_or(DocumentFormat::Json)
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("input ({label}): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}
