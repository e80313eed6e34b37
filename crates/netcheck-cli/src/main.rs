// crates/netcheck-cli/src/main.rs
// ============================================================================
// Module: Netcheck CLI Entry Point
// Description: Command dispatcher for index, bundle, and run workflows.
// Purpose: Resolve and run YAML test bundles against a fixture backend.
// Dependencies: clap, netcheck-core, netcheck-checks, netcheck-config, serde_json,
//               serde_yaml, thiserror.
// ============================================================================

//! ## Overview
//! The netcheck CLI wires the built-in test modules, the configured class
//! index, and an in-memory backend loaded from a JSON fixture. Bundles are
//! YAML lists of records. Inputs are untrusted: every file read is bounded
//! by the configured limits, and `run` exits non-zero when any record fails
//! to resolve or any case does not pass.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use netcheck_checks::builtin_catalog;
use netcheck_checks::builtin_index;
use netcheck_config::NetcheckConfig;
use netcheck_core::Backend;
use netcheck_core::BackendFixture;
use netcheck_core::BundleLoader;
use netcheck_core::BundleRecord;
use netcheck_core::BundleRunner;
use netcheck_core::HostName;
use netcheck_core::InMemoryBackend;
use netcheck_core::ModuleCatalog;
use netcheck_core::ModuleIndex;
use netcheck_core::RunReport;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "netcheck", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Class-name index utilities.
    Index {
        /// Selected index subcommand.
        #[command(subcommand)]
        command: IndexCommand,
    },
    /// Bundle utilities.
    Bundle {
        /// Selected bundle subcommand.
        #[command(subcommand)]
        command: BundleCommand,
    },
    /// Run a bundle and evaluate every case.
    Run(RunCommand),
}

/// Index subcommands.
#[derive(Subcommand, Debug)]
enum IndexCommand {
    /// List the effective class-name index.
    List(ConfigArgs),
}

/// Bundle subcommands.
#[derive(Subcommand, Debug)]
enum BundleCommand {
    /// Resolve every record of a bundle without running it.
    Resolve(ResolveCommand),
}

/// Shared config selection.
#[derive(Args, Debug)]
struct ConfigArgs {
    /// Config file (defaults to `NETCHECK_CONFIG`, then `netcheck.toml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for `bundle resolve`.
#[derive(Args, Debug)]
struct ResolveCommand {
    /// YAML bundle file.
    #[arg(long, value_name = "PATH")]
    bundle: PathBuf,
    /// Config selection.
    #[command(flatten)]
    config: ConfigArgs,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// YAML bundle file.
    #[arg(long, value_name = "PATH")]
    bundle: PathBuf,
    /// JSON backend fixture (overrides `backend.fixture`).
    #[arg(long, value_name = "PATH")]
    fixture: Option<PathBuf>,
    /// Config selection.
    #[command(flatten)]
    config: ConfigArgs,
    /// Print the run report as JSON.
    #[arg(long)]
    json: bool,
}

/// CLI error wrapper.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Index {
            command: IndexCommand::List(args),
        } => command_index_list(&args),
        Commands::Bundle {
            command: BundleCommand::Resolve(command),
        } => command_bundle_resolve(&command),
        Commands::Run(command) => command_run(&command),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Prints the effective index, one `Class -> module` line per entry.
fn command_index_list(args: &ConfigArgs) -> CliResult<ExitCode> {
    let config = load_config(args)?;
    let index = effective_index(&config);
    for (class, module) in index.entries() {
        write_stdout(&format!("{class} -> {module}"))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Resolves every bundle record and prints the outcome per record.
fn command_bundle_resolve(command: &ResolveCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.config)?;
    let records = read_bundle(&command.bundle, config.limits.max_bundle_bytes)?;
    let index = effective_index(&config);
    let catalog = load_catalog()?;
    let loader = BundleLoader::new(&index, &catalog);
    let mut resolved_all = true;
    for (position, resolved) in loader.load(&records).into_iter().enumerate() {
        let line = match resolved {
            Ok(spec) => format!(
                "{position}: {} -> {} ({} records)",
                spec.display_name(),
                spec.module,
                spec.test_data.len()
            ),
            Err(err) => {
                resolved_all = false;
                format!("{position}: error: {err}")
            }
        };
        write_stdout(&line)?;
    }
    Ok(exit_code(resolved_all))
}

/// Runs a bundle against the fixture backend.
fn command_run(command: &RunCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.config)?;
    let records = read_bundle(&command.bundle, config.limits.max_bundle_bytes)?;
    let backend = build_backend(command.fixture.as_deref(), &config)?;
    let events = config.logging.build_sink().map_err(|err| CliError::new(err.to_string()))?;
    let index = effective_index(&config);
    let catalog = load_catalog()?;
    let loader = BundleLoader::new(&index, &catalog);
    let report = BundleRunner::new(backend).with_event_sink(events).run_bundle(&loader, &records);
    if command.json {
        let payload = serde_json::to_string_pretty(&report)
            .map_err(|err| CliError::new(format!("failed to serialize report: {err}")))?;
        write_stdout(&payload)?;
    } else {
        write_stdout(&render_report(&report))?;
    }
    Ok(exit_code(report.passed()))
}

// ============================================================================
// SECTION: Wiring
// ============================================================================

/// Loads the selected config, or defaults when none is present.
fn load_config(args: &ConfigArgs) -> CliResult<NetcheckConfig> {
    NetcheckConfig::load_or_default(args.config.as_deref())
        .map_err(|err| CliError::new(err.to_string()))
}

/// Returns the configured replacement index or the built-in one.
fn effective_index(config: &NetcheckConfig) -> ModuleIndex {
    config.index.module_index(builtin_index())
}

/// Builds the catalog of built-in modules.
fn load_catalog() -> CliResult<ModuleCatalog> {
    builtin_catalog().map_err(|err| CliError::new(err.to_string()))
}

/// Builds the in-memory backend from the fixture and configured inventory.
fn build_backend(fixture: Option<&Path>, config: &NetcheckConfig) -> CliResult<Arc<dyn Backend>> {
    let path = fixture.or(config.backend.fixture.as_deref());
    let mut fixture = match path {
        Some(path) => {
            let bytes = read_bytes_with_limit(path, config.limits.max_fixture_bytes)
                .map_err(|err| CliError::new(read_error("fixture", path, &err)))?;
            serde_json::from_slice::<BackendFixture>(&bytes).map_err(|err| {
                CliError::new(format!("invalid fixture {}: {err}", path.display()))
            })?
        }
        None => BackendFixture::default(),
    };
    fixture
        .inventory
        .extend(config.backend.inventory.iter().map(|host| HostName::new(host.as_str())));
    Ok(Arc::new(InMemoryBackend::from_fixture(fixture)))
}

/// Reads and parses a YAML bundle.
fn read_bundle(path: &Path, max_bytes: usize) -> CliResult<Vec<BundleRecord>> {
    let bytes = read_bytes_with_limit(path, max_bytes)
        .map_err(|err| CliError::new(read_error("bundle", path, &err)))?;
    parse_bundle(&bytes)
        .map_err(|err| CliError::new(format!("invalid bundle {}: {err}", path.display())))
}

/// Parses bundle bytes; an empty document is an empty bundle.
fn parse_bundle(bytes: &[u8]) -> Result<Vec<BundleRecord>, String> {
    let content = std::str::from_utf8(bytes).map_err(|_| "bundle must be utf-8".to_string())?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Option<Vec<BundleRecord>> =
        serde_yaml::from_str(content).map_err(|err| err.to_string())?;
    Ok(records.unwrap_or_default())
}

/// Renders a run report as text.
fn render_report(report: &RunReport) -> String {
    let mut lines = Vec::new();
    for failure in &report.resolution_errors {
        lines.push(format!("record {} ({}): {}", failure.position, failure.class, failure.error));
    }
    for spec in &report.specs {
        lines.push(format!("{} [{}]", spec.name, spec.module));
        if let Some(error) = &spec.error {
            lines.push(format!("  error: {error}"));
        }
        for case in &spec.cases {
            lines.push(format!("  {}", case.message));
        }
        for skipped in &spec.skipped {
            lines.push(format!(
                "  skipped record {} for {}: missing {}",
                skipped.position, skipped.template, skipped.missing_field
            ));
        }
    }
    lines.push(format!(
        "{} cases, {} failed, {} unresolved records",
        report.case_count(),
        report.failed_case_count(),
        report.resolution_errors.len()
    ));
    lines.join("\n")
}

/// Maps a pass/fail outcome onto the process exit code.
fn exit_code(passed: bool) -> ExitCode {
    if passed { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

// ============================================================================
// SECTION: Bounded Reads
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let read_limit = limit.saturating_add(1);
    let mut limited = file.take(read_limit);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Formats a bounded read failure.
fn read_error(label: &str, path: &Path, error: &ReadLimitError) -> String {
    match error {
        ReadLimitError::Io(err) => format!("failed to read {label} {}: {err}", path.display()),
        ReadLimitError::TooLarge {
            size,
            limit,
        } => format!("{label} {} exceeds size limit ({size} > {limit} bytes)", path.display()),
    }
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout(message: &str) -> CliResult<()> {
    write_stdout_line(message)
        .map_err(|err| CliError::new(format!("failed to write to stdout: {err}")))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
