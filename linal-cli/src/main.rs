//! Linal CLI - Command line interface
//!
//! Preprocess annotated C sources, build them into loadable modules,
//! and run command scripts against those modules.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use linal_api::{
    ensure_library_shaped, preprocess_source, run_with_module, write_header, LinalConfig,
    LinalError, StderrSink,
};
use linal_vfs::{NativeFs, SourceFs};
use thiserror::Error;
use tracing::{info, Level};

mod config;
mod logging;
mod platform;
mod project;
mod toolchain;

use crate::config::{parse_log_level, LogConfig};
use crate::logging::{LogFormat, CLI_TARGET};
use crate::platform::print_error;
use crate::project::{Project, ProjectError, ProjectTarget};
use crate::toolchain::{Toolchain, ToolchainError};

#[derive(Parser)]
#[command(
    name = "linal",
    about = "Annotated C command modules and the scripts that drive them",
    version
)]
struct Cli {
    /// Log level: silent, error, warn, info, debug, trace
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Also append logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// C compiler used by `build` and `run-source`
    #[arg(long, global = true, default_value = "cc")]
    cc: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate glue for an annotated C file
    Preprocess {
        input: PathBuf,
        output: PathBuf,
        /// Do not emit #line directives
        #[arg(long)]
        no_line_directives: bool,
    },
    /// Preprocess and compile into a loadable shared module
    Build { input: PathBuf, output: PathBuf },
    /// Run a script against a compiled module
    Run { script: PathBuf, module: PathBuf },
    /// Build a C file into a temporary module and run a script against it
    RunSource { script: PathBuf, source: PathBuf },
    /// Write linal.h into a directory
    Header { dir: PathBuf },
    /// Run the project described by a linal.json file
    Project {
        #[arg(value_name = "CONFIG", default_value = "linal.json")]
        config: PathBuf,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{error}")]
    Generate { error: LinalError, text: String },

    #[error(transparent)]
    Api(#[from] LinalError),

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error("unknown log level '{0}'")]
    LogLevel(String),

    #[error("could not initialize logging: {0}")]
    Logging(String),

    #[error("could not create temporary directory: {0}")]
    TempDir(String),
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        print_error(&e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let fs = NativeFs::new();
    let project = match &cli.command {
        Command::Project { config } => Some(Project::load(&fs, config)?),
        _ => None,
    };

    let cli_level = cli
        .log_level
        .as_deref()
        .map(|s| parse_log_level(s).ok_or_else(|| CliError::LogLevel(s.to_string())))
        .transpose()?;
    init_logging(&cli, project.as_ref(), cli_level)?;

    let mut config = LinalConfig::default();
    match cli.command {
        Command::Preprocess {
            input,
            output,
            no_line_directives,
        } => {
            config.codegen.line_directives = !no_line_directives;
            preprocess(&fs, &input, &output, &config)
        }
        Command::Build { input, output } => {
            let toolchain = Toolchain::new(cli.cc, Vec::new());
            build(&fs, &toolchain, &input, &output, &config)
        }
        Command::Run { script, module } => run_script(&fs, &script, &module, &config),
        Command::RunSource { script, source } => {
            let toolchain = Toolchain::new(cli.cc, Vec::new());
            run_source(&fs, &toolchain, &script, &source, &config)
        }
        Command::Header { dir } => {
            let path = write_header(&fs, &dir)?;
            info!(target: CLI_TARGET, path = %path.display(), "header written");
            Ok(())
        }
        Command::Project { .. } => match project {
            Some(project) => run_project(&fs, &project, cli.cc),
            None => Ok(()),
        },
    }
}

fn init_logging(
    cli: &Cli,
    project: Option<&Project>,
    cli_level: Option<Level>,
) -> Result<(), CliError> {
    let levels = project.map(|p| p.file.log.clone()).unwrap_or_default();
    let log_config = LogConfig::from_levels(&levels, cli_level);
    logging::init_with_file(&log_config, cli.log_format, cli.log_file.as_deref())
        .map_err(CliError::Logging)
}

fn preprocess(
    fs: &dyn SourceFs,
    input: &Path,
    output: &Path,
    config: &LinalConfig,
) -> Result<(), CliError> {
    let glue = generate(fs, input, config)?;
    fs.write_file(output, glue.as_bytes())
        .map_err(LinalError::from)?;
    info!(target: CLI_TARGET, input = %input.display(), output = %output.display(), "preprocessed");
    Ok(())
}

/// 生成失败时保留源码，用于带上下文的报错
fn generate(fs: &dyn SourceFs, input: &Path, config: &LinalConfig) -> Result<String, CliError> {
    let source = fs.read_to_string(input).map_err(LinalError::from)?;
    preprocess_source(&source, &input.to_string_lossy(), config)
        .map_err(|error| CliError::Generate { error, text: source })
}

fn build(
    fs: &dyn SourceFs,
    toolchain: &Toolchain,
    input: &Path,
    output: &Path,
    config: &LinalConfig,
) -> Result<(), CliError> {
    let work = tempfile::Builder::new()
        .prefix("linal-")
        .tempdir()
        .map_err(|e| CliError::TempDir(e.to_string()))?;
    write_header(fs, work.path())?;

    let input_dir = input
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let include_dirs = [work.path(), input_dir];

    toolchain.check_syntax(input, &include_dirs)?;

    let glue = generate(fs, input, config)?;
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "module".to_string());
    let glue_path = work.path().join(format!("{stem}.linal.c"));
    fs.write_file(&glue_path, glue.as_bytes())
        .map_err(LinalError::from)?;

    toolchain.compile_shared(&glue_path, output, &include_dirs)?;
    ensure_library_shaped(&output.to_string_lossy(), &config.module)
        .map_err(LinalError::from)?;
    info!(target: CLI_TARGET, output = %output.display(), "module built");
    Ok(())
}

fn run_script(
    fs: &dyn SourceFs,
    script: &Path,
    module: &Path,
    config: &LinalConfig,
) -> Result<(), CliError> {
    let mut sink = StderrSink;
    let report = run_with_module(fs, script, &module.to_string_lossy(), config, &mut sink)?;
    info!(
        target: CLI_TARGET,
        executed = report.executed,
        rejected = report.rejected,
        "script finished"
    );
    Ok(())
}

fn run_source(
    fs: &dyn SourceFs,
    toolchain: &Toolchain,
    script: &Path,
    source: &Path,
    config: &LinalConfig,
) -> Result<(), CliError> {
    let out_dir = tempfile::Builder::new()
        .prefix("linal-run-")
        .tempdir()
        .map_err(|e| CliError::TempDir(e.to_string()))?;
    let module = out_dir.path().join("module.so");
    build(fs, toolchain, source, &module, config)?;
    run_script(fs, script, &module, config)
}

fn run_project(fs: &dyn SourceFs, project: &Project, cc: String) -> Result<(), CliError> {
    let config = LinalConfig {
        codegen: project.file.codegen.clone(),
        log: project.file.log.clone(),
        ..Default::default()
    };
    let script = project.script_path();
    match project.target()? {
        ProjectTarget::Module(module) => run_script(fs, &script, &module, &config),
        ProjectTarget::Source(source) => {
            let cc = project.file.cc.clone().unwrap_or(cc);
            let toolchain = Toolchain::new(cc, project.file.cflags.clone());
            run_source(fs, &toolchain, &script, &source, &config)
        }
    }
}
