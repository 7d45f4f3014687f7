//! Linal API - Execution orchestration layer
//!
//! Provides the unified interface used by the CLI and by embedders:
//! - Glue generation from files (`preprocess_file`) or text (`preprocess_source`)
//! - Script execution against a table or a bound module (`Session`)
//! - Unified error handling (`LinalError`)
//!
//! All configuration is passed explicitly; there is no global state.

use std::path::Path;

use linal_vfs::SourceFs;
use tracing::info;

pub mod error;
pub mod session;

pub use error::{ErrorReport, LinalError};
pub use session::Session;

// Re-export config types from linal_config
pub use linal_config::{CodegenConfig, LinalConfig, LogConfig, ModuleConfig, Phase};

// Re-export core types
pub use linal_config;
pub use linal_core::runtime::{
    ArgType, ArgValue, CallableTable, CollectingSink, DiagnosticSink, DispatchReport,
    ScriptDiagnostic, StderrSink,
};
pub use linal_core::{
    ensure_library_shaped, BindingError, GenerateError, GenerateErrorKind, C_HEADER,
};
pub use linal_vfs::{MemoryFs, NativeFs};

const TARGET: &str = "linal::codegen";

/// Generate glue for source text
pub fn preprocess_source(
    source: &str,
    file: &str,
    config: &LinalConfig,
) -> Result<String, LinalError> {
    Ok(linal_core::generate_glue(
        source,
        file,
        &config.codegen,
        &config.module,
    )?)
}

/// Read `input`, generate glue and write it to `output`
///
/// Nothing is written when generation fails.
pub fn preprocess_file(
    fs: &dyn SourceFs,
    input: &Path,
    output: &Path,
    config: &LinalConfig,
) -> Result<(), LinalError> {
    let source = fs.read_to_string(input)?;
    let glue = preprocess_source(&source, &input.to_string_lossy(), config)?;
    fs.write_file(output, glue.as_bytes())?;
    info!(
        target: TARGET,
        input = %input.display(),
        output = %output.display(),
        "glue written"
    );
    Ok(())
}

/// Write `linal.h` into `dir`, returning the written path
pub fn write_header(fs: &dyn SourceFs, dir: &Path) -> Result<std::path::PathBuf, LinalError> {
    let path = dir.join("linal.h");
    fs.write_file(&path, C_HEADER.as_bytes())?;
    Ok(path)
}

/// Run script text against a statically built table
pub fn run_script(
    name: &str,
    source: &str,
    table: CallableTable,
    sink: &mut dyn DiagnosticSink,
) -> Result<DispatchReport, LinalError> {
    let mut session = Session::new();
    session.set_table(table);
    session.load_script_source(name, source);
    session.run(sink)
}

/// Bind a compiled module and run a script file against it
pub fn run_with_module(
    fs: &dyn SourceFs,
    script: &Path,
    module: &str,
    config: &LinalConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<DispatchReport, LinalError> {
    let mut session = Session::with_module_config(config.module.clone());
    session.load_module(module)?;
    session.load_script_file(fs, script)?;
    session.run(sink)
}
