//! Linal Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all Linal crates.

use serde::Deserialize;

/// Configuration for glue generation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Emit `#line` directives so compiler diagnostics point at the hand-written source
    pub line_directives: bool,
    /// Macro defined at the top of every generated file
    pub preprocessed_define: String,
}

/// Well-known symbol names of the native module export contract
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Zero-argument registration procedure
    pub register_symbol: String,
    /// Exported callable table instance
    pub table_symbol: String,
    /// Process entry point a loadable module must not export
    pub entry_point_symbol: String,
}

/// Per-phase log levels, kept as strings so this crate stays free of `tracing`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Fallback level for every target
    pub global: Option<String>,
    pub scanner: Option<String>,
    pub codegen: Option<String>,
    pub lexer: Option<String>,
    pub parser: Option<String>,
    pub validator: Option<String>,
    pub dispatch: Option<String>,
    pub module: Option<String>,
}

/// Aggregate configuration passed explicitly through the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinalConfig {
    pub codegen: CodegenConfig,
    pub module: ModuleConfig,
    pub log: LogConfig,
}

/// Execution phase enum for phase-specific configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Scanner,
    Codegen,
    Lexer,
    Parser,
    Validator,
    Dispatch,
    Module,
}

impl Phase {
    /// All phases, in pipeline order
    pub const ALL: [Phase; 7] = [
        Phase::Scanner,
        Phase::Codegen,
        Phase::Lexer,
        Phase::Parser,
        Phase::Validator,
        Phase::Dispatch,
        Phase::Module,
    ];

    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Scanner => "scanner",
            Phase::Codegen => "codegen",
            Phase::Lexer => "lexer",
            Phase::Parser => "parser",
            Phase::Validator => "validator",
            Phase::Dispatch => "dispatch",
            Phase::Module => "module",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("linal::{}", self.as_str())
    }
}

impl LogConfig {
    /// Level configured for a phase, falling back to the global level
    pub fn level_for(&self, phase: Phase) -> Option<&str> {
        let specific = match phase {
            Phase::Scanner => &self.scanner,
            Phase::Codegen => &self.codegen,
            Phase::Lexer => &self.lexer,
            Phase::Parser => &self.parser,
            Phase::Validator => &self.validator,
            Phase::Dispatch => &self.dispatch,
            Phase::Module => &self.module,
        };
        specific.as_deref().or(self.global.as_deref())
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            line_directives: true,
            preprocessed_define: "__LINAL_PREPROCESSED_FILE".to_string(),
        }
    }
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            register_symbol: "__linal_preproc_register_commands".to_string(),
            table_symbol: "__linal_preproc_callables".to_string(),
            entry_point_symbol: "main".to_string(),
        }
    }
}
