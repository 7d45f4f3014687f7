//! Linal Core - annotation scanner, glue generator, script engine and module binding
//!
//! Pure logic over in-memory text. File access goes through `linal-vfs`,
//! terminal output through the caller's `DiagnosticSink`.
//!
//! Configuration is passed explicitly via parameters, not via global state.

pub mod codegen;
pub mod decl;
pub mod kit;
pub mod module;
pub mod runtime;
pub mod script;

// Re-export common types
pub use codegen::{generate_glue, GenerateError, GenerateErrorKind};
pub use kit::lexer::{Location, SourcePosition};
pub use module::{bind_module, ensure_library_shaped, BindingError, LoadedModule, C_HEADER};
pub use runtime::{
    ArgType, ArgValue, CallableTable, CollectingSink, DiagnosticSink, DispatchReport, Engine,
    ScriptDiagnostic, StderrSink, Validator,
};
pub use script::{parse_script, Invocation, ScriptParser};

// Re-export config types from linal-config
pub use linal_config::{CodegenConfig, ModuleConfig, Phase};
