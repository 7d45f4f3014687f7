//! 运行时：参数类型、调用表、校验与执行

pub mod callable;
pub mod diagnostic;
pub mod dispatch;
pub mod validator;
pub mod value;

pub use callable::{Callable, CallableTable, CommandFn, HookFn};
pub use diagnostic::{
    CollectingSink, DiagnosticKind, DiagnosticSink, ScriptDiagnostic, StderrSink,
};
pub use dispatch::{DispatchReport, DispatchState, Engine};
pub use validator::Validator;
pub use value::{can_coerce, ordinal_suffix, ArgType, ArgValue};
