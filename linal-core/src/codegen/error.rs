//! 胶水生成错误
//!
//! 生成阶段的错误都是致命的：出错即中止，不产出任何输出。

use thiserror::Error;

use crate::kit::lexer::Location;
use crate::kit::report::render_context;

/// 带位置的生成错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: ERROR: {kind}")]
pub struct GenerateError {
    pub kind: GenerateErrorKind,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateErrorKind {
    #[error("command functions only accept argument types 'char *', 'int', 'bool' and 'float'.")]
    UnsupportedParameter { found: String },

    #[error("'@cmd' tags can only come before 'void *' function declarations.")]
    NotCommandDeclaration { found: String },

    #[error("'@pre'/'@post' tags can only come before 'void' -> 'void' function declarations.")]
    NotHookDeclaration { found: String },

    #[error("tagged functions must have a body.")]
    MissingBody { found: String },

    #[error("command names must start with a '!'.")]
    InvalidCommandName { name: String },

    #[error("command names need at least one letter, digit or '_' after the '!', and nothing else.")]
    MalformedCommandName { name: String },

    #[error("command function parameters must be named.")]
    UnnamedParameter { found: String },

    #[error("duplicate '{tag}' hook, only one is allowed per file.")]
    DuplicateHook { tag: &'static str },
}

impl GenerateError {
    pub fn new(kind: GenerateErrorKind, location: Location) -> Self {
        Self { kind, location }
    }

    pub fn line(&self) -> usize {
        self.location.row()
    }

    pub fn column(&self) -> usize {
        self.location.col()
    }

    /// 附带源码上下文的完整报告
    pub fn render(&self, source: &str) -> String {
        render_context(source, &self.location, &format!("ERROR: {}", self.kind))
    }
}
