//! 脚本诊断
//!
//! 脚本阶段的问题都是可恢复的：报告到 sink，丢弃出错的调用，继续处理下一个。

use std::fmt;

use crate::kit::lexer::Location;
use crate::kit::report::render_context;

use super::value::{ordinal_suffix, ArgType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    UnknownCommand,
    Malformed,
    TooFewArguments { expected: usize, found: usize },
    TooManyArguments { expected: usize, found: usize },
    TypeMismatch {
        /// 1-based
        ordinal: usize,
        expected: ArgType,
        found: ArgType,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDiagnostic {
    pub kind: DiagnosticKind,
    /// 命令名（不含 `!`）
    pub command: String,
    pub location: Location,
}

impl ScriptDiagnostic {
    pub fn new(kind: DiagnosticKind, command: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            command: command.into(),
            location,
        }
    }

    /// 附带源码上下文
    pub fn render(&self, source: &str) -> String {
        render_context(source, &self.location, &self.to_string())
    }
}

impl fmt::Display for ScriptDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.command;
        match &self.kind {
            DiagnosticKind::UnknownCommand => write!(f, "Command '{name}' doesn't exist."),
            DiagnosticKind::Malformed => write!(f, "Command '{name}' is malformed."),
            DiagnosticKind::TooFewArguments { expected, found } => write!(
                f,
                "Command '{name}' needs {expected} arguments, only {found} were passed."
            ),
            DiagnosticKind::TooManyArguments { expected, found } => write!(
                f,
                "Command '{name}' needs {expected} arguments, but {found} were passed."
            ),
            DiagnosticKind::TypeMismatch {
                ordinal,
                expected,
                found,
            } => write!(
                f,
                "Command '{name}' expects {expected} as {ordinal}{} argument, but {found} was passed.",
                ordinal_suffix(*ordinal)
            ),
        }
    }
}

/// 诊断接收方
pub trait DiagnosticSink {
    /// `source` 是诊断所指脚本的全文
    fn report(&mut self, diagnostic: &ScriptDiagnostic, source: &str);
}

/// 渲染后写到 stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&mut self, diagnostic: &ScriptDiagnostic, source: &str) {
        eprint!("{}", diagnostic.render(source));
    }
}

/// 收集到内存，供测试和上层 API 使用
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub diagnostics: Vec<ScriptDiagnostic>,
    /// 与 `diagnostics` 一一对应的渲染文本
    pub rendered: Vec<String>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 只取消息文本
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: &ScriptDiagnostic, source: &str) {
        self.rendered.push(diagnostic.render(source));
        self.diagnostics.push(diagnostic.clone());
    }
}
