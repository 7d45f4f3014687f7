//! API 错误类型
//!
//! 提供统一的错误类型和结构化错误报告。

use serde::Serialize;
use thiserror::Error;

pub use linal_core::{BindingError, GenerateError};
pub use linal_vfs::VfsError;

/// Linal 错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinalError {
    /// 胶水生成错误（带位置）
    #[error("{0}")]
    Generate(#[from] GenerateError),

    /// 模块绑定错误
    #[error("{0}")]
    Binding(#[from] BindingError),

    /// 文件读写错误
    #[error("{0}")]
    Vfs(#[from] VfsError),

    /// 会话中还没有脚本
    #[error("no script loaded")]
    NoScript,
}

impl LinalError {
    /// 获取错误行号（如果有）
    pub fn line(&self) -> Option<usize> {
        match self {
            LinalError::Generate(e) => Some(e.line()),
            _ => None,
        }
    }

    /// 获取错误列号（如果有）
    pub fn column(&self) -> Option<usize> {
        match self {
            LinalError::Generate(e) => Some(e.column()),
            _ => None,
        }
    }

    /// 获取错误阶段名称
    pub fn phase(&self) -> &'static str {
        match self {
            LinalError::Generate(_) => "codegen",
            LinalError::Binding(_) => "module",
            LinalError::Vfs(_) => "vfs",
            LinalError::NoScript => "session",
        }
    }

    /// 附带源码上下文的完整消息；没有位置时就是 Display 文本
    pub fn render(&self, source: &str) -> String {
        match self {
            LinalError::Generate(e) => e.render(source),
            other => format!("{other}\n"),
        }
    }

    /// 转换为结构化错误报告
    pub fn to_report(&self) -> ErrorReport {
        let (error_kind, message) = match self {
            LinalError::Generate(e) => (format!("{:?}", e.kind), e.kind.to_string()),
            LinalError::Binding(e) => (variant_name(e), e.to_string()),
            LinalError::Vfs(e) => (variant_name(e), e.to_string()),
            LinalError::NoScript => ("NoScript".to_string(), self.to_string()),
        };
        ErrorReport {
            phase: self.phase(),
            line: self.line(),
            column: self.column(),
            error_kind,
            message,
        }
    }
}

/// `Debug` 输出中的变体名
fn variant_name(value: &impl std::fmt::Debug) -> String {
    let debug = format!("{value:?}");
    debug
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// 结构化错误报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// 错误阶段: codegen, module, vfs, session
    pub phase: &'static str,
    /// 错误行号（1-based，如果有）
    pub line: Option<usize>,
    /// 错误列号（1-based，如果有）
    pub column: Option<usize>,
    /// 错误类型（可用于程序化处理）
    pub error_kind: String,
    /// 人类可读的错误消息
    pub message: String,
}

impl std::fmt::Display for ErrorReport {
    /// 默认的 CLI 友好格式
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(col)) => {
                write!(f, "[{}:{}] {} error: {}", line, col, self.phase, self.message)
            }
            _ => write!(f, "[{}] error: {}", self.phase, self.message),
        }
    }
}

impl ErrorReport {
    /// 转换为 JSON 格式
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// 简洁格式（适合终端）
    pub fn to_short(&self) -> String {
        format!("{}: {}", self.phase, self.message)
    }
}
