//! 模块绑定错误
//!
//! 绑定阶段的错误都是致命的：整次运行中止，不执行任何命令。

use thiserror::Error;

pub type BindingResult<T> = Result<T, BindingError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("could not load module '{path}': {message}")]
    Load { path: String, message: String },

    #[error("module does not export '{symbol}': {message}")]
    MissingSymbol { symbol: String, message: String },

    #[error("symbol '{symbol}' resolved to a null address")]
    NullSymbol { symbol: String },

    #[error("module '{path}' exports '{symbol}', modules must be libraries, not executables")]
    ExportsEntryPoint { path: String, symbol: String },

    #[error("command '{name}' in the callable table does not start with '!'")]
    InvalidCommandName { name: String },

    #[error("command name at index {index} is not valid UTF-8")]
    InvalidName { index: usize },

    #[error("command '{command}' declares unknown argument type tag {tag}")]
    UnknownArgType { command: String, tag: i32 },

    #[error("command '{command}' has no function pointer")]
    NullFunction { command: String },
}

impl BindingError {
    pub fn load(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        BindingError::Load {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn missing_symbol(symbol: impl Into<String>, err: impl std::fmt::Display) -> Self {
        BindingError::MissingSymbol {
            symbol: symbol.into(),
            message: err.to_string(),
        }
    }
}
