//! 命令脚本
//!
//! 语法是扁平的：`!name(arg, arg, ...)` 序列，参数只能是字面量。

pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::{unescape_string, ScriptLexer};
pub use parser::{parse_script, Invocation, ScriptParser};
pub use token::{ScriptKind, ScriptToken};
