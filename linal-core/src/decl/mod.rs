//! 声明扫描
//!
//! - `scanner`: 类 C 声明语法的 token 流
//! - `annotation`: 注释中的 `@cmd` / `@pre` / `@post` 标签

pub mod annotation;
pub mod scanner;
pub mod token;

pub use annotation::{interpret, Tag, TagKind, COMMAND_SIGIL};
pub use scanner::DeclScanner;
pub use token::{lookup_keyword, DeclKind, DeclToken, Keyword};
