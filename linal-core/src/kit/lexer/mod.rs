//! 词法分析工具包
//!
//! 声明扫描器和脚本词法器共享的底层设施：
//! - `position`: 位置追踪
//! - `cursor`: 字符游标（advance / consume_while）
//! - `token`: 借用源码切片的通用 Token

pub mod cursor;
pub mod position;
pub mod token;

pub use cursor::Cursor;
pub use position::{Location, SourcePosition};
pub use token::Token;
