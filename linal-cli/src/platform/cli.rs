//! CLI 格式化输出
//!
//! 提供命令行友好的错误显示。

use linal_api::LinalError;

use crate::CliError;

/// 打印错误，能定位时附带源码上下文
pub fn print_error(e: &CliError) {
    match e {
        CliError::Generate { error, text } => print_error_with_source(error, text),
        other => eprintln!("ERROR: {other}"),
    }
}

/// 打印错误并显示源代码上下文
pub fn print_error_with_source(e: &LinalError, source: &str) {
    match (e.line(), e.column()) {
        (Some(_), Some(_)) => eprint!("{}", e.render(source)),
        _ => eprintln!("ERROR: {e}"),
    }
}
