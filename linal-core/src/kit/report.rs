//! 带源码上下文的诊断渲染
//!
//! 输出格式：
//! ```text
//! script.lln:3:5: Command 'nope' doesn't exist.
//!    ... |
//!    2 | !ok(1)
//!    3 | !a  !nope()
//!            ^
//! ```

use std::fmt::Write;

use super::lexer::Location;

/// 渲染一条带上下文的消息
pub fn render_context(source: &str, location: &Location, message: &str) -> String {
    let row = location.row();
    let mut out = String::new();
    let _ = writeln!(out, "{}: {}", location, message);

    if let Some(prev) = location.prev_line_text(source) {
        if row > 2 {
            let _ = writeln!(out, "{:>6} |", "...");
        }
        let _ = writeln!(out, "{:>4} | {}", row - 1, prev);
    }
    let _ = writeln!(out, "{:>4} | {}", row, location.line_text(source));

    // 行号栏宽 7（"%4d | "）
    let caret_pad = " ".repeat(7 + location.col().saturating_sub(1));
    let _ = writeln!(out, "{}^", caret_pad);
    out
}
