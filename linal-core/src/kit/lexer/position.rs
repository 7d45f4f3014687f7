//! 源代码位置追踪
//!
//! 所有词法分析器共享同一套位置记账：
//! - row/col: 人类可读的错误显示（1-based，列按 Unicode 码点计数）
//! - offset: 字节偏移（0-based），用于切片
//! - line_start / prev_line_start: 当前行与上一行的起始偏移，用于打印上下文

use std::fmt;
use std::sync::Arc;

/// 游标位置快照
///
/// `Copy` 类型，可以直接保存下来用于断点续扫
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    /// 字节偏移，0-based
    pub offset: usize,
    /// 行号，1-based
    pub row: usize,
    /// 列号，1-based
    pub col: usize,
    /// 当前行起始字节偏移
    pub line_start: usize,
    /// 上一行起始字节偏移（第一行没有）
    pub prev_line_start: Option<usize>,
}

impl SourcePosition {
    /// 文件起始位置
    pub fn start() -> Self {
        Self {
            offset: 0,
            row: 1,
            col: 1,
            line_start: 0,
            prev_line_start: None,
        }
    }

    /// 前进一个字符
    pub fn advance(&mut self, c: char) {
        self.offset += c.len_utf8();
        if c == '\n' {
            self.prev_line_start = Some(self.line_start);
            self.line_start = self.offset;
            self.row += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::start()
    }
}

/// 带文件名的位置，只用于诊断
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: Arc<str>,
    pub position: SourcePosition,
}

impl Location {
    pub fn new(file: Arc<str>, position: SourcePosition) -> Self {
        Self { file, position }
    }

    pub fn row(&self) -> usize {
        self.position.row
    }

    pub fn col(&self) -> usize {
        self.position.col
    }

    /// 当前行的文本（不含换行符）
    pub fn line_text<'a>(&self, source: &'a str) -> &'a str {
        line_at(source, self.position.line_start)
    }

    /// 上一行的文本
    pub fn prev_line_text<'a>(&self, source: &'a str) -> Option<&'a str> {
        self.position
            .prev_line_start
            .map(|start| line_at(source, start))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.position.row, self.position.col)
    }
}

/// 从 `start` 开始截取一行
fn line_at(source: &str, start: usize) -> &str {
    let rest = source.get(start..).unwrap_or("");
    let line = match rest.find('\n') {
        Some(end) => &rest[..end],
        None => rest,
    };
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_start() {
        let pos = SourcePosition::start();
        assert_eq!(pos.row, 1);
        assert_eq!(pos.col, 1);
        assert_eq!(pos.offset, 0);
        assert_eq!(pos.prev_line_start, None);
    }

    #[test]
    fn test_position_advance_newline() {
        let mut pos = SourcePosition::start();
        pos.advance('a');
        pos.advance('\n');
        assert_eq!(pos.row, 2);
        assert_eq!(pos.col, 1);
        assert_eq!(pos.line_start, 2);
        assert_eq!(pos.prev_line_start, Some(0));

        pos.advance('b');
        pos.advance('\n');
        assert_eq!(pos.prev_line_start, Some(2));
        assert_eq!(pos.line_start, 4);
    }

    #[test]
    fn test_position_advance_multibyte() {
        let mut pos = SourcePosition::start();
        // 3 字节 UTF-8，列只前进 1
        pos.advance('中');
        assert_eq!(pos.col, 2);
        assert_eq!(pos.offset, 3);
    }

    #[test]
    fn test_location_lines() {
        let source = "first\r\nsecond line\nthird";
        let mut pos = SourcePosition::start();
        for c in "first\r\nsec".chars() {
            pos.advance(c);
        }
        let loc = Location::new(Arc::from("a.lln"), pos);
        assert_eq!(loc.to_string(), "a.lln:2:4");
        assert_eq!(loc.line_text(source), "second line");
        assert_eq!(loc.prev_line_text(source), Some("first"));
    }
}
