//! 字符游标
//!
//! 在整段源码上逐字符前进并维护位置信息。
//! 输入结束不是错误，而是一个返回值（`None`）。

use super::position::SourcePosition;

/// 源码游标
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    pos: SourcePosition,
}

impl<'src> Cursor<'src> {
    /// 从文件开头创建
    pub fn new(source: &'src str) -> Self {
        Self::resume(source, SourcePosition::start())
    }

    /// 从保存的位置继续
    pub fn resume(source: &'src str, pos: SourcePosition) -> Self {
        let pos = if pos.offset > source.len() {
            let mut end = SourcePosition::start();
            for c in source.chars() {
                end.advance(c);
            }
            end
        } else {
            pos
        };
        Self { source, pos }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn position(&self) -> SourcePosition {
        self.pos
    }

    /// 剩余未消费的文本
    pub fn rest(&self) -> &'src str {
        &self.source[self.pos.offset..]
    }

    pub fn is_eof(&self) -> bool {
        self.pos.offset >= self.source.len()
    }

    /// 当前字符（不消费）
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// 预读第 n 个字符（0 为当前字符）
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// 当前字符是否为 `expected`
    pub fn check(&self, expected: char) -> bool {
        self.peek() == Some(expected)
    }

    /// 消费一个字符，返回新的当前字符；到达末尾返回 `None`
    pub fn advance(&mut self) -> Option<char> {
        if let Some(c) = self.peek() {
            self.pos.advance(c);
        }
        self.peek()
    }

    /// 谓词成立时持续前进，返回被消费的切片
    pub fn consume_while<F>(&mut self, mut pred: F) -> &'src str
    where
        F: FnMut(char) -> bool,
    {
        let start = self.pos.offset;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos.advance(c);
        }
        &self.source[start..self.pos.offset]
    }

    /// `from` 到当前位置之间的切片
    pub fn slice_from(&self, from: usize) -> &'src str {
        &self.source[from..self.pos.offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_returns_new_current() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.advance(), Some('b'));
        assert_eq!(cursor.advance(), None);
        // 末尾继续前进不会越界
        assert_eq!(cursor.advance(), None);
        assert!(cursor.is_eof());
        assert_eq!(cursor.position().offset, 2);
    }

    #[test]
    fn test_consume_while_stops_at_eof() {
        let mut cursor = Cursor::new("123");
        assert_eq!(cursor.consume_while(|c| c.is_ascii_digit()), "123");
        assert!(cursor.is_eof());
        assert_eq!(cursor.consume_while(|_| true), "");
    }

    #[test]
    fn test_consume_while_tracks_lines() {
        let mut cursor = Cursor::new("  \n  x");
        cursor.consume_while(char::is_whitespace);
        let pos = cursor.position();
        assert_eq!(pos.row, 2);
        assert_eq!(pos.col, 3);
        assert_eq!(pos.line_start, 3);
        assert_eq!(cursor.peek(), Some('x'));
    }

    #[test]
    fn test_resume() {
        let mut first = Cursor::new("!a() !b()");
        first.consume_while(|c| c != ' ');
        let saved = first.position();

        let mut second = Cursor::resume("!a() !b()", saved);
        assert_eq!(second.peek(), Some(' '));
        second.advance();
        assert_eq!(second.rest(), "!b()");
    }

    #[test]
    fn test_peek_nth_and_slice() {
        let mut cursor = Cursor::new("/*x*/");
        assert_eq!(cursor.peek_nth(1), Some('*'));
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.slice_from(0), "/*");
        assert!(cursor.check('x'));
    }
}
