//! 声明扫描器
//!
//! 把类 C 的源码切成 token，供胶水代码生成器使用。
//! 空白不产出 token，但通过 `skip_whitespace` 原样交还给调用方，
//! 以便未标注的源码逐字节透传。

use tracing::{trace, warn};

use super::token::{is_separator, is_symbol_char, lookup_keyword, DeclKind, DeclToken};
use crate::kit::lexer::{Cursor, SourcePosition};

const TARGET: &str = "linal::scanner";

pub struct DeclScanner<'src> {
    cursor: Cursor<'src>,
}

impl<'src> DeclScanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    pub fn position(&self) -> SourcePosition {
        self.cursor.position()
    }

    /// 跳过空白并返回被跳过的切片
    pub fn skip_whitespace(&mut self) -> &'src str {
        self.cursor.consume_while(char::is_whitespace)
    }

    /// 跳过空白后扫描下一个 token
    pub fn next_token(&mut self) -> DeclToken<'src> {
        self.skip_whitespace();
        self.scan_token()
    }

    /// 从当前位置扫描一个 token（不跳过前导空白）
    pub fn scan_token(&mut self) -> DeclToken<'src> {
        let start = self.cursor.position();
        let Some(c) = self.cursor.peek() else {
            return DeclToken::new(DeclKind::End, "", start);
        };

        let kind = match c {
            '#' => {
                self.scan_line();
                DeclKind::Directive
            }
            '/' if matches!(self.cursor.peek_nth(1), Some('/') | Some('*')) => {
                self.scan_comments();
                DeclKind::Comment
            }
            '"' | '\'' => {
                self.scan_quoted(c);
                if c == '"' {
                    DeclKind::StringLit
                } else {
                    DeclKind::CharLit
                }
            }
            c if is_separator(c) => {
                self.cursor.advance();
                DeclKind::Separator
            }
            '0'..='9' => {
                self.cursor.consume_while(|c| c.is_ascii_digit());
                if self.cursor.check('.') {
                    self.cursor.advance();
                    self.cursor.consume_while(|c| c.is_ascii_digit());
                }
                DeclKind::Number
            }
            c if is_symbol_char(c) => {
                let word = self.cursor.consume_while(is_symbol_char);
                match lookup_keyword(word) {
                    Some(kw) => DeclKind::Keyword(kw),
                    None => DeclKind::Symbol,
                }
            }
            // 其余标点（+ - & < ! / ...）按单字符处理
            _ => {
                self.cursor.advance();
                DeclKind::Separator
            }
        };

        let token = DeclToken::new(kind, self.cursor.slice_from(start.offset), start);
        trace!(target: TARGET, ?kind, row = start.row, col = start.col, text = token.text, "token");
        token
    }

    /// 读到行尾，反斜杠续行
    fn scan_line(&mut self) {
        while let Some(c) = self.cursor.peek() {
            match c {
                '\n' => break,
                '\\' => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// 扫描一串紧邻的注释，合并成一个 token
    fn scan_comments(&mut self) {
        loop {
            // 当前在 '/'，下一个是 '/' 或 '*'
            self.cursor.advance();
            if self.cursor.check('/') {
                self.scan_line();
            } else {
                self.cursor.advance();
                self.scan_block_comment();
            }
            self.cursor.consume_while(char::is_whitespace);

            let continues = self.cursor.check('/')
                && matches!(self.cursor.peek_nth(1), Some('/') | Some('*'));
            if !continues {
                break;
            }
        }
    }

    fn scan_block_comment(&mut self) {
        let start = self.cursor.position();
        loop {
            match self.cursor.peek() {
                None => {
                    warn!(target: TARGET, row = start.row, col = start.col, "unterminated block comment");
                    return;
                }
                Some('*') if self.cursor.peek_nth(1) == Some('/') => {
                    self.cursor.advance();
                    self.cursor.advance();
                    return;
                }
                Some('\\') => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// 字符串/字符字面量，未闭合时停在输入末尾
    fn scan_quoted(&mut self, quote: char) {
        let start = self.cursor.position();
        self.cursor.advance();
        loop {
            match self.cursor.peek() {
                None => {
                    warn!(target: TARGET, row = start.row, col = start.col, "unterminated literal");
                    return;
                }
                Some('\\') => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                Some(c) if c == quote => {
                    self.cursor.advance();
                    return;
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }
}

impl<'src> Iterator for DeclScanner<'src> {
    type Item = DeclToken<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (token.kind != DeclKind::End).then_some(token)
    }
}
