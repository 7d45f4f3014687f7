//! 脚本词法器
//!
//! 识别 `!name`、字符串、整数/浮点数、括号、逗号与布尔关键字。
//! 其他单词一律作为“注释”（填充文本），允许脚本中夹杂自然语言。

use tracing::{trace, warn};

use super::token::{ScriptKind, ScriptToken};
use crate::decl::COMMAND_SIGIL;
use crate::kit::lexer::{Cursor, SourcePosition};

const TARGET: &str = "linal::lexer";

static BOOL_TABLE: &[(&str, ScriptKind)] = &[
    ("true", ScriptKind::True),
    ("True", ScriptKind::True),
    ("false", ScriptKind::False),
    ("False", ScriptKind::False),
];

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub struct ScriptLexer<'src> {
    cursor: Cursor<'src>,
}

impl<'src> ScriptLexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// 从保存的位置继续扫描
    pub fn resume(source: &'src str, position: SourcePosition) -> Self {
        Self {
            cursor: Cursor::resume(source, position),
        }
    }

    pub fn position(&self) -> SourcePosition {
        self.cursor.position()
    }

    pub fn next_token(&mut self) -> ScriptToken<'src> {
        self.cursor.consume_while(char::is_whitespace);
        let start = self.cursor.position();
        let Some(c) = self.cursor.peek() else {
            return ScriptToken::new(ScriptKind::End, "", start);
        };

        let kind = match c {
            c if c == COMMAND_SIGIL => {
                self.cursor.advance();
                self.cursor.consume_while(is_symbol_char);
                ScriptKind::Command
            }
            '"' => {
                self.scan_string(start);
                ScriptKind::Str
            }
            '(' => {
                self.cursor.advance();
                ScriptKind::OpenParen
            }
            ')' => {
                self.cursor.advance();
                ScriptKind::CloseParen
            }
            ',' => {
                self.cursor.advance();
                ScriptKind::Comma
            }
            c if c.is_ascii_digit() || c == '.' => {
                self.cursor.consume_while(|c| c.is_ascii_digit());
                if self.cursor.check('.') {
                    self.cursor.advance();
                    self.cursor.consume_while(|c| c.is_ascii_digit());
                    ScriptKind::Float
                } else {
                    ScriptKind::Int
                }
            }
            _ => self.scan_word(start),
        };

        let token = ScriptToken::new(kind, self.cursor.slice_from(start.offset), start);
        trace!(target: TARGET, ?kind, row = start.row, col = start.col, text = token.text, "token");
        token
    }

    /// 转义感知的字符串，未闭合时停在输入末尾
    fn scan_string(&mut self, start: SourcePosition) {
        self.cursor.advance();
        loop {
            match self.cursor.peek() {
                None => {
                    warn!(target: TARGET, row = start.row, col = start.col, "unterminated string literal");
                    return;
                }
                Some('\\') => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                Some('"') => {
                    self.cursor.advance();
                    return;
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// 布尔关键字，或者一直吞到空白的填充词
    fn scan_word(&mut self, start: SourcePosition) -> ScriptKind {
        let word = self.cursor.consume_while(is_symbol_char);
        if let Some((_, kind)) = BOOL_TABLE.iter().find(|(text, _)| *text == word) {
            return *kind;
        }
        let rest = self.cursor.consume_while(|c| !c.is_whitespace());
        if rest.contains(COMMAND_SIGIL) {
            warn!(
                target: TARGET,
                row = start.row,
                col = start.col,
                "filler text swallowed a command sigil"
            );
        }
        ScriptKind::Comment
    }
}

impl<'src> Iterator for ScriptLexer<'src> {
    type Item = ScriptToken<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (token.kind != ScriptKind::End).then_some(token)
    }
}

/// 字符串 token 的内容：去掉引号并处理转义
pub fn unescape_string(text: &str) -> String {
    let body = text.strip_prefix('"').unwrap_or(text);
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => break,
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('0') => out.push('\0'),
                Some(other) => out.push(other),
                None => break,
            },
            _ => out.push(c),
        }
    }
    out
}
