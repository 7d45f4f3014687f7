//! 声明语法的 Token 类型

use crate::kit::lexer::Token;

/// 声明扫描器产出的 Token
pub type DeclToken<'src> = Token<'src, DeclKind>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// 输入结束
    End,
    /// 标识符
    Symbol,
    Keyword(Keyword),
    /// 单字符标点
    Separator,
    /// 行注释/块注释（相邻的合并为一个，含尾随空白）
    Comment,
    /// 预处理指令行，整体视为不透明
    Directive,
    StringLit,
    CharLit,
    Number,
}

/// 固定关键字表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Char,
    Int,
    Float,
    Void,
    Bool,
    Const,
    Static,
    Inline,
}

static KEYWORD_TABLE: &[(&str, Keyword)] = &[
    ("char", Keyword::Char),
    ("int", Keyword::Int),
    ("float", Keyword::Float),
    ("void", Keyword::Void),
    ("bool", Keyword::Bool),
    ("const", Keyword::Const),
    ("static", Keyword::Static),
    ("inline", Keyword::Inline),
];

/// 先比长度再比内容
pub fn lookup_keyword(text: &str) -> Option<Keyword> {
    KEYWORD_TABLE
        .iter()
        .find(|(word, _)| word.len() == text.len() && *word == text)
        .map(|(_, kw)| *kw)
}

/// 分隔符集合，空白也算分隔
pub fn is_separator(c: char) -> bool {
    matches!(c, '.' | ',' | ';' | '(' | ')' | '[' | ']' | '{' | '}' | '*' | '=') || c.is_whitespace()
}

pub fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'src> Token<'src, DeclKind> {
    /// 是否为指定的单字符标点
    pub fn is_punct(&self, punct: &str) -> bool {
        self.kind == DeclKind::Separator && self.text == punct
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == DeclKind::Keyword(keyword)
    }
}
