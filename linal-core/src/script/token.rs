//! 脚本 Token 类型

use crate::kit::lexer::Token;

pub type ScriptToken<'src> = Token<'src, ScriptKind>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    End,
    /// `!name`
    Command,
    Str,
    Int,
    Float,
    OpenParen,
    CloseParen,
    Comma,
    True,
    False,
    /// 无法识别的词，作为填充忽略
    Comment,
}

impl ScriptKind {
    /// 能否作为参数
    pub fn is_argument(&self) -> bool {
        matches!(
            self,
            ScriptKind::Str | ScriptKind::Int | ScriptKind::Float | ScriptKind::True | ScriptKind::False
        )
    }
}
