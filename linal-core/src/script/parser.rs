//! 脚本解析器
//!
//! 把 token 流转换成命令调用序列。格式错误的调用不会中止解析：
//! 它被标记为 malformed 后照常产出，由校验阶段报告。

use std::sync::Arc;

use tracing::{debug, trace};

use super::lexer::{unescape_string, ScriptLexer};
use super::token::{ScriptKind, ScriptToken};
use crate::kit::lexer::{Location, SourcePosition};
use crate::runtime::ArgValue;

const TARGET: &str = "linal::parser";

/// 一次命令调用
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// 命令名（不含 `!`）
    pub name: String,
    pub args: Vec<ArgValue>,
    /// 与 `args` 一一对应
    pub arg_locations: Vec<Location>,
    pub malformed: bool,
    pub location: Location,
    /// 校验通过后指向调用表中的下标
    pub resolved: Option<usize>,
}

impl Invocation {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            arg_locations: Vec::new(),
            malformed: false,
            location,
            resolved: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// 第 `index` 个参数的位置，没有时退回命令位置
    pub fn arg_location(&self, index: usize) -> &Location {
        self.arg_locations.get(index).unwrap_or(&self.location)
    }
}

pub struct ScriptParser<'src> {
    lexer: ScriptLexer<'src>,
    file: Arc<str>,
    /// 被退回、需要重新检查的 token
    pending: Option<ScriptToken<'src>>,
}

impl<'src> ScriptParser<'src> {
    pub fn new(source: &'src str, file: &str) -> Self {
        Self::resume(source, Arc::from(file), SourcePosition::start())
    }

    /// 从保存的检查点继续
    pub fn resume(source: &'src str, file: Arc<str>, position: SourcePosition) -> Self {
        Self {
            lexer: ScriptLexer::resume(source, position),
            file,
            pending: None,
        }
    }

    /// 下一次解析开始的位置，可用于 `resume`
    pub fn checkpoint(&self) -> SourcePosition {
        match &self.pending {
            Some(token) => token.start,
            None => self.lexer.position(),
        }
    }

    /// 下一个非填充 token
    fn next_significant(&mut self) -> ScriptToken<'src> {
        if let Some(token) = self.pending.take() {
            return token;
        }
        loop {
            let token = self.lexer.next_token();
            if token.kind != ScriptKind::Comment {
                return token;
            }
        }
    }

    /// 命令名和输入结束需要交还给主循环
    fn push_back(&mut self, token: ScriptToken<'src>) {
        if matches!(token.kind, ScriptKind::Command | ScriptKind::End) {
            self.pending = Some(token);
        }
    }

    /// 解析下一个命令调用
    pub fn next_invocation(&mut self) -> Option<Invocation> {
        loop {
            let token = self.next_significant();
            match token.kind {
                ScriptKind::End => {
                    self.pending = Some(token);
                    return None;
                }
                ScriptKind::Command => return Some(self.parse_invocation(token)),
                _ => trace!(target: TARGET, text = token.text, "stray token outside invocation"),
            }
        }
    }

    fn parse_invocation(&mut self, head: ScriptToken<'src>) -> Invocation {
        let name = head.text.get(1..).unwrap_or("");
        let mut invocation = Invocation::new(name, head.location(&self.file));

        let open = self.next_significant();
        if open.kind != ScriptKind::OpenParen {
            self.push_back(open);
            return self.malformed(invocation, "missing '('");
        }

        loop {
            let token = self.next_significant();
            if token.kind == ScriptKind::CloseParen {
                break;
            }
            if !token.kind.is_argument() {
                self.push_back(token);
                return self.malformed(invocation, "unexpected token in argument list");
            }
            match parse_argument(&token) {
                Some(value) => {
                    invocation.args.push(value);
                    invocation.arg_locations.push(token.location(&self.file));
                }
                None => return self.malformed(invocation, "literal out of range"),
            }

            let separator = self.next_significant();
            match separator.kind {
                ScriptKind::Comma => continue,
                ScriptKind::CloseParen => break,
                _ => {
                    self.push_back(separator);
                    return self.malformed(invocation, "expected ',' or ')'");
                }
            }
        }

        debug!(
            target: TARGET,
            name = %invocation.name,
            args = invocation.args.len(),
            row = invocation.location.row(),
            "parsed invocation"
        );
        invocation
    }

    fn malformed(&self, mut invocation: Invocation, reason: &str) -> Invocation {
        debug!(
            target: TARGET,
            name = %invocation.name,
            row = invocation.location.row(),
            col = invocation.location.col(),
            reason,
            "malformed invocation"
        );
        invocation.malformed = true;
        invocation
    }
}

impl<'src> Iterator for ScriptParser<'src> {
    type Item = Invocation;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_invocation()
    }
}

/// 按 token 类型转换为参数值；无法转换时返回 `None`
fn parse_argument(token: &ScriptToken<'_>) -> Option<ArgValue> {
    match token.kind {
        ScriptKind::Str => Some(ArgValue::Str(unescape_string(token.text))),
        ScriptKind::Int => token.text.parse::<i32>().ok().map(ArgValue::Int),
        ScriptKind::Float => token.text.parse::<f32>().ok().map(ArgValue::Float),
        ScriptKind::True => Some(ArgValue::Bool(true)),
        ScriptKind::False => Some(ArgValue::Bool(false)),
        _ => None,
    }
}

/// 解析整段脚本
pub fn parse_script(source: &str, file: &str) -> Vec<Invocation> {
    ScriptParser::new(source, file).collect()
}
