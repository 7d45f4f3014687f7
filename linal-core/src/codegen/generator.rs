//! 胶水代码生成器
//!
//! 遍历声明 token，跟踪花括号深度；只有深度 0 的注释才检查标签，
//! 函数体内的注释一律透传。
//!
//! - `@cmd`: 后面必须是 `void *name(params) {`
//! - `@pre` / `@post`: 后面必须是 `void name(void) {`
//!
//! 任何不合规的声明都会立即中止生成。

use std::sync::Arc;

use tracing::{debug, info, trace};

use super::error::{GenerateError, GenerateErrorKind};
use super::ir::{GlueItem, GlueUnit, HookKind, ParamDescriptor, Registration};
use crate::decl::token::is_symbol_char;
use crate::decl::{interpret, DeclKind, DeclScanner, DeclToken, Keyword, Tag, COMMAND_SIGIL};
use crate::runtime::ArgType;

const TARGET: &str = "linal::codegen";

pub type GenerateResult<T> = Result<T, GenerateError>;

/// 单文件生成器
pub struct Generator<'src> {
    scanner: DeclScanner<'src>,
    file: Arc<str>,
    unit: GlueUnit<'src>,
    depth: usize,
}

impl<'src> Generator<'src> {
    pub fn new(source: &'src str, file: &str) -> Self {
        Self {
            scanner: DeclScanner::new(source),
            file: Arc::from(file),
            unit: GlueUnit::new(file),
            depth: 0,
        }
    }

    /// 扫描整个文件，构建中间表示
    pub fn generate(mut self) -> GenerateResult<GlueUnit<'src>> {
        debug!(target: TARGET, file = %self.file, "generating glue");
        loop {
            let leading = self.scanner.skip_whitespace();
            self.unit.push(GlueItem::Passthrough(leading));

            let token = self.scanner.scan_token();
            match token.kind {
                DeclKind::End => break,
                DeclKind::Separator if token.text == "{" => self.depth += 1,
                DeclKind::Separator if token.text == "}" => {
                    self.depth = self.depth.saturating_sub(1)
                }
                _ => {}
            }
            self.unit.push(GlueItem::Passthrough(token.text));

            if token.kind == DeclKind::Comment && self.depth == 0 {
                if let Some(tag) = interpret(token.text) {
                    trace!(target: TARGET, kind = ?tag.kind, row = token.start.row, "tag found");
                    self.process_tag(tag, &token)?;
                    // 已消费函数体的 '{'
                    self.depth += 1;
                }
            }
        }

        info!(
            target: TARGET,
            file = %self.file,
            commands = self.unit.registrations.len(),
            hooks = self.unit.hooks.len(),
            "glue generated"
        );
        Ok(self.unit)
    }

    fn process_tag(&mut self, tag: Tag<'src>, comment: &DeclToken<'src>) -> GenerateResult<()> {
        match HookKind::from_tag(tag.kind) {
            None => self.process_command(tag, comment),
            Some(hook) => self.process_hook(hook, comment),
        }
    }

    fn process_command(&mut self, tag: Tag<'src>, comment: &DeclToken<'src>) -> GenerateResult<()> {
        if let Some(name) = tag.custom_name {
            let Some(rest) = name.strip_prefix(COMMAND_SIGIL) else {
                return Err(self.error(
                    GenerateErrorKind::InvalidCommandName {
                        name: name.to_string(),
                    },
                    comment,
                ));
            };
            // 命令名须能被脚本词法识别
            if rest.is_empty() || !rest.chars().all(is_symbol_char) {
                return Err(self.error(
                    GenerateErrorKind::MalformedCommandName {
                        name: name.to_string(),
                    },
                    comment,
                ));
            }
        }

        let void = self.scanner.next_token();
        if !void.is_keyword(Keyword::Void) {
            return Err(self.not_command(&void));
        }
        let star = self.scanner.next_token();
        if !star.is_punct("*") {
            return Err(self.not_command(&star));
        }
        let function = self.scanner.next_token();
        if function.kind != DeclKind::Symbol {
            return Err(self.not_command(&function));
        }
        let open = self.scanner.next_token();
        if !open.is_punct("(") {
            return Err(self.not_command(&open));
        }
        let params = self.parse_params()?;
        self.expect_body()?;

        debug!(
            target: TARGET,
            function = function.text,
            params = params.len(),
            row = void.start.row,
            "command declaration"
        );

        self.unit.push(GlueItem::CommandHeader {
            function: function.text,
            custom_name: tag.custom_name,
            signature: params.iter().map(|p| p.ty).collect(),
            row: void.start.row,
        });
        for (ordinal, param) in params.into_iter().enumerate() {
            self.unit.push(GlueItem::Extraction { param, ordinal });
        }
        self.unit.registrations.push(Registration {
            function: function.text,
            row: void.start.row,
        });
        self.push_body_start();
        Ok(())
    }

    fn process_hook(&mut self, hook: HookKind, comment: &DeclToken<'src>) -> GenerateResult<()> {
        if self.unit.has_hook(hook) {
            return Err(self.error(
                GenerateErrorKind::DuplicateHook {
                    tag: hook.tag_keyword(),
                },
                comment,
            ));
        }

        let void = self.scanner.next_token();
        if !void.is_keyword(Keyword::Void) {
            return Err(self.not_hook(&void));
        }
        let name = self.scanner.next_token();
        if name.kind != DeclKind::Symbol {
            return Err(self.not_hook(&name));
        }
        let open = self.scanner.next_token();
        if !open.is_punct("(") {
            return Err(self.not_hook(&open));
        }
        let mut close = self.scanner.next_token();
        if close.is_keyword(Keyword::Void) {
            close = self.scanner.next_token();
        }
        if !close.is_punct(")") {
            return Err(self.not_hook(&close));
        }
        self.expect_body()?;

        debug!(target: TARGET, ?hook, function = name.text, "hook declaration");
        self.unit.push(GlueItem::HookHeader {
            kind: hook,
            row: void.start.row,
        });
        self.unit.hooks.push(hook);
        self.push_body_start();
        Ok(())
    }

    /// 解析参数表，`(` 已消费
    fn parse_params(&mut self) -> GenerateResult<Vec<ParamDescriptor<'src>>> {
        let mut params = Vec::new();
        loop {
            let mut token = self.scanner.next_token();
            // `const` 后面必须跟类型关键字
            let qualified = token.is_keyword(Keyword::Const);
            if qualified {
                token = self.scanner.next_token();
            }
            let ty = match token.kind {
                DeclKind::Separator if token.text == ")" && params.is_empty() && !qualified => {
                    return Ok(params)
                }
                DeclKind::Keyword(Keyword::Void) if params.is_empty() && !qualified => {
                    let close = self.scanner.next_token();
                    if !close.is_punct(")") {
                        return Err(self.unsupported(&close));
                    }
                    return Ok(params);
                }
                DeclKind::Keyword(Keyword::Char) => {
                    let star = self.scanner.next_token();
                    if !star.is_punct("*") {
                        return Err(self.unsupported(&star));
                    }
                    ArgType::Str
                }
                DeclKind::Keyword(Keyword::Int) => ArgType::Int,
                DeclKind::Keyword(Keyword::Float) => ArgType::Float,
                DeclKind::Keyword(Keyword::Bool) => ArgType::Bool,
                _ => return Err(self.unsupported(&token)),
            };

            let name = self.scanner.next_token();
            if name.kind != DeclKind::Symbol {
                return Err(self.error(
                    GenerateErrorKind::UnnamedParameter {
                        found: name.to_owned_text(),
                    },
                    &name,
                ));
            }
            params.push(ParamDescriptor {
                ty,
                name: name.text,
            });

            let separator = self.scanner.next_token();
            match separator.text {
                "," if separator.kind == DeclKind::Separator => continue,
                ")" if separator.kind == DeclKind::Separator => return Ok(params),
                _ => return Err(self.unsupported(&separator)),
            }
        }
    }

    fn expect_body(&mut self) -> GenerateResult<()> {
        let open = self.scanner.next_token();
        if open.is_punct("{") {
            Ok(())
        } else {
            Err(self.error(
                GenerateErrorKind::MissingBody {
                    found: open.to_owned_text(),
                },
                &open,
            ))
        }
    }

    /// 函数体开头：去掉 '{' 后的第一个换行，其余空白原样保留
    fn push_body_start(&mut self) {
        let brace_row = self.scanner.position().row;
        let whitespace = self.scanner.skip_whitespace();
        let (row, rest) = if let Some(rest) = whitespace.strip_prefix("\r\n") {
            (brace_row + 1, rest)
        } else if let Some(rest) = whitespace.strip_prefix('\n') {
            (brace_row + 1, rest)
        } else {
            (brace_row, whitespace)
        };
        self.unit.push(GlueItem::LineMarker { row });
        self.unit.push(GlueItem::Passthrough(rest));
    }

    fn error(&self, kind: GenerateErrorKind, token: &DeclToken<'src>) -> GenerateError {
        GenerateError::new(kind, token.location(&self.file))
    }

    fn not_command(&self, token: &DeclToken<'src>) -> GenerateError {
        self.error(
            GenerateErrorKind::NotCommandDeclaration {
                found: token.to_owned_text(),
            },
            token,
        )
    }

    fn not_hook(&self, token: &DeclToken<'src>) -> GenerateError {
        self.error(
            GenerateErrorKind::NotHookDeclaration {
                found: token.to_owned_text(),
            },
            token,
        )
    }

    fn unsupported(&self, token: &DeclToken<'src>) -> GenerateError {
        self.error(
            GenerateErrorKind::UnsupportedParameter {
                found: token.to_owned_text(),
            },
            token,
        )
    }
}

/// 便捷入口
pub fn generate<'src>(source: &'src str, file: &str) -> GenerateResult<GlueUnit<'src>> {
    Generator::new(source, file).generate()
}
