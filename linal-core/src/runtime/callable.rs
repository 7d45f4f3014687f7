//! 调用表
//!
//! 命令名 + 参数签名 + 原生函数，外加可选的前置/后置钩子。
//! 构建完成后只读。

use std::fmt;

use tracing::info;

use super::value::{ArgType, ArgValue};
use crate::decl::COMMAND_SIGIL;

/// 命令函数，收到的参数已按签名转换
pub type CommandFn = Box<dyn Fn(&[ArgValue])>;

/// 钩子函数
pub type HookFn = Box<dyn Fn()>;

pub struct Callable {
    name: String,
    signature: Vec<ArgType>,
    func: CommandFn,
}

impl Callable {
    /// 名字前的 `!` 会被去掉
    pub fn new(name: &str, signature: Vec<ArgType>, func: CommandFn) -> Self {
        Self {
            name: name.strip_prefix(COMMAND_SIGIL).unwrap_or(name).to_string(),
            signature,
            func,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &[ArgType] {
        &self.signature
    }

    pub fn arity(&self) -> usize {
        self.signature.len()
    }

    pub fn call(&self, args: &[ArgValue]) {
        (self.func)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct CallableTable {
    callables: Vec<Callable>,
    pre: Option<HookFn>,
    post: Option<HookFn>,
}

impl CallableTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, callable: Callable) -> &mut Self {
        info!(
            target: "linal::dispatch",
            name = callable.name(),
            arity = callable.arity(),
            "registered command"
        );
        self.callables.push(callable);
        self
    }

    /// 注册一个 Rust 闭包为命令
    pub fn register<F>(&mut self, name: &str, signature: &[ArgType], func: F) -> &mut Self
    where
        F: Fn(&[ArgValue]) + 'static,
    {
        self.push(Callable::new(name, signature.to_vec(), Box::new(func)))
    }

    pub fn set_pre<F: Fn() + 'static>(&mut self, hook: F) -> &mut Self {
        self.pre = Some(Box::new(hook));
        self
    }

    pub fn set_post<F: Fn() + 'static>(&mut self, hook: F) -> &mut Self {
        self.post = Some(Box::new(hook));
        self
    }

    pub(crate) fn set_pre_boxed(&mut self, hook: Option<HookFn>) {
        self.pre = hook;
    }

    pub(crate) fn set_post_boxed(&mut self, hook: Option<HookFn>) {
        self.post = hook;
    }

    /// 按名字查找（不含 `!`），同名时先注册者优先
    pub fn lookup(&self, name: &str) -> Option<(usize, &Callable)> {
        self.callables
            .iter()
            .enumerate()
            .find(|(_, callable)| callable.name == name)
    }

    pub fn get(&self, index: usize) -> Option<&Callable> {
        self.callables.get(index)
    }

    pub fn len(&self) -> usize {
        self.callables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Callable> {
        self.callables.iter()
    }

    pub fn has_pre(&self) -> bool {
        self.pre.is_some()
    }

    pub fn has_post(&self) -> bool {
        self.post.is_some()
    }

    pub fn run_pre(&self) -> bool {
        match &self.pre {
            Some(hook) => {
                hook();
                true
            }
            None => false,
        }
    }

    pub fn run_post(&self) -> bool {
        match &self.post {
            Some(hook) => {
                hook();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for CallableTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallableTable")
            .field("callables", &self.callables)
            .field("pre", &self.pre.is_some())
            .field("post", &self.post.is_some())
            .finish()
    }
}
