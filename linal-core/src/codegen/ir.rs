//! 胶水代码中间表示
//!
//! 生成器只构建这棵小树，文本由 `emit` 单独渲染。

use crate::decl::TagKind;
use crate::runtime::ArgType;

/// 参数描述：类型 + 声明的名字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDescriptor<'src> {
    pub ty: ArgType,
    pub name: &'src str,
}

/// 钩子种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Pre,
    Post,
}

impl HookKind {
    pub fn from_tag(tag: TagKind) -> Option<Self> {
        match tag {
            TagKind::Pre => Some(HookKind::Pre),
            TagKind::Post => Some(HookKind::Post),
            TagKind::Command => None,
        }
    }

    pub fn tag_keyword(&self) -> &'static str {
        match self {
            HookKind::Pre => "@pre",
            HookKind::Post => "@post",
        }
    }
}

/// 输出文件中的一段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlueItem<'src> {
    /// 原样复制的源码
    Passthrough(&'src str),
    /// 命令声明行，替换原来的 `void *name(params) {`
    CommandHeader {
        function: &'src str,
        custom_name: Option<&'src str>,
        signature: Vec<ArgType>,
        /// 原声明所在行
        row: usize,
    },
    /// 函数体开头按位置取参数
    Extraction {
        param: ParamDescriptor<'src>,
        ordinal: usize,
    },
    /// 钩子声明行
    HookHeader { kind: HookKind, row: usize },
    /// 之后的文本对应原文件的 `row` 行
    LineMarker { row: usize },
}

/// 收尾注册函数中的一条命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration<'src> {
    pub function: &'src str,
    pub row: usize,
}

/// 一个源文件的生成结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlueUnit<'src> {
    pub file: String,
    pub items: Vec<GlueItem<'src>>,
    /// 按首次出现顺序
    pub hooks: Vec<HookKind>,
    pub registrations: Vec<Registration<'src>>,
}

impl<'src> GlueUnit<'src> {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            items: Vec::new(),
            hooks: Vec::new(),
            registrations: Vec::new(),
        }
    }

    /// 追加一项，空的透传文本直接丢弃
    pub fn push(&mut self, item: GlueItem<'src>) {
        if let GlueItem::Passthrough(text) = &item {
            if text.is_empty() {
                return;
            }
        }
        self.items.push(item);
    }

    /// 所有命令头，按出现顺序
    pub fn commands(&self) -> impl Iterator<Item = &GlueItem<'src>> {
        self.items
            .iter()
            .filter(|item| matches!(item, GlueItem::CommandHeader { .. }))
    }

    pub fn has_hook(&self, kind: HookKind) -> bool {
        self.hooks.contains(&kind)
    }
}
