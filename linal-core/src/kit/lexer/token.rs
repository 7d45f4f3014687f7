//! 通用 Token 结构
//!
//! 声明扫描器与脚本词法器各自定义 kind，共用这一结构。
//! 文本直接借用源码切片，生命周期绑定到源码缓冲区。

use std::sync::Arc;

use super::position::{Location, SourcePosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src, K> {
    pub kind: K,
    /// 原始文本
    pub text: &'src str,
    /// token 起始位置
    pub start: SourcePosition,
}

impl<'src, K: Copy> Token<'src, K> {
    pub fn new(kind: K, text: &'src str, start: SourcePosition) -> Self {
        Self { kind, text, start }
    }

    /// (起始偏移, 字节长度)
    pub fn span(&self) -> (usize, usize) {
        (self.start.offset, self.text.len())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// 需要时才生成拥有所有权的文本
    pub fn to_owned_text(&self) -> String {
        self.text.to_string()
    }

    pub fn location(&self, file: &Arc<str>) -> Location {
        Location::new(Arc::clone(file), self.start)
    }
}
