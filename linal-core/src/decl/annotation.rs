//! 注释标签解释器
//!
//! 对单个注释 token 的文本再做一次切词，识别 `@cmd` / `@pre` / `@post`。
//! 切词按空白和注释标记字符（`/` `*` `\`）进行。

/// 命令名前缀
pub const COMMAND_SIGIL: char = '!';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Command,
    Pre,
    Post,
}

/// 注释中找到的标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'src> {
    pub kind: TagKind,
    /// `@cmd` 之后紧跟的下一个词（未校验前缀），可以在下一行
    pub custom_name: Option<&'src str>,
}

static TAG_TABLE: &[(&str, TagKind)] = &[
    ("@cmd", TagKind::Command),
    ("@pre", TagKind::Pre),
    ("@post", TagKind::Post),
];

impl TagKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            TagKind::Command => "@cmd",
            TagKind::Pre => "@pre",
            TagKind::Post => "@post",
        }
    }
}

fn is_word_break(c: char) -> bool {
    c.is_whitespace() || matches!(c, '/' | '*' | '\\')
}

/// 按分隔字符切出的词
struct Words<'src> {
    rest: &'src str,
}

impl<'src> Iterator for Words<'src> {
    type Item = &'src str;

    fn next(&mut self) -> Option<Self::Item> {
        let trimmed = self.rest.trim_start_matches(is_word_break);
        if trimmed.is_empty() {
            return None;
        }
        let end = trimmed.find(is_word_break).unwrap_or(trimmed.len());
        self.rest = &trimmed[end..];
        Some(&trimmed[..end])
    }
}

/// 解释注释文本
///
/// 每个注释只提取一个标签；`@cmd` 优先，找到后立即停止。
/// `@pre`/`@post` 出现多次时以最后一个为准。
pub fn interpret(comment: &str) -> Option<Tag<'_>> {
    let mut found = None;
    let mut words = Words { rest: comment };

    while let Some(word) = words.next() {
        let Some(kind) = TAG_TABLE
            .iter()
            .find(|(keyword, _)| *keyword == word)
            .map(|(_, kind)| *kind)
        else {
            continue;
        };

        if kind == TagKind::Command {
            return Some(Tag {
                kind,
                custom_name: words.next(),
            });
        }
        found = Some(Tag {
            kind,
            custom_name: None,
        });
    }
    found
}
