//! 测试辅助工具
//!
//! 提供端到端测试的辅助函数

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use linal_vfs::{NativeFs, SourceFs};
use linal_workspace::{preprocess_source, write_header, LinalConfig};

/// 带钩子与自定义命名的命令源文件
///
/// 执行记录先累积在内存里，`@post` 时写到 `!target` 指定的文件。
pub const RECORDER_C: &str = r#"#include <stdio.h>
#include <string.h>
#include "linal.h"

static char buf[512];
static char target[256];

static void emit(const char *text) {
	strncat(buf, text, sizeof(buf) - strlen(buf) - 1);
}

// @pre
void begin(void) {
	buf[0] = '\0';
	emit("pre;");
}

// @cmd !target
void *set_target(const char *path) {
	strncpy(target, path, sizeof(target) - 1);
	return NULL;
}

// @cmd
void *add(int a, float b, bool flag) {
	char line[64];
	snprintf(line, sizeof(line), "add %d %.1f %d;", a, b, flag);
	emit(line);
	return NULL;
}

// @post
void finish(void) {
	emit("post");
	FILE *f = fopen(target, "w");
	if (f) {
		fputs(buf, f);
		fclose(f);
	}
}
"#;

/// 系统里是否有可用的 `cc`
pub fn compiler_available() -> bool {
    Command::new("cc")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// 编译一个普通 C 文件为共享库
pub fn compile_shared(dir: &Path, input: &Path, output: &Path) {
    let mut include = std::ffi::OsString::from("-I");
    include.push(dir.as_os_str());
    let status = Command::new("cc")
        .arg(include)
        .args(["-fPIC", "-shared", "-o"])
        .arg(output)
        .arg(input)
        .status()
        .expect("failed to spawn cc");
    assert!(status.success(), "cc failed on {}", input.display());
}

/// 预处理并编译带标注的源码，返回共享库路径
pub fn build_module(dir: &Path, name: &str, source: &str) -> PathBuf {
    let fs = NativeFs::new();
    write_header(&fs, dir).unwrap();

    let input = dir.join(format!("{name}.c"));
    fs.write_file(&input, source.as_bytes()).unwrap();
    let glue = preprocess_source(source, &input.to_string_lossy(), &LinalConfig::default()).unwrap();
    let glue_path = dir.join(format!("{name}.linal.c"));
    fs.write_file(&glue_path, glue.as_bytes()).unwrap();

    let output = dir.join(format!("lib{name}.so"));
    compile_shared(dir, &glue_path, &output);
    output
}
