//! 测试辅助工具
//!
//! 提供端到端测试的辅助函数

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::Path;
use std::process::{Command, Stdio};
use std::rc::Rc;

use linal_core::runtime::{ArgType, ArgValue, CallableTable, CollectingSink, DispatchReport, Engine};
use linal_core::{generate_glue, parse_script, CodegenConfig, GenerateError, ModuleConfig, C_HEADER};

/// 执行记录
pub type CallLog = Rc<RefCell<Vec<String>>>;

/// 生成不带 `#line` 的胶水代码
pub fn glue(source: &str) -> Result<String, GenerateError> {
    let codegen = CodegenConfig {
        line_directives: false,
        ..Default::default()
    };
    generate_glue(source, "cmds.c", &codegen, &ModuleConfig::default())
}

/// 生成带 `#line` 的胶水代码
pub fn glue_with_lines(source: &str) -> Result<String, GenerateError> {
    generate_glue(
        source,
        "cmds.c",
        &CodegenConfig::default(),
        &ModuleConfig::default(),
    )
}

/// 注册一个把调用记录到 `log` 的命令
pub fn record(table: &mut CallableTable, log: &CallLog, name: &str, signature: &[ArgType]) {
    let log = Rc::clone(log);
    let label = name.to_string();
    table.register(name, signature, move |args: &[ArgValue]| {
        let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
        log.borrow_mut()
            .push(format!("{}({})", label, rendered.join(", ")));
    });
}

/// 带前置/后置钩子的记录表
pub fn hooked_table(log: &CallLog) -> CallableTable {
    let mut table = CallableTable::new();
    let pre = Rc::clone(log);
    let post = Rc::clone(log);
    table
        .set_pre(move || pre.borrow_mut().push("<pre>".into()))
        .set_post(move || post.borrow_mut().push("<post>".into()));
    table
}

/// 运行脚本，返回统计与诊断
pub fn run(table: &CallableTable, source: &str) -> (DispatchReport, CollectingSink) {
    let mut sink = CollectingSink::new();
    let report = Engine::new(table).run(parse_script(source, "test.lln"), source, &mut sink);
    (report, sink)
}

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

/// 把胶水代码连同 `linal.h` 写进 `dir` 并编译为共享库，失败时返回编译器输出
pub fn compile_glue(dir: &Path, glue: &str) -> Result<(), String> {
    std::fs::write(dir.join("linal.h"), C_HEADER).map_err(|e| e.to_string())?;
    let input = dir.join("glue.c");
    std::fs::write(&input, glue).map_err(|e| e.to_string())?;

    let mut include = std::ffi::OsString::from("-I");
    include.push(dir.as_os_str());
    let output = Command::new("cc")
        .arg(include)
        .args(["-fPIC", "-shared", "-o"])
        .arg(dir.join("libglue.so"))
        .arg(&input)
        .output()
        .map_err(|e| e.to_string())?;
    if output.status.success() {
        Ok(())
    } else {
        Err(String::from_utf8_lossy(&output.stderr).into_owned())
    }
}
