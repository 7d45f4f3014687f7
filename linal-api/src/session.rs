//! 运行会话
//!
//! 持有脚本源码与解析检查点、调用表，以及（可选的）已加载模块。
//! 所有状态都属于 `Session` 实例，不存在进程级单例。

use std::path::Path;
use std::sync::Arc;

use linal_config::ModuleConfig;
use linal_core::kit::lexer::SourcePosition;
use linal_core::module::{bind_module, LoadedModule};
use linal_core::runtime::{CallableTable, DiagnosticSink, DispatchReport, Engine, Validator};
use linal_core::script::{Invocation, ScriptParser};
use linal_vfs::SourceFs;
use tracing::{debug, info};

use crate::error::LinalError;

const TARGET: &str = "linal::dispatch";

/// 已加载的脚本及其解析进度
#[derive(Debug, Clone)]
struct LoadedScript {
    name: Arc<str>,
    source: String,
    checkpoint: SourcePosition,
}

#[derive(Debug, Default)]
pub struct Session {
    module_config: ModuleConfig,
    script: Option<LoadedScript>,
    table: CallableTable,
    module: Option<LoadedModule>,
    last: Option<Invocation>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module_config(module_config: ModuleConfig) -> Self {
        Self {
            module_config,
            ..Self::default()
        }
    }

    /// 从文件系统读取脚本
    pub fn load_script_file(&mut self, fs: &dyn SourceFs, path: &Path) -> Result<(), LinalError> {
        let source = fs.read_to_string(path)?;
        self.load_script_source(&path.to_string_lossy(), source);
        Ok(())
    }

    /// 直接提供脚本文本，解析从头开始
    pub fn load_script_source(&mut self, name: &str, source: impl Into<String>) {
        let source = source.into();
        info!(target: TARGET, script = name, bytes = source.len(), "script loaded");
        self.script = Some(LoadedScript {
            name: Arc::from(name),
            source,
            checkpoint: SourcePosition::start(),
        });
        self.last = None;
    }

    /// 绑定模块，之后使用模块导出的调用表
    pub fn load_module(&mut self, path: &str) -> Result<(), LinalError> {
        let module = bind_module(path, &self.module_config)?;
        self.module = Some(module);
        Ok(())
    }

    /// 使用静态构建的调用表，替换已绑定的模块
    pub fn set_table(&mut self, table: CallableTable) {
        self.module = None;
        self.table = table;
    }

    pub fn table(&self) -> &CallableTable {
        match &self.module {
            Some(module) => module.table(),
            None => &self.table,
        }
    }

    pub fn script_source(&self) -> Option<&str> {
        self.script.as_ref().map(|script| script.source.as_str())
    }

    /// 最近一次 `next_command` 返回的调用
    pub fn last_command(&self) -> Option<&Invocation> {
        self.last.as_ref()
    }

    /// 取下一个通过校验的调用；被拒绝的调用报告到 sink 后跳过
    pub fn next_command(&mut self, sink: &mut dyn DiagnosticSink) -> Option<&Invocation> {
        let script = self.script.as_mut()?;
        let table = match &self.module {
            Some(module) => module.table(),
            None => &self.table,
        };
        let validator = Validator::new(table);
        let mut parser =
            ScriptParser::resume(&script.source, Arc::clone(&script.name), script.checkpoint);

        let found = loop {
            let Some(mut invocation) = parser.next_invocation() else {
                break None;
            };
            if validator.validate(&mut invocation, &script.source, sink) {
                break Some(invocation);
            }
        };
        script.checkpoint = parser.checkpoint();
        self.last = found;
        self.last.as_ref()
    }

    /// 执行最近一次取到的调用
    pub fn execute_last(&self) -> bool {
        match &self.last {
            Some(invocation) => Engine::new(self.table()).execute(invocation),
            None => false,
        }
    }

    /// 对剩余脚本运行完整的执行引擎
    pub fn run(&mut self, sink: &mut dyn DiagnosticSink) -> Result<DispatchReport, LinalError> {
        let script = self.script.as_mut().ok_or(LinalError::NoScript)?;
        let table = match &self.module {
            Some(module) => module.table(),
            None => &self.table,
        };
        let mut parser =
            ScriptParser::resume(&script.source, Arc::clone(&script.name), script.checkpoint);
        let report = Engine::new(table).run(parser.by_ref(), &script.source, sink);
        script.checkpoint = parser.checkpoint();
        debug!(target: TARGET, ?report, "session run finished");
        Ok(report)
    }
}
