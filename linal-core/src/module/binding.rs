//! 模块绑定
//!
//! 加载模块 → 解析注册函数与调用表 → 调用注册函数 → 转换为 `CallableTable`。

use std::ffi::c_void;
use std::mem;
use std::path::Path;

use linal_config::ModuleConfig;
use tracing::{debug, info};

use super::error::{BindingError, BindingResult};
use super::ffi::{table_from_raw, RawCallables};
use super::loader::ModuleHandle;
use crate::runtime::CallableTable;

const TARGET: &str = "linal::module";

type RegisterFn = unsafe extern "C" fn();

/// 绑定后的模块
///
/// 调用表里的函数指针指向模块内部，字段顺序保证调用表先于模块释放。
#[derive(Debug)]
pub struct LoadedModule {
    table: CallableTable,
    handle: ModuleHandle,
}

impl LoadedModule {
    pub fn table(&self) -> &CallableTable {
        &self.table
    }

    pub fn path(&self) -> &Path {
        self.handle.path()
    }
}

/// 加载并绑定模块
pub fn bind_module(path: &str, config: &ModuleConfig) -> BindingResult<LoadedModule> {
    let handle = ModuleHandle::load(path)?;

    let register = handle.resolve_symbol(&config.register_symbol)?;
    let raw = handle.resolve_symbol(&config.table_symbol)?.cast::<RawCallables>();

    // SAFETY: 两个符号按导出约定分别是注册函数和调用表。
    // 同一进程内重复绑定时表已填充，不再注册
    let table = unsafe {
        if (*raw).is_empty() {
            let register = mem::transmute::<*mut c_void, RegisterFn>(register);
            debug!(target: TARGET, symbol = %config.register_symbol, "calling register entry");
            register();
        }
        table_from_raw(raw)?
    };

    info!(
        target: TARGET,
        path = %handle.path().display(),
        commands = table.len(),
        "module bound"
    );
    Ok(LoadedModule { table, handle })
}

/// 模块必须是库：导出入口函数时拒绝
pub fn ensure_library_shaped(path: &str, config: &ModuleConfig) -> BindingResult<()> {
    let handle = ModuleHandle::load(path)?;
    if handle.has_symbol(&config.entry_point_symbol) {
        return Err(BindingError::ExportsEntryPoint {
            path: handle.path().display().to_string(),
            symbol: config.entry_point_symbol.clone(),
        });
    }
    Ok(())
}
