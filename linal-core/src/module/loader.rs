//! 动态库加载

use std::ffi::c_void;
use std::path::{Path, PathBuf};

use libloading::Library;
use tracing::{debug, info};

use super::error::{BindingError, BindingResult};

const TARGET: &str = "linal::module";

/// 不是绝对路径、也不以 `./` `../` 开头时，按当前目录解析
///
/// 裸文件名交给系统加载器时会去库搜索路径里找，所以补上 `./`。
pub fn resolve_module_path(path: &str) -> PathBuf {
    if path.starts_with('/') || path.starts_with("./") || path.starts_with("../") {
        PathBuf::from(path)
    } else {
        Path::new(".").join(path)
    }
}

/// 已加载的模块
#[derive(Debug)]
pub struct ModuleHandle {
    library: Library,
    path: PathBuf,
}

impl ModuleHandle {
    pub fn load(path: &str) -> BindingResult<Self> {
        let resolved = resolve_module_path(path);
        debug!(target: TARGET, path = %resolved.display(), "loading module");
        // SAFETY: 加载动态库会运行其初始化代码，模块由调用方提供
        let library = unsafe { Library::new(&resolved) }
            .map_err(|err| BindingError::load(resolved.display().to_string(), err))?;
        info!(target: TARGET, path = %resolved.display(), "module loaded");
        Ok(Self {
            library,
            path: resolved,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 导出符号的地址
    pub fn resolve_symbol(&self, name: &str) -> BindingResult<*mut c_void> {
        // SAFETY: 只取地址，不按任何类型解释
        let symbol = unsafe { self.library.get::<*mut c_void>(name.as_bytes()) }
            .map_err(|err| BindingError::missing_symbol(name, err))?;
        let address = *symbol;
        if address.is_null() {
            return Err(BindingError::NullSymbol {
                symbol: name.to_string(),
            });
        }
        Ok(address)
    }

    pub fn has_symbol(&self, name: &str) -> bool {
        self.resolve_symbol(name).is_ok()
    }
}
