//! 原生模块绑定
//!
//! - `ffi`: 与 C 头文件一致的 `#[repr(C)]` 布局
//! - `loader`: 动态库加载与符号解析
//! - `binding`: 调用注册函数并把 C 调用表转换为 `CallableTable`

pub mod binding;
pub mod error;
pub mod ffi;
pub mod loader;

pub use binding::{bind_module, ensure_library_shaped, LoadedModule};
pub use error::{BindingError, BindingResult};
pub use ffi::{table_from_raw, RawArg, RawArgTypes, RawArgValue, RawArgs, RawCallable, RawCallables};
pub use loader::{resolve_module_path, ModuleHandle};

/// C 头文件 `linal.h` 的内容
pub const C_HEADER: &str = include_str!("../../include/linal.h");
