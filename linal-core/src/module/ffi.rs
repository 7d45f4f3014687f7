//! C 侧调用表的内存布局
//!
//! 与 `include/linal.h` 中的 `linal_*` 结构一一对应。
//! 所有动态数组都是 `{ items, count, capacity }` 三元组。

use std::ffi::{c_char, c_float, c_int, c_void, CStr, CString};
use std::ptr;
use std::slice;

use tracing::{debug, warn};

use super::error::{BindingError, BindingResult};
use crate::decl::COMMAND_SIGIL;
use crate::runtime::{ArgType, ArgValue, Callable, CallableTable, CommandFn, HookFn};

const TARGET: &str = "linal::module";

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawArgTypes {
    pub items: *mut c_int,
    pub count: usize,
    pub capacity: usize,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union RawArgValue {
    pub i: c_int,
    pub f: c_float,
    pub b: bool,
    pub s: *mut c_char,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct RawArg {
    pub ty: c_int,
    pub value: RawArgValue,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct RawArgs {
    pub items: *mut RawArg,
    pub count: usize,
    pub capacity: usize,
}

pub type RawCommandFn = unsafe extern "C" fn(RawArgs) -> *mut c_void;
pub type RawHookFn = unsafe extern "C" fn();

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawCallable {
    pub name: *const c_char,
    pub signature: RawArgTypes,
    pub fnptr: Option<RawCommandFn>,
}

#[repr(C)]
#[derive(Debug)]
pub struct RawCallables {
    pub items: *mut RawCallable,
    pub count: usize,
    pub capacity: usize,
    pub pre: Option<RawHookFn>,
    pub post: Option<RawHookFn>,
}

impl RawCallables {
    pub const fn empty() -> Self {
        Self {
            items: ptr::null_mut(),
            count: 0,
            capacity: 0,
            pre: None,
            post: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0 && self.pre.is_none() && self.post.is_none()
    }
}

/// 空指针或零长度都视为空切片
unsafe fn raw_slice<'a, T>(items: *const T, count: usize) -> &'a [T] {
    if items.is_null() || count == 0 {
        &[]
    } else {
        slice::from_raw_parts(items, count)
    }
}

/// 把 C 侧调用表转换为 `CallableTable`
///
/// # Safety
///
/// `raw` 必须指向有效的 `RawCallables`，其中的名字、签名数组和函数指针
/// 在返回的调用表存活期间都保持有效（通常由 `ModuleHandle` 保证）。
pub unsafe fn table_from_raw(raw: *const RawCallables) -> BindingResult<CallableTable> {
    let mut table = CallableTable::new();
    let Some(raw) = raw.as_ref() else {
        return Ok(table);
    };

    for (index, entry) in raw_slice(raw.items, raw.count).iter().enumerate() {
        table.push(callable_from_raw(index, entry)?);
    }

    table.set_pre_boxed(raw.pre.map(wrap_hook));
    table.set_post_boxed(raw.post.map(wrap_hook));
    debug!(
        target: TARGET,
        commands = table.len(),
        pre = table.has_pre(),
        post = table.has_post(),
        "converted callable table"
    );
    Ok(table)
}

unsafe fn callable_from_raw(index: usize, entry: &RawCallable) -> BindingResult<Callable> {
    if entry.name.is_null() {
        return Err(BindingError::InvalidName { index });
    }
    let name = CStr::from_ptr(entry.name)
        .to_str()
        .map_err(|_| BindingError::InvalidName { index })?;
    if !name.starts_with(COMMAND_SIGIL) {
        return Err(BindingError::InvalidCommandName {
            name: name.to_string(),
        });
    }

    let signature = raw_slice(entry.signature.items, entry.signature.count)
        .iter()
        .map(|&tag| {
            ArgType::from_c_tag(tag).ok_or_else(|| BindingError::UnknownArgType {
                command: name.to_string(),
                tag,
            })
        })
        .collect::<BindingResult<Vec<_>>>()?;

    let fnptr = entry.fnptr.ok_or_else(|| BindingError::NullFunction {
        command: name.to_string(),
    })?;

    Ok(Callable::new(name, signature, wrap_command(fnptr)))
}

fn wrap_command(fnptr: RawCommandFn) -> CommandFn {
    Box::new(move |args: &[ArgValue]| {
        // 字符串在调用期间由这里持有
        let strings: Vec<Option<CString>> = args.iter().map(c_string_arg).collect();
        let mut raw_args: Vec<RawArg> = args
            .iter()
            .zip(&strings)
            .map(|(value, owned)| to_raw_arg(value, owned.as_ref()))
            .collect();
        let raw = RawArgs {
            items: raw_args.as_mut_ptr(),
            count: raw_args.len(),
            capacity: raw_args.len(),
        };
        // SAFETY: 函数指针来自已加载模块，参数布局与签名一致
        unsafe {
            fnptr(raw);
        }
    })
}

fn wrap_hook(hook: RawHookFn) -> HookFn {
    // SAFETY: 钩子是无参无返回值的 C 函数
    Box::new(move || unsafe { hook() })
}

/// 内部 NUL 截断字符串
fn c_string_arg(value: &ArgValue) -> Option<CString> {
    let ArgValue::Str(text) = value else {
        return None;
    };
    let bytes = match text.find('\0') {
        Some(end) => {
            warn!(target: TARGET, "string argument truncated at embedded NUL");
            &text.as_bytes()[..end]
        }
        None => text.as_bytes(),
    };
    CString::new(bytes).ok()
}

fn to_raw_arg(value: &ArgValue, owned: Option<&CString>) -> RawArg {
    let raw = match value {
        ArgValue::Int(i) => RawArgValue { i: *i },
        ArgValue::Float(f) => RawArgValue { f: *f },
        ArgValue::Bool(b) => RawArgValue { b: *b },
        ArgValue::Str(_) => RawArgValue {
            s: owned.map_or(ptr::null_mut(), |s| s.as_ptr() as *mut c_char),
        },
    };
    RawArg {
        ty: value.ty().c_tag(),
        value: raw,
    }
}
