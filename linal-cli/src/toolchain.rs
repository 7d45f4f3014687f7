//! C 编译器调用
//!
//! 只负责拼参数与检查退出状态，编译器的诊断直接输出到终端。

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

use crate::logging::CLI_TARGET;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolchainError {
    #[error("could not run '{program}': {message}")]
    Spawn { program: String, message: String },

    #[error("'{program}' failed with {}", describe_status(*.code))]
    Failed { program: String, code: Option<i32> },
}

fn describe_status(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "no exit status (killed by signal)".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct Toolchain {
    cc: String,
    cflags: Vec<String>,
}

impl Toolchain {
    pub fn new(cc: impl Into<String>, cflags: Vec<String>) -> Self {
        Self {
            cc: cc.into(),
            cflags,
        }
    }

    /// 只做语法检查，错误指向未改动的源文件
    pub fn check_syntax(&self, input: &Path, include_dirs: &[&Path]) -> Result<(), ToolchainError> {
        let mut args = include_args(include_dirs);
        args.push("-fsyntax-only".into());
        args.push(input.into());
        self.invoke(args)
    }

    /// 编译为共享库
    pub fn compile_shared(
        &self,
        input: &Path,
        output: &Path,
        include_dirs: &[&Path],
    ) -> Result<(), ToolchainError> {
        let mut args = include_args(include_dirs);
        for flag in ["-fPIC", "-shared", "-o"] {
            args.push(flag.into());
        }
        args.push(output.into());
        args.push(input.into());
        self.invoke(args)
    }

    fn invoke(&self, args: Vec<OsString>) -> Result<(), ToolchainError> {
        debug!(target: CLI_TARGET, cc = %self.cc, ?args, cflags = ?self.cflags, "invoking compiler");
        let status = Command::new(&self.cc)
            .args(&self.cflags)
            .args(&args)
            .status()
            .map_err(|e| ToolchainError::Spawn {
                program: self.cc.clone(),
                message: e.to_string(),
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(ToolchainError::Failed {
                program: self.cc.clone(),
                code: status.code(),
            })
        }
    }
}

fn include_args(dirs: &[&Path]) -> Vec<OsString> {
    dirs.iter()
        .map(|dir| {
            let mut arg = OsString::from("-I");
            arg.push(dir.as_os_str());
            arg
        })
        .collect()
}
