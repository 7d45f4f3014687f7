//! 项目文件 `linal.json`
//!
//! ```json
//! {
//!   "script": "demo.lln",
//!   "source": "commands.c",
//!   "cc": "gcc",
//!   "cflags": ["-O2"],
//!   "log": { "global": "info", "dispatch": "debug" }
//! }
//! ```
//!
//! `module` 与 `source` 二选一：前者是已编译的共享库，后者会先构建再运行。
//! 相对路径都相对于项目文件所在目录。

use std::path::{Path, PathBuf};

use linal_config::{CodegenConfig, LogConfig};
use linal_vfs::{SourceFs, VfsError};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectError {
    #[error("'{path}' not found, create it and set the 'script' field")]
    NotFound { path: String },

    #[error("cannot read '{path}': {message}")]
    Read { path: String, message: String },

    #[error("cannot parse '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("'script' in '{path}' must not be empty")]
    EmptyScript { path: String },

    #[error("'{path}' must set exactly one of 'module' or 'source'")]
    Target { path: String },
}

/// 项目文件内容
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectFile {
    pub script: String,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub cc: Option<String>,
    #[serde(default)]
    pub cflags: Vec<String>,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub codegen: CodegenConfig,
}

/// 运行目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectTarget {
    Module(PathBuf),
    Source(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Project {
    pub file: ProjectFile,
    pub base_dir: PathBuf,
    path: String,
}

impl Project {
    pub fn load(fs: &dyn SourceFs, path: &Path) -> Result<Self, ProjectError> {
        let display = path.display().to_string();
        let content = fs.read_to_string(path).map_err(|e| match e {
            VfsError::NotFound { .. } => ProjectError::NotFound {
                path: display.clone(),
            },
            other => ProjectError::Read {
                path: display.clone(),
                message: other.to_string(),
            },
        })?;
        let base_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        Self::parse(&content, &display, base_dir)
    }

    pub fn parse(content: &str, path: &str, base_dir: PathBuf) -> Result<Self, ProjectError> {
        let file: ProjectFile = serde_json::from_str(content).map_err(|e| ProjectError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        if file.script.trim().is_empty() {
            return Err(ProjectError::EmptyScript {
                path: path.to_string(),
            });
        }
        Ok(Self {
            file,
            base_dir,
            path: path.to_string(),
        })
    }

    pub fn script_path(&self) -> PathBuf {
        self.base_dir.join(&self.file.script)
    }

    pub fn target(&self) -> Result<ProjectTarget, ProjectError> {
        match (&self.file.module, &self.file.source) {
            (Some(module), None) => Ok(ProjectTarget::Module(self.base_dir.join(module))),
            (None, Some(source)) => Ok(ProjectTarget::Source(self.base_dir.join(source))),
            _ => Err(ProjectError::Target {
                path: self.path.clone(),
            }),
        }
    }
}
