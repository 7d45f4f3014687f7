//! 胶水代码生成
//!
//! 源码 → `Generator`（构建 `GlueUnit`）→ `Emitter`（渲染文本）

pub mod emit;
pub mod error;
pub mod generator;
pub mod ir;

pub use emit::{emit, Emitter};
pub use error::{GenerateError, GenerateErrorKind};
pub use generator::{generate, GenerateResult, Generator};
pub use ir::{GlueItem, GlueUnit, HookKind, ParamDescriptor, Registration};

use linal_config::{CodegenConfig, ModuleConfig};

/// 生成并渲染一个源文件的胶水代码
pub fn generate_glue(
    source: &str,
    file: &str,
    codegen: &CodegenConfig,
    module: &ModuleConfig,
) -> GenerateResult<String> {
    let unit = generate(source, file)?;
    Ok(emit(&unit, codegen, module))
}
