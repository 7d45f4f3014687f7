//! 通用工具
//!
//! - `lexer`: 词法分析基础设施
//! - `report`: 诊断渲染

pub mod lexer;
pub mod report;
