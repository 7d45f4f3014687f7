//! Linal - native commands driven by a flat script language
//!
//! Annotated C functions become typed commands; scripts made of
//! `!name(args...)` invocations call them.
//!
//! # Architecture
//!
//! ```text
//! linal-config/  - Pure configuration data
//! linal-core/    - Scanner, glue generator, script front end, dispatch, module binding
//! linal-vfs/     - File collaborator (native and in-memory)
//! linal-api/     - Session and orchestration
//! linal-cli/     - `linal` binary
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use linal_workspace::{run_script, ArgType, CallableTable, StderrSink};
//!
//! let mut table = CallableTable::new();
//! table.register("greet", &[ArgType::Str], |args| println!("hello {}", args[0]));
//! run_script("demo.lln", r#"!greet("world")"#, table, &mut StderrSink).unwrap();
//! ```

pub use linal_api::*;
