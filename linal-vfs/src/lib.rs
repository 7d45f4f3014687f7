//! Linal source file access
//!
//! Whole-file reads and writes behind a small trait, so the generator and
//! the script session never touch `std::fs` directly.
//!
//! # Usage
//! ```rust
//! use linal_vfs::{MemoryFs, SourceFs};
//! use std::path::Path;
//!
//! let fs = MemoryFs::new();
//! fs.write_file(Path::new("boot.lln"), b"!greet(\"hi\")").unwrap();
//! assert_eq!(fs.read_to_string(Path::new("boot.lln")).unwrap(), "!greet(\"hi\")");
//! ```

mod error;
mod memory;
mod native;
mod source;

pub use error::{VfsError, VfsResult};
pub use memory::MemoryFs;
pub use native::NativeFs;
pub use source::SourceFs;
