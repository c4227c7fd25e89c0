//! # Benchtest Util
//!
//! Small helpers shared by bench scripts:
//!
//! - [`ansi`]: Cursor, erase, style and colour escape sequences
//! - [`merge`]: Recursive merge of JSON objects (layered settings)
//! - [`fs`]: Non-clobbering output file names

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::implicit_hasher)]

pub mod ansi;
pub mod error;
pub mod fs;
pub mod merge;

pub use error::{UtilError, UtilResult};
