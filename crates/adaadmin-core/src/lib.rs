#![forbid(unsafe_code)]
#![warn(
    unused,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]
//! Client-side semantics for the Adabas administration API.
//!
//! The REST server exchanges several database settings as packed integers
//! (OPTIONS, USEREXITS, LOGGING) or as loosely typed `name=value` lists. This
//! crate owns the translation between those wire shapes and what an operator
//! reads and types:
//!
//! - [`flags`]: bit-flag decoding for the option domains and the AR classifier
//! - [`parameter`]: the parameter update record and its `name=value` assignment
//! - [`fdt`]: compaction of field definition table sources
//! - [`error`]: typed failures raised while applying parameters

pub mod error;
pub mod fdt;
pub mod flags;
pub mod parameter;

pub use error::{ParameterError, ParameterResult};
pub use flags::{FlagDomain, decode_auto_restart};
pub use parameter::{CLEAR_OPTIONS, FieldKind, ParameterMode, ParameterUpdate};
