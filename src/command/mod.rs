// src/command/mod.rs

//! Command data model.
//!
//! - [`flags`]: the consumer-set flag bitset.
//! - [`metadata`]: immutable command metadata and caller provenance.
//! - [`result`]: the immutable per-invocation result record.
//! - [`invocation`]: the [`Command`] builder and run entry points.

pub mod flags;
pub mod invocation;
pub mod metadata;
pub mod result;

pub use flags::CommandFlags;
pub use invocation::Command;
pub use metadata::{CallerInfo, CommandMetadata};
pub use result::CommandResult;
