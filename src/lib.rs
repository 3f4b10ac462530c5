//! Support runtime for compiler-generated code.
//!
//! Generated programs reserve a fixed buffer, wrap it in an [`Arena`],
//! and open a [`Scope`] around each block. String and byte concatenation
//! allocate through the arena and fall back to the heap once it is full;
//! leaving the scope releases every arena allocation made inside it at
//! once, while heap results stay with the caller.

pub mod alloc;
pub mod arena;
pub mod bytes;
pub mod cli;
pub mod concat;
pub mod config;
pub mod debug;
pub mod error;
pub mod input;
pub mod net;
pub mod output;
pub mod scope;

pub use crate::alloc::acquire;
pub use arena::{Arena, DEFAULT_ARENA_CAPACITY};
pub use bytes::{Bytes, Text};
pub use concat::{
    bytes_to_text, concat, concat_bytes, concat_bytes_in, concat_in, try_concat,
    try_concat_bytes,
};
pub use error::{AllocError, RuntimeError};
pub use scope::{Scope, ScopeGuard, enter_scope, leave_scope};
