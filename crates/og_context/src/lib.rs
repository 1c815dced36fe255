#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod context;
mod error;
mod impls;
mod node;
mod options;
mod parameters;
mod visited;

pub mod hooks;
pub mod member;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use context::SerializationContext;
pub use error::{ContextError, HookError, Result};
pub use node::{Node, ObjectId};
pub use options::SerializerOptions;
pub use parameters::Parameters;
pub use visited::VisitedSet;
