//! Member descriptors and the active member stack.
//!
//! A [`MemberDescriptor`] is produced once per type by whatever discovers the
//! serializable members of that type, and then shared read-only by every
//! operation. [`MemberStack`] records which of them is being processed right
//! now, innermost last.

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod stack;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::{MemberDescriptor, MemberKind};
pub use stack::MemberStack;
