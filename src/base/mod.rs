//! Foundation types shared by the live type system and the descriptor model.
//!
//! This module provides:
//! - [`Version`] - Four-part assembly version
//! - [`AssemblyIdentity`] - Name, version, culture, public key token
//! - [`AssemblyKey`] - Normalized identity used for caching and comparison
//! - [`ConstantValue`] - Literal value of a constant member
//!
//! This module has NO dependencies on other refdoc modules.

mod constant;
mod identity;

pub use constant::ConstantValue;
pub use identity::{AssemblyIdentity, AssemblyKey, Version};

// Re-export the string type used for every name in the crate
pub use smol_str::SmolStr;
