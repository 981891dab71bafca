//! # refdoc-base
//!
//! Core library for API reference documentation: symbol descriptors, structural
//! matching against a live type system, and stable page naming.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! naming     → Canonical names, page namers, links
//!   ↓
//! resolve    → Structural equality: descriptor vs live symbol
//!   ↓
//! descriptor → Descriptor arena, node kinds, factory
//!   ↓
//! live       → TypeSystem trait, in-memory SymbolGraph
//!   ↓
//! base       → Primitives (Version, AssemblyIdentity, ConstantValue)
//! ```

// ============================================================================
// MODULES (dependency order: base → live → descriptor → resolve → naming)
// ============================================================================

/// Foundation types: assembly identity, versions, constant values
pub mod base;

/// Live type system: the query surface and an in-memory implementation
pub mod live;

/// Symbol descriptors: arena, node kinds, factory
pub mod descriptor;

/// Structural equality between descriptors and live symbols
pub mod resolve;

/// Canonical names and page file names
pub mod naming;

/// Error type shared by every module
pub mod error;

// Re-export foundation types
pub use base::{AssemblyIdentity, AssemblyKey, ConstantValue, SmolStr, Version};

// Re-export the main entry points
pub use descriptor::{Descriptor, DescriptorArena, DescriptorFactory, DescriptorId, DescriptorKind};
pub use error::{RefdocError, Result};
pub use live::{LiveKind, LiveSymbol, SymbolGraph, TypeSystem};
pub use naming::{
    CounterPageNamer, HashPageNamer, NameMode, NamingOptions, NamingStrategy, PageLinker,
    PageNamer, canonical_name,
};
pub use resolve::{StructuralMatcher, equals};
