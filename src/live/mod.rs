//! Live type system — the read-only query surface descriptors are built from
//! and compared against.
//!
//! A live symbol is an opaque handle owned by some type system (a metadata
//! reader, a reflection layer, or the in-memory [`SymbolGraph`]). Everything
//! in this crate talks to it only through [`TypeSystem`].
//!
//! ## Generic arguments
//!
//! Following the usual metadata convention, [`TypeSystem::generic_arguments`]
//! of a nested type includes the arguments inherited from its declaring
//! types, outermost first. [`TypeSystem::own_generic_arguments`] strips them.
//! The declaring type of a constructed nested type must be the declaring type
//! constructed with those inherited arguments.

mod graph;

pub use graph::{LiveSymbol, SymbolGraph};

use std::fmt;
use std::hash::Hash;

use crate::base::{AssemblyIdentity, ConstantValue};

/// Kind discriminator of a live symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiveKind {
    Assembly,
    /// A named type: class, struct, interface, enum, delegate.
    Type,
    Array,
    Pointer,
    ByRef,
    GenericTypeParameter,
    GenericMethodParameter,
    Constant,
    Field,
    Event,
    Property,
    Constructor,
    Method,
}

impl LiveKind {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assembly => "assembly",
            Self::Type => "type",
            Self::Array => "array",
            Self::Pointer => "pointer",
            Self::ByRef => "by-ref",
            Self::GenericTypeParameter => "type parameter",
            Self::GenericMethodParameter => "method type parameter",
            Self::Constant => "constant",
            Self::Field => "field",
            Self::Event => "event",
            Self::Property => "property",
            Self::Constructor => "constructor",
            Self::Method => "method",
        }
    }

    /// Arrays, pointers and by-refs: types built around another type.
    pub fn is_type_shape(&self) -> bool {
        matches!(self, Self::Array | Self::Pointer | Self::ByRef)
    }

    /// Fields, constants, events, properties, constructors and methods.
    pub fn is_member(&self) -> bool {
        matches!(
            self,
            Self::Constant
                | Self::Field
                | Self::Event
                | Self::Property
                | Self::Constructor
                | Self::Method
        )
    }
}

impl fmt::Display for LiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only queries over a live type system.
///
/// Queries that make no sense for a symbol's kind return `None` or an empty
/// list. `kind` returning `None` means the handle is unknown to the type
/// system and is treated as invalid input.
pub trait TypeSystem {
    /// Opaque handle. Two handles are the same symbol iff they compare equal.
    type Symbol: Copy + Eq + Hash + fmt::Debug;

    fn kind(&self, symbol: Self::Symbol) -> Option<LiveKind>;

    /// Simple name: no namespace, no declaring type, no arity suffix.
    fn name(&self, symbol: Self::Symbol) -> Option<&str>;

    /// Namespace of a top-level named type (`Some("")` for the global one).
    fn namespace(&self, symbol: Self::Symbol) -> Option<&str>;

    /// The assembly-kind symbol owning a type or member.
    fn assembly(&self, symbol: Self::Symbol) -> Option<Self::Symbol>;

    fn assembly_identity(&self, assembly: Self::Symbol) -> Option<&AssemblyIdentity>;

    /// Declaring type of a nested type, a member, or a type parameter.
    fn declaring_type(&self, symbol: Self::Symbol) -> Option<Self::Symbol>;

    /// Declaring method of a method type parameter.
    fn declaring_method(&self, symbol: Self::Symbol) -> Option<Self::Symbol>;

    /// Generic parameters of a definition or arguments of a constructed
    /// type/method, including those inherited from declaring types.
    fn generic_arguments(&self, symbol: Self::Symbol) -> Vec<Self::Symbol>;

    /// True for an unconstructed generic type or method definition.
    fn is_generic_definition(&self, symbol: Self::Symbol) -> bool;

    /// Parameter types of a constructor, method, or indexer.
    fn parameter_types(&self, symbol: Self::Symbol) -> Vec<Self::Symbol>;

    fn array_rank(&self, symbol: Self::Symbol) -> Option<u32>;

    /// Element of an array, referent of a pointer or by-ref.
    fn element_type(&self, symbol: Self::Symbol) -> Option<Self::Symbol>;

    /// Zero-based position of a generic parameter in its declaration.
    fn generic_position(&self, symbol: Self::Symbol) -> Option<u32>;

    fn constant_value(&self, symbol: Self::Symbol) -> Option<ConstantValue>;

    /// Generic arguments declared by the symbol itself.
    ///
    /// For named types this drops the arguments inherited from the declaring
    /// type; methods never inherit any.
    fn own_generic_arguments(&self, symbol: Self::Symbol) -> Vec<Self::Symbol> {
        let mut args = self.generic_arguments(symbol);
        if self.kind(symbol) == Some(LiveKind::Type) {
            let inherited = self
                .declaring_type(symbol)
                .map(|outer| self.generic_arguments(outer).len())
                .unwrap_or(0);
            args.drain(..inherited.min(args.len()));
        }
        args
    }
}
