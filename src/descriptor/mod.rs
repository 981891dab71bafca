//! Symbol descriptor model.
//!
//! Descriptors are immutable value nodes describing assemblies, namespaces,
//! types and members independently of any live handle. They are stored in a
//! [`DescriptorArena`] and refer to each other by [`DescriptorId`].
//!
//! ## Key Types
//!
//! - [`Descriptor`] — Closed sum over the fourteen descriptor kinds
//! - [`DescriptorArena`] — Append-only storage for one documentation run
//! - [`DescriptorFactory`] — Builds descriptors from a [`TypeSystem`]
//! - [`GenericArguments`] — Own open parameters or substituted arguments
//!
//! [`TypeSystem`]: crate::live::TypeSystem

mod arena;
mod factory;
mod nodes;

pub use arena::{DescriptorArena, DescriptorId};
pub use factory::DescriptorFactory;
pub use nodes::{
    ArrayDescriptor, AssemblyDescriptor, ByRefDescriptor, ConstantDescriptor,
    ConstructorDescriptor, Descriptor, DescriptorKind, EventDescriptor, FieldDescriptor,
    GenericArguments, GenericMethodParameterDescriptor, GenericTypeParameterDescriptor,
    MethodDescriptor, NamespaceDescriptor, PointerDescriptor, PropertyDescriptor,
    TypeDescriptor,
};
