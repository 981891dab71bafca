//! Descriptor node types.
//!
//! Every node refers to other nodes through [`DescriptorId`]s, so back
//! references such as "type parameter → declaring method" are plain ids and
//! the graph needs no interior mutability.

use std::fmt;

use smol_str::SmolStr;

use super::DescriptorId;
use crate::base::{AssemblyIdentity, ConstantValue, Version};

/// Kind discriminator of a [`Descriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DescriptorKind {
    Assembly,
    Namespace,
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

impl DescriptorKind {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assembly => "assembly",
            Self::Namespace => "namespace",
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

    /// Descriptors that can appear in a type position.
    pub fn is_type_like(&self) -> bool {
        matches!(
            self,
            Self::Type
                | Self::Array
                | Self::Pointer
                | Self::ByRef
                | Self::GenericTypeParameter
                | Self::GenericMethodParameter
        )
    }

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

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Own generic arguments of a type or method.
///
/// A descriptor either lists its own open parameter declarations or the
/// arguments substituted for them, never a mix of both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenericArguments {
    #[default]
    None,
    /// The generic definition itself: ids of its own parameter descriptors.
    OpenParameters(Vec<DescriptorId>),
    /// A constructed type or method: ids of the substituted arguments.
    Substituted(Vec<DescriptorId>),
}

impl GenericArguments {
    /// Build from a list of ids, choosing the shape by `open`.
    pub fn from_ids(ids: Vec<DescriptorId>, open: bool) -> Self {
        match (ids.is_empty(), open) {
            (true, _) => Self::None,
            (false, true) => Self::OpenParameters(ids),
            (false, false) => Self::Substituted(ids),
        }
    }

    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::OpenParameters(_))
    }

    pub fn ids(&self) -> &[DescriptorId] {
        match self {
            Self::None => &[],
            Self::OpenParameters(ids) | Self::Substituted(ids) => ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssemblyDescriptor {
    pub name: SmolStr,
    pub version: Version,
    pub culture: SmolStr,
    /// Lowercase hex, empty when unsigned.
    pub public_key_token: SmolStr,
}

impl AssemblyDescriptor {
    /// The identity this descriptor was built from.
    pub fn identity(&self) -> AssemblyIdentity {
        AssemblyIdentity {
            name: self.name.clone(),
            version: self.version,
            culture: self.culture.clone(),
            public_key_token: self.public_key_token.clone(),
        }
    }
}

impl From<&AssemblyIdentity> for AssemblyDescriptor {
    fn from(identity: &AssemblyIdentity) -> Self {
        Self {
            name: identity.name.clone(),
            version: identity.version,
            culture: identity.culture.clone(),
            public_key_token: SmolStr::new(identity.public_key_token.to_ascii_lowercase()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamespaceDescriptor {
    /// Empty for the global namespace.
    pub name: SmolStr,
    pub assembly: DescriptorId,
}

impl NamespaceDescriptor {
    pub fn is_global(&self) -> bool {
        self.name.is_empty()
    }
}

/// A named type: class, struct, interface, enum, or delegate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDescriptor {
    /// Simple name without the arity suffix.
    pub name: SmolStr,
    /// Present only for top-level types.
    pub namespace: Option<DescriptorId>,
    /// Own arguments; the declaring type's arguments live on the declaring type.
    pub generic_arguments: GenericArguments,
    pub declaring_type: Option<DescriptorId>,
    pub assembly: DescriptorId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayDescriptor {
    /// Always at least 1.
    pub rank: u32,
    pub item_type: DescriptorId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerDescriptor {
    pub referent_type: DescriptorId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByRefDescriptor {
    pub referent_type: DescriptorId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenericTypeParameterDescriptor {
    pub name: SmolStr,
    pub position: u32,
    pub declaring_type: DescriptorId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenericMethodParameterDescriptor {
    pub name: SmolStr,
    pub position: u32,
    pub declaring_method: DescriptorId,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantDescriptor {
    pub name: SmolStr,
    pub value: ConstantValue,
    pub declaring_type: DescriptorId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDescriptor {
    pub name: SmolStr,
    pub declaring_type: DescriptorId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventDescriptor {
    pub name: SmolStr,
    pub declaring_type: DescriptorId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyDescriptor {
    pub name: SmolStr,
    /// Index parameters; empty unless the property is an indexer.
    pub parameter_types: Vec<DescriptorId>,
    pub declaring_type: DescriptorId,
}

impl PropertyDescriptor {
    pub fn is_indexer(&self) -> bool {
        !self.parameter_types.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructorDescriptor {
    pub parameter_types: Vec<DescriptorId>,
    pub declaring_type: DescriptorId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodDescriptor {
    pub name: SmolStr,
    pub generic_arguments: GenericArguments,
    pub parameter_types: Vec<DescriptorId>,
    pub declaring_type: DescriptorId,
}

/// A node of the descriptor graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Descriptor {
    Assembly(AssemblyDescriptor),
    Namespace(NamespaceDescriptor),
    Type(TypeDescriptor),
    Array(ArrayDescriptor),
    Pointer(PointerDescriptor),
    ByRef(ByRefDescriptor),
    GenericTypeParameter(GenericTypeParameterDescriptor),
    GenericMethodParameter(GenericMethodParameterDescriptor),
    Constant(ConstantDescriptor),
    Field(FieldDescriptor),
    Event(EventDescriptor),
    Property(PropertyDescriptor),
    Constructor(ConstructorDescriptor),
    Method(MethodDescriptor),
}

impl Descriptor {
    pub fn kind(&self) -> DescriptorKind {
        match self {
            Descriptor::Assembly(_) => DescriptorKind::Assembly,
            Descriptor::Namespace(_) => DescriptorKind::Namespace,
            Descriptor::Type(_) => DescriptorKind::Type,
            Descriptor::Array(_) => DescriptorKind::Array,
            Descriptor::Pointer(_) => DescriptorKind::Pointer,
            Descriptor::ByRef(_) => DescriptorKind::ByRef,
            Descriptor::GenericTypeParameter(_) => DescriptorKind::GenericTypeParameter,
            Descriptor::GenericMethodParameter(_) => DescriptorKind::GenericMethodParameter,
            Descriptor::Constant(_) => DescriptorKind::Constant,
            Descriptor::Field(_) => DescriptorKind::Field,
            Descriptor::Event(_) => DescriptorKind::Event,
            Descriptor::Property(_) => DescriptorKind::Property,
            Descriptor::Constructor(_) => DescriptorKind::Constructor,
            Descriptor::Method(_) => DescriptorKind::Method,
        }
    }

    /// Simple name, when the kind has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Descriptor::Assembly(d) => Some(d.name.as_str()),
            Descriptor::Namespace(d) => Some(d.name.as_str()),
            Descriptor::Type(d) => Some(d.name.as_str()),
            Descriptor::GenericTypeParameter(d) => Some(d.name.as_str()),
            Descriptor::GenericMethodParameter(d) => Some(d.name.as_str()),
            Descriptor::Constant(d) => Some(d.name.as_str()),
            Descriptor::Field(d) => Some(d.name.as_str()),
            Descriptor::Event(d) => Some(d.name.as_str()),
            Descriptor::Property(d) => Some(d.name.as_str()),
            Descriptor::Method(d) => Some(d.name.as_str()),
            Descriptor::Array(_)
            | Descriptor::Pointer(_)
            | Descriptor::ByRef(_)
            | Descriptor::Constructor(_) => None,
        }
    }

    /// Declaring type of a nested type, member, or type parameter.
    pub fn declaring_type(&self) -> Option<DescriptorId> {
        match self {
            Descriptor::Type(d) => d.declaring_type,
            Descriptor::GenericTypeParameter(d) => Some(d.declaring_type),
            Descriptor::Constant(d) => Some(d.declaring_type),
            Descriptor::Field(d) => Some(d.declaring_type),
            Descriptor::Event(d) => Some(d.declaring_type),
            Descriptor::Property(d) => Some(d.declaring_type),
            Descriptor::Constructor(d) => Some(d.declaring_type),
            Descriptor::Method(d) => Some(d.declaring_type),
            Descriptor::Assembly(_)
            | Descriptor::Namespace(_)
            | Descriptor::Array(_)
            | Descriptor::Pointer(_)
            | Descriptor::ByRef(_)
            | Descriptor::GenericMethodParameter(_) => None,
        }
    }

    /// Parameter types of constructors, methods and indexers.
    pub fn parameter_types(&self) -> &[DescriptorId] {
        match self {
            Descriptor::Property(d) => d.parameter_types.as_slice(),
            Descriptor::Constructor(d) => d.parameter_types.as_slice(),
            Descriptor::Method(d) => d.parameter_types.as_slice(),
            _ => &[],
        }
    }

    /// Every id this node refers to.
    pub fn references(&self) -> Vec<DescriptorId> {
        let mut refs = Vec::new();
        match self {
            Descriptor::Assembly(_) => {}
            Descriptor::Namespace(d) => refs.push(d.assembly),
            Descriptor::Type(d) => {
                refs.extend(d.namespace);
                refs.extend_from_slice(d.generic_arguments.ids());
                refs.extend(d.declaring_type);
                refs.push(d.assembly);
            }
            Descriptor::Array(d) => refs.push(d.item_type),
            Descriptor::Pointer(d) => refs.push(d.referent_type),
            Descriptor::ByRef(d) => refs.push(d.referent_type),
            Descriptor::GenericTypeParameter(d) => refs.push(d.declaring_type),
            Descriptor::GenericMethodParameter(d) => refs.push(d.declaring_method),
            Descriptor::Constant(d) => refs.push(d.declaring_type),
            Descriptor::Field(d) => refs.push(d.declaring_type),
            Descriptor::Event(d) => refs.push(d.declaring_type),
            Descriptor::Property(d) => {
                refs.push(d.declaring_type);
                refs.extend_from_slice(&d.parameter_types);
            }
            Descriptor::Constructor(d) => {
                refs.push(d.declaring_type);
                refs.extend_from_slice(&d.parameter_types);
            }
            Descriptor::Method(d) => {
                refs.push(d.declaring_type);
                refs.extend_from_slice(d.generic_arguments.ids());
                refs.extend_from_slice(&d.parameter_types);
            }
        }
        refs
    }
}
