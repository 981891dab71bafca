//! Descriptor factory — builds descriptors from live symbols.
//!
//! The factory owns the [`DescriptorArena`] of one documentation run and keeps
//! three caches:
//!
//! - assemblies by normalized identity ([`AssemblyKey`]), so every symbol of
//!   one assembly shares a single `AssemblyDescriptor`;
//! - namespaces by `(assembly, case-folded name)`;
//! - every other symbol by live handle.
//!
//! Types and methods reserve their slot and register it in the handle cache
//! before describing their parts. A generic parameter reached while
//! describing its own declaring type or method therefore resolves to the
//! reserved id instead of recursing forever.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, warn};

use super::{
    ArrayDescriptor, ByRefDescriptor, ConstantDescriptor, ConstructorDescriptor, Descriptor,
    DescriptorArena, DescriptorId, EventDescriptor, FieldDescriptor, GenericArguments,
    GenericMethodParameterDescriptor, GenericTypeParameterDescriptor, MethodDescriptor,
    NamespaceDescriptor, PointerDescriptor, PropertyDescriptor, TypeDescriptor,
};
use crate::base::AssemblyKey;
use crate::error::{RefdocError, Result};
use crate::live::{LiveKind, TypeSystem};

/// Builds and caches descriptors for the symbols of one type system.
pub struct DescriptorFactory<'ts, T: TypeSystem> {
    ts: &'ts T,
    arena: DescriptorArena,
    assemblies: FxHashMap<AssemblyKey, DescriptorId>,
    namespaces: FxHashMap<(DescriptorId, SmolStr), DescriptorId>,
    symbols: FxHashMap<T::Symbol, DescriptorId>,
}

impl<'ts, T: TypeSystem> DescriptorFactory<'ts, T> {
    pub fn new(ts: &'ts T) -> Self {
        Self {
            ts,
            arena: DescriptorArena::new(),
            assemblies: FxHashMap::default(),
            namespaces: FxHashMap::default(),
            symbols: FxHashMap::default(),
        }
    }

    /// The type system descriptors are built from.
    pub fn type_system(&self) -> &'ts T {
        self.ts
    }

    pub fn arena(&self) -> &DescriptorArena {
        &self.arena
    }

    /// Finish the run and keep only the descriptor graph.
    pub fn into_arena(self) -> DescriptorArena {
        self.arena
    }

    /// Descriptor previously built for `symbol`, if any.
    pub fn cached(&self, symbol: T::Symbol) -> Option<DescriptorId> {
        self.symbols.get(&symbol).copied()
    }

    /// Number of distinct assemblies described so far.
    pub fn assembly_count(&self) -> usize {
        self.assemblies.len()
    }

    /// Describe a live symbol, reusing cached descriptors.
    ///
    /// On error nothing built during this call is kept.
    pub fn describe(&mut self, symbol: T::Symbol) -> Result<DescriptorId> {
        let mark = self.arena.len();
        match self.describe_symbol(symbol) {
            Ok(id) => Ok(id),
            Err(err) => {
                warn!("Rejected {:?}: {}", symbol, err);
                self.rollback(mark);
                Err(err)
            }
        }
    }

    /// Describe several symbols in order.
    pub fn describe_all<I>(&mut self, symbols: I) -> Result<Vec<DescriptorId>>
    where
        I: IntoIterator<Item = T::Symbol>,
    {
        symbols.into_iter().map(|s| self.describe(s)).collect()
    }

    fn rollback(&mut self, mark: usize) {
        self.arena.truncate(mark);
        self.symbols.retain(|_, id| id.index() < mark);
        self.assemblies.retain(|_, id| id.index() < mark);
        self.namespaces.retain(|_, id| id.index() < mark);
    }

    fn describe_symbol(&mut self, symbol: T::Symbol) -> Result<DescriptorId> {
        if let Some(id) = self.cached(symbol) {
            return Ok(id);
        }
        let kind = self.ts.kind(symbol).ok_or_else(|| {
            RefdocError::invalid_symbol(format!("{symbol:?} is not a known symbol"))
        })?;

        match kind {
            LiveKind::Assembly => self.describe_assembly(symbol),
            LiveKind::Type => self.describe_type(symbol),
            LiveKind::Array => {
                let item_type = self.describe_element(symbol, kind)?;
                let rank = self
                    .ts
                    .array_rank(symbol)
                    .filter(|&rank| rank >= 1)
                    .ok_or_else(|| {
                        RefdocError::invalid_symbol(format!("{kind} {symbol:?} has no rank"))
                    })?;
                self.alloc_for(symbol, Descriptor::Array(ArrayDescriptor { rank, item_type }))
            }
            LiveKind::Pointer => {
                let referent_type = self.describe_element(symbol, kind)?;
                self.alloc_for(symbol, Descriptor::Pointer(PointerDescriptor { referent_type }))
            }
            LiveKind::ByRef => {
                let referent_type = self.describe_element(symbol, kind)?;
                self.alloc_for(symbol, Descriptor::ByRef(ByRefDescriptor { referent_type }))
            }
            LiveKind::GenericTypeParameter => self.describe_type_parameter(symbol),
            LiveKind::GenericMethodParameter => self.describe_method_parameter(symbol),
            LiveKind::Constant => {
                let declaring_type = self.describe_declaring(symbol, kind)?;
                let value = self.ts.constant_value(symbol).ok_or_else(|| {
                    RefdocError::invalid_symbol(format!("{kind} {symbol:?} has no value"))
                })?;
                let name = self.name_of(symbol, kind)?;
                self.alloc_for(
                    symbol,
                    Descriptor::Constant(ConstantDescriptor {
                        name,
                        value,
                        declaring_type,
                    }),
                )
            }
            LiveKind::Field => {
                let declaring_type = self.describe_declaring(symbol, kind)?;
                let name = self.name_of(symbol, kind)?;
                self.alloc_for(
                    symbol,
                    Descriptor::Field(FieldDescriptor {
                        name,
                        declaring_type,
                    }),
                )
            }
            LiveKind::Event => {
                let declaring_type = self.describe_declaring(symbol, kind)?;
                let name = self.name_of(symbol, kind)?;
                self.alloc_for(
                    symbol,
                    Descriptor::Event(EventDescriptor {
                        name,
                        declaring_type,
                    }),
                )
            }
            LiveKind::Property => {
                let declaring_type = self.describe_declaring(symbol, kind)?;
                let parameter_types = self.describe_parameters(symbol)?;
                let name = self.name_of(symbol, kind)?;
                self.alloc_for(
                    symbol,
                    Descriptor::Property(PropertyDescriptor {
                        name,
                        parameter_types,
                        declaring_type,
                    }),
                )
            }
            LiveKind::Constructor => {
                let declaring_type = self.describe_declaring(symbol, kind)?;
                let parameter_types = self.describe_parameters(symbol)?;
                self.alloc_for(
                    symbol,
                    Descriptor::Constructor(ConstructorDescriptor {
                        parameter_types,
                        declaring_type,
                    }),
                )
            }
            LiveKind::Method => self.describe_method(symbol),
        }
    }

    fn alloc_for(&mut self, symbol: T::Symbol, descriptor: Descriptor) -> Result<DescriptorId> {
        let id = self.arena.alloc(descriptor)?;
        self.symbols.insert(symbol, id);
        Ok(id)
    }

    fn name_of(&self, symbol: T::Symbol, kind: LiveKind) -> Result<SmolStr> {
        self.ts
            .name(symbol)
            .map(SmolStr::new)
            .ok_or_else(|| RefdocError::invalid_symbol(format!("{kind} {symbol:?} has no name")))
    }

    fn position_of(&self, symbol: T::Symbol, kind: LiveKind) -> Result<u32> {
        self.ts.generic_position(symbol).ok_or_else(|| {
            RefdocError::invalid_symbol(format!("{kind} {symbol:?} has no generic position"))
        })
    }

    fn describe_element(&mut self, symbol: T::Symbol, kind: LiveKind) -> Result<DescriptorId> {
        let element = self.ts.element_type(symbol).ok_or_else(|| {
            RefdocError::invalid_symbol(format!("{kind} {symbol:?} has no element type"))
        })?;
        self.describe_symbol(element)
    }

    fn describe_declaring(&mut self, symbol: T::Symbol, kind: LiveKind) -> Result<DescriptorId> {
        let declaring = self.ts.declaring_type(symbol).ok_or_else(|| {
            RefdocError::invalid_symbol(format!("{kind} {symbol:?} has no declaring type"))
        })?;
        self.describe_symbol(declaring)
    }

    fn describe_parameters(&mut self, symbol: T::Symbol) -> Result<Vec<DescriptorId>> {
        self.ts
            .parameter_types(symbol)
            .into_iter()
            .map(|p| self.describe_symbol(p))
            .collect()
    }

    fn describe_generic_arguments(
        &mut self,
        arguments: Vec<T::Symbol>,
        open: bool,
    ) -> Result<GenericArguments> {
        let ids = arguments
            .into_iter()
            .map(|a| self.describe_symbol(a))
            .collect::<Result<Vec<_>>>()?;
        Ok(GenericArguments::from_ids(ids, open))
    }

    fn describe_assembly(&mut self, symbol: T::Symbol) -> Result<DescriptorId> {
        let ts = self.ts;
        let identity = ts.assembly_identity(symbol).ok_or_else(|| {
            RefdocError::invalid_symbol(format!("assembly {symbol:?} has no identity"))
        })?;
        let key = identity.key();
        if let Some(&id) = self.assemblies.get(&key) {
            self.symbols.insert(symbol, id);
            return Ok(id);
        }
        let id = self.alloc_for(symbol, Descriptor::Assembly(identity.into()))?;
        debug!("Described assembly {} as {}", identity, id);
        self.assemblies.insert(key, id);
        Ok(id)
    }

    fn describe_namespace(&mut self, assembly: DescriptorId, name: &str) -> Result<DescriptorId> {
        let key = (assembly, SmolStr::new(name.to_lowercase()));
        if let Some(&id) = self.namespaces.get(&key) {
            return Ok(id);
        }
        let id = self.arena.alloc(Descriptor::Namespace(NamespaceDescriptor {
            name: SmolStr::new(name),
            assembly,
        }))?;
        self.namespaces.insert(key, id);
        Ok(id)
    }

    fn describe_type(&mut self, symbol: T::Symbol) -> Result<DescriptorId> {
        let name = self.name_of(symbol, LiveKind::Type)?;
        let live_assembly = self.ts.assembly(symbol).ok_or_else(|| {
            RefdocError::invalid_symbol(format!("type {symbol:?} has no assembly"))
        })?;

        let id = self.arena.reserve();
        self.symbols.insert(symbol, id);

        let assembly = self.describe_symbol(live_assembly)?;
        let declaring_type = match self.ts.declaring_type(symbol) {
            Some(outer) => Some(self.describe_symbol(outer)?),
            None => None,
        };
        let namespace = match declaring_type {
            Some(_) => None,
            None => {
                let ns = self.ts.namespace(symbol).unwrap_or_default().to_owned();
                Some(self.describe_namespace(assembly, &ns)?)
            }
        };
        let open = self.ts.is_generic_definition(symbol);
        let own_arguments = self.ts.own_generic_arguments(symbol);
        let generic_arguments = self.describe_generic_arguments(own_arguments, open)?;

        self.arena.fill(
            id,
            Descriptor::Type(TypeDescriptor {
                name,
                namespace,
                generic_arguments,
                declaring_type,
                assembly,
            }),
        )?;
        Ok(id)
    }

    fn describe_method(&mut self, symbol: T::Symbol) -> Result<DescriptorId> {
        let name = self.name_of(symbol, LiveKind::Method)?;

        let id = self.arena.reserve();
        self.symbols.insert(symbol, id);

        let declaring_type = self.describe_declaring(symbol, LiveKind::Method)?;
        let open = self.ts.is_generic_definition(symbol);
        let arguments = self.ts.generic_arguments(symbol);
        let generic_arguments = self.describe_generic_arguments(arguments, open)?;
        let parameter_types = self.describe_parameters(symbol)?;

        self.arena.fill(
            id,
            Descriptor::Method(MethodDescriptor {
                name,
                generic_arguments,
                parameter_types,
                declaring_type,
            }),
        )?;
        Ok(id)
    }

    fn describe_type_parameter(&mut self, symbol: T::Symbol) -> Result<DescriptorId> {
        let kind = LiveKind::GenericTypeParameter;
        let declaring_type = self.describe_declaring(symbol, kind)?;
        // Describing the declaring definition usually registers its parameters.
        if let Some(id) = self.cached(symbol) {
            return Ok(id);
        }
        let name = self.name_of(symbol, kind)?;
        let position = self.position_of(symbol, kind)?;
        self.alloc_for(
            symbol,
            Descriptor::GenericTypeParameter(GenericTypeParameterDescriptor {
                name,
                position,
                declaring_type,
            }),
        )
    }

    fn describe_method_parameter(&mut self, symbol: T::Symbol) -> Result<DescriptorId> {
        let kind = LiveKind::GenericMethodParameter;
        let method = self.ts.declaring_method(symbol).ok_or_else(|| {
            RefdocError::invalid_symbol(format!("{kind} {symbol:?} has no declaring method"))
        })?;
        let declaring_method = self.describe_symbol(method)?;
        if let Some(id) = self.cached(symbol) {
            return Ok(id);
        }
        let name = self.name_of(symbol, kind)?;
        let position = self.position_of(symbol, kind)?;
        self.alloc_for(
            symbol,
            Descriptor::GenericMethodParameter(GenericMethodParameterDescriptor {
                name,
                position,
                declaring_method,
            }),
        )
    }
}
