//! In-memory live type system.
//!
//! `SymbolGraph` stores every symbol in a single vector and hands out
//! [`LiveSymbol`] indices, like the symbol arena of a compiler front end.
//! Constructed generics, arrays, pointers and by-refs are interned, so
//! building `List<int>` twice yields the same handle.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::{LiveKind, TypeSystem};
use crate::base::{AssemblyIdentity, ConstantValue};

/// Handle of a symbol inside a [`SymbolGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LiveSymbol(u32);

impl LiveSymbol {
    /// Create a handle from an index.
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the index into the graph.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct LiveNode {
    kind: LiveKind,
    name: SmolStr,
    namespace: Option<SmolStr>,
    assembly: Option<LiveSymbol>,
    identity: Option<AssemblyIdentity>,
    declaring_type: Option<LiveSymbol>,
    declaring_method: Option<LiveSymbol>,
    generic_arguments: Vec<LiveSymbol>,
    is_generic_definition: bool,
    /// The definition a constructed type or method was built from.
    definition: Option<LiveSymbol>,
    parameter_types: Vec<LiveSymbol>,
    rank: Option<u32>,
    element: Option<LiveSymbol>,
    position: Option<u32>,
    value: Option<ConstantValue>,
}

impl LiveNode {
    fn new(kind: LiveKind, name: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            name: name.into(),
            namespace: None,
            assembly: None,
            identity: None,
            declaring_type: None,
            declaring_method: None,
            generic_arguments: Vec::new(),
            is_generic_definition: false,
            definition: None,
            parameter_types: Vec::new(),
            rank: None,
            element: None,
            position: None,
            value: None,
        }
    }
}

/// Interning key for symbols built from other symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ShapeKey {
    GenericType {
        definition: LiveSymbol,
        declaring: Option<LiveSymbol>,
        arguments: Vec<LiveSymbol>,
    },
    GenericMethod {
        definition: LiveSymbol,
        arguments: Vec<LiveSymbol>,
    },
    Array {
        element: LiveSymbol,
        rank: u32,
    },
    Pointer(LiveSymbol),
    ByRef(LiveSymbol),
}

/// An arena-backed type system assembled through a builder API.
#[derive(Debug, Clone, Default)]
pub struct SymbolGraph {
    nodes: Vec<LiveNode>,
    shapes: FxHashMap<ShapeKey, LiveSymbol>,
}

impl SymbolGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of symbols in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over every symbol handle in creation order.
    pub fn symbols(&self) -> impl Iterator<Item = LiveSymbol> + '_ {
        (0..self.nodes.len()).map(LiveSymbol::new)
    }

    /// Members declared directly on `ty`, in creation order.
    pub fn members(&self, ty: LiveSymbol) -> Vec<LiveSymbol> {
        self.symbols()
            .filter(|&s| {
                let node = &self.nodes[s.index()];
                node.kind.is_member() && node.declaring_type == Some(ty)
            })
            .collect()
    }

    /// The generic parameter or argument at `position` declared by `owner`
    /// itself (inherited parameters are skipped for nested types).
    pub fn generic_parameter(&self, owner: LiveSymbol, position: usize) -> Option<LiveSymbol> {
        self.own_generic_arguments(owner).get(position).copied()
    }

    fn node(&self, symbol: LiveSymbol) -> Option<&LiveNode> {
        self.nodes.get(symbol.index())
    }

    fn push(&mut self, node: LiveNode) -> LiveSymbol {
        let symbol = LiveSymbol::new(self.nodes.len());
        self.nodes.push(node);
        symbol
    }

    fn assembly_of(&self, symbol: LiveSymbol) -> Option<LiveSymbol> {
        self.node(symbol).and_then(|n| n.assembly)
    }

    // ------------------------------------------------------------------
    // Assemblies and named types
    // ------------------------------------------------------------------

    pub fn add_assembly(&mut self, identity: AssemblyIdentity) -> LiveSymbol {
        let mut node = LiveNode::new(LiveKind::Assembly, identity.name.clone());
        node.identity = Some(identity);
        let symbol = self.push(node);
        self.nodes[symbol.index()].assembly = Some(symbol);
        symbol
    }

    /// Add a non-generic top-level type.
    pub fn add_type(&mut self, assembly: LiveSymbol, namespace: &str, name: &str) -> LiveSymbol {
        self.add_generic_type(assembly, namespace, name, &[])
    }

    /// Add a top-level generic type definition with the given parameter names.
    pub fn add_generic_type(
        &mut self,
        assembly: LiveSymbol,
        namespace: &str,
        name: &str,
        parameters: &[&str],
    ) -> LiveSymbol {
        let mut node = LiveNode::new(LiveKind::Type, name);
        node.namespace = Some(SmolStr::new(namespace));
        node.assembly = Some(assembly);
        node.is_generic_definition = !parameters.is_empty();
        let ty = self.push(node);
        self.add_type_parameters(ty, 0, parameters);
        ty
    }

    /// Add a type nested in `declaring`.
    ///
    /// The new type inherits the generic arguments of `declaring` and appends
    /// its own `parameters`.
    pub fn add_nested_type(
        &mut self,
        declaring: LiveSymbol,
        name: &str,
        parameters: &[&str],
    ) -> LiveSymbol {
        let inherited = self
            .node(declaring)
            .map(|n| n.generic_arguments.clone())
            .unwrap_or_default();
        let mut node = LiveNode::new(LiveKind::Type, name);
        node.assembly = self.assembly_of(declaring);
        node.declaring_type = Some(declaring);
        node.is_generic_definition = !inherited.is_empty() || !parameters.is_empty();
        let offset = inherited.len() as u32;
        node.generic_arguments = inherited;
        let ty = self.push(node);
        self.add_type_parameters(ty, offset, parameters);
        ty
    }

    fn add_type_parameters(&mut self, ty: LiveSymbol, offset: u32, parameters: &[&str]) {
        let assembly = self.assembly_of(ty);
        for (i, name) in parameters.iter().enumerate() {
            let mut param = LiveNode::new(LiveKind::GenericTypeParameter, *name);
            param.declaring_type = Some(ty);
            param.assembly = assembly;
            param.position = Some(offset + i as u32);
            let param = self.push(param);
            self.nodes[ty.index()].generic_arguments.push(param);
        }
    }

    /// Construct a top-level generic type definition with `arguments`.
    pub fn construct(&mut self, definition: LiveSymbol, arguments: &[LiveSymbol]) -> LiveSymbol {
        self.construct_nested(None, definition, arguments)
    }

    /// Construct a generic type whose declaring type is itself constructed.
    ///
    /// `own_arguments` are appended to the arguments of `declaring`.
    pub fn construct_nested(
        &mut self,
        declaring: Option<LiveSymbol>,
        definition: LiveSymbol,
        own_arguments: &[LiveSymbol],
    ) -> LiveSymbol {
        let mut arguments = declaring
            .and_then(|d| self.node(d))
            .map(|n| n.generic_arguments.clone())
            .unwrap_or_default();
        arguments.extend_from_slice(own_arguments);

        let key = ShapeKey::GenericType {
            definition,
            declaring,
            arguments: arguments.clone(),
        };
        if let Some(&existing) = self.shapes.get(&key) {
            return existing;
        }

        let Some(def) = self.node(definition) else {
            return definition;
        };
        let mut node = LiveNode::new(LiveKind::Type, def.name.clone());
        node.namespace = def.namespace.clone();
        node.assembly = def.assembly;
        node.declaring_type = declaring.or(def.declaring_type);
        node.generic_arguments = arguments;
        node.definition = Some(definition);
        let symbol = self.push(node);
        self.shapes.insert(key, symbol);
        symbol
    }

    // ------------------------------------------------------------------
    // Arrays, pointers, by-refs
    // ------------------------------------------------------------------

    pub fn add_array(&mut self, element: LiveSymbol, rank: u32) -> LiveSymbol {
        let key = ShapeKey::Array { element, rank };
        self.intern_shape(key, LiveKind::Array, element, Some(rank))
    }

    pub fn add_pointer(&mut self, referent: LiveSymbol) -> LiveSymbol {
        self.intern_shape(ShapeKey::Pointer(referent), LiveKind::Pointer, referent, None)
    }

    pub fn add_by_ref(&mut self, referent: LiveSymbol) -> LiveSymbol {
        self.intern_shape(ShapeKey::ByRef(referent), LiveKind::ByRef, referent, None)
    }

    fn intern_shape(
        &mut self,
        key: ShapeKey,
        kind: LiveKind,
        element: LiveSymbol,
        rank: Option<u32>,
    ) -> LiveSymbol {
        if let Some(&existing) = self.shapes.get(&key) {
            return existing;
        }
        let element_name = self.node(element).map(|n| n.name.clone()).unwrap_or_default();
        let suffix = match kind {
            LiveKind::Array => "[]",
            LiveKind::Pointer => "*",
            _ => "&",
        };
        let mut node = LiveNode::new(kind, format!("{element_name}{suffix}"));
        node.assembly = self.assembly_of(element);
        node.element = Some(element);
        node.rank = rank;
        let symbol = self.push(node);
        self.shapes.insert(key, symbol);
        symbol
    }

    // ------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------

    fn add_member(&mut self, declaring: LiveSymbol, kind: LiveKind, name: &str) -> LiveSymbol {
        let mut node = LiveNode::new(kind, name);
        node.assembly = self.assembly_of(declaring);
        node.declaring_type = Some(declaring);
        self.push(node)
    }

    pub fn add_field(&mut self, declaring: LiveSymbol, name: &str) -> LiveSymbol {
        self.add_member(declaring, LiveKind::Field, name)
    }

    pub fn add_constant(
        &mut self,
        declaring: LiveSymbol,
        name: &str,
        value: ConstantValue,
    ) -> LiveSymbol {
        let constant = self.add_member(declaring, LiveKind::Constant, name);
        self.nodes[constant.index()].value = Some(value);
        constant
    }

    pub fn add_event(&mut self, declaring: LiveSymbol, name: &str) -> LiveSymbol {
        self.add_member(declaring, LiveKind::Event, name)
    }

    /// Add a property; non-empty `index_parameters` make it an indexer.
    pub fn add_property(
        &mut self,
        declaring: LiveSymbol,
        name: &str,
        index_parameters: &[LiveSymbol],
    ) -> LiveSymbol {
        let property = self.add_member(declaring, LiveKind::Property, name);
        self.set_parameters(property, index_parameters);
        property
    }

    pub fn add_constructor(
        &mut self,
        declaring: LiveSymbol,
        parameters: &[LiveSymbol],
    ) -> LiveSymbol {
        let ctor = self.add_member(declaring, LiveKind::Constructor, ".ctor");
        self.set_parameters(ctor, parameters);
        ctor
    }

    pub fn add_method(
        &mut self,
        declaring: LiveSymbol,
        name: &str,
        parameters: &[LiveSymbol],
    ) -> LiveSymbol {
        let method = self.add_member(declaring, LiveKind::Method, name);
        self.set_parameters(method, parameters);
        method
    }

    /// Add a generic method definition.
    ///
    /// Parameters usually mention the method's own type parameters, so they
    /// are attached afterwards with [`SymbolGraph::set_parameters`].
    pub fn add_generic_method(
        &mut self,
        declaring: LiveSymbol,
        name: &str,
        type_parameters: &[&str],
    ) -> LiveSymbol {
        let method = self.add_member(declaring, LiveKind::Method, name);
        self.nodes[method.index()].is_generic_definition = !type_parameters.is_empty();
        let assembly = self.assembly_of(declaring);
        for (i, param_name) in type_parameters.iter().enumerate() {
            let mut param = LiveNode::new(LiveKind::GenericMethodParameter, *param_name);
            param.declaring_method = Some(method);
            param.assembly = assembly;
            param.position = Some(i as u32);
            let param = self.push(param);
            self.nodes[method.index()].generic_arguments.push(param);
        }
        method
    }

    /// Replace the parameter types of a constructor, method, or property.
    pub fn set_parameters(&mut self, member: LiveSymbol, parameters: &[LiveSymbol]) {
        if let Some(node) = self.nodes.get_mut(member.index()) {
            node.parameter_types = parameters.to_vec();
        }
    }

    /// Construct a generic method definition with `arguments`, substituting
    /// them into the parameter list.
    pub fn construct_method(
        &mut self,
        definition: LiveSymbol,
        arguments: &[LiveSymbol],
    ) -> LiveSymbol {
        let key = ShapeKey::GenericMethod {
            definition,
            arguments: arguments.to_vec(),
        };
        if let Some(&existing) = self.shapes.get(&key) {
            return existing;
        }
        let Some(def) = self.node(definition).cloned() else {
            return definition;
        };

        let parameters: Vec<LiveSymbol> = def
            .parameter_types
            .iter()
            .map(|&p| self.substitute(p, definition, arguments))
            .collect();

        let mut node = LiveNode::new(LiveKind::Method, def.name.clone());
        node.assembly = def.assembly;
        node.declaring_type = def.declaring_type;
        node.generic_arguments = arguments.to_vec();
        node.definition = Some(definition);
        node.parameter_types = parameters;
        let symbol = self.push(node);
        self.shapes.insert(key, symbol);
        symbol
    }

    /// Replace type parameters of `method` inside `symbol` with `arguments`.
    fn substitute(
        &mut self,
        symbol: LiveSymbol,
        method: LiveSymbol,
        arguments: &[LiveSymbol],
    ) -> LiveSymbol {
        let Some(node) = self.node(symbol).cloned() else {
            return symbol;
        };
        match node.kind {
            LiveKind::GenericMethodParameter if node.declaring_method == Some(method) => node
                .position
                .and_then(|p| arguments.get(p as usize).copied())
                .unwrap_or(symbol),
            LiveKind::Array | LiveKind::Pointer | LiveKind::ByRef => {
                let Some(element) = node.element else {
                    return symbol;
                };
                let element = self.substitute(element, method, arguments);
                match node.kind {
                    LiveKind::Array => self.add_array(element, node.rank.unwrap_or(1)),
                    LiveKind::Pointer => self.add_pointer(element),
                    _ => self.add_by_ref(element),
                }
            }
            LiveKind::Type => {
                let Some(definition) = node.definition else {
                    return symbol;
                };
                let own = self.own_generic_arguments(symbol);
                let declaring = node
                    .declaring_type
                    .map(|d| self.substitute(d, method, arguments));
                let own: Vec<LiveSymbol> = own
                    .into_iter()
                    .map(|a| self.substitute(a, method, arguments))
                    .collect();
                self.construct_nested(declaring, definition, &own)
            }
            _ => symbol,
        }
    }
}

impl TypeSystem for SymbolGraph {
    type Symbol = LiveSymbol;

    fn kind(&self, symbol: LiveSymbol) -> Option<LiveKind> {
        self.node(symbol).map(|n| n.kind)
    }

    fn name(&self, symbol: LiveSymbol) -> Option<&str> {
        self.node(symbol).map(|n| n.name.as_str())
    }

    fn namespace(&self, symbol: LiveSymbol) -> Option<&str> {
        self.node(symbol).and_then(|n| n.namespace.as_deref())
    }

    fn assembly(&self, symbol: LiveSymbol) -> Option<LiveSymbol> {
        self.assembly_of(symbol)
    }

    fn assembly_identity(&self, assembly: LiveSymbol) -> Option<&AssemblyIdentity> {
        self.node(assembly).and_then(|n| n.identity.as_ref())
    }

    fn declaring_type(&self, symbol: LiveSymbol) -> Option<LiveSymbol> {
        self.node(symbol).and_then(|n| n.declaring_type)
    }

    fn declaring_method(&self, symbol: LiveSymbol) -> Option<LiveSymbol> {
        self.node(symbol).and_then(|n| n.declaring_method)
    }

    fn generic_arguments(&self, symbol: LiveSymbol) -> Vec<LiveSymbol> {
        self.node(symbol)
            .map(|n| n.generic_arguments.clone())
            .unwrap_or_default()
    }

    fn is_generic_definition(&self, symbol: LiveSymbol) -> bool {
        self.node(symbol).is_some_and(|n| n.is_generic_definition)
    }

    fn parameter_types(&self, symbol: LiveSymbol) -> Vec<LiveSymbol> {
        self.node(symbol)
            .map(|n| n.parameter_types.clone())
            .unwrap_or_default()
    }

    fn array_rank(&self, symbol: LiveSymbol) -> Option<u32> {
        self.node(symbol).and_then(|n| n.rank)
    }

    fn element_type(&self, symbol: LiveSymbol) -> Option<LiveSymbol> {
        self.node(symbol).and_then(|n| n.element)
    }

    fn generic_position(&self, symbol: LiveSymbol) -> Option<u32> {
        self.node(symbol).and_then(|n| n.position)
    }

    fn constant_value(&self, symbol: LiveSymbol) -> Option<ConstantValue> {
        self.node(symbol).and_then(|n| n.value.clone())
    }
}
