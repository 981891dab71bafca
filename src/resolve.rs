//! Structural equality — does a descriptor denote a given live symbol?
//!
//! The matcher walks the descriptor graph and the live type system in
//! lockstep. A cursor holds the live symbol the current descriptor node is
//! compared against; every recursive step moves the cursor to the matching
//! live part (declaring type, element type, generic argument, ...).
//!
//! ## Memoization
//!
//! Descriptor graphs contain back references: a method's parameter list may
//! hold a method type parameter whose declaring method is that very method.
//! Each visited node is recorded together with the live symbol it was
//! compared against. Reaching a recorded node again succeeds only if the
//! cursor is the same live symbol, which both terminates the walk and catches
//! structurally inconsistent matches. Assembly nodes are the exception: any
//! live handle with the recorded identity is accepted.
//!
//! Namespaces have no live counterpart, so they are checked inline against
//! the live type's namespace string and never recorded.
//!
//! ## Failure
//!
//! A mismatch is not an error: [`equals`] returns `Ok(false)`. Once a mismatch
//! is found the rest of the walk is skipped; the result can never become
//! `true` again.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::base::AssemblyKey;
use crate::descriptor::{
    AssemblyDescriptor, ConstructorDescriptor, Descriptor, DescriptorArena, DescriptorId,
    GenericArguments, MethodDescriptor, PropertyDescriptor, TypeDescriptor,
};
use crate::error::{RefdocError, Result};
use crate::live::{LiveKind, TypeSystem};

/// Check whether `descriptor` denotes the live `symbol`.
///
/// Fails only when the descriptor is not published in `arena` or the symbol
/// is unknown to `ts`.
pub fn equals<T: TypeSystem>(
    arena: &DescriptorArena,
    descriptor: DescriptorId,
    ts: &T,
    symbol: T::Symbol,
) -> Result<bool> {
    arena.require(descriptor)?;
    if ts.kind(symbol).is_none() {
        return Err(RefdocError::invalid_symbol(format!(
            "{symbol:?} is not a known symbol"
        )));
    }
    Ok(StructuralMatcher::new(arena, ts).matches(descriptor, symbol))
}

/// Single-use recursive matcher. See the module docs.
pub struct StructuralMatcher<'a, T: TypeSystem> {
    arena: &'a DescriptorArena,
    ts: &'a T,
    cursor: Option<T::Symbol>,
    visited: FxHashMap<DescriptorId, T::Symbol>,
    equal: bool,
}

impl<'a, T: TypeSystem> StructuralMatcher<'a, T> {
    pub fn new(arena: &'a DescriptorArena, ts: &'a T) -> Self {
        Self {
            arena,
            ts,
            cursor: None,
            visited: FxHashMap::default(),
            equal: true,
        }
    }

    /// Run the comparison, consuming the matcher.
    pub fn matches(mut self, descriptor: DescriptorId, symbol: T::Symbol) -> bool {
        self.cursor = Some(symbol);
        self.visit(descriptor);
        self.equal
    }

    fn fail(&mut self, id: DescriptorId, reason: &str) {
        if self.equal {
            trace!("{} does not match {:?}: {}", id, self.cursor, reason);
        }
        self.equal = false;
    }

    /// Move the cursor to `live`, compare `id` against it, and move back.
    fn descend(&mut self, id: DescriptorId, live: Option<T::Symbol>) {
        let saved = self.cursor;
        self.cursor = live;
        self.visit(id);
        self.cursor = saved;
    }

    fn visit(&mut self, id: DescriptorId) {
        if !self.equal {
            return;
        }
        let Some(current) = self.cursor else {
            self.fail(id, "no live counterpart");
            return;
        };
        if let Some(&seen) = self.visited.get(&id) {
            if seen != current && !self.same_assembly(id, seen, current) {
                self.fail(id, "already matched a different symbol");
            }
            return;
        }
        let arena = self.arena;
        let Some(descriptor) = arena.get(id) else {
            self.fail(id, "descriptor is not published");
            return;
        };
        self.visited.insert(id, current);

        let ts = self.ts;
        match descriptor {
            Descriptor::Assembly(d) => self.match_assembly(id, d, current),
            Descriptor::Namespace(_) => self.fail(id, "namespaces have no live counterpart"),
            Descriptor::Type(d) => self.match_type(id, d, current),
            Descriptor::Array(d) => {
                if !self.expect_kind(id, current, LiveKind::Array) {
                    return;
                }
                if ts.array_rank(current) != Some(d.rank) {
                    self.fail(id, "array rank");
                    return;
                }
                self.descend(d.item_type, ts.element_type(current));
            }
            Descriptor::Pointer(d) => {
                if self.expect_kind(id, current, LiveKind::Pointer) {
                    self.descend(d.referent_type, ts.element_type(current));
                }
            }
            Descriptor::ByRef(d) => {
                if self.expect_kind(id, current, LiveKind::ByRef) {
                    self.descend(d.referent_type, ts.element_type(current));
                }
            }
            Descriptor::GenericTypeParameter(d) => {
                if self.expect_named(id, current, LiveKind::GenericTypeParameter, &d.name) {
                    self.descend(d.declaring_type, ts.declaring_type(current));
                }
            }
            Descriptor::GenericMethodParameter(d) => {
                if self.expect_named(id, current, LiveKind::GenericMethodParameter, &d.name) {
                    self.descend(d.declaring_method, ts.declaring_method(current));
                }
            }
            Descriptor::Constant(d) => {
                if self.expect_named(id, current, LiveKind::Constant, &d.name) {
                    self.descend(d.declaring_type, ts.declaring_type(current));
                }
            }
            Descriptor::Field(d) => {
                if self.expect_named(id, current, LiveKind::Field, &d.name) {
                    self.descend(d.declaring_type, ts.declaring_type(current));
                }
            }
            Descriptor::Event(d) => {
                if self.expect_named(id, current, LiveKind::Event, &d.name) {
                    self.descend(d.declaring_type, ts.declaring_type(current));
                }
            }
            Descriptor::Property(d) => self.match_property(id, d, current),
            Descriptor::Constructor(d) => self.match_constructor(id, d, current),
            Descriptor::Method(d) => self.match_method(id, d, current),
        }
    }

    fn expect_kind(&mut self, id: DescriptorId, current: T::Symbol, kind: LiveKind) -> bool {
        if self.ts.kind(current) == Some(kind) {
            true
        } else {
            self.fail(id, kind.as_str());
            false
        }
    }

    fn expect_named(
        &mut self,
        id: DescriptorId,
        current: T::Symbol,
        kind: LiveKind,
        name: &str,
    ) -> bool {
        if !self.expect_kind(id, current, kind) {
            return false;
        }
        if self.ts.name(current) != Some(name) {
            self.fail(id, "name");
            return false;
        }
        true
    }

    fn match_assembly(&mut self, id: DescriptorId, d: &AssemblyDescriptor, current: T::Symbol) {
        if !self.expect_kind(id, current, LiveKind::Assembly) {
            return;
        }
        let expected = AssemblyKey::from(&d.identity());
        let same = self
            .ts
            .assembly_identity(current)
            .is_some_and(|identity| identity.key() == expected);
        if !same {
            self.fail(id, "assembly identity");
        }
    }

    /// Two live assembly handles with one identity share a descriptor, so a
    /// revisited assembly node accepts either of them.
    fn same_assembly(&self, id: DescriptorId, seen: T::Symbol, current: T::Symbol) -> bool {
        if !matches!(self.arena.get(id), Some(Descriptor::Assembly(_))) {
            return false;
        }
        match (self.ts.assembly_identity(seen), self.ts.assembly_identity(current)) {
            (Some(recorded), Some(now)) => recorded.same_assembly(now),
            _ => false,
        }
    }

    fn match_type(&mut self, id: DescriptorId, d: &TypeDescriptor, current: T::Symbol) {
        let ts = self.ts;
        if !self.expect_kind(id, current, LiveKind::Type) {
            return;
        }
        if !ts.name(current).is_some_and(|n| same_ignoring_case(n, &d.name)) {
            self.fail(id, "type name");
            return;
        }
        if let Some(namespace) = d.namespace {
            self.match_namespace(namespace, current);
        }
        self.descend(d.assembly, ts.assembly(current));
        if !self.equal {
            return;
        }

        let own = ts.own_generic_arguments(current);
        if own.len() != d.generic_arguments.len() {
            self.fail(id, "generic arity");
            return;
        }
        self.match_generic_arguments(id, &d.generic_arguments, &own, current);
        if !self.equal {
            return;
        }

        match (d.declaring_type, ts.declaring_type(current)) {
            (Some(outer), Some(live_outer)) => self.descend(outer, Some(live_outer)),
            (None, None) => {}
            _ => self.fail(id, "declaring type presence"),
        }
    }

    fn match_namespace(&mut self, namespace: DescriptorId, current: T::Symbol) {
        let arena = self.arena;
        let Some(Descriptor::Namespace(ns)) = arena.get(namespace) else {
            self.fail(namespace, "not a namespace");
            return;
        };
        let live = self.ts.namespace(current).unwrap_or_default();
        if !same_ignoring_case(live, &ns.name) {
            self.fail(namespace, "namespace");
            return;
        }
        self.descend(ns.assembly, self.ts.assembly(current));
    }

    /// Shared by types and methods: open parameters need a live definition,
    /// substituted arguments are compared pairwise.
    fn match_generic_arguments(
        &mut self,
        id: DescriptorId,
        arguments: &GenericArguments,
        live: &[T::Symbol],
        current: T::Symbol,
    ) {
        match arguments {
            GenericArguments::None => {}
            GenericArguments::OpenParameters(_) => {
                if !self.ts.is_generic_definition(current) {
                    self.fail(id, "expected a generic definition");
                }
            }
            GenericArguments::Substituted(ids) => self.match_pairwise(ids, live),
        }
    }

    fn match_pairwise(&mut self, ids: &[DescriptorId], live: &[T::Symbol]) {
        for (&id, &symbol) in ids.iter().zip(live) {
            if !self.equal {
                return;
            }
            self.descend(id, Some(symbol));
        }
    }

    /// Count check, declaring type, then parameters pairwise.
    fn match_signature(
        &mut self,
        id: DescriptorId,
        declaring_type: DescriptorId,
        parameter_types: &[DescriptorId],
        current: T::Symbol,
    ) {
        let live_parameters = self.ts.parameter_types(current);
        if live_parameters.len() != parameter_types.len() {
            self.fail(id, "parameter count");
            return;
        }
        self.descend(declaring_type, self.ts.declaring_type(current));
        self.match_pairwise(parameter_types, &live_parameters);
    }

    fn match_constructor(
        &mut self,
        id: DescriptorId,
        d: &ConstructorDescriptor,
        current: T::Symbol,
    ) {
        if self.expect_kind(id, current, LiveKind::Constructor) {
            self.match_signature(id, d.declaring_type, &d.parameter_types, current);
        }
    }

    fn match_property(&mut self, id: DescriptorId, d: &PropertyDescriptor, current: T::Symbol) {
        if self.expect_named(id, current, LiveKind::Property, &d.name) {
            self.match_signature(id, d.declaring_type, &d.parameter_types, current);
        }
    }

    fn match_method(&mut self, id: DescriptorId, d: &MethodDescriptor, current: T::Symbol) {
        if !self.expect_named(id, current, LiveKind::Method, &d.name) {
            return;
        }
        let live_arguments = self.ts.generic_arguments(current);
        if live_arguments.len() != d.generic_arguments.len() {
            self.fail(id, "generic arity");
            return;
        }
        self.match_generic_arguments(id, &d.generic_arguments, &live_arguments, current);
        if self.equal {
            self.match_signature(id, d.declaring_type, &d.parameter_types, current);
        }
    }
}

fn same_ignoring_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}
