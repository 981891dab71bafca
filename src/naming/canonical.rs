//! Canonical names — deterministic text keys for descriptors.
//!
//! ```text
//! Shop.Widget                         type
//! Shop.Box`1.Slot`2                   nested generic type
//! Shop.Box`1{int}                     constructed type, Full mode
//! int[,]                              rank-2 array
//! Shop.Widget.Resize(int,int)         method, Full mode
//! Shop.Widget.Resize                  method, Base mode
//! Shop.Widget.Item[string]            indexer, Full mode
//! Shop.Widget.Widget()                constructor, Full mode
//! index                               assembly, Base mode
//! ```
//!
//! Full names distinguish overloads and serve as lookup keys. Base names drop
//! every parameter list and serve as the readable page-name stem.

use std::fmt::Write;

use super::well_known;
use crate::descriptor::{
    Descriptor, DescriptorArena, DescriptorId, GenericArguments, TypeDescriptor,
};
use crate::error::{RefdocError, Result};

/// Sentinel rendered for assemblies: the anchor of assembly-level pages.
pub const ROOT_SENTINEL: &str = "index";

/// Rendered for the global (empty) namespace.
pub const GLOBAL_NAMESPACE: &str = "global";

// Descriptor graphs are shallow; anything deeper is a reference cycle.
const MAX_DEPTH: usize = 256;

/// Which parameter lists to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameMode {
    /// Keep constructor, method and indexer parameter lists.
    Full,
    /// Drop every parameter list; overloads share one name.
    Base,
}

/// Compute the canonical name of a descriptor.
pub fn canonical_name(arena: &DescriptorArena, id: DescriptorId, mode: NameMode) -> Result<String> {
    let mut out = String::new();
    CanonicalNameBuilder { arena, mode }.write(id, &mut out, 0)?;
    Ok(out)
}

/// Full canonical name plus the byte offset where the descriptor's own
/// parameter list starts.
///
/// The offset is `None` unless `id` is a constructor, method or indexer.
/// Brackets inside generic arguments or array suffixes never count.
pub fn full_name_split(
    arena: &DescriptorArena,
    id: DescriptorId,
) -> Result<(String, Option<usize>)> {
    let mut out = String::new();
    let builder = CanonicalNameBuilder {
        arena,
        mode: NameMode::Full,
    };
    let start = builder.write_split(id, &mut out, 0)?;
    Ok((out, start))
}

struct CanonicalNameBuilder<'a> {
    arena: &'a DescriptorArena,
    mode: NameMode,
}

impl CanonicalNameBuilder<'_> {
    fn write(&self, id: DescriptorId, out: &mut String, depth: usize) -> Result<()> {
        self.write_split(id, out, depth).map(|_| ())
    }

    /// Writes `id` and returns the offset of its own parameter list, if any.
    fn write_split(
        &self,
        id: DescriptorId,
        out: &mut String,
        depth: usize,
    ) -> Result<Option<usize>> {
        if depth > MAX_DEPTH {
            return Err(RefdocError::invalid_descriptor(format!(
                "{id} is part of a reference cycle"
            )));
        }
        let depth = depth + 1;
        let descriptor = self.arena.require(id)?;
        match descriptor {
            Descriptor::Assembly(d) => {
                out.push_str(ROOT_SENTINEL);
                if self.mode == NameMode::Full {
                    let _ = write!(out, "({})", d.identity());
                }
            }
            Descriptor::Namespace(d) => {
                out.push_str(if d.is_global() { GLOBAL_NAMESPACE } else { d.name.as_str() });
            }
            Descriptor::Type(d) => self.write_type(d, out, depth)?,
            Descriptor::Array(d) => {
                self.write(d.item_type, out, depth)?;
                out.push('[');
                for _ in 1..d.rank {
                    out.push(',');
                }
                out.push(']');
            }
            Descriptor::Pointer(d) => {
                self.write(d.referent_type, out, depth)?;
                out.push('*');
            }
            Descriptor::ByRef(d) => self.write(d.referent_type, out, depth)?,
            Descriptor::GenericTypeParameter(d) => out.push_str(&d.name),
            Descriptor::GenericMethodParameter(d) => out.push_str(&d.name),
            Descriptor::Constant(d) => self.write_member(d.declaring_type, &d.name, out, depth)?,
            Descriptor::Field(d) => self.write_member(d.declaring_type, &d.name, out, depth)?,
            Descriptor::Event(d) => self.write_member(d.declaring_type, &d.name, out, depth)?,
            Descriptor::Property(d) => self.write_member(d.declaring_type, &d.name, out, depth)?,
            Descriptor::Constructor(d) => {
                let Descriptor::Type(owner) = self.arena.require(d.declaring_type)? else {
                    return Err(RefdocError::invalid_descriptor(format!(
                        "constructor {id} is not declared on a type"
                    )));
                };
                self.write_member(d.declaring_type, &owner.name, out, depth)?;
            }
            Descriptor::Method(d) => {
                self.write_member(d.declaring_type, &d.name, out, depth)?;
                write_arity(d.generic_arguments.len(), out);
                self.write_substituted(&d.generic_arguments, out, depth)?;
            }
        }

        let Some((parameters, open, close)) = parameter_list(descriptor) else {
            return Ok(None);
        };
        if self.mode == NameMode::Base {
            return Ok(None);
        }
        let start = out.len();
        self.write_parameters(parameters, open, close, out, depth)?;
        Ok(Some(start))
    }

    fn write_type(&self, d: &TypeDescriptor, out: &mut String, depth: usize) -> Result<()> {
        if let Some(reserved) = self.reserved_name(d) {
            out.push_str(reserved);
            return Ok(());
        }
        if let Some(outer) = d.declaring_type {
            self.write(outer, out, depth)?;
            out.push('.');
        } else if let Some(Descriptor::Namespace(ns)) = d.namespace.and_then(|n| self.arena.get(n))
        {
            if !ns.is_global() {
                out.push_str(&ns.name);
                out.push('.');
            }
        }
        out.push_str(&d.name);
        write_arity(d.generic_arguments.len(), out);
        self.write_substituted(&d.generic_arguments, out, depth)
    }

    /// Full mode only: `{a,b}` after the arity of a constructed generic.
    fn write_substituted(
        &self,
        arguments: &GenericArguments,
        out: &mut String,
        depth: usize,
    ) -> Result<()> {
        let GenericArguments::Substituted(ids) = arguments else {
            return Ok(());
        };
        if self.mode == NameMode::Base {
            return Ok(());
        }
        out.push('{');
        for (i, &argument) in ids.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.write(argument, out, depth)?;
        }
        out.push('}');
        Ok(())
    }

    fn reserved_name(&self, d: &TypeDescriptor) -> Option<&'static str> {
        if d.declaring_type.is_some() || !d.generic_arguments.is_empty() {
            return None;
        }
        let namespace = match d.namespace.and_then(|n| self.arena.get(n)) {
            Some(Descriptor::Namespace(ns)) => ns.name.as_str(),
            _ => "",
        };
        well_known::reserved_name(namespace, &d.name)
    }

    fn write_member(
        &self,
        declaring_type: DescriptorId,
        name: &str,
        out: &mut String,
        depth: usize,
    ) -> Result<()> {
        self.write(declaring_type, out, depth)?;
        out.push('.');
        out.push_str(name);
        Ok(())
    }

    fn write_parameters(
        &self,
        parameters: &[DescriptorId],
        open: char,
        close: char,
        out: &mut String,
        depth: usize,
    ) -> Result<()> {
        out.push(open);
        for (i, &parameter) in parameters.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.write(parameter, out, depth)?;
        }
        out.push(close);
        Ok(())
    }
}

/// Own parameter list of a constructor, method or indexer, with its brackets.
fn parameter_list(descriptor: &Descriptor) -> Option<(&[DescriptorId], char, char)> {
    match descriptor {
        Descriptor::Constructor(d) => Some((d.parameter_types.as_slice(), '(', ')')),
        Descriptor::Method(d) => Some((d.parameter_types.as_slice(), '(', ')')),
        Descriptor::Property(d) if d.is_indexer() => Some((d.parameter_types.as_slice(), '[', ']')),
        _ => None,
    }
}

fn write_arity(arity: usize, out: &mut String) {
    if arity > 0 {
        let _ = write!(out, "`{arity}");
    }
}
