//! Page names — stable, collision-free file names for descriptors.
//!
//! Two interchangeable strategies implement [`PageNamer`]:
//!
//! - [`CounterPageNamer`] keeps readable names (`Shop.Widget.Resize.html`,
//!   `Shop.Widget.Resize-1.html`) at the cost of shared mutable state. Results
//!   depend on the order names are first requested.
//! - [`HashPageNamer`] derives a suffix from a digest of the parameter list
//!   (`Shop.Widget.Resize-3f9c0a1d52e4b7a6.html`). It has no state and gives
//!   the same answer in any order and from any thread.
//!
//! Both give the same descriptor the same name for the lifetime of the namer
//! and never give one name to two different Full canonical names. The one
//! exception is the hash strategy's `index` page, which every assembly
//! shares.

use indexmap::IndexMap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;

use super::canonical::{NameMode, ROOT_SENTINEL, canonical_name, full_name_split};
use super::options::NamingStrategy;
use crate::descriptor::{Descriptor, DescriptorArena, DescriptorId};
use crate::error::Result;

/// Default extension appended to every page name.
pub const DEFAULT_EXTENSION: &str = ".html";

/// Number of digest bytes kept by [`HashPageNamer`] (hex doubles it).
pub const DIGEST_BYTES: usize = 8;

/// Maps descriptors to page file names.
pub trait PageNamer: Send + Sync {
    fn file_name(&self, arena: &DescriptorArena, id: DescriptorId) -> Result<String>;

    fn strategy(&self) -> NamingStrategy;
}

// ============================================================================
// COUNTER STRATEGY
// ============================================================================

#[derive(Debug, Default)]
struct CounterState {
    /// Full canonical name -> assigned file name, in assignment order.
    by_full_name: IndexMap<String, String>,
    /// Lower-cased file name -> the full name owning it.
    owners: FxHashMap<String, String>,
}

/// Counter-based disambiguation: `base.html`, `base-1.html`, `base-2.html`, ...
///
/// The cache is the only state and sits behind a mutex, so one namer can be
/// shared, but concurrent first requests race for the lower counters.
#[derive(Debug)]
pub struct CounterPageNamer {
    extension: SmolStr,
    state: Mutex<CounterState>,
}

impl Default for CounterPageNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterPageNamer {
    pub fn new() -> Self {
        Self::with_extension(DEFAULT_EXTENSION)
    }

    pub fn with_extension(extension: &str) -> Self {
        Self {
            extension: SmolStr::new(extension),
            state: Mutex::new(CounterState::default()),
        }
    }

    /// Assign a file name for `full_name`, stemmed on `base_name`.
    ///
    /// Candidates are compared case-insensitively so the result is safe on
    /// case-insensitive file systems.
    pub fn assign(&self, full_name: &str, base_name: &str) -> String {
        let mut state = self.state.lock();
        if let Some(existing) = state.by_full_name.get(full_name) {
            return existing.clone();
        }

        let ext = &self.extension;
        let mut candidate = format!("{base_name}{ext}");
        let mut counter = 0u32;
        while state
            .owners
            .get(&candidate.to_lowercase())
            .is_some_and(|owner| owner != full_name)
        {
            counter += 1;
            candidate = format!("{base_name}-{counter}{ext}");
        }
        if counter > 0 {
            debug!("Page name collision for {}: using {}", full_name, candidate);
        }

        state
            .owners
            .insert(candidate.to_lowercase(), full_name.to_owned());
        state
            .by_full_name
            .insert(full_name.to_owned(), candidate.clone());
        candidate
    }

    /// File name already assigned to `full_name`, if any.
    pub fn lookup(&self, full_name: &str) -> Option<String> {
        self.state.lock().by_full_name.get(full_name).cloned()
    }

    /// Every `(full name, file name)` pair in assignment order.
    pub fn assignments(&self) -> Vec<(String, String)> {
        self.state
            .lock()
            .by_full_name
            .iter()
            .map(|(full, file)| (full.clone(), file.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().by_full_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PageNamer for CounterPageNamer {
    fn file_name(&self, arena: &DescriptorArena, id: DescriptorId) -> Result<String> {
        let full = canonical_name(arena, id, NameMode::Full)?;
        if let Some(existing) = self.lookup(&full) {
            return Ok(existing);
        }
        let base = canonical_name(arena, id, NameMode::Base)?;
        Ok(self.assign(&full, &base))
    }

    fn strategy(&self) -> NamingStrategy {
        NamingStrategy::Counter
    }
}

// ============================================================================
// HASH STRATEGY
// ============================================================================

/// Digest-based disambiguation: constructors, methods and indexers get a
/// fixed-width BLAKE3 suffix computed from their parameter list. Assemblies
/// land on the `index` page.
#[derive(Debug, Clone)]
pub struct HashPageNamer {
    extension: SmolStr,
}

impl Default for HashPageNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl HashPageNamer {
    pub fn new() -> Self {
        Self::with_extension(DEFAULT_EXTENSION)
    }

    pub fn with_extension(extension: &str) -> Self {
        Self {
            extension: SmolStr::new(extension),
        }
    }

    /// File name for a Full canonical name whose own parameter list starts
    /// at `signature_start`.
    ///
    /// The parameter list is digested; names without one are used as they
    /// are. An offset that does not fall on the name is ignored.
    pub fn name_for(&self, full_name: &str, signature_start: Option<usize>) -> String {
        let ext = &self.extension;
        match signature_start.and_then(|at| full_name.split_at_checked(at)) {
            Some((base, signature)) => format!("{base}-{}{ext}", signature_digest(signature)),
            None => format!("{full_name}{ext}"),
        }
    }
}

/// Lowercase hex of the first [`DIGEST_BYTES`] bytes of the BLAKE3 hash.
pub fn signature_digest(signature: &str) -> String {
    let hash = blake3::hash(signature.as_bytes());
    hex::encode(&hash.as_bytes()[..DIGEST_BYTES])
}

impl PageNamer for HashPageNamer {
    fn file_name(&self, arena: &DescriptorArena, id: DescriptorId) -> Result<String> {
        if let Descriptor::Assembly(_) = arena.require(id)? {
            return Ok(format!("{ROOT_SENTINEL}{}", self.extension));
        }
        let (full, signature_start) = full_name_split(arena, id)?;
        Ok(self.name_for(&full, signature_start))
    }

    fn strategy(&self) -> NamingStrategy {
        NamingStrategy::Hash
    }
}
