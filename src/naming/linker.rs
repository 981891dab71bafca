//! Page links: a configured namer plus the URL prefix.

use rayon::prelude::*;

use super::options::{NamingOptions, NamingStrategy};
use super::page::PageNamer;
use crate::descriptor::{DescriptorArena, DescriptorId};
use crate::error::Result;

/// Resolves descriptors to file names and links for one documentation run.
///
/// Holds one namer, so counter assignments stay stable across every call on
/// the same linker.
pub struct PageLinker {
    options: NamingOptions,
    namer: Box<dyn PageNamer>,
}

impl Default for PageLinker {
    fn default() -> Self {
        Self::new(NamingOptions::default())
    }
}

impl PageLinker {
    pub fn new(options: NamingOptions) -> Self {
        let namer = options.namer();
        Self { options, namer }
    }

    pub fn options(&self) -> &NamingOptions {
        &self.options
    }

    pub fn strategy(&self) -> NamingStrategy {
        self.namer.strategy()
    }

    pub fn file_name(&self, arena: &DescriptorArena, id: DescriptorId) -> Result<String> {
        self.namer.file_name(arena, id)
    }

    /// `url_prefix` followed by the file name.
    pub fn url(&self, arena: &DescriptorArena, id: DescriptorId) -> Result<String> {
        let file = self.file_name(arena, id)?;
        Ok(format!("{}{}", self.options.url_prefix, file))
    }

    /// File names for `ids`, in order.
    pub fn file_names(&self, arena: &DescriptorArena, ids: &[DescriptorId]) -> Result<Vec<String>> {
        ids.iter().map(|&id| self.file_name(arena, id)).collect()
    }

    /// File names for `ids` computed on the rayon pool, in input order.
    ///
    /// With the counter strategy the suffixes depend on scheduling; use
    /// [`file_names`](Self::file_names) when the run must be reproducible.
    pub fn file_names_parallel(
        &self,
        arena: &DescriptorArena,
        ids: &[DescriptorId],
    ) -> Result<Vec<String>> {
        ids.par_iter()
            .map(|&id| self.file_name(arena, id))
            .collect()
    }
}

impl std::fmt::Debug for PageLinker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageLinker")
            .field("options", &self.options)
            .field("strategy", &self.namer.strategy())
            .finish()
    }
}
