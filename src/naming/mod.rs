//! Naming — canonical text keys and page file names for descriptors.
//!
//! ## Key Types
//!
//! - [`canonical_name`] — Full / Base text key of a descriptor
//! - [`PageNamer`] — Descriptor → file name, with [`CounterPageNamer`] and
//!   [`HashPageNamer`] strategies
//! - [`PageLinker`] — Configured namer plus URL prefix

mod canonical;
mod linker;
mod options;
mod page;
mod well_known;

pub use canonical::{GLOBAL_NAMESPACE, NameMode, ROOT_SENTINEL, canonical_name, full_name_split};
pub use linker::PageLinker;
pub use options::{NamingOptions, NamingStrategy};
pub use page::{
    CounterPageNamer, DEFAULT_EXTENSION, DIGEST_BYTES, HashPageNamer, PageNamer,
    signature_digest,
};
pub use well_known::{DYNAMIC, SYSTEM_NAMESPACE, reserved_name};
