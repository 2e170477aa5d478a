//! Best-effort profile photo enrichment for teams and players.

pub mod photo_book;
pub mod resolver;

pub use photo_book::{resolve_all, Enrichment, PhotoBook, PhotoRequest};
pub use resolver::{PhotoLookup, PhotoSource, ProfileResolver, ResolverConfig, SubjectKind};
