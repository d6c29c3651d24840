//! # cinedex-query
//!
//! Query engine for Cinedex. Runs validated filters and identifier lookups
//! against a [`cinedex_core::Catalog`] snapshot and shapes the results.
//!
//! Includes:
//! - Inbound parameter validation ([`params`])
//! - Filters compiled to predicate lists ([`filter`])
//! - The [`QueryEngine`] for collections and lookups
//! - List and detail projections ([`projection`])
//! - Result formatter (JSON, Table, Markdown)

pub mod engine;
pub mod filter;
pub mod formatter;
pub mod params;
pub mod projection;

pub use engine::QueryEngine;
pub use filter::{ActorFilter, MovieFilter};
pub use formatter::{format_item, format_page, OutputFormat};
pub use params::{path_id, ActorParams, MovieParams};
pub use projection::{
    ActorDetail, ActorInfo, ActorListItem, DirectorDetail, DirectorInfo, GenreInfo, GenreListItem,
    MovieDetail, MovieListItem, MovieReference, Page,
};
