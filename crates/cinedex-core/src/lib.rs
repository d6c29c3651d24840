//! # cinedex-core
//!
//! Entity model and dataset invariants for the Cinedex movie catalog.
//!
//! This crate defines the foundational types used across all other crates:
//! - Typed identifiers ([`MovieId`], [`DirectorId`], [`ActorId`], [`GenreId`])
//! - Entity records ([`Movie`], [`Director`], [`Actor`], [`Genre`])
//! - [`Catalog`]: immutable entity tables plus two-way association indexes
//! - [`CatalogBuilder`]: the only way to construct a catalog; enforces integrity
//! - Error hierarchy ([`CatalogError`], [`IntegrityError`], [`FilterError`])
//! - The reference dataset ([`seed`])

pub mod catalog;
pub mod entity;
pub mod error;
pub mod id;
pub mod seed;

pub use catalog::{Catalog, CatalogBuilder, CatalogStats};
pub use entity::{Actor, Director, Genre, Movie, NewMovie};
pub use error::{CatalogError, FilterError, IntegrityError, Result};
pub use id::{ActorId, DirectorId, GenreId, MovieId};
