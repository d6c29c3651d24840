//! Query engine: runs validated filters and lookups against a catalog.
//!
//! The engine borrows a [`Catalog`] snapshot as its data-access handle and
//! owns no data. Inputs are already validated, so the engine never reports
//! invalid filter values; a missing entity is `None`.
//!
//! Results are ordered by ascending identifier. Collection queries walk the
//! entity table once and test each row against the predicate list, so a
//! movie reachable through several association rows is still emitted once.

use tracing::debug;

use cinedex_core::id::{ActorId, DirectorId, MovieId};
use cinedex_core::Catalog;

use crate::filter::{matches_all, ActorFilter, MovieFilter};
use crate::projection::{
    ActorDetail, ActorListItem, DirectorDetail, GenreListItem, MovieDetail, MovieListItem, Page,
};

/// Read-only query surface over one catalog snapshot.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> QueryEngine<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Filtered movie collection, projected as list items.
    #[must_use]
    pub fn movies(&self, filter: &MovieFilter) -> Page<MovieListItem> {
        let predicates = filter.predicates(self.catalog);
        let page: Page<_> = self
            .catalog
            .movies()
            .filter(|movie| matches_all(*movie, &predicates))
            .map(|movie| MovieListItem::project(self.catalog, movie))
            .collect();
        debug!(?filter, predicates = predicates.len(), total = page.total, "movies query");
        page
    }

    #[must_use]
    pub fn movie(&self, id: MovieId) -> Option<MovieDetail> {
        let found = self
            .catalog
            .movie(id)
            .map(|movie| MovieDetail::project(self.catalog, movie));
        debug!(%id, found = found.is_some(), "movie lookup");
        found
    }

    /// Filtered actor collection, projected as list items.
    #[must_use]
    pub fn actors(&self, filter: &ActorFilter) -> Page<ActorListItem> {
        let predicates = filter.predicates(self.catalog);
        let page: Page<_> = self
            .catalog
            .actors()
            .filter(|actor| matches_all(*actor, &predicates))
            .map(ActorListItem::from)
            .collect();
        debug!(?filter, total = page.total, "actors query");
        page
    }

    #[must_use]
    pub fn actor(&self, id: ActorId) -> Option<ActorDetail> {
        let found = self
            .catalog
            .actor(id)
            .map(|actor| ActorDetail::project(self.catalog, actor));
        debug!(%id, found = found.is_some(), "actor lookup");
        found
    }

    /// Every director, each with its filmography.
    #[must_use]
    pub fn directors(&self) -> Page<DirectorDetail> {
        self.catalog
            .directors()
            .map(|director| DirectorDetail::project(self.catalog, director))
            .collect()
    }

    #[must_use]
    pub fn director(&self, id: DirectorId) -> Option<DirectorDetail> {
        let found = self
            .catalog
            .director(id)
            .map(|director| DirectorDetail::project(self.catalog, director));
        debug!(%id, found = found.is_some(), "director lookup");
        found
    }

    #[must_use]
    pub fn genres(&self) -> Page<GenreListItem> {
        self.catalog.genres().map(GenreListItem::from).collect()
    }
}
