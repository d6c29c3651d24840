//! The in-memory catalog: entity tables plus association indexes.
//!
//! A [`Catalog`] can only be produced by a [`CatalogBuilder`], which enforces
//! the dataset invariants:
//! - every movie's director exists
//! - genre names are unique
//! - identifiers are positive and never reused
//! - association pairs are unique (set semantics)
//!
//! Once built, a catalog is immutable. Queries borrow it as their data-access
//! handle.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::entity::{Actor, Director, Genre, Movie, NewMovie};
use crate::error::IntegrityError;
use crate::id::{ActorId, DirectorId, GenreId, MovieId};

/// A many-to-many association indexed in both directions.
#[derive(Debug, Clone)]
struct Association<L, R> {
    forward: BTreeMap<L, BTreeSet<R>>,
    reverse: BTreeMap<R, BTreeSet<L>>,
}

impl<L, R> Default for Association<L, R> {
    fn default() -> Self {
        Self {
            forward: BTreeMap::new(),
            reverse: BTreeMap::new(),
        }
    }
}

impl<L: Ord + Copy, R: Ord + Copy> Association<L, R> {
    /// Returns `false` if the pair was already present.
    fn link(&mut self, left: L, right: R) -> bool {
        let inserted = self.forward.entry(left).or_default().insert(right);
        self.reverse.entry(right).or_default().insert(left);
        inserted
    }

    fn contains(&self, left: L, right: R) -> bool {
        self.forward
            .get(&left)
            .is_some_and(|rights| rights.contains(&right))
    }

    fn rights_of(&self, left: L) -> impl Iterator<Item = R> + '_ {
        self.forward
            .get(&left)
            .into_iter()
            .flat_map(|rights| rights.iter().copied())
    }

    fn lefts_of(&self, right: R) -> impl Iterator<Item = L> + '_ {
        self.reverse
            .get(&right)
            .into_iter()
            .flat_map(|lefts| lefts.iter().copied())
    }

    fn pairs(&self) -> impl Iterator<Item = (L, R)> + '_ {
        self.forward
            .iter()
            .flat_map(|(left, rights)| rights.iter().map(move |right| (*left, *right)))
    }

    fn len(&self) -> usize {
        self.forward.values().map(BTreeSet::len).sum()
    }
}

/// An immutable, invariant-checked snapshot of the dataset.
///
/// All iterators yield entities in ascending identifier order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: BTreeMap<MovieId, Movie>,
    directors: BTreeMap<DirectorId, Director>,
    actors: BTreeMap<ActorId, Actor>,
    genres: BTreeMap<GenreId, Genre>,
    genre_names: BTreeMap<String, GenreId>,
    directed: BTreeMap<DirectorId, BTreeSet<MovieId>>,
    cast: Association<MovieId, ActorId>,
    tagged: Association<MovieId, GenreId>,
}

impl Catalog {
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.movies.values()
    }

    pub fn directors(&self) -> impl Iterator<Item = &Director> {
        self.directors.values()
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    pub fn genres(&self) -> impl Iterator<Item = &Genre> {
        self.genres.values()
    }

    #[must_use]
    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    #[must_use]
    pub fn director(&self, id: DirectorId) -> Option<&Director> {
        self.directors.get(&id)
    }

    #[must_use]
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    #[must_use]
    pub fn genre(&self, id: GenreId) -> Option<&Genre> {
        self.genres.get(&id)
    }

    #[must_use]
    pub fn genre_by_name(&self, name: &str) -> Option<&Genre> {
        self.genre_names
            .get(name)
            .and_then(|id| self.genres.get(id))
    }

    /// The director of a movie in this catalog.
    ///
    /// # Panics
    ///
    /// Panics if `movie` was not taken from this catalog; the builder
    /// guarantees every stored movie's director resolves.
    #[must_use]
    pub fn director_of(&self, movie: &Movie) -> &Director {
        &self.directors[&movie.director_id]
    }

    /// Actors appearing in a movie.
    pub fn cast_of(&self, movie: MovieId) -> impl Iterator<Item = &Actor> {
        self.cast
            .rights_of(movie)
            .filter_map(|id| self.actors.get(&id))
    }

    /// Genres a movie is tagged with.
    pub fn genres_of(&self, movie: MovieId) -> impl Iterator<Item = &Genre> {
        self.tagged
            .rights_of(movie)
            .filter_map(|id| self.genres.get(&id))
    }

    /// Movies an actor appears in.
    pub fn filmography(&self, actor: ActorId) -> impl Iterator<Item = &Movie> {
        self.cast
            .lefts_of(actor)
            .filter_map(|id| self.movies.get(&id))
    }

    /// Movies a director directed.
    pub fn directed_by(&self, director: DirectorId) -> impl Iterator<Item = &Movie> {
        self.directed
            .get(&director)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(|id| self.movies.get(id))
    }

    /// Movies tagged with a genre.
    pub fn movies_in_genre(&self, genre: GenreId) -> impl Iterator<Item = &Movie> {
        self.tagged
            .lefts_of(genre)
            .filter_map(|id| self.movies.get(&id))
    }

    #[must_use]
    pub fn has_actor(&self, movie: MovieId, actor: ActorId) -> bool {
        self.cast.contains(movie, actor)
    }

    #[must_use]
    pub fn has_genre(&self, movie: MovieId, genre: GenreId) -> bool {
        self.tagged.contains(movie, genre)
    }

    /// All `(movie, actor)` association rows.
    pub fn cast_pairs(&self) -> impl Iterator<Item = (MovieId, ActorId)> + '_ {
        self.cast.pairs()
    }

    /// All `(movie, genre)` association rows.
    pub fn genre_pairs(&self) -> impl Iterator<Item = (MovieId, GenreId)> + '_ {
        self.tagged.pairs()
    }

    #[must_use]
    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            movies: self.movies.len(),
            directors: self.directors.len(),
            actors: self.actors.len(),
            genres: self.genres.len(),
            cast_links: self.cast.len(),
            genre_links: self.tagged.len(),
        }
    }
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct CatalogStats {
    pub movies: usize,
    pub directors: usize,
    pub actors: usize,
    pub genres: usize,
    pub cast_links: usize,
    pub genre_links: usize,
}

/// Builds a [`Catalog`], checking invariants on every write.
///
/// `add_*` methods assign the next free identifier; `insert_*` methods accept
/// records that already carry one (used when loading persisted rows).
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    /// # Errors
    ///
    /// Returns [`IntegrityError::DuplicateGenreName`] if the name is taken.
    pub fn add_genre(&mut self, name: impl Into<String>) -> Result<GenreId, IntegrityError> {
        let id = next_id(&self.catalog.genres, GenreId::KIND, GenreId::first, GenreId::next)?;
        self.insert_genre(Genre {
            id,
            name: name.into(),
        })?;
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`IntegrityError::IdsExhausted`] if no identifier is left.
    pub fn add_director(&mut self, name: impl Into<String>) -> Result<DirectorId, IntegrityError> {
        let id = next_id(
            &self.catalog.directors,
            DirectorId::KIND,
            DirectorId::first,
            DirectorId::next,
        )?;
        self.catalog.directors.insert(
            id,
            Director {
                id,
                name: name.into(),
            },
        );
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`IntegrityError::IdsExhausted`] if no identifier is left.
    pub fn add_actor(&mut self, name: impl Into<String>) -> Result<ActorId, IntegrityError> {
        let id = next_id(&self.catalog.actors, ActorId::KIND, ActorId::first, ActorId::next)?;
        self.catalog.actors.insert(
            id,
            Actor {
                id,
                name: name.into(),
            },
        );
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`IntegrityError::MissingDirector`] if the director does not
    /// exist, or [`IntegrityError::InvalidReleaseYear`] for a zero year.
    pub fn add_movie(&mut self, movie: NewMovie) -> Result<MovieId, IntegrityError> {
        let id = next_id(&self.catalog.movies, MovieId::KIND, MovieId::first, MovieId::next)?;
        self.insert_movie(Movie {
            id,
            title: movie.title,
            release_year: movie.release_year,
            rating: movie.rating,
            director_id: movie.director,
        })?;
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`IntegrityError::DuplicateId`] or
    /// [`IntegrityError::DuplicateGenreName`].
    pub fn insert_genre(&mut self, genre: Genre) -> Result<(), IntegrityError> {
        if self.catalog.genres.contains_key(&genre.id) {
            return Err(duplicate(GenreId::KIND, genre.id.get()));
        }
        if self.catalog.genre_names.contains_key(&genre.name) {
            return Err(IntegrityError::DuplicateGenreName(genre.name));
        }
        self.catalog.genre_names.insert(genre.name.clone(), genre.id);
        self.catalog.genres.insert(genre.id, genre);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`IntegrityError::DuplicateId`] if the id is taken.
    pub fn insert_director(&mut self, director: Director) -> Result<(), IntegrityError> {
        if self.catalog.directors.contains_key(&director.id) {
            return Err(duplicate(DirectorId::KIND, director.id.get()));
        }
        self.catalog.directors.insert(director.id, director);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`IntegrityError::DuplicateId`] if the id is taken.
    pub fn insert_actor(&mut self, actor: Actor) -> Result<(), IntegrityError> {
        if self.catalog.actors.contains_key(&actor.id) {
            return Err(duplicate(ActorId::KIND, actor.id.get()));
        }
        self.catalog.actors.insert(actor.id, actor);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`IntegrityError::DuplicateId`],
    /// [`IntegrityError::InvalidReleaseYear`], or
    /// [`IntegrityError::MissingDirector`].
    pub fn insert_movie(&mut self, movie: Movie) -> Result<(), IntegrityError> {
        if self.catalog.movies.contains_key(&movie.id) {
            return Err(duplicate(MovieId::KIND, movie.id.get()));
        }
        if movie.release_year == 0 {
            return Err(IntegrityError::InvalidReleaseYear {
                title: movie.title,
                year: 0,
            });
        }
        if !self.catalog.directors.contains_key(&movie.director_id) {
            return Err(IntegrityError::MissingDirector {
                title: movie.title,
                director: movie.director_id,
            });
        }
        self.catalog
            .directed
            .entry(movie.director_id)
            .or_default()
            .insert(movie.id);
        self.catalog.movies.insert(movie.id, movie);
        Ok(())
    }

    /// Associate an actor with a movie. Linking an existing pair is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrityError::UnknownEndpoint`] if either side is missing.
    pub fn cast(&mut self, movie: MovieId, actor: ActorId) -> Result<(), IntegrityError> {
        self.require_movie(movie)?;
        if !self.catalog.actors.contains_key(&actor) {
            return Err(unknown(ActorId::KIND, actor.get()));
        }
        self.catalog.cast.link(movie, actor);
        Ok(())
    }

    /// Tag a movie with a genre. Tagging an existing pair is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrityError::UnknownEndpoint`] if either side is missing.
    pub fn tag(&mut self, movie: MovieId, genre: GenreId) -> Result<(), IntegrityError> {
        self.require_movie(movie)?;
        if !self.catalog.genres.contains_key(&genre) {
            return Err(unknown(GenreId::KIND, genre.get()));
        }
        self.catalog.tagged.link(movie, genre);
        Ok(())
    }

    fn require_movie(&self, movie: MovieId) -> Result<(), IntegrityError> {
        if self.catalog.movies.contains_key(&movie) {
            Ok(())
        } else {
            Err(unknown(MovieId::KIND, movie.get()))
        }
    }

    #[must_use]
    pub fn build(self) -> Catalog {
        debug!(stats = ?self.catalog.stats(), "catalog built");
        self.catalog
    }
}

fn next_id<K: Copy + Ord, V>(
    map: &BTreeMap<K, V>,
    kind: &'static str,
    first: fn() -> K,
    next: fn(K) -> Option<K>,
) -> Result<K, IntegrityError> {
    match map.last_key_value() {
        None => Ok(first()),
        Some((last, _)) => next(*last).ok_or(IntegrityError::IdsExhausted { kind }),
    }
}

fn duplicate(kind: &'static str, id: i64) -> IntegrityError {
    IntegrityError::DuplicateId { kind, id }
}

fn unknown(kind: &'static str, id: i64) -> IntegrityError {
    IntegrityError::UnknownEndpoint { kind, id }
}
