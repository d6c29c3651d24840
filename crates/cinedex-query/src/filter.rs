//! Validated filters and their predicate lists.
//!
//! Each supplied filter contributes one predicate; absent filters contribute
//! nothing. A row is kept when every predicate holds (logical AND).

use cinedex_core::entity::{Actor, Movie};
use cinedex_core::id::{ActorId, DirectorId, GenreId, MovieId};
use cinedex_core::Catalog;

/// A single narrowing condition over rows of type `T`.
pub type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;

/// Filters for the movie collection query. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilter {
    pub genre: Option<GenreId>,
    pub director: Option<DirectorId>,
    pub actor: Option<ActorId>,
    /// Exact release year. A year with no movies matches nothing.
    pub release_year: Option<i64>,
    /// Case-insensitive title substring.
    pub title: Option<String>,
}

impl MovieFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build the predicate list for the supplied filters only.
    pub fn predicates<'a>(&self, catalog: &'a Catalog) -> Vec<Predicate<'a, Movie>> {
        let mut predicates: Vec<Predicate<'a, Movie>> = Vec::new();

        if let Some(genre) = self.genre {
            predicates.push(Box::new(move |m: &Movie| catalog.has_genre(m.id, genre)));
        }
        if let Some(director) = self.director {
            predicates.push(Box::new(move |m: &Movie| m.director_id == director));
        }
        if let Some(actor) = self.actor {
            predicates.push(Box::new(move |m: &Movie| catalog.has_actor(m.id, actor)));
        }
        if let Some(year) = self.release_year {
            predicates.push(Box::new(move |m: &Movie| i64::from(m.release_year) == year));
        }
        if let Some(title) = &self.title {
            let needle = title.to_lowercase();
            predicates.push(Box::new(move |m: &Movie| m.title_contains(&needle)));
        }

        predicates
    }
}

/// Filters for the actor collection query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorFilter {
    /// Keep actors appearing in this movie.
    pub movie: Option<MovieId>,
    /// Keep actors appearing in at least one movie of this genre.
    pub genre: Option<GenreId>,
}

impl ActorFilter {
    pub fn predicates<'a>(&self, catalog: &'a Catalog) -> Vec<Predicate<'a, Actor>> {
        let mut predicates: Vec<Predicate<'a, Actor>> = Vec::new();

        if let Some(movie) = self.movie {
            predicates.push(Box::new(move |a: &Actor| catalog.has_actor(movie, a.id)));
        }
        if let Some(genre) = self.genre {
            predicates.push(Box::new(move |a: &Actor| {
                catalog
                    .filmography(a.id)
                    .any(|m| catalog.has_genre(m.id, genre))
            }));
        }

        predicates
    }
}

/// Whether `row` satisfies every predicate. An empty list matches everything.
pub fn matches_all<T>(row: &T, predicates: &[Predicate<'_, T>]) -> bool {
    predicates.iter().all(|p| p(row))
}
