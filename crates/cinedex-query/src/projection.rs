//! Response projections.
//!
//! List items carry what a collection view needs; detail views expand every
//! directly related entity one hop. The field sets are a client contract:
//! - [`MovieListItem`]: director summary and genres, **no actors**
//! - [`MovieDetail`]: director, genres, and actors
//! - [`ActorDetail`], [`DirectorDetail`]: the filmography as [`MovieReference`]s

use serde::{Deserialize, Serialize};

use cinedex_core::entity::{Actor, Director, Genre, Movie};
use cinedex_core::id::{ActorId, DirectorId, GenreId, MovieId};
use cinedex_core::Catalog;

/// A collection result. `total` always equals `items.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

impl<T> FromIterator<T> for Page<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorInfo {
    pub id: DirectorId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreInfo {
    pub id: GenreId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorInfo {
    pub id: ActorId,
    pub name: String,
}

/// Genre collections use the summary shape.
pub type GenreListItem = GenreInfo;

/// Actor collections use the summary shape.
pub type ActorListItem = ActorInfo;

impl From<&Director> for DirectorInfo {
    fn from(d: &Director) -> Self {
        Self {
            id: d.id,
            name: d.name.clone(),
        }
    }
}

impl From<&Genre> for GenreInfo {
    fn from(g: &Genre) -> Self {
        Self {
            id: g.id,
            name: g.name.clone(),
        }
    }
}

impl From<&Actor> for ActorInfo {
    fn from(a: &Actor) -> Self {
        Self {
            id: a.id,
            name: a.name.clone(),
        }
    }
}

/// A movie's own attributes, without relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieReference {
    pub id: MovieId,
    pub title: String,
    pub release_year: u32,
    pub rating: f64,
}

impl From<&Movie> for MovieReference {
    fn from(m: &Movie) -> Self {
        Self {
            id: m.id,
            title: m.title.clone(),
            release_year: m.release_year,
            rating: m.rating,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieListItem {
    pub id: MovieId,
    pub title: String,
    pub release_year: u32,
    pub rating: f64,
    pub director: DirectorInfo,
    pub genres: Vec<GenreInfo>,
}

impl MovieListItem {
    #[must_use]
    pub fn project(catalog: &Catalog, movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            release_year: movie.release_year,
            rating: movie.rating,
            director: catalog.director_of(movie).into(),
            genres: catalog.genres_of(movie.id).map(GenreInfo::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: MovieId,
    pub title: String,
    pub release_year: u32,
    pub rating: f64,
    pub director: DirectorInfo,
    pub genres: Vec<GenreInfo>,
    pub actors: Vec<ActorInfo>,
}

impl MovieDetail {
    #[must_use]
    pub fn project(catalog: &Catalog, movie: &Movie) -> Self {
        let MovieListItem {
            id,
            title,
            release_year,
            rating,
            director,
            genres,
        } = MovieListItem::project(catalog, movie);
        Self {
            id,
            title,
            release_year,
            rating,
            director,
            genres,
            actors: catalog.cast_of(movie.id).map(ActorInfo::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorDetail {
    pub id: ActorId,
    pub name: String,
    pub movies: Vec<MovieReference>,
}

impl ActorDetail {
    #[must_use]
    pub fn project(catalog: &Catalog, actor: &Actor) -> Self {
        Self {
            id: actor.id,
            name: actor.name.clone(),
            movies: catalog
                .filmography(actor.id)
                .map(MovieReference::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorDetail {
    pub id: DirectorId,
    pub name: String,
    pub movies: Vec<MovieReference>,
}

impl DirectorDetail {
    #[must_use]
    pub fn project(catalog: &Catalog, director: &Director) -> Self {
        Self {
            id: director.id,
            name: director.name.clone(),
            movies: catalog
                .directed_by(director.id)
                .map(MovieReference::from)
                .collect(),
        }
    }
}
