//! The reference dataset: 5 genres, 5 directors, 15 actors, 20 movies.
//!
//! Director, cast, and genre assignments are fixed so that seeded stores are
//! reproducible across runs.

use tracing::info;

use crate::catalog::Catalog;
use crate::entity::NewMovie;
use crate::error::IntegrityError;

pub const GENRES: &[&str] = &["Action", "Comedy", "Drama", "Sci-Fi", "Thriller"];

pub const DIRECTORS: &[&str] = &[
    "Christopher Nolan",
    "Quentin Tarantino",
    "Steven Spielberg",
    "Martin Scorsese",
    "Ridley Scott",
];

pub const ACTORS: &[&str] = &[
    "Leonardo DiCaprio",
    "Tom Hanks",
    "Brad Pitt",
    "Meryl Streep",
    "Robert De Niro",
    "Scarlett Johansson",
    "Denzel Washington",
    "Emma Stone",
    "Ryan Gosling",
    "Jennifer Lawrence",
    "Christian Bale",
    "Cate Blanchett",
    "Matt Damon",
    "Natalie Portman",
    "Joaquin Phoenix",
];

/// One seeded movie. Director, actor, and genre fields are indexes into
/// [`DIRECTORS`], [`ACTORS`], and [`GENRES`].
pub struct SeedMovie {
    pub title: &'static str,
    pub release_year: u32,
    pub rating: f64,
    pub director: usize,
    pub actors: &'static [usize],
    pub genres: &'static [usize],
}

const fn seed(
    title: &'static str,
    release_year: u32,
    rating: f64,
    director: usize,
    actors: &'static [usize],
    genres: &'static [usize],
) -> SeedMovie {
    SeedMovie {
        title,
        release_year,
        rating,
        director,
        actors,
        genres,
    }
}

pub const MOVIES: &[SeedMovie] = &[
    seed("Inception", 2010, 8.8, 0, &[0, 12, 11], &[0, 3, 4]),
    seed("The Dark Knight", 2008, 9.0, 0, &[10, 14], &[0, 2, 4]),
    seed("Pulp Fiction", 1994, 8.9, 1, &[2, 6, 7], &[2, 4]),
    seed("Interstellar", 2014, 8.6, 0, &[12, 9, 11], &[2, 3]),
    seed("The Matrix", 1999, 8.7, 4, &[5, 6], &[0, 3]),
    seed("Forrest Gump", 1994, 8.8, 2, &[1, 3], &[1, 2]),
    seed("The Departed", 2006, 8.5, 3, &[0, 12, 4], &[2, 4]),
    seed("Gladiator", 2000, 8.5, 4, &[14, 10], &[0, 2]),
    seed("The Shawshank Redemption", 1994, 9.3, 3, &[6, 1], &[2]),
    seed("Fight Club", 1999, 8.8, 1, &[2, 13], &[2]),
    seed("Goodfellas", 1990, 8.7, 3, &[4, 0], &[2, 4]),
    seed("The Godfather", 1972, 9.2, 3, &[4, 3], &[2]),
    seed("Schindler's List", 1993, 8.9, 2, &[11, 3], &[2]),
    seed("Saving Private Ryan", 1998, 8.6, 2, &[1, 12], &[0, 2]),
    seed("The Prestige", 2006, 8.5, 0, &[10, 5, 8], &[2, 3, 4]),
    seed("Django Unchained", 2012, 8.4, 1, &[0, 6, 2], &[0, 2]),
    seed("Inglourious Basterds", 2009, 8.3, 1, &[2, 13], &[0, 2]),
    seed("Blade Runner", 1982, 8.1, 4, &[8, 9], &[3, 4]),
    seed("Alien", 1979, 8.5, 4, &[3, 11], &[3, 4]),
    seed("The Revenant", 2015, 8.0, 2, &[0, 1, 7, 14], &[1, 2]),
];

/// Build the reference catalog.
///
/// # Errors
///
/// Returns an [`IntegrityError`] if the tables above are inconsistent.
pub fn reference_catalog() -> Result<Catalog, IntegrityError> {
    let mut builder = Catalog::builder();

    let genres = GENRES
        .iter()
        .map(|name| builder.add_genre(*name))
        .collect::<Result<Vec<_>, _>>()?;
    let directors: Vec<_> = DIRECTORS
        .iter()
        .map(|name| builder.add_director(*name))
        .collect::<Result<_, _>>()?;
    let actors: Vec<_> = ACTORS
        .iter()
        .map(|name| builder.add_actor(*name))
        .collect::<Result<_, _>>()?;

    for entry in MOVIES {
        let director = *directors
            .get(entry.director)
            .ok_or(IntegrityError::UnknownEndpoint {
                kind: "director",
                id: entry.director as i64 + 1,
            })?;
        let movie = builder.add_movie(NewMovie {
            title: entry.title.to_string(),
            release_year: entry.release_year,
            rating: entry.rating,
            director,
        })?;
        for &a in entry.actors {
            let actor = *actors.get(a).ok_or(IntegrityError::UnknownEndpoint {
                kind: "actor",
                id: a as i64 + 1,
            })?;
            builder.cast(movie, actor)?;
        }
        for &g in entry.genres {
            let genre = *genres.get(g).ok_or(IntegrityError::UnknownEndpoint {
                kind: "genre",
                id: g as i64 + 1,
            })?;
            builder.tag(movie, genre)?;
        }
    }

    let catalog = builder.build();
    info!(movies = catalog.movie_count(), "reference catalog assembled");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{GenreId, MovieId};

    #[test]
    fn reference_catalog_has_expected_shape() {
        let catalog = reference_catalog().unwrap();
        let stats = catalog.stats();
        assert_eq!(stats.movies, 20);
        assert_eq!(stats.directors, 5);
        assert_eq!(stats.actors, 15);
        assert_eq!(stats.genres, 5);
    }

    #[test]
    fn every_movie_has_two_to_four_actors_and_one_to_three_genres() {
        let catalog = reference_catalog().unwrap();
        for movie in catalog.movies() {
            let cast = catalog.cast_of(movie.id).count();
            let genres = catalog.genres_of(movie.id).count();
            assert!((2..=4).contains(&cast), "{} has {cast} actors", movie.title);
            assert!((1..=3).contains(&genres), "{} has {genres} genres", movie.title);
        }
    }

    #[test]
    fn ids_follow_seed_order() {
        let catalog = reference_catalog().unwrap();
        let dark_knight = catalog.movie(MovieId::new(2).unwrap()).unwrap();
        assert_eq!(dark_knight.title, "The Dark Knight");
        assert_eq!(catalog.director_of(dark_knight).name, "Christopher Nolan");
        let sci_fi = catalog.genre(GenreId::new(4).unwrap()).unwrap();
        assert_eq!(sci_fi.name, "Sci-Fi");
    }
}
