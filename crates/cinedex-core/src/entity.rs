//! Entity records. Relationships other than `Movie -> Director` live in the
//! catalog's association indexes, not on the records.

use serde::{Deserialize, Serialize};

use crate::id::{ActorId, DirectorId, GenreId, MovieId};

/// A movie. Every movie has exactly one director.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub release_year: u32,
    pub rating: f64,
    pub director_id: DirectorId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    pub id: DirectorId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
}

/// A genre. Names are unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Attributes of a movie that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub release_year: u32,
    pub rating: f64,
    pub director: DirectorId,
}

impl Movie {
    /// Case-insensitive, unanchored title match.
    ///
    /// `needle_lower` must already be lowercased.
    #[must_use]
    pub fn title_contains(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_match_ignores_case_and_position() {
        let movie = Movie {
            id: MovieId::new(2).unwrap(),
            title: "The Dark Knight".to_string(),
            release_year: 2008,
            rating: 9.0,
            director_id: DirectorId::new(1).unwrap(),
        };
        assert!(movie.title_contains("dark"));
        assert!(movie.title_contains("knight"));
        assert!(movie.title_contains("e da"));
        assert!(!movie.title_contains("batman"));
    }
}
