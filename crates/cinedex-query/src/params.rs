//! Inbound request parameters and their validation.
//!
//! Parameters arrive as raw integers (or text) from the request layer.
//! Validation turns them into typed filters before any query runs: a
//! supplied identifier that is not a positive integer is rejected with
//! [`FilterError::InvalidFilterValue`], never treated as "no filter".

use serde::{Deserialize, Serialize};

use cinedex_core::error::FilterError;

use crate::filter::{ActorFilter, MovieFilter};

/// Raw parameters of the movie collection query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieParams {
    pub genre_id: Option<i64>,
    pub director_id: Option<i64>,
    pub actor_id: Option<i64>,
    pub release_year: Option<i64>,
    pub q: Option<String>,
}

impl MovieParams {
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidFilterValue`] naming the first
    /// parameter that is present but not a positive integer.
    pub fn validate(&self) -> Result<MovieFilter, FilterError> {
        Ok(MovieFilter {
            genre: positive("genreId", self.genre_id)?,
            director: positive("directorId", self.director_id)?,
            actor: positive("actorId", self.actor_id)?,
            release_year: release_year(self.release_year)?,
            title: self.q.clone().filter(|q| !q.is_empty()),
        })
    }
}

/// Raw parameters of the actor collection query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorParams {
    pub movie_id: Option<i64>,
    pub genre_id: Option<i64>,
}

impl ActorParams {
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidFilterValue`] for a non-positive id.
    pub fn validate(&self) -> Result<ActorFilter, FilterError> {
        Ok(ActorFilter {
            movie: positive("movieId", self.movie_id)?,
            genre: positive("genreId", self.genre_id)?,
        })
    }
}

/// Validate a path identifier for a single-entity lookup.
///
/// # Errors
///
/// Returns [`FilterError::InvalidFilterValue`] if `raw` is not positive.
pub fn path_id<I: TryFrom<i64>>(raw: i64) -> Result<I, FilterError> {
    I::try_from(raw).map_err(|_| FilterError::InvalidFilterValue {
        param: "id",
        value: raw,
    })
}

fn positive<I: TryFrom<i64>>(
    param: &'static str,
    raw: Option<i64>,
) -> Result<Option<I>, FilterError> {
    raw.map(|value| I::try_from(value).map_err(|_| FilterError::InvalidFilterValue { param, value }))
        .transpose()
}

fn release_year(raw: Option<i64>) -> Result<Option<i64>, FilterError> {
    raw.map(|value| {
        if value > 0 {
            Ok(value)
        } else {
            Err(FilterError::InvalidFilterValue {
                param: "releaseYear",
                value,
            })
        }
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedex_core::id::{ActorId, GenreId, MovieId};

    fn invalid(param: &'static str, value: i64) -> FilterError {
        FilterError::InvalidFilterValue { param, value }
    }

    #[test]
    fn absent_parameters_mean_no_filter() {
        let filter = MovieParams::default().validate().unwrap();
        assert_eq!(filter, MovieFilter::default());
        assert!(filter.is_empty());
    }

    #[test]
    fn rejects_non_positive_identifiers() {
        let cases = [
            (
                MovieParams {
                    genre_id: Some(-1),
                    ..Default::default()
                },
                invalid("genreId", -1),
            ),
            (
                MovieParams {
                    director_id: Some(0),
                    ..Default::default()
                },
                invalid("directorId", 0),
            ),
            (
                MovieParams {
                    actor_id: Some(-5),
                    ..Default::default()
                },
                invalid("actorId", -5),
            ),
            (
                MovieParams {
                    release_year: Some(0),
                    ..Default::default()
                },
                invalid("releaseYear", 0),
            ),
        ];
        for (params, expected) in cases {
            assert_eq!(params.validate().unwrap_err(), expected);
        }
    }

    #[test]
    fn accepts_positive_identifiers_and_text() {
        let params = MovieParams {
            genre_id: Some(3),
            release_year: Some(1994),
            q: Some("Dark".to_string()),
            ..Default::default()
        };
        let filter = params.validate().unwrap();
        assert_eq!(filter.genre, GenreId::new(3));
        assert_eq!(filter.release_year, Some(1994));
        assert_eq!(filter.title.as_deref(), Some("Dark"));
    }

    #[test]
    fn empty_search_text_is_no_filter() {
        let params = MovieParams {
            q: Some(String::new()),
            ..Default::default()
        };
        assert!(params.validate().unwrap().title.is_none());
    }

    #[test]
    fn accepts_any_positive_release_year() {
        for year in [1, 4_294_967_296, i64::MAX] {
            let filter = MovieParams {
                release_year: Some(year),
                ..Default::default()
            }
            .validate()
            .unwrap();
            assert_eq!(filter.release_year, Some(year));
        }
    }

    #[test]
    fn actor_params_validate_both_filters() {
        let ok = ActorParams {
            movie_id: Some(1),
            genre_id: None,
        }
        .validate()
        .unwrap();
        assert_eq!(ok.movie, MovieId::new(1));

        let err = ActorParams {
            movie_id: None,
            genre_id: Some(0),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, invalid("genreId", 0));
    }

    #[test]
    fn path_id_rejects_non_positive() {
        let id: ActorId = path_id(4).unwrap();
        assert_eq!(id.get(), 4);
        assert_eq!(path_id::<MovieId>(-3).unwrap_err(), invalid("id", -3));
    }

    #[test]
    fn deserializes_camel_case_query_string_names() {
        let params: MovieParams =
            serde_json::from_str(r#"{"genreId": 2, "releaseYear": 2008, "q": "dark"}"#).unwrap();
        assert_eq!(params.genre_id, Some(2));
        assert_eq!(params.release_year, Some(2008));
        assert_eq!(params.q.as_deref(), Some("dark"));
    }
}
