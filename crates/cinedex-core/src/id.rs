//! Typed entity identifiers.
//!
//! Identifiers are positive integers, assigned once and never reused.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IntegrityError;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Entity kind name used in error messages.
            pub const KIND: &'static str = $kind;

            /// Wrap a raw identifier. Returns `None` unless `raw` is positive.
            #[must_use]
            pub fn new(raw: i64) -> Option<Self> {
                (raw > 0).then_some(Self(raw))
            }

            #[must_use]
            pub fn get(self) -> i64 {
                self.0
            }

            /// The following identifier, or `None` once `i64::MAX` is taken.
            pub(crate) fn next(self) -> Option<Self> {
                self.0.checked_add(1).map(Self)
            }

            pub(crate) fn first() -> Self {
                Self(1)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IntegrityError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(IntegrityError::InvalidId {
                    kind: $kind,
                    value,
                })
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Movie`](crate::entity::Movie).
    MovieId,
    "movie"
);
entity_id!(
    /// Identifier of a [`Director`](crate::entity::Director).
    DirectorId,
    "director"
);
entity_id!(
    /// Identifier of an [`Actor`](crate::entity::Actor).
    ActorId,
    "actor"
);
entity_id!(
    /// Identifier of a [`Genre`](crate::entity::Genre).
    GenreId,
    "genre"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_raw_values() {
        assert!(MovieId::new(0).is_none());
        assert!(ActorId::new(-5).is_none());
        assert_eq!(GenreId::new(3).map(GenreId::get), Some(3));
    }

    #[test]
    fn try_from_reports_kind_and_value() {
        let err = DirectorId::try_from(0).unwrap_err();
        assert_eq!(
            err,
            IntegrityError::InvalidId {
                kind: "director",
                value: 0
            }
        );
    }

    #[test]
    fn serializes_as_bare_integer() {
        let id = MovieId::new(7).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: MovieId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<MovieId>("-1").is_err());
    }

    #[test]
    fn successor_stops_at_the_largest_identifier() {
        assert_eq!(ActorId::first().next(), ActorId::new(2));
        assert_eq!(ActorId::new(i64::MAX).unwrap().next(), None);
    }
}
