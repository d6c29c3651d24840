//! Queries against a catalog loaded back from an on-disk SQLite store.

use std::collections::BTreeSet;

use cinedex_core::seed::{reference_catalog, MOVIES};
use cinedex_index::CatalogStore;
use cinedex_query::{MovieParams, QueryEngine};
use tempfile::TempDir;

fn seeded_store(dir: &TempDir) -> CatalogStore {
    let mut store = CatalogStore::open(&dir.path().join("cinedex.db")).unwrap();
    store.seed(&reference_catalog().unwrap()).unwrap();
    store
}

#[test]
fn unfiltered_query_returns_every_seeded_movie_once() {
    let dir = TempDir::new().unwrap();
    let catalog = seeded_store(&dir).load().unwrap();
    let page = QueryEngine::new(&catalog).movies(&MovieParams::default().validate().unwrap());

    assert_eq!(page.total, MOVIES.len());
    let titles: BTreeSet<&str> = page.items.iter().map(|m| m.title.as_str()).collect();
    let seeded: BTreeSet<&str> = MOVIES.iter().map(|m| m.title).collect();
    assert_eq!(titles, seeded);
}

#[test]
fn invalid_parameters_are_rejected_before_querying() {
    for params in [
        MovieParams {
            genre_id: Some(-1),
            ..Default::default()
        },
        MovieParams {
            director_id: Some(0),
            ..Default::default()
        },
        MovieParams {
            actor_id: Some(-5),
            ..Default::default()
        },
    ] {
        assert!(params.validate().is_err());
    }
}

#[test]
fn each_load_is_an_independent_snapshot() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);
    let first = store.load().unwrap();
    let second = store.load().unwrap();

    let params = MovieParams {
        genre_id: Some(3),
        q: Some("the".to_string()),
        ..Default::default()
    };
    let filter = params.validate().unwrap();
    assert_eq!(
        QueryEngine::new(&first).movies(&filter),
        QueryEngine::new(&second).movies(&filter)
    );
}
