//! End-to-end tests for the Cinedex CLI.
//!
//! Tests invoke the `cinedex` binary as a subprocess against a database in a
//! temporary directory and verify JSON output and exit codes.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn cinedex_in(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cinedex"));
    cmd.current_dir(dir).env_remove("CINEDEX_DB");
    cmd
}

fn run(dir: &Path, args: &[&str]) -> Output {
    cinedex_in(dir)
        .args(["--db", "cinedex.db"])
        .args(args)
        .output()
        .unwrap()
}

fn json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let output = run(dir, args);
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn init_catalog() -> TempDir {
    let dir = TempDir::new().unwrap();
    let report = json(dir.path(), &["init"]);
    assert_eq!(report["seeded"], true);
    dir
}

fn ids(page: &serde_json::Value) -> Vec<i64> {
    page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

// === Init ===

#[test]
fn e2e_init_creates_and_seeds_database() {
    let dir = TempDir::new().unwrap();
    let report = json(dir.path(), &["init"]);
    assert_eq!(report["seeded"], true);
    assert_eq!(report["stats"]["movies"], 20);
    assert_eq!(report["stats"]["directors"], 5);
    assert_eq!(report["stats"]["actors"], 15);
    assert_eq!(report["stats"]["genres"], 5);
    assert!(dir.path().join("cinedex.db").exists());
}

#[test]
fn e2e_init_twice_does_not_duplicate() {
    let dir = init_catalog();
    let again = json(dir.path(), &["init"]);
    assert_eq!(again["seeded"], false);
    assert_eq!(again["stats"]["movies"], 20);
    assert_eq!(json(dir.path(), &["movies"])["total"], 20);
}

#[test]
fn e2e_init_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let output = cinedex_in(dir.path())
        .args(["--db", "data/nested/catalog.db", "init"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(dir.path().join("data/nested/catalog.db").exists());
}

// === Movies ===

#[test]
fn e2e_movies_without_filters_lists_every_movie() {
    let dir = init_catalog();
    let page = json(dir.path(), &["movies"]);
    assert_eq!(page["total"], 20);
    assert_eq!(ids(&page), (1..=20).collect::<Vec<_>>());
}

#[test]
fn e2e_movie_list_items_have_no_actors() {
    let dir = init_catalog();
    let page = json(dir.path(), &["movies"]);
    for item in page["items"].as_array().unwrap() {
        assert!(item.get("actors").is_none());
        assert!(item["director"]["name"].is_string());
        assert!(item["genres"].is_array());
    }
}

#[test]
fn e2e_movies_title_search() {
    let dir = init_catalog();
    let page = json(dir.path(), &["movies", "--q", "DARK"]);
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["title"], "The Dark Knight");

    let none = json(dir.path(), &["movies", "--search", "zzzz"]);
    assert_eq!(none["total"], 0);
    assert_eq!(none["items"], serde_json::json!([]));
}

#[test]
fn e2e_movies_filters_combine_with_and() {
    let dir = init_catalog();
    let page = json(
        dir.path(),
        &["movies", "--genre-id", "1", "--director-id", "1"],
    );
    assert_eq!(ids(&page), vec![1, 2]);

    let page = json(dir.path(), &["movies", "--release-year", "1994"]);
    assert_eq!(ids(&page), vec![3, 6, 9]);

    let page = json(dir.path(), &["movies", "--actor-id", "1"]);
    assert_eq!(ids(&page), vec![1, 7, 11, 16, 20]);
}

#[test]
fn e2e_movies_reject_invalid_filter_values() {
    let dir = init_catalog();
    for args in [
        ["movies", "--genre-id", "-1"],
        ["movies", "--director-id", "0"],
        ["movies", "--actor-id", "-5"],
        ["movies", "--release-year", "0"],
    ] {
        let output = run(dir.path(), &args);
        assert_eq!(output.status.code(), Some(2), "{args:?}");
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("invalid"), "{stderr}");
    }
}

#[test]
fn e2e_unmatched_release_year_is_empty_not_invalid() {
    let dir = init_catalog();
    let page = json(dir.path(), &["movies", "--release-year", "4294967296"]);
    assert_eq!(page["total"], 0);
    assert_eq!(page["items"], serde_json::json!([]));
}

#[test]
fn e2e_invalid_filter_is_rejected_before_opening_store() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["movies", "--genre-id", "-1"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!dir.path().join("cinedex.db").exists());
}

// === Movie detail ===

#[test]
fn e2e_movie_detail_includes_actors() {
    let dir = init_catalog();
    let detail = json(dir.path(), &["movie", "1"]);
    assert_eq!(detail["title"], "Inception");
    assert_eq!(detail["director"]["name"], "Christopher Nolan");
    let actors: Vec<i64> = detail["actors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(actors, vec![1, 12, 13]);
    assert_eq!(detail["genres"].as_array().unwrap().len(), 3);
}

#[test]
fn e2e_movie_not_found_exits_3() {
    let dir = init_catalog();
    let output = run(dir.path(), &["movie", "99999"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn e2e_movie_invalid_id_exits_2() {
    let dir = init_catalog();
    let output = run(dir.path(), &["movie", "-3"]);
    assert_eq!(output.status.code(), Some(2));
}

// === Actors, directors, genres ===

#[test]
fn e2e_actors_filtered_by_movie() {
    let dir = init_catalog();
    let page = json(dir.path(), &["actors", "--movie-id", "1"]);
    assert_eq!(ids(&page), vec![1, 12, 13]);
    assert_eq!(json(dir.path(), &["actors"])["total"], 15);
}

#[test]
fn e2e_actor_detail_lists_filmography() {
    let dir = init_catalog();
    let detail = json(dir.path(), &["actor", "1"]);
    assert_eq!(detail["name"], "Leonardo DiCaprio");
    let movies: Vec<i64> = detail["movies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect();
    assert_eq!(movies, vec![1, 7, 11, 16, 20]);

    assert_eq!(run(dir.path(), &["actor", "500"]).status.code(), Some(3));
}

#[test]
fn e2e_directors_and_genres() {
    let dir = init_catalog();
    let directors = json(dir.path(), &["directors"]);
    assert_eq!(directors["total"], 5);
    assert_eq!(directors["items"][0]["movies"].as_array().unwrap().len(), 4);

    let nolan = json(dir.path(), &["director", "1"]);
    assert_eq!(nolan["name"], "Christopher Nolan");
    assert_eq!(run(dir.path(), &["director", "0"]).status.code(), Some(2));

    let genres = json(dir.path(), &["genres"]);
    assert_eq!(genres["total"], 5);
    assert_eq!(genres["items"][3]["name"], "Sci-Fi");
}

// === Health ===

#[test]
fn e2e_health_reports_movie_count() {
    let dir = init_catalog();
    let health = json(dir.path(), &["health"]);
    assert_eq!(health["status"], "ok");
    assert_eq!(health["movies"], 20);
}

#[test]
fn e2e_queries_require_initialized_catalog() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["movies"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cinedex init"));
}

// === Output formats ===

#[test]
fn e2e_table_and_markdown_formats() {
    let dir = init_catalog();

    let output = run(dir.path(), &["--format", "table", "movies", "--director-id", "1"]);
    assert!(output.status.success());
    let table = String::from_utf8_lossy(&output.stdout);
    assert!(table.contains("title"));
    assert!(table.contains("Interstellar"));
    assert!(table.contains("-+-"));

    let output = run(dir.path(), &["-f", "markdown", "genres"]);
    assert!(output.status.success());
    let markdown = String::from_utf8_lossy(&output.stdout);
    assert!(markdown.starts_with("| id | name |"));
    assert!(markdown.contains("| 5 | Thriller |"));
}

// === Configuration ===

#[test]
fn e2e_config_file_supplies_database_and_format() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("cinedex.toml"),
        "database = \"from-config.db\"\nformat = \"markdown\"\n",
    )
    .unwrap();

    let output = cinedex_in(dir.path()).arg("init").output().unwrap();
    assert!(output.status.success());
    assert!(dir.path().join("from-config.db").exists());

    let output = cinedex_in(dir.path()).arg("genres").output().unwrap();
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("| id | name |"));

    // Flags override the file
    let output = cinedex_in(dir.path())
        .args(["--format", "json", "genres"])
        .output()
        .unwrap();
    let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["total"], 5);
}

#[test]
fn e2e_env_var_selects_database() {
    let dir = TempDir::new().unwrap();
    let output = cinedex_in(dir.path())
        .env("CINEDEX_DB", "env.db")
        .arg("init")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(dir.path().join("env.db").exists());
}

#[test]
fn e2e_invalid_config_exits_1() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("cinedex.toml"), "colour = \"red\"\n").unwrap();
    let output = cinedex_in(dir.path()).arg("genres").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

// === Completions ===

#[test]
fn e2e_completions_generate_script() {
    let dir = TempDir::new().unwrap();
    let output = cinedex_in(dir.path())
        .args(["completions", "bash"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("cinedex"));
}
