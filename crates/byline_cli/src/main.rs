//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `byline_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use byline_core::db::open_db_in_memory;
use byline_core::{
    default_log_level, init_logging, ArticleDraft, ArticleStore, SqliteArticleRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let log_dir = std::env::temp_dir().join("byline-logs");
    if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
        eprintln!("byline_cli logging init failed: {err}");
    }

    println!("byline_core ping={}", byline_core::ping());
    println!("byline_core version={}", byline_core::core_version());

    match smoke_probe() {
        Ok(count) => {
            println!("byline_core smoke_probe articles={count}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("byline_core smoke_probe failed: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one create/count round-trip against an in-memory store.
fn smoke_probe() -> Result<u64, Box<dyn Error>> {
    let conn = open_db_in_memory()?;
    let repo = SqliteArticleRepository::try_new(&conn)?;
    let store = ArticleStore::new(repo);
    store.create_article(&ArticleDraft::new("Smoke Article", "Smoke content."))?;
    Ok(store.count_articles()?)
}
