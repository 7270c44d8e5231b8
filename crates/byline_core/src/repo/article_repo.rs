//! Article repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the full article-store contract (create, find, list, count,
//!   update, destroy, order, search) over canonical `articles` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate presence before touching SQL.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Destroy is a hard delete; ids are never reassigned afterwards
//!   (AUTOINCREMENT), so a destroyed id stays unresolvable forever.
//! - User-facing ordering is computed in application code; SQL emits no
//!   `ORDER BY` over user sort fields.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::article::{Article, ArticleDraft, ArticleId, ArticleValidationError};
use crate::ordering::{sort_articles, SortDirection, SortField};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ARTICLE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    author,
    date
FROM articles";

const DB_DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for article persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Presence validation failed; nothing was persisted.
    Validation(ArticleValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// No live record carries the requested id.
    NotFound(ArticleId),
    /// A persisted row violates the storage contract.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing from the connected database.
    MissingRequiredTable(&'static str),
    /// Required column is missing from an existing table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "article not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted article data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through byline_core::db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<ArticleValidationError> for RepoError {
    fn from(value: ArticleValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for article store operations.
pub trait ArticleRepository {
    /// Validates and persists a draft, returning the stored record with its
    /// fresh store-assigned id.
    fn create_article(&self, draft: &ArticleDraft) -> RepoResult<Article>;
    /// Re-validates and persists a full record under its existing id.
    fn update_article(&self, article: &Article) -> RepoResult<()>;
    /// Returns the live record with the given id, or `NotFound`.
    fn find_article(&self, id: ArticleId) -> RepoResult<Article>;
    /// Returns all live records in creation (id) order.
    fn list_articles(&self) -> RepoResult<Vec<Article>>;
    /// Returns the number of live records.
    fn count_articles(&self) -> RepoResult<u64>;
    /// Hard-deletes the record with the given id, or `NotFound`.
    fn destroy_article(&self, id: ArticleId) -> RepoResult<()>;
    /// Returns all live records ordered by `field`/`direction` with the
    /// missing-first tie-break.
    fn order_articles(
        &self,
        field: SortField,
        direction: SortDirection,
    ) -> RepoResult<Vec<Article>>;
    /// Returns all live records whose title or content contains `query` as
    /// a case-sensitive substring, in creation (id) order.
    fn search_articles(&self, query: &str) -> RepoResult<Vec<Article>>;
}

/// SQLite-backed article repository.
pub struct SqliteArticleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArticleRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match
    ///   this build.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the articles
    ///   table does not satisfy the storage contract.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ArticleRepository for SqliteArticleRepository<'_> {
    fn create_article(&self, draft: &ArticleDraft) -> RepoResult<Article> {
        let required = draft.validate()?;

        self.conn.execute(
            "INSERT INTO articles (title, content, author, date)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                required.title,
                required.content,
                draft.author.as_deref(),
                draft.date.map(date_to_db),
            ],
        )?;

        Ok(Article {
            id: self.conn.last_insert_rowid(),
            title: required.title.to_string(),
            content: required.content.to_string(),
            author: draft.author.clone(),
            date: draft.date,
        })
    }

    fn update_article(&self, article: &Article) -> RepoResult<()> {
        article.validate()?;

        let changed = self.conn.execute(
            "UPDATE articles
             SET
                title = ?1,
                content = ?2,
                author = ?3,
                date = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                article.title.as_str(),
                article.content.as_str(),
                article.author.as_deref(),
                article.date.map(date_to_db),
                article.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(article.id));
        }

        Ok(())
    }

    fn find_article(&self, id: ArticleId) -> RepoResult<Article> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ARTICLE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => parse_article_row(row),
            None => Err(RepoError::NotFound(id)),
        }
    }

    fn list_articles(&self) -> RepoResult<Vec<Article>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ARTICLE_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut articles = Vec::new();
        while let Some(row) = rows.next()? {
            articles.push(parse_article_row(row)?);
        }

        Ok(articles)
    }

    fn count_articles(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM articles;", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn destroy_article(&self, id: ArticleId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM articles WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn order_articles(
        &self,
        field: SortField,
        direction: SortDirection,
    ) -> RepoResult<Vec<Article>> {
        let mut articles = self.list_articles()?;
        sort_articles(&mut articles, field, direction);
        Ok(articles)
    }

    fn search_articles(&self, query: &str) -> RepoResult<Vec<Article>> {
        // The empty query is a substring of every row; list directly instead
        // of leaning on instr()'s empty-needle behavior.
        if query.is_empty() {
            return self.list_articles();
        }

        let mut stmt = self.conn.prepare(&format!(
            "{ARTICLE_SELECT_SQL}
             WHERE instr(title, ?1) > 0
                OR instr(content, ?1) > 0
             ORDER BY id ASC;"
        ))?;

        let mut rows = stmt.query([query])?;
        let mut articles = Vec::new();
        while let Some(row) = rows.next()? {
            articles.push(parse_article_row(row)?);
        }

        Ok(articles)
    }
}

fn parse_article_row(row: &Row<'_>) -> RepoResult<Article> {
    let date = match row.get::<_, Option<String>>("date")? {
        Some(text) => Some(parse_db_date(&text)?),
        None => None,
    };

    let article = Article {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        author: row.get("author")?,
        date,
    };
    article.validate()?;
    Ok(article)
}

fn date_to_db(date: chrono::NaiveDate) -> String {
    date.format(DB_DATE_FORMAT).to_string()
}

fn parse_db_date(text: &str) -> RepoResult<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(text, DB_DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date value `{text}` in articles.date"))
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "articles")? {
        return Err(RepoError::MissingRequiredTable("articles"));
    }

    for column in [
        "id",
        "title",
        "content",
        "author",
        "date",
        "created_at",
        "updated_at",
    ] {
        if !table_has_column(conn, "articles", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "articles",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
