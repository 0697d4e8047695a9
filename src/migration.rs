//! Schema bootstrap for the `books` table. Idempotent; safe to run on every start.

use crate::error::StoreError;
use sqlx::PgPool;

pub const BOOKS_TABLE: &str = "books";

const BOOKS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id BIGSERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    author VARCHAR(255) NOT NULL,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT books_title_not_blank CHECK (btrim(title) <> ''),
    CONSTRAINT books_author_not_blank CHECK (btrim(author) <> '')
)
"#;

/// Create the `books` table if it does not exist yet.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(BOOKS_DDL).execute(pool).await?;
    tracing::info!(table = BOOKS_TABLE, "schema ready");
    Ok(())
}
