use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{info, instrument};

/// League schema. Statements are idempotent so the driver can run them on
/// every start.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS teams (
    id        INTEGER PRIMARY KEY,
    name      TEXT    NOT NULL UNIQUE,
    city      TEXT    NOT NULL,
    founded   INTEGER NOT NULL,
    stadium   TEXT    NOT NULL,
    points    INTEGER NOT NULL DEFAULT 0,
    photo_url TEXT
);
CREATE INDEX IF NOT EXISTS idx_teams_city ON teams (city);

CREATE TABLE IF NOT EXISTS players (
    id         INTEGER PRIMARY KEY,
    name       TEXT    NOT NULL,
    position   TEXT    NOT NULL
               CHECK (position IN ('Forward', 'Midfielder', 'Defender', 'Goalkeeper')),
    goals      INTEGER NOT NULL DEFAULT 0,
    team_id    INTEGER NOT NULL REFERENCES teams (id),
    photo_url  TEXT,
    is_starter INTEGER NOT NULL DEFAULT 1,
    CONSTRAINT unique_player_in_team UNIQUE (name, team_id)
);

CREATE TABLE IF NOT EXISTS matches (
    id           INTEGER  PRIMARY KEY,
    home_team_id INTEGER  NOT NULL REFERENCES teams (id),
    away_team_id INTEGER  NOT NULL REFERENCES teams (id),
    date         DATETIME NOT NULL,
    home_score   INTEGER  NOT NULL DEFAULT 0,
    away_score   INTEGER  NOT NULL DEFAULT 0,
    CONSTRAINT unique_match_constraint UNIQUE (home_team_id, away_team_id, date)
);

CREATE TABLE IF NOT EXISTS goals (
    id        INTEGER PRIMARY KEY,
    match_id  INTEGER NOT NULL REFERENCES matches (id),
    player_id INTEGER NOT NULL REFERENCES players (id),
    minute    INTEGER NOT NULL CHECK (minute >= 0)
);
"#;

#[derive(Clone, Debug)]
pub struct Db {
    pub pool: SqlitePool,
}

impl Db {
    /// Open a pool against `url` with foreign keys enforced.
    // Keep the DSN out of the span; it may carry credentials.
    #[instrument(skip(url))]
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .foreign_keys(true)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;
        info!(max_connections, "connected to store");
        Ok(Self { pool })
    }

    /// Private in-memory store. Single connection that never idles out, since
    /// each sqlite memory connection is its own database.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let db = Db::in_memory().await.unwrap();
        db.ensure_schema().await.unwrap();
        db.ensure_schema().await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&db.pool)
        .await
        .unwrap();
        assert_eq!(tables, vec!["goals", "matches", "players", "teams"]);
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = Db::in_memory().await.unwrap();
        db.ensure_schema().await.unwrap();

        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(enabled, 1);

        let err = sqlx::query("INSERT INTO players (name, position, team_id) VALUES ('Ghost', 'Forward', 42)")
            .execute(&db.pool)
            .await
            .unwrap_err();
        assert!(matches!(err, sqlx::Error::Database(_)));
    }
}
