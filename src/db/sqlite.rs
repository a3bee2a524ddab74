use crate::db::models::{Itinerary, NewItinerary};
use crate::db::schema::SQLITE_INIT;
use crate::error::NambiError;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use tracing::info;

pub type SqlitePool = Pool<Sqlite>;

const SELECT_COLUMNS: &str = "SELECT id, title, days, budget, places, accommodation, transport, \
     details, package_name, created_at FROM itineraries";

#[derive(Clone)]
pub struct ItineraryStorage {
    pool: SqlitePool,
}

impl ItineraryStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and apply the schema.
    pub async fn connect(database_url: &str) -> Result<Self, NambiError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        info!(database_url, "itinerary storage ready");
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), NambiError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert a row and return its id; `created_at` is stamped here.
    pub async fn create(&self, new: NewItinerary) -> Result<i64, NambiError> {
        // fixed-width timestamps so text ordering matches time ordering
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let result = sqlx::query(
            r#"
            INSERT INTO itineraries (
                title, days, budget, places, accommodation,
                transport, details, package_name, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new.title)
        .bind(new.days)
        .bind(new.budget)
        .bind(new.places)
        .bind(new.accommodation)
        .bind(new.transport)
        .bind(new.details)
        .bind(new.package_name)
        .bind(created_at)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Newest first; ids break ties between rows stamped in the same instant.
    pub async fn list(&self) -> Result<Vec<Itinerary>, NambiError> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Itinerary, NambiError> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;
        Self::row_to_model(row)
    }

    /// Update all mutable fields by id (except id and created_at).
    pub async fn update(&self, itinerary: &Itinerary) -> Result<(), NambiError> {
        let result = sqlx::query(
            r#"UPDATE itineraries SET
                title = ?,
                days = ?,
                budget = ?,
                places = ?,
                accommodation = ?,
                transport = ?,
                details = ?,
                package_name = ?
              WHERE id = ?"#,
        )
        .bind(&itinerary.title)
        .bind(itinerary.days)
        .bind(&itinerary.budget)
        .bind(&itinerary.places)
        .bind(&itinerary.accommodation)
        .bind(&itinerary.transport)
        .bind(&itinerary.details)
        .bind(&itinerary.package_name)
        .bind(itinerary.id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(itinerary.id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), NambiError> {
        let result = sqlx::query("DELETE FROM itineraries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    fn row_to_model(row: SqliteRow) -> Result<Itinerary, NambiError> {
        let created_at_str: String = row.try_get("created_at")?;
        let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            .with_timezone(&Utc);

        Ok(Itinerary {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            days: row.try_get("days")?,
            budget: row.try_get("budget")?,
            places: row.try_get("places")?,
            accommodation: row.try_get("accommodation")?,
            transport: row.try_get("transport")?,
            details: row.try_get("details")?,
            package_name: row.try_get("package_name")?,
            created_at,
        })
    }
}

fn not_found(id: i64) -> NambiError {
    NambiError::NotFound(format!("Itinerary {id}"))
}
