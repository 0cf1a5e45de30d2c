use crate::error::AppError;
use crate::models::{Bookmark, Herb, HerbFilter, HerbUpdate, HistoryEntry, NewHerb};
use crate::nlp::Recommendation;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use std::str::FromStr;
use tracing::info;

const HERB_COLUMNS: &str = "id, plant_name, scientific_name, description, benefits, cultivation, \
climate, category, image_url, model_3d_url, usage_instructions, is_published, created_at, updated_at";

pub async fn init_db(database_url: &str) -> Result<SqlitePool, AppError> {
    info!("Initializing database at: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("Database initialized and migrations applied.");

    Ok(pool)
}

// --- Herbs CRUD ---

/// Published herbs, filtered by plant name substring and exact category, sorted by name.
pub async fn list_herbs(pool: &SqlitePool, filter: &HerbFilter) -> Result<Vec<Herb>, AppError> {
    let search = filter.search.as_deref().filter(|s| !s.is_empty());
    let category = filter.category.as_deref().filter(|c| !c.is_empty());

    let herbs = sqlx::query_as::<_, Herb>(&format!(
        r#"
        SELECT {HERB_COLUMNS}
        FROM herbs
        WHERE is_published = 1
          AND (?1 IS NULL OR plant_name LIKE '%' || ?1 || '%')
          AND (?2 IS NULL OR category = ?2)
        ORDER BY plant_name ASC
        "#
    ))
    .bind(search)
    .bind(category)
    .fetch_all(pool)
    .await?;

    Ok(herbs)
}

pub async fn get_herb(pool: &SqlitePool, id: i64) -> Result<Herb, AppError> {
    sqlx::query_as::<_, Herb>(&format!("SELECT {HERB_COLUMNS} FROM herbs WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Herb not found".to_string()))
}

pub async fn create_herb(pool: &SqlitePool, herb: NewHerb) -> Result<Herb, AppError> {
    let now = Utc::now().timestamp();

    let created = sqlx::query_as::<_, Herb>(&format!(
        r#"
        INSERT INTO herbs (plant_name, scientific_name, description, benefits, cultivation,
                           climate, category, image_url, model_3d_url, usage_instructions,
                           is_published, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {HERB_COLUMNS}
        "#
    ))
    .bind(&herb.plant_name)
    .bind(&herb.scientific_name)
    .bind(&herb.description)
    .bind(&herb.benefits)
    .bind(&herb.cultivation)
    .bind(&herb.climate)
    .bind(&herb.category)
    .bind(&herb.image_url)
    .bind(&herb.model_3d_url)
    .bind(&herb.usage_instructions)
    .bind(herb.is_published)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn update_herb(
    pool: &SqlitePool,
    id: i64,
    update: HerbUpdate,
) -> Result<Herb, AppError> {
    // Absent fields keep the current value; `Some(None)` clears a nullable column
    let current = get_herb(pool, id).await?;

    let updated = sqlx::query_as::<_, Herb>(&format!(
        r#"
        UPDATE herbs
        SET plant_name = ?, scientific_name = ?, description = ?, benefits = ?,
            cultivation = ?, climate = ?, category = ?, image_url = ?, model_3d_url = ?,
            usage_instructions = ?, is_published = ?, updated_at = ?
        WHERE id = ?
        RETURNING {HERB_COLUMNS}
        "#
    ))
    .bind(update.plant_name.unwrap_or(current.plant_name))
    .bind(update.scientific_name.unwrap_or(current.scientific_name))
    .bind(update.description.unwrap_or(current.description))
    .bind(update.benefits.unwrap_or(current.benefits))
    .bind(update.cultivation.unwrap_or(current.cultivation))
    .bind(update.climate.unwrap_or(current.climate))
    .bind(update.category.unwrap_or(current.category))
    .bind(update.image_url.unwrap_or(current.image_url))
    .bind(update.model_3d_url.unwrap_or(current.model_3d_url))
    .bind(update.usage_instructions.unwrap_or(current.usage_instructions))
    .bind(update.is_published.unwrap_or(current.is_published))
    .bind(Utc::now().timestamp())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    // The row may have been deleted since it was read
    updated.ok_or_else(|| AppError::NotFound("Herb not found".to_string()))
}

pub async fn delete_herb(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM herbs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Herb not found".to_string()));
    }
    Ok(())
}

// --- History ---

pub async fn add_history(
    pool: &SqlitePool,
    user_id: &str,
    symptoms: &str,
    recommendation: &Recommendation,
) -> Result<HistoryEntry, AppError> {
    let serialized = serde_json::to_string(recommendation)?;

    let entry = sqlx::query_as::<_, HistoryEntry>(
        r#"
        INSERT INTO user_history (user_id, symptoms, recommendation, recommended_herbs, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, user_id, symptoms, recommendation, recommended_herbs, created_at
        "#,
    )
    .bind(user_id)
    .bind(symptoms)
    .bind(serialized)
    .bind(Json(recommendation.herb_ids()))
    .bind(Utc::now().timestamp())
    .fetch_one(pool)
    .await?;

    Ok(entry)
}

/// History of a user, newest first.
pub async fn get_user_history(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<HistoryEntry>, AppError> {
    let entries = sqlx::query_as::<_, HistoryEntry>(
        r#"
        SELECT id, user_id, symptoms, recommendation, recommended_herbs, created_at
        FROM user_history
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

// --- Bookmarks ---

/// Bookmark a herb. Bookmarking the same herb twice returns the existing bookmark.
pub async fn add_bookmark(
    pool: &SqlitePool,
    user_id: &str,
    herb_id: i64,
) -> Result<Bookmark, AppError> {
    get_herb(pool, herb_id).await?;

    sqlx::query(
        r#"
        INSERT INTO user_bookmarks (user_id, herb_id, created_at)
        VALUES (?, ?, ?)
        ON CONFLICT(user_id, herb_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(herb_id)
    .bind(Utc::now().timestamp())
    .execute(pool)
    .await?;

    let bookmark = sqlx::query_as::<_, Bookmark>(
        r#"
        SELECT id, user_id, herb_id, created_at
        FROM user_bookmarks
        WHERE user_id = ? AND herb_id = ?
        "#,
    )
    .bind(user_id)
    .bind(herb_id)
    .fetch_one(pool)
    .await?;

    Ok(bookmark)
}

pub async fn remove_bookmark(pool: &SqlitePool, user_id: &str, herb_id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM user_bookmarks WHERE user_id = ? AND herb_id = ?")
        .bind(user_id)
        .bind(herb_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Bookmarks of a user, newest first.
pub async fn get_user_bookmarks(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<Bookmark>, AppError> {
    let bookmarks = sqlx::query_as::<_, Bookmark>(
        r#"
        SELECT id, user_id, herb_id, created_at
        FROM user_bookmarks
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(bookmarks)
}
