use crate::models::{
    AiProfile, ChildProfile, ChildSummary, CreateProfileRequest, LibraryEntry, LibrarySummary,
    MatchHighlights, MatchRecord, ParsedProfile, ScoredPair,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, QueryBuilder, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// PostgreSQL store for profiles, the resume library, and match results
///
/// All reads and deletes are owner-scoped: the owning account id is bound
/// into every query. Match rows reference their child profile and library
/// entry by plain id with no referential integrity - deleting either side
/// leaves the row in place and the joined summaries come back empty.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    // ------------------------------------------------------------------
    // Child profiles
    // ------------------------------------------------------------------

    /// Create a child profile from form input
    pub async fn create_child_profile(
        &self,
        request: &CreateProfileRequest,
    ) -> Result<ChildProfile, StoreError> {
        let id = Uuid::new_v4();

        let query = r#"
            INSERT INTO child_profiles
                (id, user_id, name, age, location, occupation, education, background, hashkafa, gender)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING created_at
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .bind(request.user_id)
            .bind(&request.name)
            .bind(request.age)
            .bind(&request.location)
            .bind(&request.occupation)
            .bind(&request.education)
            .bind(&request.background)
            .bind(&request.hashkafa)
            .bind(&request.gender)
            .fetch_one(&self.pool)
            .await?;

        Ok(ChildProfile {
            id,
            user_id: request.user_id,
            name: request.name.clone(),
            age: request.age,
            location: request.location.clone(),
            occupation: request.occupation.clone(),
            education: request.education.clone(),
            background: request.background.clone(),
            hashkafa: request.hashkafa.clone(),
            gender: request.gender.clone(),
            created_at: Some(row.get("created_at")),
        })
    }

    /// Fetch one child profile, owner-scoped
    pub async fn get_child_profile(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<ChildProfile, StoreError> {
        let query = r#"
            SELECT id, user_id, name, age, location, occupation, education, background,
                   hashkafa, gender, created_at
            FROM child_profiles
            WHERE id = $1 AND user_id = $2
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Child profile {} not found", id)))?;

        Ok(child_profile_from_row(&row))
    }

    /// List all child profiles for an account
    pub async fn list_child_profiles(&self, user_id: Uuid) -> Result<Vec<ChildProfile>, StoreError> {
        let query = r#"
            SELECT id, user_id, name, age, location, occupation, education, background,
                   hashkafa, gender, created_at
            FROM child_profiles
            WHERE user_id = $1
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(child_profile_from_row).collect())
    }

    // ------------------------------------------------------------------
    // Resume library
    // ------------------------------------------------------------------

    /// Insert a fresh library entry; the parsed payload follows later
    pub async fn insert_library_entry(
        &self,
        user_id: Uuid,
        uploaded_by: &str,
        uploaded_for: &str,
    ) -> Result<LibraryEntry, StoreError> {
        let id = Uuid::new_v4();

        let query = r#"
            INSERT INTO resume_library (id, user_id, uploaded_by, uploaded_for, tags)
            VALUES ($1, $2, $3, $4, '{}')
            RETURNING created_at
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .bind(user_id)
            .bind(uploaded_by)
            .bind(uploaded_for)
            .fetch_one(&self.pool)
            .await?;

        Ok(LibraryEntry {
            id,
            user_id,
            uploaded_by: uploaded_by.to_string(),
            uploaded_for: uploaded_for.to_string(),
            parsed_data: None,
            tags: vec![],
            created_at: row.get("created_at"),
        })
    }

    /// Attach a best-effort parsed profile to a library entry
    pub async fn set_parsed_profile(
        &self,
        id: Uuid,
        user_id: Uuid,
        profile: &ParsedProfile,
    ) -> Result<(), StoreError> {
        let payload = serde_json::to_value(profile)?;

        let query = r#"
            UPDATE resume_library
            SET parsed_data = $3
            WHERE id = $1 AND user_id = $2
        "#;

        sqlx::query(query)
            .bind(id)
            .bind(user_id)
            .bind(payload)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List library entries for an account, optionally by purpose tag
    pub async fn list_library(
        &self,
        user_id: Uuid,
        uploaded_for: Option<&str>,
    ) -> Result<Vec<LibraryEntry>, StoreError> {
        let rows = match uploaded_for {
            Some(purpose) => {
                let query = r#"
                    SELECT id, user_id, uploaded_by, uploaded_for, parsed_data, tags, created_at
                    FROM resume_library
                    WHERE user_id = $1 AND uploaded_for = $2
                    ORDER BY created_at DESC
                "#;
                sqlx::query(query)
                    .bind(user_id)
                    .bind(purpose)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query = r#"
                    SELECT id, user_id, uploaded_by, uploaded_for, parsed_data, tags, created_at
                    FROM resume_library
                    WHERE user_id = $1
                    ORDER BY created_at DESC
                "#;
                sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?
            }
        };

        Ok(rows.iter().map(library_entry_from_row).collect())
    }

    /// Fetch one library entry by id
    pub async fn get_library_entry(&self, id: Uuid) -> Result<LibraryEntry, StoreError> {
        let query = r#"
            SELECT id, user_id, uploaded_by, uploaded_for, parsed_data, tags, created_at
            FROM resume_library
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Library entry {} not found", id)))?;

        Ok(library_entry_from_row(&row))
    }

    /// Delete a library entry, owner-scoped
    ///
    /// Match rows referencing the entry are left untouched.
    pub async fn delete_library_entry(&self, id: Uuid, user_id: Uuid) -> Result<bool, StoreError> {
        let query = r#"
            DELETE FROM resume_library
            WHERE id = $1 AND user_id = $2
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ------------------------------------------------------------------
    // Match results
    // ------------------------------------------------------------------

    /// Insert a full search batch as a single write
    ///
    /// All rows land in one INSERT: either the whole batch commits or none
    /// of it does, and the caller is expected to retry the entire search.
    pub async fn insert_match_batch(
        &self,
        parent_id: Uuid,
        pairs: &[ScoredPair],
    ) -> Result<Vec<MatchRecord>, StoreError> {
        if pairs.is_empty() {
            return Ok(vec![]);
        }

        let mut highlight_payloads = Vec::with_capacity(pairs.len());
        for pair in pairs {
            highlight_payloads.push(serde_json::to_value(&pair.highlights)?);
        }

        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(
            "INSERT INTO match_results (id, parent_id, child_profile_id, library_id, match_score, highlights) ",
        );

        builder.push_values(pairs.iter().zip(highlight_payloads), |mut b, (pair, highlights)| {
            b.push_bind(Uuid::new_v4())
                .push_bind(parent_id)
                .push_bind(pair.child_profile_id)
                .push_bind(pair.library_id)
                .push_bind(pair.match_score)
                .push_bind(highlights);
        });

        builder.push(
            " RETURNING id, parent_id, child_profile_id, library_id, match_score, highlights, created_at",
        );

        let rows = builder.build().fetch_all(&self.pool).await?;

        tracing::info!("Inserted batch of {} match results", rows.len());

        rows.iter().map(match_record_from_row).collect()
    }

    /// List match results for an account, newest first
    ///
    /// Child and library summaries are joined best-effort; dangling
    /// references simply come back without one.
    pub async fn list_match_results(&self, parent_id: Uuid) -> Result<Vec<MatchRecord>, StoreError> {
        let query = r#"
            SELECT m.id, m.parent_id, m.child_profile_id, m.library_id,
                   m.match_score, m.highlights, m.created_at,
                   c.name AS child_name, c.age AS child_age,
                   c.location AS child_location, c.occupation AS child_occupation,
                   l.parsed_data AS library_parsed_data, l.uploaded_by AS library_uploaded_by
            FROM match_results m
            LEFT JOIN child_profiles c ON c.id = m.child_profile_id
            LEFT JOIN resume_library l ON l.id = m.library_id
            WHERE m.parent_id = $1
            ORDER BY m.created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut record = match_record_from_row(row)?;

            let child_name: Option<String> = row.get("child_name");
            record.child_profile = child_name.map(|name| ChildSummary {
                name,
                age: row.get("child_age"),
                location: row.get("child_location"),
                occupation: row.get("child_occupation"),
            });

            let uploaded_by: Option<String> = row.get("library_uploaded_by");
            record.matched_entry = uploaded_by.map(|uploaded_by| LibrarySummary {
                parsed_data: parsed_data_from_value(row.get("library_parsed_data")),
                uploaded_by,
            });

            records.push(record);
        }

        Ok(records)
    }

    /// Delete one match result, owner-scoped
    pub async fn delete_match_result(&self, id: Uuid, parent_id: Uuid) -> Result<bool, StoreError> {
        let query = r#"
            DELETE FROM match_results
            WHERE id = $1 AND parent_id = $2
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .bind(parent_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ------------------------------------------------------------------
    // Generated narrative profiles
    // ------------------------------------------------------------------

    /// Persist a generated narrative profile
    pub async fn insert_ai_profile(
        &self,
        parent_id: Uuid,
        library_id: Uuid,
        summary: &str,
    ) -> Result<AiProfile, StoreError> {
        let id = Uuid::new_v4();

        let query = r#"
            INSERT INTO ai_profiles (id, parent_id, library_id, summary)
            VALUES ($1, $2, $3, $4)
            RETURNING created_at
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .bind(parent_id)
            .bind(library_id)
            .bind(summary)
            .fetch_one(&self.pool)
            .await?;

        Ok(AiProfile {
            id,
            parent_id,
            library_id,
            summary: summary.to_string(),
            created_at: row.get("created_at"),
        })
    }
}

fn child_profile_from_row(row: &PgRow) -> ChildProfile {
    ChildProfile {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        age: row.get("age"),
        location: row.get("location"),
        occupation: row.get("occupation"),
        education: row.get("education"),
        background: row.get("background"),
        hashkafa: row.get("hashkafa"),
        gender: row.get("gender"),
        created_at: Some(row.get("created_at")),
    }
}

fn library_entry_from_row(row: &PgRow) -> LibraryEntry {
    LibraryEntry {
        id: row.get("id"),
        user_id: row.get("user_id"),
        uploaded_by: row.get("uploaded_by"),
        uploaded_for: row.get("uploaded_for"),
        parsed_data: parsed_data_from_value(row.get("parsed_data")),
        tags: row.get("tags"),
        created_at: row.get("created_at"),
    }
}

/// Decode a stored parsed-profile payload, best-effort
///
/// The payload originates from an LLM and was stored as-is; a shape that no
/// longer converts is treated as absent rather than an error.
fn parsed_data_from_value(value: Option<serde_json::Value>) -> Option<ParsedProfile> {
    value.and_then(|v| serde_json::from_value(v).ok())
}

fn match_record_from_row(row: &PgRow) -> Result<MatchRecord, StoreError> {
    let highlights: MatchHighlights = serde_json::from_value(row.get("highlights"))?;

    Ok(MatchRecord {
        id: row.get("id"),
        parent_id: row.get("parent_id"),
        child_profile_id: row.get("child_profile_id"),
        library_id: row.get("library_id"),
        match_score: row.get("match_score"),
        highlights,
        created_at: row.get("created_at"),
        child_profile: None,
        matched_entry: None,
    })
}
