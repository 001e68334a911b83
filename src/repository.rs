use crate::models::{JobApplication, JobStatus, NewJob, UpdateJobRequest};
use async_trait::async_trait;
use sqlx::{PgPool, query_builder::QueryBuilder};
use std::sync::Arc;
use uuid::Uuid;

/// SortField
///
/// Closed allow-list of sortable columns. Every incoming `sortBy` value is
/// funneled through `from_param`, so user input can never name an arbitrary
/// column in the generated SQL; anything unrecognized falls back to the
/// creation timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Company,
    Position,
    PositionType,
    Location,
    DateApplied,
    CreatedAt,
    Status,
}

impl SortField {
    /// Maps the query-string value onto the allow-list. Unknown values fall
    /// back to `createdAt` silently rather than erroring.
    pub fn from_param(param: &str) -> Self {
        match param {
            "company" => SortField::Company,
            "position" => SortField::Position,
            "positionType" => SortField::PositionType,
            "location" => SortField::Location,
            "dateApplied" => SortField::DateApplied,
            "createdAt" => SortField::CreatedAt,
            "status" => SortField::Status,
            _ => SortField::CreatedAt,
        }
    }

    /// The ORDER BY expression for this field. The free-text columns sort on
    /// their lower-cased value so ordering is case-insensitive regardless of
    /// the database collation, and exact across pages.
    pub fn order_expr(&self) -> &'static str {
        match self {
            SortField::Company => "LOWER(company)",
            SortField::Position => "LOWER(position)",
            SortField::Location => "LOWER(location)",
            SortField::PositionType => "position_type",
            SortField::DateApplied => "date_applied",
            SortField::CreatedAt => "created_at",
            SortField::Status => "status",
        }
    }
}

/// SortOrder
///
/// Requested direction; anything other than `asc` means `desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_param(param: &str) -> Self {
        match param {
            "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// JobFilter
///
/// The sanitized list query handed to the repository: free-text search (already
/// trimmed, never empty), validated sort selection, and offset paging derived
/// from `(page, limit)` by the handler.
#[derive(Debug, Clone, PartialEq)]
pub struct JobFilter {
    pub search: Option<String>,
    pub sort_by: SortField,
    pub order: SortOrder,
    pub limit: i64,
    pub offset: i64,
}

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations, allowing the
/// handlers to interact with the data layer without knowing the specific
/// implementation (Postgres, in-memory, mock).
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn JobRepository>`) safely shareable across Axum's asynchronous task
/// boundaries.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Fetches one page of records matching the filter plus the filtered total
    /// count (not the page length, not the global count).
    async fn list_jobs(&self, filter: &JobFilter)
    -> Result<(Vec<JobApplication>, i64), sqlx::Error>;

    /// Persists a new record and returns it with its server-generated id and
    /// creation timestamp.
    async fn create_job(&self, new: NewJob) -> Result<JobApplication, sqlx::Error>;

    /// Applies exactly the supplied fields to an existing record. Returns
    /// `None` when no record has the given id.
    async fn update_job(
        &self,
        id: Uuid,
        changes: UpdateJobRequest,
    ) -> Result<Option<JobApplication>, sqlx::Error>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer access across the application state.
pub type RepositoryState = Arc<dyn JobRepository>;

/// PostgresJobRepository
///
/// The concrete implementation of the `JobRepository` trait, backed by the
/// PostgreSQL database.
pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const JOB_COLUMNS: &str =
    "id, company, position, position_type, location, date_applied, link, status, created_at";

/// Appends the case-insensitive substring filter over company OR position.
/// Bound parameters only, never interpolated text.
fn push_search(builder: &mut QueryBuilder<'_, sqlx::Postgres>, search: &str) {
    let pattern = format!("%{}%", search);
    builder.push(" WHERE (company ILIKE ");
    builder.push_bind(pattern.clone());
    builder.push(" OR position ILIKE ");
    builder.push_bind(pattern);
    builder.push(")");
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    /// list_jobs
    ///
    /// Two queries per call: the filtered COUNT that feeds `totalPages`, then
    /// the page itself. The ORDER BY expression comes from the `SortField`
    /// allow-list, so only the LIMIT/OFFSET/search values are bound from user
    /// input.
    async fn list_jobs(
        &self,
        filter: &JobFilter,
    ) -> Result<(Vec<JobApplication>, i64), sqlx::Error> {
        let mut count_builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM job_applications");
        if let Some(search) = &filter.search {
            push_search(&mut count_builder, search);
        }
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM job_applications", JOB_COLUMNS));
        if let Some(search) = &filter.search {
            push_search(&mut builder, search);
        }
        builder.push(" ORDER BY ");
        builder.push(filter.sort_by.order_expr());
        builder.push(" ");
        builder.push(filter.order.as_sql());
        builder.push(" LIMIT ");
        builder.push_bind(filter.limit);
        builder.push(" OFFSET ");
        builder.push_bind(filter.offset);

        let jobs = builder
            .build_query_as::<JobApplication>()
            .fetch_all(&self.pool)
            .await?;

        Ok((jobs, total))
    }

    /// create_job
    ///
    /// Inserts a fully-defaulted record. The id is generated here and the
    /// database stamps `created_at`; both are immutable afterwards.
    async fn create_job(&self, new: NewJob) -> Result<JobApplication, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, JobApplication>(
            r#"
            INSERT INTO job_applications (id, company, position, position_type, location, link, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            RETURNING id, company, position, position_type, location, date_applied, link, status, created_at
            "#,
        )
        .bind(id)
        .bind(&new.company)
        .bind(&new.position)
        .bind(new.position_type.as_str())
        .bind(&new.location)
        .bind(&new.link)
        .bind(JobStatus::default().as_str())
        .fetch_one(&self.pool)
        .await
    }

    /// update_job
    ///
    /// Uses the PostgreSQL `COALESCE` function to handle `Option<T>` fields,
    /// only updating a column if the corresponding field in `changes` is `Some`.
    /// `fetch_optional` distinguishes an unknown id (no row) from a store failure.
    async fn update_job(
        &self,
        id: Uuid,
        changes: UpdateJobRequest,
    ) -> Result<Option<JobApplication>, sqlx::Error> {
        sqlx::query_as::<_, JobApplication>(
            r#"
            UPDATE job_applications
            SET company = COALESCE($2, company),
                position = COALESCE($3, position),
                position_type = COALESCE($4, position_type),
                location = COALESCE($5, location),
                date_applied = COALESCE($6, date_applied),
                link = COALESCE($7, link),
                status = COALESCE($8, status)
            WHERE id = $1
            RETURNING id, company, position, position_type, location, date_applied, link, status, created_at
            "#,
        )
        .bind(id)
        .bind(changes.company.as_deref())
        .bind(changes.position.as_deref())
        .bind(changes.position_type.map(|p| p.as_str()))
        .bind(changes.location.as_deref())
        .bind(changes.date_applied)
        .bind(changes.link.as_deref())
        .bind(changes.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await
    }
}
