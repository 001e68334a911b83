use crate::{
    AppState,
    error::ApiError,
    models::{CreateJobRequest, JobApplication, JobPage, NewJob, UpdateJobRequest, normalize_link},
    repository::{JobFilter, SortField, SortOrder},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use uuid::Uuid;

// --- Filter Structs ---

/// JobListParams
///
/// Defines the accepted query parameters for the list endpoint (GET /jobs).
/// Used by Axum's Query extractor to safely bind HTTP query parameters.
/// Everything is optional on the wire; defaults and sanitization are applied
/// in the handler so an unparseable `sortBy`/`order` can never reach the
/// repository.
#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct JobListParams {
    /// 1-based page number, defaults to 1.
    pub page: Option<i64>,
    /// Page size, defaults to 10.
    pub limit: Option<i64>,
    /// Case-insensitive substring matched against company OR position.
    pub search: Option<String>,
    /// Sort column; values outside the allow-list fall back to `createdAt`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`; anything else means `desc`.
    pub order: Option<String>,
}

// --- Handlers ---

/// list_jobs
///
/// [Gated Route] Returns one page of the filtered, sorted record set together
/// with the filtered total and the derived page count.
///
/// *Robustness*: `sortBy` and `order` are sanitized through closed enums, so
/// arbitrary field names never reach the query builder. Pagination values
/// below 1 are rejected before any query runs.
#[utoipa::path(
    get,
    path = "/jobs",
    params(JobListParams),
    responses(
        (status = 200, description = "One page of job applications", body = JobPage),
        (status = 400, description = "Invalid pagination params"),
        (status = 401, description = "Missing or invalid credential")
    )
)]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListParams>,
) -> Result<Json<JobPage>, ApiError> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(10);
    if page < 1 || limit < 1 {
        return Err(ApiError::validation("Invalid pagination params"));
    }

    let search = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let sort_by = SortField::from_param(params.sort_by.as_deref().unwrap_or("createdAt"));
    let order = SortOrder::from_param(params.order.as_deref().unwrap_or("desc"));

    let filter = JobFilter {
        search,
        sort_by,
        order,
        limit,
        offset: (page - 1).saturating_mul(limit),
    };
    let (data, total) = state.repo.list_jobs(&filter).await?;

    Ok(Json(JobPage {
        data,
        total,
        page,
        total_pages: (total as u64).div_ceil(limit as u64) as i64,
    }))
}

/// create_job
///
/// [Gated Route] Persists a new application record.
///
/// The read-only check runs before any validation: a demo instance refuses
/// even a perfectly valid payload. `company` and `position` must be present
/// and non-empty after trimming; the remaining fields receive their documented
/// defaults and the link is normalized/validated.
#[utoipa::path(
    post,
    path = "/jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 200, description = "Created", body = JobApplication),
        (status = 400, description = "Missing required fields or invalid link"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Read-only demo mode")
    )
)]
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobRequest>,
) -> Result<Json<JobApplication>, ApiError> {
    if state.config.demo_mode {
        return Err(ApiError::ReadOnly);
    }

    let company = payload.company.as_deref().map(str::trim).unwrap_or("");
    let position = payload.position.as_deref().map(str::trim).unwrap_or("");
    if company.is_empty() || position.is_empty() {
        return Err(ApiError::validation("Missing required fields"));
    }

    let link = normalize_link(payload.link.as_deref())
        .map_err(|_| ApiError::validation("Must be a valid URL"))?;

    let new = NewJob {
        company: company.to_string(),
        position: position.to_string(),
        position_type: payload.position_type.unwrap_or_default(),
        location: payload
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or("Unknown")
            .to_string(),
        link,
    };

    let job = state.repo.create_job(new).await?;
    Ok(Json(job))
}

/// update_job
///
/// [Gated Route] Applies a partial update to an existing record.
///
/// An empty payload is rejected outright (it would otherwise be an accidental
/// no-op request), supplied-but-blank required fields are rejected to keep the
/// "never empty after create" invariant, and an unknown id answers 404.
#[utoipa::path(
    patch,
    path = "/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job application ID")),
    request_body = UpdateJobRequest,
    responses(
        (status = 200, description = "Updated", body = JobApplication),
        (status = 400, description = "Empty payload or invalid field value"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Read-only demo mode"),
        (status = 404, description = "No record with this id")
    )
)]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(mut payload): Json<UpdateJobRequest>,
) -> Result<Json<JobApplication>, ApiError> {
    if state.config.demo_mode {
        return Err(ApiError::ReadOnly);
    }

    if payload.is_empty() {
        return Err(ApiError::validation("No data provided"));
    }

    // Required fields may be changed but never blanked.
    if matches!(payload.company.as_deref(), Some(c) if c.trim().is_empty())
        || matches!(payload.position.as_deref(), Some(p) if p.trim().is_empty())
    {
        return Err(ApiError::validation("Missing required fields"));
    }

    if let Some(link) = payload.link.take() {
        payload.link = Some(
            normalize_link(Some(&link)).map_err(|_| ApiError::validation("Must be a valid URL"))?,
        );
    }

    match state.repo.update_job(id, payload).await? {
        Some(job) => Ok(Json(job)),
        None => Err(ApiError::NotFound),
    }
}
