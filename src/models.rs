use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use ts_rs::TS;
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Core Application Schemas (Mapped to Database) ---

/// PositionType
///
/// Employment type of a tracked application. Stored as TEXT in the
/// `job_applications` table and serialized with the human-readable labels the
/// frontend displays ("Full Time", "Part Time", ...), which are also the wire
/// values its form submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub enum PositionType {
    #[serde(rename = "Full Time")]
    FullTime,
    #[serde(rename = "Part Time")]
    PartTime,
    Contractor,
    #[default]
    Unknown,
}

impl PositionType {
    /// The canonical TEXT representation persisted in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionType::FullTime => "Full Time",
            PositionType::PartTime => "Part Time",
            PositionType::Contractor => "Contractor",
            PositionType::Unknown => "Unknown",
        }
    }
}

impl FromStr for PositionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Full Time" => Ok(PositionType::FullTime),
            "Part Time" => Ok(PositionType::PartTime),
            "Contractor" => Ok(PositionType::Contractor),
            "Unknown" => Ok(PositionType::Unknown),
            other => Err(format!("unknown position type: {other}")),
        }
    }
}

/// JobStatus
///
/// Progress of an application through the pipeline. Stored as TEXT; new records
/// start at `Applied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub enum JobStatus {
    #[default]
    Applied,
    Interview,
    Rejected,
    Offer,
}

impl JobStatus {
    /// The canonical TEXT representation persisted in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::Interview => "Interview",
            JobStatus::Rejected => "Rejected",
            JobStatus::Offer => "Offer",
        }
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Applied" => Ok(JobStatus::Applied),
            "Interview" => Ok(JobStatus::Interview),
            "Rejected" => Ok(JobStatus::Rejected),
            "Offer" => Ok(JobStatus::Offer),
            other => Err(format!("unknown job status: {other}")),
        }
    }
}

// --- sqlx TEXT mapping for the enums ---
//
// Both enums live in plain TEXT columns, so Type/Decode delegate to &str.
// A stored value outside the enumerated set (possible only through out-of-band
// writes) decodes to the enum default instead of failing the whole row.

macro_rules! impl_text_enum {
    ($ty:ident) => {
        impl sqlx::Type<sqlx::Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <&str as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <&str as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $ty {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
                Ok(s.parse().unwrap_or_default())
            }
        }
    };
}

impl_text_enum!(PositionType);
impl_text_enum!(JobStatus);

/// JobApplication
///
/// One tracked application record from the `job_applications` table. This is the
/// primary data structure for the core business logic and the shape every
/// endpoint returns.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct JobApplication {
    // Primary key, generated server-side on create and immutable afterwards.
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub position_type: PositionType,
    pub location: String,

    // Optional: the day the user actually applied, distinct from created_at.
    #[ts(type = "string | null")]
    pub date_applied: Option<NaiveDate>,

    // Job-posting URL. Empty string means "no link"; non-empty values are
    // normalized and validated on the way in (see `normalize_link`).
    pub link: String,

    pub status: JobStatus,

    // Timestamp handling for database integration and JSON serialization.
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// --- Request Payloads (Input Schemas) ---

/// CreateJobRequest
///
/// Input payload for submitting a new application (POST /jobs).
///
/// `company` and `position` are `Option` so that a missing key produces the
/// contract's 400 validation error rather than a deserialization rejection;
/// the handler enforces presence and non-emptiness.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateJobRequest {
    pub company: Option<String>,
    pub position: Option<String>,
    pub position_type: Option<PositionType>,
    pub location: Option<String>,
    pub link: Option<String>,
}

/// UpdateJobRequest
///
/// Partial update payload for modifying an existing application (PATCH /jobs/{id}).
///
/// Uses `Option<T>` for all fields and `#[serde(skip_serializing_if = "Option::is_none")]`
/// to handle partial updates, ensuring only provided fields are included in the JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateJobRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_type: Option<PositionType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub date_applied: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

impl UpdateJobRequest {
    /// True when no field was supplied at all. The contract rejects such
    /// payloads instead of treating them as a no-op update.
    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.position.is_none()
            && self.position_type.is_none()
            && self.location.is_none()
            && self.date_applied.is_none()
            && self.link.is_none()
            && self.status.is_none()
    }
}

/// NewJob
///
/// The validated, fully-defaulted insert payload handed to the repository.
/// Built by the create handler after required-field checks, so the persistence
/// layer never sees partial input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub company: String,
    pub position: String,
    pub position_type: PositionType,
    pub location: String,
    pub link: String,
}

/// --- Response Envelopes (Output) ---

/// JobPage
///
/// Output schema of the list endpoint: one page of records plus the filtered
/// total and the derived page count (`totalPages = ceil(total / limit)`).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct JobPage {
    pub data: Vec<JobApplication>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

/// normalize_link
///
/// Canonicalizes the user-supplied posting link:
/// - absent or blank input becomes the empty string (a link is optional),
/// - values without an explicit http(s) scheme get `https://` prefixed,
/// - the result must parse as a URL or the value is rejected.
pub fn normalize_link(raw: Option<&str>) -> Result<String, url::ParseError> {
    let trimmed = match raw {
        Some(v) => v.trim(),
        None => return Ok(String::new()),
    };
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    let lowered = trimmed.to_ascii_lowercase();
    let candidate = if lowered.starts_with("http://") || lowered.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    Url::parse(&candidate)?;
    Ok(candidate)
}
