use jobtrack::models::{
    JobApplication, JobPage, JobStatus, PositionType, UpdateJobRequest, normalize_link,
};
use jobtrack::repository::{SortField, SortOrder};

// --- JSON wire format ---
//
// The camelCase keys and the enum labels are the compatibility contract with
// the existing TypeScript frontend; these tests pin them down.

#[test]
fn test_job_application_serializes_camel_case_keys() {
    let json = serde_json::to_value(JobApplication::default()).unwrap();
    let obj = json.as_object().unwrap();

    for key in [
        "id",
        "company",
        "position",
        "positionType",
        "location",
        "dateApplied",
        "link",
        "status",
        "createdAt",
    ] {
        assert!(obj.contains_key(key), "missing wire key {key}");
    }
    assert!(!obj.contains_key("position_type"));
    assert!(!obj.contains_key("created_at"));
}

#[test]
fn test_position_type_wire_labels() {
    assert_eq!(
        serde_json::to_string(&PositionType::FullTime).unwrap(),
        r#""Full Time""#
    );
    assert_eq!(
        serde_json::to_string(&PositionType::PartTime).unwrap(),
        r#""Part Time""#
    );
    assert_eq!(
        serde_json::from_str::<PositionType>(r#""Contractor""#).unwrap(),
        PositionType::Contractor
    );
    // Round-trip through the persisted TEXT representation.
    assert_eq!(
        "Full Time".parse::<PositionType>().unwrap(),
        PositionType::FullTime
    );
    assert!("full-time".parse::<PositionType>().is_err());
}

#[test]
fn test_job_status_defaults_and_labels() {
    assert_eq!(JobStatus::default(), JobStatus::Applied);
    assert_eq!(
        serde_json::from_str::<JobStatus>(r#""Offer""#).unwrap(),
        JobStatus::Offer
    );
    assert_eq!(JobStatus::Interview.as_str(), "Interview");
}

#[test]
fn test_update_request_optionality() {
    // Confirms the structure supports partial updates (all fields are Option<T>)
    let partial_update = UpdateJobRequest {
        status: Some(JobStatus::Offer),
        ..UpdateJobRequest::default()
    };

    let json_output = serde_json::to_string(&partial_update).unwrap();
    assert!(json_output.contains(r#""status":"Offer""#));
    // None fields are omitted entirely.
    assert!(!json_output.contains("company"));
    assert!(!json_output.contains("dateApplied"));

    assert!(!partial_update.is_empty());
    assert!(UpdateJobRequest::default().is_empty());
}

#[test]
fn test_job_page_serializes_total_pages_key() {
    let page = JobPage {
        data: vec![],
        total: 25,
        page: 1,
        total_pages: 3,
    };
    let json_output = serde_json::to_string(&page).unwrap();
    assert!(json_output.contains(r#""totalPages":3"#));
    assert!(!json_output.contains("total_pages"));
}

// --- Sort sanitization ---

#[test]
fn test_sort_field_allow_list() {
    assert_eq!(SortField::from_param("company"), SortField::Company);
    assert_eq!(SortField::from_param("dateApplied"), SortField::DateApplied);
    assert_eq!(SortField::from_param("status"), SortField::Status);

    // Anything outside the allow-list falls back silently.
    assert_eq!(SortField::from_param("password"), SortField::CreatedAt);
    assert_eq!(
        SortField::from_param("company; DROP TABLE job_applications"),
        SortField::CreatedAt
    );
    assert_eq!(SortField::from_param(""), SortField::CreatedAt);
}

#[test]
fn test_sort_order_defaults_to_desc() {
    assert_eq!(SortOrder::from_param("asc"), SortOrder::Asc);
    assert_eq!(SortOrder::from_param("desc"), SortOrder::Desc);
    // Exact match only: anything else means desc.
    assert_eq!(SortOrder::from_param("ASC"), SortOrder::Desc);
    assert_eq!(SortOrder::from_param("up"), SortOrder::Desc);
}

#[test]
fn test_string_sort_fields_compare_lowercased() {
    assert_eq!(SortField::Company.order_expr(), "LOWER(company)");
    assert_eq!(SortField::Position.order_expr(), "LOWER(position)");
    assert_eq!(SortField::Location.order_expr(), "LOWER(location)");
    assert_eq!(SortField::CreatedAt.order_expr(), "created_at");
}

// --- Link normalization ---

#[test]
fn test_normalize_link_blank_values() {
    assert_eq!(normalize_link(None).unwrap(), "");
    assert_eq!(normalize_link(Some("")).unwrap(), "");
    assert_eq!(normalize_link(Some("   ")).unwrap(), "");
}

#[test]
fn test_normalize_link_defaults_scheme() {
    assert_eq!(
        normalize_link(Some("example.com/careers")).unwrap(),
        "https://example.com/careers"
    );
    // An explicit scheme is kept as typed, matched case-insensitively.
    assert_eq!(
        normalize_link(Some("http://example.com")).unwrap(),
        "http://example.com"
    );
    assert_eq!(
        normalize_link(Some("HTTPS://Example.com/x")).unwrap(),
        "HTTPS://Example.com/x"
    );
}

#[test]
fn test_normalize_link_trims_whitespace() {
    assert_eq!(
        normalize_link(Some("  example.com  ")).unwrap(),
        "https://example.com"
    );
}

#[test]
fn test_normalize_link_rejects_garbage() {
    assert!(normalize_link(Some("not a url")).is_err());
    assert!(normalize_link(Some("https://not a url")).is_err());
}
