/// Router Module Index
///
/// Organizes the application's routing logic by access level, so the Access
/// Gate is applied explicitly at the module boundary (via an Axum layer in
/// `create_router`) instead of being re-checked inside individual handlers.

/// Routes reachable without a credential in every configuration
/// (monitoring probes).
pub mod public;

/// The job-application surface. The whole module sits behind the
/// `access_gate` middleware; mutating handlers additionally enforce the
/// read-only demo switch.
pub mod jobs;
