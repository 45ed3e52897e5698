//! Business rules over the persisted records: uniqueness checks, soft-delete
//! cascades, status transitions and caller-scoped projections. Handlers do
//! authorization and marshaling only; everything else happens here.

pub mod confirmation_tokens;
pub mod projects;
pub mod roles;
pub mod tasks;
pub mod users;

use uuid::Uuid;

/// Audit actor recorded on writes performed outside an authenticated
/// request (registration, confirmation).
pub const SYSTEM_ACTOR: Uuid = Uuid::nil();
