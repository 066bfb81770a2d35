//! Custom extractors for Axum handlers.
//!
//! Each extractor rejects with the shared [`ErrorResponse`](crate::ErrorResponse)
//! body and a 400 status, so handlers never see malformed input.

pub mod id_path;
pub mod sharer_user;
pub mod validated_json;
pub mod validated_query;

pub use id_path::IdPath;
pub use sharer_user::{SHARER_USER_ID_HEADER, SharerUserId};
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
