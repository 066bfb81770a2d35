//! HTTP routers of the sharing domain, one per resource.
//!
//! Each router is mounted by the server under its own prefix:
//! `/items`, `/bookings` and `/requests`.

pub mod bookings;
pub mod items;
pub mod requests;
