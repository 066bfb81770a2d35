//! Sharing Domain
//!
//! Items, bookings, comments and item requests of ShareIt.
//!
//! ```text
//! handlers::{items, bookings, requests}
//!        → ItemService / BookingService / ItemRequestService
//!        → Repositories (InMemory* / Pg*)
//! ```
//!
//! Users come from `domain_users`; [`Repositories`] carries a handle to the
//! same user store the users router writes to.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_sharing::{handlers, ItemService, Repositories};
//!
//! let repos = Repositories::in_memory();
//! let router = handlers::items::router(ItemService::new(repos));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

mod repositories;

pub use error::{SharingError, SharingResult};
pub use models::*;
pub use repositories::Repositories;
pub use repository::{
    BookingFilter, BookingRepository, CommentRepository, ItemRepository, ItemRequestRepository,
};
pub use service::{BookingService, ItemRequestService, ItemService};
