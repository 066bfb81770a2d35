use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::error::{SharingError, SharingResult};

/// Page size used when only `from` is supplied
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// `from`/`size` query parameters shared by paginated list endpoints
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Index of the first element; rounded down to a page boundary
    #[validate(range(min = 0))]
    pub from: Option<i64>,
    /// Number of elements per page
    #[validate(range(min = 1))]
    pub size: Option<i64>,
}

/// Resolved offset/limit window.
///
/// The window always starts on a page boundary: `from = 7, size = 5` yields
/// the second page, `offset = 5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Page {
    pub fn new(from: i64, size: i64) -> SharingResult<Self> {
        if from < 0 {
            return Err(SharingError::Validation(format!(
                "from must not be negative, got {from}"
            )));
        }
        if size < 1 {
            return Err(SharingError::Validation(format!(
                "size must be positive, got {size}"
            )));
        }

        let (from, size) = (from as u64, size as u64);
        Ok(Self {
            offset: (from / size) * size,
            limit: size,
        })
    }

    /// `None` when neither bound was given, meaning "everything".
    pub fn optional(query: PageQuery) -> SharingResult<Option<Self>> {
        match (query.from, query.size) {
            (None, None) => Ok(None),
            (from, size) => Self::new(
                from.unwrap_or(0),
                size.unwrap_or(DEFAULT_PAGE_SIZE as i64),
            )
            .map(Some),
        }
    }

    /// Always paginated; missing bounds fall back to the first page of ten.
    pub fn with_defaults(query: PageQuery) -> SharingResult<Self> {
        Self::new(
            query.from.unwrap_or(0),
            query.size.unwrap_or(DEFAULT_PAGE_SIZE as i64),
        )
    }

    /// Slice an already ordered collection.
    pub fn apply<T>(&self, rows: Vec<T>) -> Vec<T> {
        rows.into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }
}
