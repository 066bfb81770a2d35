//! Field validators shared by request DTOs.

use validator::ValidationError;

/// Rejects strings that are empty or only whitespace.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateItem {
///     #[validate(custom(function = "axum_helpers::validation::not_blank"))]
///     name: String,
/// }
/// ```
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}
