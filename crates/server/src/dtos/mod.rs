pub mod property;
pub mod reservation;

use std::borrow::Cow;
use validator::ValidationError;

/// Rejects empty and whitespace-only text
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}
