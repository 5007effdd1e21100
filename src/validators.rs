use validator::ValidationError;

/// Rejects strings that are empty once surrounding whitespace is trimmed.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}
