use tutorhub_core::DomainError;

/// Trim `name` and require at least `min_chars` characters.
pub fn require_name(name: &str, min_chars: usize) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("name is required"));
    }
    if trimmed.chars().count() < min_chars {
        return Err(DomainError::validation(format!(
            "name must be at least {min_chars} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Empty or whitespace-only text becomes `None`.
pub fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
