//! Field validation shared by the subcommands and the interactive form.

/// Accepts any value that is not blank after trimming.
///
/// The value itself is returned unchanged; the query builders pass names
/// through as typed.
///
/// # Errors
///
/// Returns a message if `value` is empty or whitespace only.
pub fn non_blank(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("this field is required".to_string());
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank() {
        assert!(non_blank("").is_err());
        assert!(non_blank("   \t").is_err());
    }

    #[test]
    fn keeps_value_as_typed() {
        assert_eq!(non_blank(" Broadway ").unwrap(), " Broadway ");
    }
}
