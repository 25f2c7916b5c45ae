//! Field checks shared by the request bodies.

use crate::Error;

/// Trim `name` and reject it if nothing is left.
///
/// # Errors
/// Returns [Error::Validation] on a missing or blank name.
pub fn required_name(name: Option<&str>) -> Result<String, Error> {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_owned()),
        _ => Err(Error::validation("name", "Name is required")),
    }
}

/// Trim an optional free text field, treating blank text as absent.
pub fn optional_text(text: Option<String>) -> Option<String> {
    text.map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// Unwrap a required field.
///
/// # Errors
/// Returns [Error::Validation] naming `path` if `value` is `None`.
pub fn required<T>(value: Option<T>, path: &str) -> Result<T, Error> {
    value.ok_or_else(|| Error::validation(path, &format!("{path} is required")))
}

#[cfg(test)]
mod tests {
    use super::{optional_text, required, required_name};

    #[test]
    fn name_is_trimmed() {
        assert_eq!(required_name(Some("  Bank ")), Ok("Bank".to_owned()));
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(required_name(Some(" \t")).is_err());
        assert!(required_name(None).is_err());
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(optional_text(Some("   ".to_owned())), None);
        assert_eq!(
            optional_text(Some(" Netflix ".to_owned())),
            Some("Netflix".to_owned())
        );
    }

    #[test]
    fn missing_required_value_names_the_path() {
        let error = required::<i64>(None, "entries.0.categoryId").unwrap_err();

        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value["issues"][0]["path"], "entries.0.categoryId");
    }
}
