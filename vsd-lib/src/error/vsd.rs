//! VSD-specific error body

use serde::Deserialize;

/// Structured error body returned by the VSD API on failed requests.
///
/// ```json
/// {
///   "errors": [{
///     "property": "name",
///     "descriptions": [{ "title": "Invalid input", "description": "Name is required" }]
///   }],
///   "internalErrorCode": 2510
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VsdErrorDetail {
    /// Per-property errors.
    #[serde(default)]
    pub errors: Vec<VsdPropertyError>,
    /// VSD internal error code, if reported.
    #[serde(default)]
    pub internal_error_code: Option<i64>,
}

/// Errors reported against a single property.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VsdPropertyError {
    /// The property the error refers to (may be empty).
    #[serde(default)]
    pub property: String,
    /// Human-readable descriptions.
    #[serde(default)]
    pub descriptions: Vec<VsdErrorDescription>,
}

/// A single error description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VsdErrorDescription {
    /// Short title.
    #[serde(default)]
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
}

impl VsdErrorDetail {
    /// Returns the first description in the body, if any.
    pub fn first_description(&self) -> Option<&VsdErrorDescription> {
        self.errors.iter().flat_map(|e| e.descriptions.iter()).next()
    }
}

impl std::fmt::Display for VsdErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let description = self
            .first_description()
            .map(|d| {
                if d.description.is_empty() {
                    d.title.as_str()
                } else {
                    d.description.as_str()
                }
            })
            .unwrap_or("unknown error");

        match self.internal_error_code {
            Some(code) => write!(f, "[{}] {}", code, description),
            None => write!(f, "{}", description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_body() {
        let detail: VsdErrorDetail = serde_json::from_str(
            r#"{"errors":[{"property":"name","descriptions":[{"title":"Invalid input","description":"Name is required"}]}],"internalErrorCode":2510}"#,
        )
        .unwrap();

        assert_eq!(detail.errors[0].property, "name");
        assert_eq!(detail.to_string(), "[2510] Name is required");
    }

    #[test]
    fn test_display_falls_back_to_title() {
        let body = r#"{"errors":[{"descriptions":[{"title":"Forbidden"}]}]}"#;
        let detail: VsdErrorDetail = serde_json::from_str(body).unwrap();
        assert_eq!(detail.to_string(), "Forbidden");
    }

    #[test]
    fn test_display_empty_body() {
        assert_eq!(VsdErrorDetail::default().to_string(), "unknown error");
    }
}
