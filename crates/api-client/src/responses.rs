use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Message used when an error response carries no `message` of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

/// A successful collection read. The backend wraps lists as `{"data": [...]}`;
/// a bare array is accepted as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CollectionResponse<T> {
    Bare(Vec<T>),
    Envelope { data: Option<Vec<T>> },
}

/// The body of a non-2xx answer.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub message: Option<String>,
}

/// Parses a collection body. A missing or null `data` is an empty collection.
pub fn parse_collection<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, ApiError> {
    let response: CollectionResponse<T> =
        serde_json::from_str(text).map_err(|e| ApiError::Deserialization(e.to_string()))?;

    Ok(match response {
        CollectionResponse::Bare(items) => items,
        CollectionResponse::Envelope { data } => data.unwrap_or_default(),
    })
}

/// Extracts the human-readable message of an error body.
pub fn error_message(text: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(text)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{RawEmployee, RawSalaryPayment, RawSale};

    #[test]
    fn unwraps_the_data_envelope() {
        let employees: Vec<RawEmployee> =
            parse_collection(r#"{"data": [{"_id": "E1", "name": "A"}], "count": 1}"#).unwrap();

        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].normalize().unwrap().id, "E1");
    }

    #[test]
    fn missing_or_null_data_is_empty() {
        assert!(parse_collection::<RawEmployee>(r#"{"success": true}"#).unwrap().is_empty());
        assert!(parse_collection::<RawEmployee>(r#"{"data": null}"#).unwrap().is_empty());
    }

    #[test]
    fn parses_every_backend_collection() {
        let sales: Vec<RawSale> = parse_collection(
            r#"{"data": [{"_id": "S1", "employees": ["E1"], "treesHarvested": [12], "totalAmount": 600}]}"#,
        )
        .unwrap();
        let salaries: Vec<RawSalaryPayment> =
            parse_collection(r#"{"data": [{"employee": {"_id": "E1"}, "amount": "250"}]}"#).unwrap();

        assert_eq!(sales[0].normalize().trees_harvested, vec![12]);
        assert_eq!(salaries[0].normalize().employee.as_deref(), Some("E1"));
    }

    #[test]
    fn accepts_a_bare_array() {
        let employees: Vec<RawEmployee> = parse_collection(r#"[{"id": "E1"}, {"id": "E2"}]"#).unwrap();
        assert_eq!(employees.len(), 2);
    }

    #[test]
    fn malformed_body_is_a_deserialization_error() {
        assert!(matches!(
            parse_collection::<RawEmployee>("<html>502</html>"),
            Err(ApiError::Deserialization(_))
        ));
    }

    #[test]
    fn error_message_falls_back_when_absent() {
        assert_eq!(error_message(r#"{"message": "Employee not found"}"#), "Employee not found");
        assert_eq!(error_message(r#"{"error": true}"#), FALLBACK_ERROR_MESSAGE);
        assert_eq!(error_message("Bad Gateway"), FALLBACK_ERROR_MESSAGE);
    }
}
