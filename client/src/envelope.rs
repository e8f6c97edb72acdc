// client/src/envelope.rs

use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

/// The backend wraps every body in `{ data, success, message, messages, ex }`.
/// Callers never inspect `success` by convention; `into_result` turns the
/// envelope into a tagged result at the boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub data: Option<T>,
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub ex: Option<Value>,
}

impl<T> Envelope<T> {
    /// `success: false` becomes `ApiError::Rejected` regardless of the
    /// transport status the envelope arrived with.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(self.rejection());
        }
        self.data
            .ok_or_else(|| ApiError::Decode("successful envelope with no data".to_string()))
    }

    /// For endpoints whose payload is irrelevant (deletes).
    pub fn into_ack(self) -> Result<(), ApiError> {
        if self.success { Ok(()) } else { Err(self.rejection()) }
    }

    /// For lookups where a rejected envelope means "nothing recorded yet"
    /// rather than a failure (vitals, history, consultation sub-fetches).
    pub fn into_optional(self) -> Result<Option<T>, ApiError> {
        if self.success { Ok(self.data) } else { Ok(None) }
    }

    fn rejection(self) -> ApiError {
        ApiError::Rejected {
            message: self
                .message
                .or_else(|| {
                    self.ex
                        .as_ref()
                        .and_then(|v| v.as_str().map(str::to_string))
                })
                .unwrap_or_else(|| "request rejected".to_string()),
            details: self.messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_yields_data() {
        let env: Envelope<Vec<i32>> =
            serde_json::from_str(r#"{"data":[1,2],"success":true,"message":"ok","messages":[],"ex":null}"#)
                .unwrap();
        assert_eq!(env.into_result().unwrap(), vec![1, 2]);
    }

    #[test]
    fn rejected_envelope_maps_to_error_with_message() {
        let env: Envelope<Vec<i32>> = serde_json::from_str(
            r#"{"data":null,"success":false,"message":"patient not found","messages":["id 9"],"ex":null}"#,
        )
        .unwrap();
        match env.into_result() {
            Err(ApiError::Rejected { message, details }) => {
                assert_eq!(message, "patient not found");
                assert_eq!(details, vec!["id 9".to_string()]);
            }
            other => panic!("expected Rejected, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn rejected_lookup_reads_as_absent() {
        let env: Envelope<i32> =
            serde_json::from_str(r#"{"data":null,"success":false,"message":"none","messages":[]}"#)
                .unwrap();
        assert_eq!(env.into_optional().unwrap(), None);
    }

    #[test]
    fn ack_ignores_missing_data() {
        let env: Envelope<Value> =
            serde_json::from_str(r#"{"data":null,"success":true,"message":null,"messages":[]}"#)
                .unwrap();
        assert!(env.into_ack().is_ok());
    }

    #[test]
    fn sparse_envelope_still_deserializes() {
        let env: Envelope<i32> = serde_json::from_str(r#"{"success":true,"data":5}"#).unwrap();
        assert_eq!(env.into_result().unwrap(), 5);
    }
}
