use crate::error::{Error, ModelResult};
use error_stack::{ResultExt, report};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::value::Value;
use tracing::debug;

/// Flattens a JSON object into `(key, value)` pairs sorted by key.
///
/// `null` entries are skipped so omitted optionals never show up as empty
/// parameters. Strings are taken verbatim, every other scalar uses its JSON
/// rendering (`true`, `42`).
///
/// # Errors
///
/// Returns `Error::ParseError` if `value` is not a JSON object.
pub fn sorted_query_pairs(value: &Value) -> ModelResult<Vec<(String, String)>> {
    let mut pairs: Vec<(String, String)> = match value {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| !matches!(v, Value::Null))
            .map(|(k, v)| {
                let value_str = match v {
                    Value::String(s) => s.to_string(),
                    _ => v.to_string(),
                };
                (k.clone(), value_str)
            })
            .collect(),
        _ => {
            return Err(report!(Error::ParseError)
                .attach_printable(format!("Invalid JSON Object: {value:?}")));
        }
    };

    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(pairs)
}

pub async fn handle_reqwest_response<T: DeserializeOwned>(response: Response) -> ModelResult<T> {
    let response_code: u16 = response.status().as_u16();
    match response_code {
        0..=399 => {
            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("")
                .to_string();

            // Json is the default when the server does not say otherwise
            if content_type.contains("application/json") || content_type.is_empty() {
                response.json().await.change_context(Error::SerdeDeserialize(
                    "Failed to deserialize JSON".to_string(),
                ))
            } else if content_type.contains("text/") {
                let text = response.text().await.change_context(Error::ReqwestError(
                    "Failed to get text from response".to_string(),
                ))?;
                serde_json::from_str(&text).change_context(Error::SerdeDeserialize(
                    "Failed to deserialize text body as JSON".to_string(),
                ))
            } else {
                Err(report!(Error::ParseError)
                    .attach_printable(format!("Unsupported Content-Type: {content_type}")))
            }
        }
        _ => {
            let error_body = response.text().await.change_context(Error::ReqwestError(
                "Failed to get text from response".to_string(),
            ))?;

            debug!(status = response_code, "Error Body: {}", &error_body);

            Err(report!(Error::ReqwestError(error_body))
                .attach_printable(format!("HTTP status {response_code}")))
        }
    }
}
