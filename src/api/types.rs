//! REST API types
//!
//! Note: web clients are loose about numeric types and may send numbers
//! as strings, so request types use flexible deserializers that accept
//! both.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a value that can be either a number or a string representation of a number
fn deserialize_flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlexibleFloat {
        Float(f64),
        Int(i64),
        Str(String),
    }

    match FlexibleFloat::deserialize(deserializer)? {
        FlexibleFloat::Float(f) => Ok(f),
        FlexibleFloat::Int(i) => Ok(i as f64),
        FlexibleFloat::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// Standard API response format
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success_with_message(message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(message.to_string()),
            data: None,
        }
    }
}

/// Empty data type for responses without data
#[derive(Debug, Clone, Serialize)]
pub struct Empty {}

/// New holding request - POST /holdings
#[derive(Debug, Clone, Deserialize)]
pub struct NewHolding {
    pub ticker: String,
    #[serde(deserialize_with = "deserialize_flexible_f64")]
    pub quantity: f64,
    #[serde(deserialize_with = "deserialize_flexible_f64")]
    pub average_price: f64,
}
