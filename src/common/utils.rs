// src/common/utils.rs
use crate::common::MarketDataError;
use chrono::{DateTime, Datelike, Local, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// Epochs whose written form is at most this long are seconds, longer ones milliseconds
const EPOCH_SECONDS_MAX_LEN: usize = 11;

// Convert an epoch timestamp (seconds or milliseconds) to local time.
// The unit is picked from the length of the shortest decimal form of `value`,
// sign and fraction included: 1700000000 is seconds, 1700000000.75 is milliseconds.
pub fn epoch_to_time(value: f64) -> Option<DateTime<Local>> {
    if !value.is_finite() {
        return None;
    }

    let millis = if value.to_string().len() <= EPOCH_SECONDS_MAX_LEN {
        value * 1000.0
    } else {
        value
    };

    if millis.abs() >= i64::MAX as f64 {
        return None;
    }

    DateTime::<Utc>::from_timestamp_millis(millis.round() as i64)
        .map(|time| time.with_timezone(&Local))
}

// Inverse of epoch_to_time, in whole seconds truncated toward zero
pub fn time_to_epoch_seconds<Tz: TimeZone>(time: &DateTime<Tz>) -> i64 {
    time.timestamp_millis() / 1000
}

// Parse an RFC 3339 timestamp ("2021-11-10T14:24:11.849Z") to local time
pub fn parse_api_datetime(value: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|time| time.with_timezone(&Local))
}

// "d-m-yyyy", no zero padding: the date format of the /history endpoint
pub fn format_history_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    format!("{}-{}-{}", date.day(), date.month(), date.year())
}

pub fn clamp_to_now(date: DateTime<Local>) -> DateTime<Local> {
    date.min(Local::now())
}

// CoinGecko ids and currency codes are lowercase
pub fn normalize_id(value: &str) -> String {
    value.trim().to_lowercase()
}

// Normalize an id, rejecting empty ones
pub fn require_id(value: &str, field_name: &str) -> Result<String, MarketDataError> {
    let id = normalize_id(value);
    if id.is_empty() {
        return Err(MarketDataError::InvalidArgument(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    Ok(id)
}

// Numbers arrive as JSON numbers or as numeric strings ("1234.5"); anything else is no value
pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

pub fn value_to_u32(value: &Value) -> Option<u32> {
    value_to_f64(value)
        .filter(|v| *v >= 0.0 && *v <= u32::MAX as f64 && v.fract() == 0.0)
        .map(|v| v as u32)
}

pub fn value_to_time(value: &Value) -> Option<DateTime<Local>> {
    match value {
        Value::String(text) => {
            parse_api_datetime(text).or_else(|| value_to_f64(value).and_then(epoch_to_time))
        }
        Value::Number(_) => value_to_f64(value).and_then(epoch_to_time),
        _ => None,
    }
}

// serde helpers: a missing, null or malformed field decodes to None instead of failing the payload

pub fn de_opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_f64))
}

pub fn de_opt_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_u32))
}

pub fn de_opt_time<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Local>>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_time))
}

pub fn de_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}
