//! Lax coercions for scalar types.
//!
//! Scalar type expressions accept a little more than their exact type: numeric
//! strings for numbers, ISO strings for dates, bytes for strings and so on.
//! Each function returns the normalised value or the single mismatch it found.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::path::Location;
use crate::value::{EnumType, Value};

static INT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+(_\d+)*$").expect("integer pattern is valid"));

static FLOAT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?((\d+(_\d+)*(\.(\d+(_\d+)*)?)?)|(\.\d+(_\d+)*))([eE][+-]?\d+)?$")
        .expect("float pattern is valid")
});

static FLOAT_SPECIAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[+-]?(inf|infinity|nan)$").expect("special float pattern is valid")
});

// Timestamps above this many seconds are read as milliseconds.
const MILLISECOND_THRESHOLD: f64 = 2e10;

/// Builds a mismatch error carrying the rendered input.
pub(crate) fn mismatch(
    location: &Location,
    kind: &str,
    message: impl Into<String>,
    got: &Value,
) -> ValidationError {
    ValidationError::new(location.clone(), message)
        .with_kind(kind)
        .with_got(got.to_string())
}

fn text_of(value: &Value) -> Option<&str> {
    match value {
        Value::Str(s) => Some(s.as_str()),
        Value::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
        _ => None,
    }
}

pub(crate) fn to_none(value: &Value, location: &Location) -> Result<Value, ValidationError> {
    match value {
        Value::Null => Ok(Value::Null),
        other => Err(mismatch(
            location,
            "none_required",
            "Input should be None",
            other,
        )),
    }
}

pub(crate) fn to_bool(value: &Value, location: &Location) -> Result<Value, ValidationError> {
    let parsing = || {
        mismatch(
            location,
            "bool_parsing",
            "Input should be a valid boolean, unable to interpret input",
            value,
        )
    };

    match value {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::Int(0) => Ok(Value::Bool(false)),
        Value::Int(1) => Ok(Value::Bool(true)),
        Value::Int(_) => Err(parsing()),
        Value::Float(x) if *x == 0.0 => Ok(Value::Bool(false)),
        Value::Float(x) if *x == 1.0 => Ok(Value::Bool(true)),
        Value::Float(_) => Err(parsing()),
        Value::Str(_) | Value::Bytes(_) => {
            let text = text_of(value).ok_or_else(parsing)?;
            match text.trim().to_ascii_lowercase().as_str() {
                "0" | "off" | "f" | "false" | "n" | "no" => Ok(Value::Bool(false)),
                "1" | "on" | "t" | "true" | "y" | "yes" => Ok(Value::Bool(true)),
                _ => Err(parsing()),
            }
        }
        other => Err(mismatch(
            location,
            "bool_type",
            "Input should be a valid boolean",
            other,
        )),
    }
}

pub(crate) fn to_int(value: &Value, location: &Location) -> Result<Value, ValidationError> {
    let parsing = || {
        mismatch(
            location,
            "int_parsing",
            "Input should be a valid integer, unable to parse string as an integer",
            value,
        )
    };

    match value {
        Value::Int(i) => Ok(Value::Int(*i)),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Float(x) if !x.is_finite() => Err(mismatch(
            location,
            "finite_number",
            "Input should be a finite number",
            value,
        )),
        Value::Float(x) if x.fract() != 0.0 => Err(mismatch(
            location,
            "int_from_float",
            "Input should be a valid integer, got a number with a fractional part",
            value,
        )),
        Value::Float(x) if *x >= i64::MIN as f64 && *x < i64::MAX as f64 => {
            Ok(Value::Int(*x as i64))
        }
        Value::Float(_) => Err(mismatch(
            location,
            "int_parsing_size",
            "Input should be a valid integer, number exceeds the supported range",
            value,
        )),
        Value::Str(_) | Value::Bytes(_) => {
            let text = text_of(value).ok_or_else(parsing)?.trim();
            if !INT_PATTERN.is_match(text) {
                return Err(parsing());
            }
            text.replace('_', "").parse::<i64>().map(Value::Int).map_err(|_| {
                mismatch(
                    location,
                    "int_parsing_size",
                    "Unable to parse input string as an integer, exceeded maximum size",
                    value,
                )
            })
        }
        other => Err(mismatch(
            location,
            "int_type",
            "Input should be a valid integer",
            other,
        )),
    }
}

pub(crate) fn to_float(value: &Value, location: &Location) -> Result<Value, ValidationError> {
    let parsing = || {
        mismatch(
            location,
            "float_parsing",
            "Input should be a valid number, unable to parse string as a number",
            value,
        )
    };

    match value {
        Value::Float(x) => Ok(Value::Float(*x)),
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Str(_) | Value::Bytes(_) => {
            let text = text_of(value).ok_or_else(parsing)?.trim();
            if !FLOAT_PATTERN.is_match(text) && !FLOAT_SPECIAL.is_match(text) {
                return Err(parsing());
            }
            text.replace('_', "")
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| parsing())
        }
        other => Err(mismatch(
            location,
            "float_type",
            "Input should be a valid number",
            other,
        )),
    }
}

pub(crate) fn to_str(value: &Value, location: &Location) -> Result<Value, ValidationError> {
    match value {
        Value::Str(s) => Ok(Value::Str(s.clone())),
        Value::Bytes(bytes) => match std::str::from_utf8(bytes) {
            Ok(s) => Ok(Value::Str(s.to_string())),
            Err(_) => Err(mismatch(
                location,
                "string_unicode",
                "Input should be a valid string, unable to parse raw data as a unicode string",
                value,
            )),
        },
        Value::Enum(member) if matches!(member.value(), Value::Str(_)) => {
            Ok(member.value().clone())
        }
        other => Err(mismatch(
            location,
            "string_type",
            "Input should be a valid string",
            other,
        )),
    }
}

pub(crate) fn to_bytes(value: &Value, location: &Location) -> Result<Value, ValidationError> {
    match value {
        Value::Bytes(bytes) => Ok(Value::Bytes(bytes.clone())),
        Value::Str(s) => Ok(Value::Bytes(s.as_bytes().to_vec())),
        other => Err(mismatch(
            location,
            "bytes_type",
            "Input should be a valid bytes",
            other,
        )),
    }
}

pub(crate) fn to_date(value: &Value, location: &Location) -> Result<Value, ValidationError> {
    match value {
        Value::Date(date) => Ok(Value::Date(*date)),
        Value::DateTime(datetime) if datetime.time() == NaiveTime::MIN => {
            Ok(Value::Date(datetime.date()))
        }
        Value::DateTime(_) => Err(mismatch(
            location,
            "date_from_datetime_inexact",
            "Datetimes provided to dates should have zero time - e.g. be exact dates",
            value,
        )),
        Value::Str(_) | Value::Bytes(_) => text_of(value)
            .and_then(|text| text.trim().parse::<NaiveDate>().ok())
            .map(Value::Date)
            .ok_or_else(|| {
                mismatch(
                    location,
                    "date_parsing",
                    "Input should be a valid date in the format YYYY-MM-DD",
                    value,
                )
            }),
        other => Err(mismatch(
            location,
            "date_type",
            "Input should be a valid date",
            other,
        )),
    }
}

pub(crate) fn to_time(value: &Value, location: &Location) -> Result<Value, ValidationError> {
    match value {
        Value::Time(time) => Ok(Value::Time(*time)),
        Value::Str(_) | Value::Bytes(_) => text_of(value)
            .and_then(|text| text.trim().parse::<NaiveTime>().ok())
            .map(Value::Time)
            .ok_or_else(|| {
                mismatch(
                    location,
                    "time_parsing",
                    "Input should be in a valid time format",
                    value,
                )
            }),
        other => Err(mismatch(
            location,
            "time_type",
            "Input should be a valid time",
            other,
        )),
    }
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    text.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M").ok())
        .or_else(|| {
            text.parse::<NaiveDate>()
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

fn from_timestamp(seconds: f64) -> Option<NaiveDateTime> {
    if !seconds.is_finite() {
        return None;
    }
    let seconds = if seconds.abs() > MILLISECOND_THRESHOLD {
        seconds / 1000.0
    } else {
        seconds
    };
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round() as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999)).map(|dt| dt.naive_utc())
}

pub(crate) fn to_datetime(value: &Value, location: &Location) -> Result<Value, ValidationError> {
    let parsing = || {
        mismatch(
            location,
            "datetime_parsing",
            "Input should be a valid datetime",
            value,
        )
    };

    match value {
        Value::DateTime(datetime) => Ok(Value::DateTime(*datetime)),
        Value::Str(_) | Value::Bytes(_) => text_of(value)
            .and_then(parse_datetime)
            .map(Value::DateTime)
            .ok_or_else(parsing),
        Value::Int(seconds) => from_timestamp(*seconds as f64)
            .map(Value::DateTime)
            .ok_or_else(parsing),
        Value::Float(seconds) => from_timestamp(*seconds)
            .map(Value::DateTime)
            .ok_or_else(parsing),
        other => Err(mismatch(
            location,
            "datetime_type",
            "Input should be a valid datetime",
            other,
        )),
    }
}

pub(crate) fn to_enum(
    enum_type: &EnumType,
    value: &Value,
    location: &Location,
) -> Result<Value, ValidationError> {
    if let Value::Enum(member) = value {
        if enum_type.contains(member) {
            return Ok(value.clone());
        }
    }

    enum_type
        .from_value(value)
        .map(Value::Enum)
        .ok_or_else(|| {
            let expected = one_of(enum_type.members().map(|m| m.value().to_string()));
            mismatch(
                location,
                "enum",
                format!("Input should be {}", expected),
                value,
            )
            .with_expected(enum_type.name())
        })
}

/// Joins alternatives the way error messages list them: `a, b or c`.
pub(crate) fn one_of(items: impl IntoIterator<Item = String>) -> String {
    let items: Vec<String> = items.into_iter().collect();
    match items.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, init)) => format!("{} or {}", init.join(", "), last),
    }
}
