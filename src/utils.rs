/// Utility functions
use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Serializer;
use serde_json::Value;

/// Extract number from JSON value
pub fn num(v: &Value) -> Option<f64> {
    if let Some(x) = v.as_f64() {
        return Some(x);
    }
    if let Some(s) = v.as_str() {
        return s.parse::<f64>().ok();
    }
    None
}

/// Pick string value from JSON by trying multiple keys
pub fn s_pick(v: &Value, keys: &[&str]) -> Option<String> {
    for k in keys {
        if let Some(x) = v.get(*k) {
            if let Some(s) = x.as_str() {
                if !s.is_empty() {
                    return Some(s.to_string());
                }
            } else if x.is_number() {
                return Some(x.to_string());
            }
        }
    }
    None
}

/// Pick boolean value from JSON by trying multiple keys
pub fn b_pick(v: &Value, keys: &[&str]) -> Option<bool> {
    for k in keys {
        match v.get(*k) {
            Some(Value::Bool(b)) => return Some(*b),
            Some(Value::String(s)) => match s.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => return Some(true),
                "false" | "0" | "no" => return Some(false),
                _ => {}
            },
            Some(x) if x.is_number() => return num(x).map(|n| n != 0.0),
            _ => {}
        }
    }
    None
}

/// Pick timestamp value from JSON by trying multiple keys
pub fn t_pick(v: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    for k in keys {
        if let Some(x) = v.get(*k) {
            if let Some(s) = x.as_str() {
                if let Ok(dt) = s.parse::<DateTime<Utc>>() {
                    return Some(dt);
                }
                if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                    return Some(Utc.from_utc_datetime(&ndt));
                }
            } else if let Some(n) = x.as_i64() {
                return Utc.timestamp_opt(n, 0).single();
            }
        }
    }
    None
}

/// Fold an angle into [0, 360)
pub fn normalize_degrees(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

/// Fold an angle into [-180, 180)
pub fn wrap_degrees_180(deg: f64) -> f64 {
    normalize_degrees(deg + 180.0) - 180.0
}

/// Fold fractional hours into [0, 24)
pub fn normalize_hours(hours: f64) -> f64 {
    let h = hours.rem_euclid(24.0);
    if h >= 24.0 {
        0.0
    } else {
        h
    }
}

/// Clock time for fractional hours, rounded to the nearest second
pub fn hours_to_time(hours: f64) -> NaiveTime {
    let secs = (normalize_hours(hours) * 3600.0).round() as i64 % 86_400;
    NaiveTime::MIN + chrono::Duration::seconds(secs)
}

/// 12-hour clock string such as `5:34 AM`
pub fn format_clock_12h(time: &NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Serde helper writing optional clock times in 12-hour form, `null` when absent
pub fn serialize_clock_12h<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match time {
        Some(t) => serializer.serialize_str(&format_clock_12h(t)),
        None => serializer.serialize_none(),
    }
}
