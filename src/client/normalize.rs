//! 日期字段归一化
//!
//! 服务端返回的日期是 ISO 字符串，但旧数据可能只有日期部分或缺少时区。
//! 解码为强类型之前统一改写成 RFC 3339（时间字段）或 `YYYY-MM-DD`（日期字段）。

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// 宽松解析时间：RFC 3339、无时区的日期时间（按 UTC）、纯日期（当天 0 点）
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// 宽松解析日期，带时间部分时取日期
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .or_else(|| parse_datetime(raw).map(|dt| dt.date_naive()))
}

fn rewrite(item: &mut Value, field: &str, convert: impl Fn(&str) -> Option<String>) {
    if let Some(slot) = item.get_mut(field)
        && let Some(converted) = slot.as_str().and_then(&convert)
    {
        *slot = Value::String(converted);
    }
}

/// 把 `fields` 中的时间字段改写为 RFC 3339，无法解析的保持原样
pub fn normalize_datetimes(item: &mut Value, fields: &[&str]) {
    for field in fields {
        rewrite(item, field, |raw| parse_datetime(raw).map(|dt| dt.to_rfc3339()));
    }
}

pub fn normalize_dates(item: &mut Value, fields: &[&str]) {
    for field in fields {
        rewrite(item, field, |raw| {
            parse_date(raw).map(|date| date.format("%Y-%m-%d").to_string())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_datetime_variants() {
        let expected = "2025-03-01T09:30:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(parse_datetime("2025-03-01T09:30:00Z"), Some(expected));
        assert_eq!(parse_datetime("2025-03-01T15:00:00+05:30"), Some(expected));
        assert_eq!(parse_datetime("2025-03-01 09:30:00"), Some(expected));
        assert_eq!(
            parse_datetime("2025-03-01"),
            "2025-03-01T00:00:00Z".parse::<DateTime<Utc>>().ok()
        );
        assert_eq!(parse_datetime("next tuesday"), None);
    }

    #[test]
    fn test_parse_date_drops_time() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(parse_date("2025-03-01"), Some(date));
        assert_eq!(parse_date("2025-03-01T23:00:00Z"), Some(date));
    }

    #[test]
    fn test_normalize_leaves_unknown_values() {
        let mut item = json!({
            "start_date": "2025-03-01",
            "end_date": "garbage",
            "date": "2025-03-04T10:00:00Z",
            "access_expiry_date": null
        });
        normalize_datetimes(&mut item, &["start_date", "end_date", "access_expiry_date"]);
        normalize_dates(&mut item, &["date"]);

        assert_eq!(item["start_date"], "2025-03-01T00:00:00+00:00");
        assert_eq!(item["end_date"], "garbage");
        assert_eq!(item["date"], "2025-03-04");
        assert!(item["access_expiry_date"].is_null());
    }
}
