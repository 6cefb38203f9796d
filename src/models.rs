use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier assigned by the subscriptions API.
///
/// Upstream APIs hand these out either as strings or as integers, so both
/// are accepted and the value is always carried as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => RecordId(text),
            Raw::Int(value) => RecordId(value.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Billing {
    #[default]
    Monthly,
    Yearly,
}

impl Billing {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Monthly" => Some(Self::Monthly),
            "Yearly" => Some(Self::Yearly),
            _ => None,
        }
    }
}

/// Lifecycle flag. Only `Active` and `Expired` take part in spend and alert math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Active,
    Expired,
    #[serde(other)]
    Other,
}

impl Status {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Active" => Some(Self::Active),
            "Expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_billing")]
    pub billing: Billing,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub renewal_date: String,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Status,
}

/// A record without its server-assigned id; the body of a create call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDraft {
    pub name: String,
    pub category: String,
    pub billing: Billing,
    #[serde(deserialize_with = "lenient_price")]
    pub price: f64,
    pub renewal_date: String,
    pub status: Status,
}

impl SubscriptionDraft {
    pub fn with_id(self, id: RecordId) -> SubscriptionRecord {
        SubscriptionRecord {
            id,
            name: self.name,
            category: self.category,
            billing: self.billing,
            price: self.price,
            renewal_date: self.renewal_date,
            status: self.status,
        }
    }
}

impl SubscriptionRecord {
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    /// Renewal moment as a naive timestamp; `None` when the stored text is not a date.
    pub fn renewal_at(&self) -> Option<NaiveDateTime> {
        parse_renewal(&self.renewal_date)
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 and `YYYY-MM-DDTHH:MM[:SS]`. Dates mean midnight.
pub fn parse_renewal(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Numbers pass through, numeric strings are parsed, everything else is 0.
fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_price(&value))
}

/// Strings pass through; null or any other JSON type becomes empty.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => text,
        _ => String::new(),
    })
}

/// Unrecognised cadences from the API read as `Monthly`.
fn lenient_billing<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Billing, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(Billing::parse).unwrap_or_default())
}

/// Null or non-string statuses read as `Other`, like any unknown status.
fn lenient_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Status, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(Status::parse).unwrap_or(Status::Other))
}

pub fn coerce_price(value: &serde_json::Value) -> f64 {
    let parsed = match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|price| price.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_accepts_numeric_id_and_string_price() {
        let record: SubscriptionRecord = serde_json::from_value(json!({
            "id": 7,
            "name": "Netflix",
            "category": "Media",
            "billing": "Monthly",
            "price": "199",
            "renewalDate": "2024-01-04",
            "status": "Active"
        }))
        .unwrap();

        assert_eq!(record.id.as_str(), "7");
        assert_eq!(record.price, 199.0);
        assert!(record.is_active());
    }

    #[test]
    fn missing_or_garbage_price_is_zero() {
        let missing: SubscriptionRecord =
            serde_json::from_value(json!({ "id": "a", "status": "Active" })).unwrap();
        let garbage: SubscriptionRecord =
            serde_json::from_value(json!({ "id": "b", "price": "free" })).unwrap();
        let null: SubscriptionRecord =
            serde_json::from_value(json!({ "id": "c", "price": null })).unwrap();

        assert_eq!(missing.price, 0.0);
        assert_eq!(garbage.price, 0.0);
        assert_eq!(null.price, 0.0);
    }

    #[test]
    fn unknown_status_is_other() {
        let record: SubscriptionRecord =
            serde_json::from_value(json!({ "id": "x", "status": "Paused" })).unwrap();
        assert_eq!(record.status, Status::Other);
    }

    #[test]
    fn price_serializes_as_number() {
        let draft = SubscriptionDraft {
            name: "Spotify".into(),
            category: "Music".into(),
            billing: Billing::Yearly,
            price: 119.0,
            renewal_date: "2024-02-01".into(),
            status: Status::Active,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["price"], json!(119.0));
        assert_eq!(value["renewalDate"], json!("2024-02-01"));
        assert!(value.get("id").is_none());
    }

    #[test]
    fn renewal_parsing_formats() {
        let midnight = NaiveDate::from_ymd_opt(2024, 1, 4)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_renewal("2024-01-04"), Some(midnight));
        assert_eq!(parse_renewal("2024-01-04T00:00"), Some(midnight));
        assert_eq!(parse_renewal("next tuesday"), None);
        assert_eq!(parse_renewal(""), None);
    }

    #[test]
    fn offset_timestamps_land_on_the_local_calendar() {
        let raw = "2024-01-04T23:30:00+05:30";
        let expected = DateTime::parse_from_rfc3339(raw)
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(parse_renewal(raw), Some(expected));
    }

    #[test]
    fn null_text_fields_do_not_reject_the_list() {
        let records: Vec<SubscriptionRecord> = serde_json::from_value(json!([
            { "id": 1, "name": "Netflix", "category": "Media", "price": 100, "renewalDate": "2024-01-04", "status": "Active" },
            { "id": 2, "name": null, "category": null, "price": 5, "renewalDate": null, "status": "Active" },
            { "id": 3, "price": 5, "renewalDate": 20240104, "status": null }
        ]))
        .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].name, "");
        assert_eq!(records[1].category, "");
        assert_eq!(records[1].renewal_date, "");
        assert_eq!(records[1].renewal_at(), None);
        assert_eq!(records[2].renewal_at(), None);
        assert_eq!(records[2].status, Status::Other);
    }

    #[test]
    fn unknown_billing_falls_back_to_monthly() {
        let records: Vec<SubscriptionRecord> = serde_json::from_value(json!([
            { "id": 1, "billing": "monthly" },
            { "id": 2, "billing": "Weekly" },
            { "id": 3, "billing": null },
            { "id": 4, "billing": "Yearly" }
        ]))
        .unwrap();

        let billing: Vec<Billing> = records.iter().map(|r| r.billing).collect();
        assert_eq!(
            billing,
            vec![Billing::Monthly, Billing::Monthly, Billing::Monthly, Billing::Yearly]
        );
    }
}
