use crate::models::{Status, SubscriptionRecord};
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Renewals up to this many days out count as expiring soon.
pub const EXPIRING_WINDOW_DAYS: i64 = 7;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    pub category: String,
    pub amount: f64,
    pub percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiringSubscription {
    pub record: SubscriptionRecord,
    pub days_left: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub as_of: String,
    pub active_count: usize,
    pub expired_count: usize,
    pub total_active_spend: f64,
    pub average_active_spend: i64,
    pub category_breakdown: Vec<CategorySpend>,
    pub expiring_soon: Vec<ExpiringSubscription>,
    pub upcoming_renewals: usize,
}

pub fn derive_today(records: &[SubscriptionRecord]) -> AnalyticsSnapshot {
    derive(records, Local::now().date_naive())
}

pub fn derive(records: &[SubscriptionRecord], as_of: NaiveDate) -> AnalyticsSnapshot {
    let active: Vec<&SubscriptionRecord> = records.iter().filter(|s| s.is_active()).collect();
    let expired_count = records
        .iter()
        .filter(|s| s.status == Status::Expired)
        .count();

    let category_breakdown = category_breakdown(&active);
    let total_active_spend: f64 = category_breakdown.iter().map(|c| c.amount).sum();
    let average_active_spend = if active.is_empty() {
        0
    } else {
        round_half_up(total_active_spend / active.len() as f64)
    };

    let expiring_soon = expiring_soon(&active, as_of);

    AnalyticsSnapshot {
        as_of: as_of.to_string(),
        active_count: active.len(),
        expired_count,
        total_active_spend,
        average_active_spend,
        upcoming_renewals: expiring_soon.len(),
        category_breakdown,
        expiring_soon,
    }
}

/// Whole days until renewal, rounded up; `None` for an unparseable date.
pub fn days_left(record: &SubscriptionRecord, as_of: NaiveDate) -> Option<i64> {
    let renewal = record.renewal_at()?;
    let start = as_of.and_hms_opt(0, 0, 0)?;
    let seconds = (renewal - start).num_seconds() as f64;
    Some((seconds / SECONDS_PER_DAY).ceil() as i64)
}

pub fn expiry_message(days_left: i64) -> String {
    if days_left == 0 {
        "Expires today".to_string()
    } else {
        format!("Expires in {days_left} days")
    }
}

fn category_breakdown(active: &[&SubscriptionRecord]) -> Vec<CategorySpend> {
    // First-appearance order.
    let mut amounts: Vec<(String, f64)> = Vec::new();
    for record in active {
        match amounts.iter_mut().find(|(name, _)| *name == record.category) {
            Some((_, amount)) => *amount += record.price,
            None => amounts.push((record.category.clone(), record.price)),
        }
    }

    let total: f64 = amounts.iter().map(|(_, amount)| amount).sum();
    amounts
        .into_iter()
        .map(|(category, amount)| CategorySpend {
            percentage: if total == 0.0 {
                0
            } else {
                round_half_up(amount / total * 100.0)
            },
            category,
            amount,
        })
        .collect()
}

fn expiring_soon(active: &[&SubscriptionRecord], as_of: NaiveDate) -> Vec<ExpiringSubscription> {
    let mut soon: Vec<ExpiringSubscription> = active
        .iter()
        .filter_map(|record| {
            let days = days_left(record, as_of)?;
            (0..=EXPIRING_WINDOW_DAYS).contains(&days).then(|| ExpiringSubscription {
                record: (*record).clone(),
                days_left: days,
                message: expiry_message(days),
            })
        })
        .collect();
    // sort_by_key is stable, so ties keep list order.
    soon.sort_by_key(|entry| entry.days_left);
    soon
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
