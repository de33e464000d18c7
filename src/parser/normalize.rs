use std::fmt;

use crate::catalog::{FieldDescriptor, NormalizationKind};
use crate::error::{Result, ScrapeError};

const HOURS_WORD: &str = "hours";
const NO_DATA: &str = "No Data";

/// A normalized cell. Only duration and warranty are cast to integers;
/// leading tokens stay textual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(u32),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

pub fn normalize(field: &FieldDescriptor, raw: &str) -> Result<FieldValue> {
    let raw = raw.trim();
    let value = match field.kind {
        NormalizationKind::DurationHm => parse_duration_minutes(raw).map(FieldValue::Integer),
        NormalizationKind::WarrantyYears => parse_warranty_years(raw).map(FieldValue::Integer),
        NormalizationKind::NonSplittable => Some(FieldValue::Text(raw.to_string())),
        NormalizationKind::LeadingToken => Some(FieldValue::Text(leading_token(raw).to_string())),
    };
    value.ok_or_else(|| ScrapeError::MalformedValue {
        label: field.label.clone(),
        raw: raw.to_string(),
    })
}

/// `"3h30m"` → 210, `"2h"` → 120, `"5 hours"` → 300.
fn parse_duration_minutes(raw: &str) -> Option<u32> {
    let (hours, rest) = raw.split_once('h')?;
    let hours: u32 = hours.trim().parse().ok()?;

    let minutes = if raw.contains(HOURS_WORD) {
        0
    } else {
        let between = rest.split('h').next().unwrap_or_default();
        let minutes = between.split('m').next().unwrap_or_default().trim();
        if minutes.is_empty() {
            0
        } else {
            minutes.parse().ok()?
        }
    };

    hours.checked_mul(60)?.checked_add(minutes)
}

fn parse_warranty_years(raw: &str) -> Option<u32> {
    if raw.contains(NO_DATA) {
        return Some(0);
    }
    leading_token(raw).parse().ok()
}

fn leading_token(raw: &str) -> &str {
    raw.split(' ').next().unwrap_or_default()
}

// ── Tests ──
