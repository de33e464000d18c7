use regex::Regex;

use crate::error::{Result, ScrapeError};

pub const VEHICLE_NAME_COLUMN: &str = "Vehicle Name";

const DURATION_LABEL: &str = "Charge Time";
const WARRANTY_LABEL: &str = "Warranty Period";

/// How a field's raw cell text becomes its output value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationKind {
    /// `"7h45m"` / `"11 hours"` → total minutes.
    DurationHm,
    /// `"8 years"` → 8, `"No Data"` → 0.
    WarrantyYears,
    /// Multi-word value kept verbatim.
    NonSplittable,
    /// `"240 km"` → `"240"`.
    LeadingToken,
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub label: String,
    pub unit: Option<String>,
    pub kind: NormalizationKind,
    pattern: Regex,
}

impl FieldDescriptor {
    pub fn new(label: &str, unit: Option<&str>, kind: NormalizationKind) -> Result<Self> {
        let pattern = Regex::new(label).map_err(|source| ScrapeError::InvalidLabel {
            label: label.to_string(),
            source,
        })?;
        Ok(Self {
            label: label.to_string(),
            unit: unit.map(str::to_string),
            kind,
            pattern,
        })
    }

    /// Unanchored, case-sensitive pattern used to find the label cell.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn header(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{} ({})", self.label, unit),
            None => self.label.clone(),
        }
    }
}

/// Ordered field list; defines both header and row column order.
#[derive(Debug, Clone)]
pub struct FieldCatalog {
    fields: Vec<FieldDescriptor>,
}

impl FieldCatalog {
    pub fn new(entries: &[(&str, Option<&str>)], non_splittable: &[&str]) -> Result<Self> {
        let fields = entries
            .iter()
            .map(|&(label, unit)| FieldDescriptor::new(label, unit, kind_for(label, non_splittable)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn header_row(&self) -> Vec<String> {
        std::iter::once(VEHICLE_NAME_COLUMN.to_string())
            .chain(self.fields.iter().map(FieldDescriptor::header))
            .collect()
    }
}

fn kind_for(label: &str, non_splittable: &[&str]) -> NormalizationKind {
    if label == DURATION_LABEL {
        NormalizationKind::DurationHm
    } else if label == WARRANTY_LABEL {
        NormalizationKind::WarrantyYears
    } else if non_splittable.contains(&label) {
        NormalizationKind::NonSplittable
    } else {
        NormalizationKind::LeadingToken
    }
}

// ── Tests ──
