pub mod document;
pub mod normalize;
pub mod pretty;

use tracing::{debug, error};

use crate::catalog::FieldCatalog;
use crate::error::Result;
use document::Document;
use normalize::FieldValue;

pub struct ExtractedField {
    pub label: String,
    pub raw: String,
    pub value: FieldValue,
}

/// One vehicle's normalized fields, in catalog order.
pub struct VehicleRecord {
    pub name: String,
    pub source_url: String,
    pub fields: Vec<ExtractedField>,
}

impl VehicleRecord {
    /// `[name, value_1, value_2, ...]`
    pub fn to_row(&self) -> Vec<String> {
        std::iter::once(self.name.clone())
            .chain(self.fields.iter().map(|f| f.value.to_string()))
            .collect()
    }
}

/// Extract then normalize every catalog field. The first failure is
/// returned; no partially filled record is ever produced.
pub fn build_record(
    name: &str,
    source_url: &str,
    document: &Document,
    catalog: &FieldCatalog,
) -> Result<VehicleRecord> {
    let mut fields = Vec::with_capacity(catalog.len());

    for field in catalog.fields() {
        let raw = document.extract(field).inspect_err(|e| {
            error!(vehicle = name, label = %field.label, unit = ?field.unit, "Failed to find the element: {}", e);
        })?;
        let value = normalize::normalize(field, &raw).inspect_err(|e| {
            error!(vehicle = name, label = %field.label, "{}", e);
        })?;
        debug!(vehicle = name, label = %field.label, raw = %raw, value = %value);

        fields.push(ExtractedField {
            label: field.label.clone(),
            raw,
            value,
        });
    }

    Ok(VehicleRecord {
        name: name.to_string(),
        source_url: source_url.to_string(),
        fields,
    })
}

// ── Tests ──
