use std::path::PathBuf;

use crate::catalog::FieldCatalog;
use crate::error::Result;

pub const CACHE_DIR: &str = "pages";
pub const CSV_FILE_NAME: &str = "data.csv";

pub const VEHICLES_TO_SCRAPE: &[&str] = &[
    "https://ev-database.org/car/1991/Tesla-Model-3-Long-Range-Dual-Motor",
    "https://ev-database.org/car/1555/Hyundai-IONIQ-5-77-kWh-AWD",
    "https://ev-database.org/car/1700/Kia-EV6-77-kWh-AWD",
    "https://ev-database.org/car/1657/Volkswagen-ID4-Pro",
    "https://ev-database.org/car/1784/Polestar-2-Long-Range-Dual-Motor",
    "https://ev-database.org/car/1404/Nissan-Leaf-eplus",
];

/// (label, unit). Labels are regex patterns matched against table cells.
pub const FIELD_LABELS: &[(&str, Option<&str>)] = &[
    ("Useable Capacity", Some("kWh")),
    ("Electric Range", Some("km")),
    ("Acceleration 0 - 100 km/h", Some("sec")),
    ("Top Speed", Some("km/h")),
    ("Total Power", Some("kW")),
    ("Charge Port", None),
    ("Charge Power", Some("kW AC")),
    ("Charge Time", Some("min")),
    ("Fastcharge Power", Some("kW DC")),
    ("Segment", None),
    ("Warranty Period", Some("years")),
];

/// Values here are multi-word and must not be cut at the first space.
pub const NON_SPLITTABLE_FIELDS: &[&str] = &["Charge Port", "Segment"];

/// Everything a run needs, built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub vehicles: Vec<String>,
    pub catalog: FieldCatalog,
    pub cache_dir: PathBuf,
    pub output_path: PathBuf,
}

impl Config {
    pub fn from_constants() -> Result<Self> {
        Ok(Self {
            vehicles: VEHICLES_TO_SCRAPE.iter().map(|s| s.to_string()).collect(),
            catalog: FieldCatalog::new(FIELD_LABELS, NON_SPLITTABLE_FIELDS)?,
            cache_dir: PathBuf::from(CACHE_DIR),
            output_path: PathBuf::from(CSV_FILE_NAME),
        })
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NormalizationKind;

    #[test]
    fn constants_build_a_catalog() {
        let config = Config::from_constants().unwrap();
        assert_eq!(config.catalog.len(), FIELD_LABELS.len());
        assert_eq!(config.vehicles.len(), VEHICLES_TO_SCRAPE.len());
    }

    #[test]
    fn exempt_fields_are_non_splittable() {
        let config = Config::from_constants().unwrap();
        for field in config.catalog.fields() {
            let exempt = NON_SPLITTABLE_FIELDS.contains(&field.label.as_str());
            assert_eq!(exempt, field.kind == NormalizationKind::NonSplittable, "{}", field.label);
        }
    }

    #[test]
    fn every_vehicle_url_has_a_cache_key() {
        for url in VEHICLES_TO_SCRAPE {
            assert!(crate::source::CacheKey::from_url(url).is_ok(), "{url}");
        }
    }
}
