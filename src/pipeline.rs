use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use crate::config::Config;
use crate::error::Result;
use crate::parser;
use crate::report::ReportWriter;
use crate::source::{vehicle_name, DocumentSource, Origin};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub rows: usize,
    pub cached: usize,
    pub fetched: usize,
}

/// Scrape every configured vehicle in order with the default HTTP client.
pub async fn run(config: &Config) -> Result<RunStats> {
    run_with(config, &DocumentSource::new(&config.cache_dir)).await
}

/// One vehicle at a time: resolve, build, append. The first error stops
/// the run; rows already appended stay on disk.
pub async fn run_with(config: &Config, source: &DocumentSource) -> Result<RunStats> {
    let mut report = ReportWriter::create(&config.output_path, &config.catalog.header_row())?;
    let mut stats = RunStats::default();

    let pb = ProgressBar::new(config.vehicles.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    for url in &config.vehicles {
        let name = vehicle_name(url)?;
        pb.set_message(name.clone());

        let resolved = source.resolve(url).await.inspect_err(|e| {
            error!(vehicle = %name, %url, "{}", e);
        })?;
        match resolved.origin {
            Origin::Cache => stats.cached += 1,
            Origin::Network => stats.fetched += 1,
        }

        let record = parser::build_record(&name, url, &resolved.document, &config.catalog)?;
        report.append(&record)?;
        info!(vehicle = %record.name, url = %record.source_url, "Row written");
        pb.inc(1);
    }

    pb.finish_and_clear();
    stats.rows = report.rows();
    info!(
        "Wrote {} rows to {} ({} cached, {} fetched)",
        stats.rows,
        config.output_path.display(),
        stats.cached,
        stats.fetched
    );
    Ok(stats)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldCatalog;
    use crate::config::{FIELD_LABELS, NON_SPLITTABLE_FIELDS};
    use crate::error::ScrapeError;
    use crate::source::CacheKey;
    use std::path::Path;

    // Port 9 refuses connections, so any fetch attempt fails the test.
    const TESLA: &str = "http://127.0.0.1:9/car/1991/Tesla-Model-3-Long-Range-Dual-Motor";
    const IONIQ: &str = "http://127.0.0.1:9/car/1555/Hyundai-IONIQ-5-77-kWh-AWD";
    const KIA: &str = "http://127.0.0.1:9/car/1700/Kia-EV6-77-kWh-AWD";

    fn config(root: &Path, vehicles: &[&str]) -> Config {
        Config {
            vehicles: vehicles.iter().map(|s| s.to_string()).collect(),
            catalog: FieldCatalog::new(FIELD_LABELS, NON_SPLITTABLE_FIELDS).unwrap(),
            cache_dir: root.join("pages"),
            output_path: root.join("data.csv"),
        }
    }

    fn offline_source(config: &Config) -> DocumentSource {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        DocumentSource::with_client(&config.cache_dir, client)
    }

    fn seed_cache(config: &Config, url: &str, fixture: &str) {
        std::fs::create_dir_all(&config.cache_dir).unwrap();
        let key = CacheKey::from_url(url).unwrap();
        std::fs::copy(
            format!("tests/fixtures/{}.html", fixture),
            config.cache_dir.join(key.file_name()),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn cached_run_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), &[TESLA, KIA]);
        seed_cache(&config, TESLA, "tesla_model_3");
        seed_cache(&config, KIA, "tesla_model_3");

        let stats = run_with(&config, &offline_source(&config)).await.unwrap();
        assert_eq!(stats, RunStats { rows: 2, cached: 2, fetched: 0 });

        let text = std::fs::read_to_string(&config.output_path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Vehicle Name,Useable Capacity (kWh),"));
        assert!(lines[1].starts_with("Tesla-Model-3-Long-Range-Dual-Motor,75.0,515,"));
        assert!(lines[2].starts_with("Kia-EV6-77-kWh-AWD,"));

        let width = config.catalog.header_row().len();
        let mut reader = csv::Reader::from_path(&config.output_path).unwrap();
        assert_eq!(reader.headers().unwrap().len(), width);
        for row in reader.records() {
            assert_eq!(row.unwrap().len(), width);
        }
    }

    #[tokio::test]
    async fn rerun_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), &[TESLA, KIA]);
        seed_cache(&config, TESLA, "tesla_model_3");
        seed_cache(&config, KIA, "tesla_model_3");

        run_with(&config, &offline_source(&config)).await.unwrap();
        let first = std::fs::read(&config.output_path).unwrap();
        let stats = run_with(&config, &offline_source(&config)).await.unwrap();
        let second = std::fs::read(&config.output_path).unwrap();

        assert_eq!(first, second);
        assert_eq!(stats.fetched, 0);
    }

    #[tokio::test]
    async fn missing_field_stops_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), &[IONIQ, KIA]);
        seed_cache(&config, IONIQ, "missing_warranty");
        // KIA is deliberately not cached: reaching it would hit the network.

        let err = run_with(&config, &offline_source(&config)).await.err().unwrap();
        assert!(matches!(err, ScrapeError::FieldNotFound { label } if label == "Warranty Period"));

        let text = std::fs::read_to_string(&config.output_path).unwrap();
        assert_eq!(text.lines().count(), 1, "only the header is written");
    }

    #[tokio::test]
    async fn rows_before_a_failure_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), &[TESLA, IONIQ]);
        seed_cache(&config, TESLA, "tesla_model_3");
        seed_cache(&config, IONIQ, "missing_warranty");

        assert!(run_with(&config, &offline_source(&config)).await.is_err());
        let text = std::fs::read_to_string(&config.output_path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[tokio::test]
    async fn fetch_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), &[KIA]);

        let err = run_with(&config, &offline_source(&config)).await.err().unwrap();
        assert!(matches!(err, ScrapeError::Http(_)));
        assert!(!config.cache_dir.exists());
    }
}
