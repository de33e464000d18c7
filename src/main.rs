mod catalog;
mod config;
mod error;
mod parser;
mod pipeline;
mod report;
mod source;

use std::time::Instant;

use anyhow::Context;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let config = Config::from_constants().context("Failed to build field catalog")?;

    println!(
        "Scraping {} vehicles ({} fields each) into {}...",
        config.vehicles.len(),
        config.catalog.len(),
        config.output_path.display()
    );
    let stats = pipeline::run(&config).await.context("Scrape aborted")?;
    println!(
        "Done: {} rows ({} from cache, {} fetched).",
        stats.rows, stats.cached, stats.fetched
    );

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
