// Summarize a JSON array of GC samples as a statistics record.
//
// Usage: cargo run --example summarize -- [SAMPLES_PATH] [WINDOW]
//   SAMPLES_PATH  default: ./samples.json
//   WINDOW        default: all samples; otherwise only the most recent N are kept
//
// Sample format: {"timestamp": 1000, "collectionCount": 8, "usage": {"used": 500, "max": 1000}}
// ("collectionCount": null for polled samples).

use gcstats::{GcSample, GcStats, SampleWindow};
use std::env;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let path = args.get(1).map(String::as_str).unwrap_or("./samples.json");
    let window: Option<usize> = args.get(2).and_then(|s| s.parse().ok());

    let raw = std::fs::read_to_string(path)?;
    let samples: Vec<GcSample> = serde_json::from_str(&raw)?;
    tracing::info!(path, samples = samples.len(), "loaded samples");

    let stats = match window {
        Some(capacity) => {
            let mut w = SampleWindow::new(capacity);
            for sample in samples {
                w.push(sample);
            }
            w.stats()
        }
        None => GcStats::from_samples(&samples),
    };

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
