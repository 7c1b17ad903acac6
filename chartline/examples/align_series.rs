use chartline::{Chartline, OutOfRangePolicy, Record};
use chrono::{DateTime, TimeDelta, Utc};
use tracing_subscriber::fmt::format::FmtSpan;

fn daily(start: DateTime<Utc>, days: i64, field: &str, base: f64) -> Vec<Record> {
    (0..days)
        .map(|i| {
            let ts = start + TimeDelta::days(i);
            Record::new()
                .with("datetime", ts.to_rfc3339())
                .with(field, base + i as f64)
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=debug cargo run --example align_series --features tracing
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let chart = Chartline::builder()
        .key("datetime")
        .window("1m")
        .out_of_range(OutOfRangePolicy::ClampToFirst)
        .build()?;

    let start: DateTime<Utc> = "2024-01-01T00:00:00Z".parse()?;
    let now = start + TimeDelta::days(90);

    // Three sources of different lengths: the 90-day price series is the spine.
    let price = chart.prepare(daily(start, 90, "price", 100.0))?;
    let volume = chart.prepare(daily(start + TimeDelta::days(30), 60, "volume", 1_000.0))?;
    let dev_activity = chart.prepare(daily(start + TimeDelta::days(75), 15, "dev", 5.0))?;

    let merged = chart.align(&[price.clone(), volume, dev_activity], now)?;
    println!("{} points after trimming to the last month", merged.len());
    if let Some(last) = merged.last() {
        println!("latest point: {}", serde_json::to_string(last)?);
    }

    let post_at: DateTime<Utc> = "2024-02-15T12:00:00Z".parse()?;
    let idx = chart.locate(&price, post_at)?;
    println!(
        "last price before {post_at}: {}",
        serde_json::to_string(&price.records()[idx])?
    );

    Ok(())
}
