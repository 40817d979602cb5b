// # Infoblox Record Round Trip
//
// Publishes a record through the Infoblox provider, lists it, removes it and
// lists again. This is the sequence an ACME DNS-01 client runs for each
// challenge, so it doubles as a smoke test against a real grid.
//
// ## Usage
//
// ```bash
// INFOBLOX_HOST=gridmaster.example.com \
// INFOBLOX_USERNAME=admin \
// INFOBLOX_PASSWORD=secret \
// DNSREC_ZONE=_acme-challenge.example.com \
// DNSREC_RECORD_TARGET=token-value \
// cargo run -p dnsrec-demos --bin infoblox-records
// ```
//
// ## Environment Variables
//
// Required:
// - `INFOBLOX_HOST`, `INFOBLOX_USERNAME`, `INFOBLOX_PASSWORD`
// - `DNSREC_ZONE`: Name the records are listed under
// - `DNSREC_RECORD_TARGET`: TXT text, or CNAME target with `DNSREC_RECORD_TYPE=CNAME`
//
// Optional:
// - `INFOBLOX_WAPI_VERSION` (default: 2.12)
// - `DNSREC_RECORD_NAME`: Record name (default: the zone)
// - `DNSREC_RECORD_TYPE`: TXT or CNAME (default: TXT)
// - `DNSREC_RECORD_TTL`: Seconds (default: 60)
// - `DNSREC_LOG_LEVEL`: trace, debug, info, warn, error (default: info)

use anyhow::{Context, Result};
use dnsrec_core::{
    Record, RecordAppender, RecordDeleter, RecordGetter, RecordOutcome, RecordType,
};
use dnsrec_provider_infoblox::{InfobloxConfig, InfobloxProvider};
use std::env;
use std::time::Duration;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} environment variable is required"))
}

fn log_level() -> Level {
    match env::var("DNSREC_LOG_LEVEL")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn demo_record(zone: &str) -> Result<Record> {
    let name = env::var("DNSREC_RECORD_NAME").unwrap_or_else(|_| zone.to_string());
    let value = required("DNSREC_RECORD_TARGET")?;
    let record_type = RecordType::from(
        env::var("DNSREC_RECORD_TYPE")
            .unwrap_or_else(|_| "TXT".to_string())
            .as_str(),
    );
    if let RecordType::Other(other) = &record_type {
        anyhow::bail!("DNSREC_RECORD_TYPE '{other}' is not valid. Valid types: TXT, CNAME");
    }
    let ttl = match env::var("DNSREC_RECORD_TTL") {
        Ok(secs) => secs
            .parse()
            .with_context(|| format!("DNSREC_RECORD_TTL '{secs}' is not a number of seconds"))?,
        Err(_) => 60,
    };

    Ok(Record::new(record_type, name, value, Duration::from_secs(ttl)))
}

async fn list(provider: &InfobloxProvider, zone: &str) -> Result<()> {
    let records = provider.get_records(zone).await?;
    info!("{} record(s) named {}", records.len(), zone);
    for record in &records {
        info!(
            "  {} {} -> {} (ttl {}s)",
            record.record_type,
            record.name,
            record.value,
            record.ttl.as_secs()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let config = InfobloxConfig::from_env()?;
    let zone = required("DNSREC_ZONE")?;
    let record = demo_record(&zone)?;

    info!("Grid: {} (WAPI v{})", config.host, config.version);
    let provider = InfobloxProvider::new(config)?;

    info!("--- Step 1: Append ---");
    let report = provider
        .append_records_detailed(&zone, std::slice::from_ref(&record))
        .await?;
    for outcome in report.outcomes() {
        match outcome {
            RecordOutcome::Applied(r) => info!("Created {} {}", r.record_type, r.name),
            RecordOutcome::Skipped { record, reason } => {
                warn!("Skipped {}: {}", record.name, reason)
            }
            RecordOutcome::Failed { record, error } => {
                warn!("Failed {}: {}", record.name, error)
            }
        }
    }

    info!("--- Step 2: Get ---");
    list(&provider, &zone).await?;

    info!("--- Step 3: Delete ---");
    let deleted = provider
        .delete_records(&zone, std::slice::from_ref(&record))
        .await?;
    info!("Deleted {} record(s)", deleted.len());

    info!("--- Step 4: Get ---");
    list(&provider, &zone).await?;

    Ok(())
}
