use anyhow::Context;
use std::io::Write;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apflow::{
  application::intake::{
    FreightInvoiceUseCase, InvoiceIntake, ManualInvoiceUseCase, OcrInvoiceUseCase,
  },
  domain::due_date::DueDateService,
  infrastructure::{
    BatchProcessor, ConfiguredVendorDirectory, InMemoryInvoiceStore, RegionalHolidayCalendar,
    config::Config,
  },
};

async fn read_batch(path: Option<String>) -> anyhow::Result<String> {
  match path {
    Some(path) => tokio::fs::read_to_string(&path)
      .await
      .with_context(|| format!("Failed to read batch file {}", path)),
    None => {
      let mut input = String::new();
      tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read batch from stdin")?;
      Ok(input)
    }
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Logs go to stderr, results to stdout
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "apflow=info".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  let directory = Arc::new(ConfiguredVendorDirectory::new(config.vendor_terms()?));
  let calendar = Arc::new(RegionalHolidayCalendar::new(config.region_calendars()?));
  tracing::info!(
    "Loaded terms for {} vendors and {} holiday calendars",
    directory.len(),
    config.calendar.regions.len()
  );

  let due_dates =
    Arc::new(DueDateService::new(directory, calendar).with_policy(config.adjustment_policy()));
  let store = Arc::new(InMemoryInvoiceStore::new());
  let intake = Arc::new(InvoiceIntake::new(due_dates, store.clone()));

  let processor = BatchProcessor::new(
    ManualInvoiceUseCase::new(intake.clone()),
    OcrInvoiceUseCase::new(intake.clone()).with_min_confidence(config.ocr.min_confidence),
    FreightInvoiceUseCase::new(intake).with_carrier_vendors(config.freight.carrier_vendors.clone()),
  )
  .with_max_concurrency(config.intake.max_concurrency);

  let input = read_batch(std::env::args().nth(1)).await?;
  let entries: Vec<serde_json::Value> = serde_json::from_str(&input)
    .context("Batch input must be a JSON array of {\"channel\", \"payload\"} entries")?;

  let outcomes = processor.run_values(entries).await;

  let stdout = std::io::stdout();
  let mut out = stdout.lock();
  for outcome in &outcomes {
    serde_json::to_writer(&mut out, outcome)?;
    writeln!(out)?;
  }

  let accepted = outcomes.iter().filter(|o| o.is_ok()).count();
  tracing::info!(
    "Batch finished: {} accepted, {} rejected, {} invoices stored",
    accepted,
    outcomes.len() - accepted,
    store.count().await
  );

  Ok(())
}
