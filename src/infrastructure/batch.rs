use futures_util::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::intake::{
  FreightInvoiceUseCase, FreightRecord, IntakeChannel, IntakeError, IntakeResponse,
  ManualInvoiceCommand, ManualInvoiceUseCase, OcrExtraction, OcrInvoiceUseCase,
};

/// One entry of a batch file
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "channel", content = "payload", rename_all = "lowercase")]
pub enum IntakeEnvelope {
  Manual(ManualInvoiceCommand),
  Ocr(OcrExtraction),
  Freight(FreightRecord),
}

#[derive(Deserialize)]
struct RawEnvelope {
  channel: IntakeChannel,
  #[serde(default)]
  payload: Value,
}

/// A batch entry that could not be read as an envelope
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
  #[error("Batch entry has no usable channel: {0}")]
  UnknownChannel(String),
  #[error(transparent)]
  Payload(#[from] IntakeError),
}

impl EnvelopeError {
  pub fn channel(&self) -> Option<IntakeChannel> {
    match self {
      EnvelopeError::UnknownChannel(_) => None,
      EnvelopeError::Payload(IntakeError::Normalization { channel, .. }) => Some(*channel),
      EnvelopeError::Payload(_) => None,
    }
  }

  pub fn kind(&self) -> &'static str {
    match self {
      EnvelopeError::UnknownChannel(_) => "normalization",
      EnvelopeError::Payload(e) => e.kind(),
    }
  }
}

impl IntakeEnvelope {
  /// Reads one batch entry. The channel tag is read first, so a payload
  /// that does not fit its channel is reported against that channel.
  pub fn from_value(value: Value) -> Result<Self, EnvelopeError> {
    let raw: RawEnvelope = serde_json::from_value(value)
      .map_err(|e| EnvelopeError::UnknownChannel(e.to_string()))?;

    let envelope = match raw.channel {
      IntakeChannel::Manual => serde_json::from_value(raw.payload).map(IntakeEnvelope::Manual),
      IntakeChannel::Ocr => serde_json::from_value(raw.payload).map(IntakeEnvelope::Ocr),
      IntakeChannel::Freight => serde_json::from_value(raw.payload).map(IntakeEnvelope::Freight),
    };

    envelope.map_err(|e| {
      EnvelopeError::from(IntakeError::normalization(
        raw.channel,
        format!("malformed payload: {}", e),
      ))
    })
  }

  pub fn channel(&self) -> IntakeChannel {
    match self {
      IntakeEnvelope::Manual(_) => IntakeChannel::Manual,
      IntakeEnvelope::Ocr(_) => IntakeChannel::Ocr,
      IntakeEnvelope::Freight(_) => IntakeChannel::Freight,
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
  Ok(IntakeResponse),
  Error { kind: &'static str, message: String },
}

#[derive(Debug, Serialize)]
pub struct BatchOutcome {
  pub index: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub channel: Option<IntakeChannel>,
  #[serde(flatten)]
  pub outcome: Outcome,
}

impl BatchOutcome {
  pub fn is_ok(&self) -> bool {
    matches!(self.outcome, Outcome::Ok(_))
  }
}

/// Routes batch entries to their channel's use case
pub struct BatchProcessor {
  manual: ManualInvoiceUseCase,
  ocr: OcrInvoiceUseCase,
  freight: FreightInvoiceUseCase,
  max_concurrency: usize,
}

impl BatchProcessor {
  pub fn new(
    manual: ManualInvoiceUseCase,
    ocr: OcrInvoiceUseCase,
    freight: FreightInvoiceUseCase,
  ) -> Self {
    Self {
      manual,
      ocr,
      freight,
      max_concurrency: 1,
    }
  }

  pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
    self.max_concurrency = max_concurrency.max(1);
    self
  }

  pub async fn process(&self, envelope: IntakeEnvelope) -> Result<IntakeResponse, IntakeError> {
    match envelope {
      IntakeEnvelope::Manual(command) => self.manual.execute(command).await,
      IntakeEnvelope::Ocr(extraction) => self.ocr.execute(extraction).await,
      IntakeEnvelope::Freight(record) => self.freight.execute(record).await,
    }
  }

  /// Processes every entry, at most `max_concurrency` at a time. Outcomes
  /// come back in input order.
  pub async fn run(&self, envelopes: Vec<IntakeEnvelope>) -> Vec<BatchOutcome> {
    self.run_entries(envelopes.into_iter().map(Ok).collect()).await
  }

  /// Like [`BatchProcessor::run`] for raw JSON entries. An entry that does
  /// not parse gets its own error outcome and the rest still run.
  pub async fn run_values(&self, values: Vec<Value>) -> Vec<BatchOutcome> {
    self
      .run_entries(values.into_iter().map(IntakeEnvelope::from_value).collect())
      .await
  }

  async fn run_entries(
    &self,
    entries: Vec<Result<IntakeEnvelope, EnvelopeError>>,
  ) -> Vec<BatchOutcome> {
    tracing::info!(
      "Processing batch of {} invoices ({} at a time)",
      entries.len(),
      self.max_concurrency
    );

    stream::iter(entries.into_iter().enumerate())
      .map(|(index, entry)| async move {
        let (channel, outcome) = match entry {
          Ok(envelope) => {
            let channel = envelope.channel();
            let outcome = match self.process(envelope).await {
              Ok(response) => Outcome::Ok(response),
              Err(e) => Outcome::Error {
                kind: e.kind(),
                message: e.to_string(),
              },
            };
            (Some(channel), outcome)
          }
          Err(e) => {
            tracing::warn!(index, "Unreadable batch entry: {}", e);
            (
              e.channel(),
              Outcome::Error {
                kind: e.kind(),
                message: e.to_string(),
              },
            )
          }
        };
        BatchOutcome {
          index,
          channel,
          outcome,
        }
      })
      .buffered(self.max_concurrency)
      .collect()
      .await
  }
}
