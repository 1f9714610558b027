use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

use super::errors::IntakeError;
use super::pipeline::InvoiceIntake;
use super::request::{IntakeChannel, IntakeResponse, InvoiceRequest};

lazy_static! {
  // Optional currency marker on either side of a number such as
  // "1,234.56", "1.234,56", "1 234,56" or "1234.5".
  static ref AMOUNT_PATTERN: Regex = Regex::new(
    r"^\s*(?:[A-Za-z]{3}|[$€£¥])?\s*(-?\d{1,3}(?:[.,' ]\d{3})*(?:[.,]\d{1,2})?|-?\d+(?:[.,]\d{1,2})?)\s*(?:[A-Za-z]{3}|[$€£¥])?\s*$"
  )
  .unwrap();
}

const DATE_FORMATS: &[&str] = &[
  "%Y-%m-%d",
  "%d.%m.%Y",
  "%m/%d/%Y",
  "%d %b %Y",
  "%d %B %Y",
  "%b %d, %Y",
  "%B %d, %Y",
];

pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.8;

fn full_confidence() -> f32 {
  1.0
}

/// One value read off a scanned document
#[derive(Debug, Clone, Deserialize)]
pub struct OcrField {
  pub text: String,
  #[serde(default = "full_confidence")]
  pub confidence: f32,
}

/// Raw result of the upstream extraction step. Any field may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct OcrExtraction {
  #[serde(default)]
  pub document_id: Option<String>,
  #[serde(default)]
  pub vendor_id: Option<OcrField>,
  #[serde(default)]
  pub total_amount: Option<OcrField>,
  #[serde(default)]
  pub invoice_date: Option<OcrField>,
}

impl OcrExtraction {
  pub fn normalize(&self, min_confidence: f32) -> Result<InvoiceRequest, IntakeError> {
    let vendor_id = required_text("vendor_id", &self.vendor_id, min_confidence)?;

    let amount_text = required_text("total_amount", &self.total_amount, min_confidence)?;
    let amount = parse_amount(amount_text).ok_or_else(|| {
      reject(format!("total_amount '{}' is not a number", amount_text))
    })?;

    let date_text = required_text("invoice_date", &self.invoice_date, min_confidence)?;
    let invoice_date = parse_date(date_text).ok_or_else(|| {
      reject(format!("invoice_date '{}' is not a recognised date", date_text))
    })?;

    Ok(InvoiceRequest {
      vendor_id: vendor_id.to_string(),
      amount,
      invoice_date,
      channel: IntakeChannel::Ocr,
      reference: self.document_id.clone(),
    })
  }
}

fn reject(message: String) -> IntakeError {
  IntakeError::normalization(IntakeChannel::Ocr, message)
}

fn required_text<'a>(
  name: &str,
  field: &'a Option<OcrField>,
  min_confidence: f32,
) -> Result<&'a str, IntakeError> {
  let field = field
    .as_ref()
    .ok_or_else(|| reject(format!("{} is missing", name)))?;

  if field.confidence.is_nan() || field.confidence < min_confidence {
    return Err(reject(format!(
      "{} confidence {:.2} is below {:.2}",
      name, field.confidence, min_confidence
    )));
  }

  let text = field.text.trim();
  if text.is_empty() {
    return Err(reject(format!("{} is blank", name)));
  }
  Ok(text)
}

/// Reads an amount printed with an optional currency marker and either
/// `.` or `,` as decimal separator. A separator followed by one or two
/// trailing digits is decimal, every other one groups thousands.
///
/// Ambiguous groupings return `None`: mixed thousands separators
/// (`1,234.567`), a thousands separator equal to the decimal one
/// (`1,234,56`) and a leading zero group (`0.001`).
pub fn parse_amount(text: &str) -> Option<Decimal> {
  let captures = AMOUNT_PATTERN.captures(text)?;
  let raw = captures.get(1)?.as_str();
  let (negative, digits) = match raw.strip_prefix('-') {
    Some(rest) => (true, rest),
    None => (false, raw),
  };

  let decimal_at = digits
    .rfind(|c: char| c == '.' || c == ',')
    .filter(|&i| matches!(digits.len() - i - 1, 1 | 2));

  let mut grouping = digits
    .char_indices()
    .filter(|&(i, c)| !c.is_ascii_digit() && Some(i) != decimal_at)
    .map(|(_, c)| c);
  if let Some(separator) = grouping.next() {
    if grouping.any(|c| c != separator) || digits.starts_with('0') {
      return None;
    }
    if decimal_at.and_then(|i| digits[i..].chars().next()) == Some(separator) {
      return None;
    }
  }

  let mut normalized = String::with_capacity(digits.len() + 1);
  if negative {
    normalized.push('-');
  }
  for (i, c) in digits.char_indices() {
    if c.is_ascii_digit() {
      normalized.push(c);
    } else if Some(i) == decimal_at {
      normalized.push('.');
    }
  }

  Decimal::from_str(&normalized).ok()
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
  let text = text.trim();
  DATE_FORMATS
    .iter()
    .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

pub struct OcrInvoiceUseCase {
  intake: Arc<InvoiceIntake>,
  min_confidence: f32,
}

impl OcrInvoiceUseCase {
  pub fn new(intake: Arc<InvoiceIntake>) -> Self {
    Self {
      intake,
      min_confidence: DEFAULT_MIN_CONFIDENCE,
    }
  }

  pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
    self.min_confidence = min_confidence;
    self
  }

  pub async fn execute(&self, extraction: OcrExtraction) -> Result<IntakeResponse, IntakeError> {
    let request = extraction.normalize(self.min_confidence).map_err(|e| {
      tracing::warn!(
        document_id = extraction.document_id.as_deref().unwrap_or("-"),
        "OCR extraction flagged for review: {}",
        e
      );
      e
    })?;
    self.intake.process(request).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn field(text: &str, confidence: f32) -> Option<OcrField> {
    Some(OcrField {
      text: text.to_string(),
      confidence,
    })
  }

  fn extraction() -> OcrExtraction {
    OcrExtraction {
      document_id: Some("scan-0042".to_string()),
      vendor_id: field("V1", 0.99),
      total_amount: field("$1,234.56", 0.95),
      invoice_date: field("2024-01-01", 0.9),
    }
  }

  #[test]
  fn test_parse_amount() {
    assert_eq!(parse_amount("1234.56"), Some(dec!(1234.56)));
    assert_eq!(parse_amount("$1,234.56"), Some(dec!(1234.56)));
    assert_eq!(parse_amount("1.234,56 EUR"), Some(dec!(1234.56)));
    assert_eq!(parse_amount("1 234,5"), Some(dec!(1234.5)));
    assert_eq!(parse_amount("USD 1,000,000"), Some(dec!(1000000)));
    assert_eq!(parse_amount("£42"), Some(dec!(42)));
    assert_eq!(parse_amount("-15.00"), Some(dec!(-15.00)));
    assert_eq!(parse_amount("twelve"), None);
    assert_eq!(parse_amount("12.3.4"), None);
    assert_eq!(parse_amount("0.001"), None);
    assert_eq!(parse_amount("12.345,678"), None);
    assert_eq!(parse_amount("1,234.567"), None);
    assert_eq!(parse_amount("1,234,56"), None);
    assert_eq!(parse_amount("0.50"), Some(dec!(0.50)));
    assert_eq!(parse_amount(""), None);
  }

  #[test]
  fn test_parse_date() {
    let expected = NaiveDate::from_ymd_opt(2024, 1, 31);
    assert_eq!(parse_date("2024-01-31"), expected);
    assert_eq!(parse_date("31.01.2024"), expected);
    assert_eq!(parse_date("01/31/2024"), expected);
    assert_eq!(parse_date("31 Jan 2024"), expected);
    assert_eq!(parse_date("January 31, 2024"), expected);
    assert_eq!(parse_date("2024-02-30"), None);
    assert_eq!(parse_date("yesterday"), None);
  }

  #[test]
  fn test_normalize_extraction() {
    let request = extraction().normalize(DEFAULT_MIN_CONFIDENCE).unwrap();
    assert_eq!(request.vendor_id, "V1");
    assert_eq!(request.amount, dec!(1234.56));
    assert_eq!(request.invoice_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(request.channel, IntakeChannel::Ocr);
    assert_eq!(request.reference.as_deref(), Some("scan-0042"));
  }

  #[test]
  fn test_partial_extraction_is_rejected() {
    let mut partial = extraction();
    partial.total_amount = None;
    let err = partial.normalize(DEFAULT_MIN_CONFIDENCE).unwrap_err();
    assert_eq!(
      err.to_string(),
      "Cannot normalize ocr input: total_amount is missing"
    );
  }

  #[test]
  fn test_low_confidence_is_rejected() {
    let mut blurry = extraction();
    blurry.invoice_date = field("2024-01-01", 0.42);
    assert!(matches!(
      blurry.normalize(DEFAULT_MIN_CONFIDENCE),
      Err(IntakeError::Normalization {
        channel: IntakeChannel::Ocr,
        ..
      })
    ));
    assert!(blurry.normalize(0.4).is_ok());
  }

  #[test]
  fn test_garbled_values_are_rejected() {
    let mut garbled = extraction();
    garbled.total_amount = field("1O0.00", 0.9);
    assert!(garbled.normalize(DEFAULT_MIN_CONFIDENCE).is_err());

    let mut inflated = extraction();
    inflated.total_amount = field("0.001", 0.99);
    assert!(matches!(
      inflated.normalize(DEFAULT_MIN_CONFIDENCE),
      Err(IntakeError::Normalization {
        channel: IntakeChannel::Ocr,
        ..
      })
    ));

    let mut garbled = extraction();
    garbled.invoice_date = field("32.13.2024", 0.9);
    assert!(garbled.normalize(DEFAULT_MIN_CONFIDENCE).is_err());

    let mut blank = extraction();
    blank.vendor_id = field("  ", 1.0);
    assert!(blank.normalize(DEFAULT_MIN_CONFIDENCE).is_err());
  }

  #[test]
  fn test_confidence_defaults_to_certain() {
    let extraction: OcrExtraction = serde_json::from_str(
      r#"{"vendor_id": {"text": "V1"}, "total_amount": {"text": "10,00"}, "invoice_date": {"text": "01.02.2024"}}"#,
    )
    .unwrap();
    let request = extraction.normalize(0.99).unwrap();
    assert_eq!(request.amount, dec!(10.00));
    assert!(request.reference.is_none());
  }
}
