use chrono::{NaiveDate, Weekday};
use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

use crate::domain::due_date::{AdjustmentPolicy, Region, VendorTerms};
use crate::infrastructure::calendar::RegionCalendar;

// Default value functions
fn default_max_adjustment_days() -> u32 {
  AdjustmentPolicy::default().max_adjustment_days
}

fn default_min_confidence() -> f32 {
  crate::application::intake::ocr_extraction::DEFAULT_MIN_CONFIDENCE
}

fn default_max_concurrency() -> usize {
  8
}

fn default_weekend() -> Vec<Weekday> {
  vec![Weekday::Sat, Weekday::Sun]
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub due_date: DueDateConfig,
  #[serde(default)]
  pub ocr: OcrConfig,
  #[serde(default)]
  pub intake: IntakeConfig,
  #[serde(default)]
  pub freight: FreightConfig,
  pub calendar: CalendarConfig,
  #[serde(default)]
  pub vendors: Vec<VendorConfig>,
}

/// Due date adjustment configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DueDateConfig {
  #[serde(default = "default_max_adjustment_days")]
  pub max_adjustment_days: u32,
}

impl Default for DueDateConfig {
  fn default() -> Self {
    Self {
      max_adjustment_days: default_max_adjustment_days(),
    }
  }
}

/// OCR intake configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
  /// Fields extracted with a lower confidence are sent back for review
  #[serde(default = "default_min_confidence")]
  pub min_confidence: f32,
}

impl Default for OcrConfig {
  fn default() -> Self {
    Self {
      min_confidence: default_min_confidence(),
    }
  }
}

/// Batch processing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
  #[serde(default = "default_max_concurrency")]
  pub max_concurrency: usize,
}

impl Default for IntakeConfig {
  fn default() -> Self {
    Self {
      max_concurrency: default_max_concurrency(),
    }
  }
}

/// Freight integration configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FreightConfig {
  /// Carrier code to vendor id
  #[serde(default)]
  pub carrier_vendors: HashMap<String, String>,
}

/// Holiday calendar configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
  /// Region used for vendors that do not name one
  pub default_region: String,
  #[serde(default)]
  pub regions: Vec<RegionConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionConfig {
  pub code: String,
  #[serde(default = "default_weekend")]
  pub weekend: Vec<Weekday>,
  #[serde(default)]
  pub holidays: Vec<HolidayConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HolidayConfig {
  pub date: NaiveDate,
  #[serde(default)]
  pub name: Option<String>,
}

/// Vendor payment terms
#[derive(Debug, Clone, Deserialize)]
pub struct VendorConfig {
  pub vendor_id: String,
  pub net_days: u32,
  #[serde(default)]
  pub region: Option<String>,
}

fn parse_region(code: &str) -> Result<Region, ConfigError> {
  Region::new(code).map_err(|e| ConfigError::Message(e.to_string()))
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with APFLOW_ prefix
  ///
  /// # Environment Variables
  ///
  /// Environment variables use the APFLOW_ prefix and are separated by double underscores:
  /// - `APFLOW_DUE_DATE__MAX_ADJUSTMENT_DAYS=30`
  /// - `APFLOW_OCR__MIN_CONFIDENCE=0.85`
  /// - `APFLOW_INTAKE__MAX_CONCURRENCY=16`
  /// - `APFLOW_CALENDAR__DEFAULT_REGION=DE`
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if the default file is missing, a file is not
  /// valid TOML, or a value has the wrong type.
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      // Use double underscore as separator: APFLOW_OCR__MIN_CONFIDENCE=0.9
      .add_source(
        Environment::with_prefix("APFLOW")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }

  pub fn adjustment_policy(&self) -> AdjustmentPolicy {
    AdjustmentPolicy {
      max_adjustment_days: self.due_date.max_adjustment_days,
    }
  }

  /// Vendor terms with the default region filled in
  pub fn vendor_terms(&self) -> Result<Vec<VendorTerms>, ConfigError> {
    let default_region = parse_region(&self.calendar.default_region)?;

    self
      .vendors
      .iter()
      .map(|vendor| {
        let region = match &vendor.region {
          Some(code) => parse_region(code)?,
          None => default_region.clone(),
        };
        Ok(VendorTerms::new(vendor.vendor_id.trim(), vendor.net_days, region))
      })
      .collect()
  }

  pub fn region_calendars(&self) -> Result<Vec<RegionCalendar>, ConfigError> {
    self
      .calendar
      .regions
      .iter()
      .map(|region| {
        let calendar = region.holidays.iter().fold(
          RegionCalendar::new(parse_region(&region.code)?, region.weekend.iter().copied()),
          |calendar, holiday| calendar.with_holiday(holiday.date, holiday.name.as_deref()),
        );
        Ok(calendar)
      })
      .collect()
  }
}
