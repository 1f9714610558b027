use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid region code: {0}")]
pub struct InvalidRegion(String);

// Region - Calendar code a vendor's due dates are adjusted against
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Region(String);

impl Region {
  pub fn new(code: impl Into<String>) -> Result<Self, InvalidRegion> {
    let code = code.into();
    let trimmed = code.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
      return Err(InvalidRegion(code));
    }
    Ok(Self(trimmed.to_ascii_uppercase()))
  }

  pub fn code(&self) -> &str {
    &self.0
  }
}

impl TryFrom<String> for Region {
  type Error = InvalidRegion;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Region::new(value)
  }
}

impl From<Region> for String {
  fn from(region: Region) -> Self {
    region.0
  }
}

impl fmt::Display for Region {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Net payment terms agreed with a vendor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorTerms {
  pub vendor_id: String,
  pub net_days: u32,
  pub region: Region,
}

impl VendorTerms {
  pub fn new(vendor_id: impl Into<String>, net_days: u32, region: Region) -> Self {
    Self {
      vendor_id: vendor_id.into(),
      net_days,
      region,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_region() {
    assert_eq!(Region::new(" us ").unwrap().code(), "US");
    assert_eq!(Region::new("de-by").unwrap().code(), "DE-BY");
    assert!(Region::new("").is_err());
    assert!(Region::new("U S").is_err());
  }

  #[test]
  fn test_region_deserializes_through_validation() {
    let region: Region = serde_json::from_str("\"gb\"").unwrap();
    assert_eq!(region.code(), "GB");
    assert!(serde_json::from_str::<Region>("\"\"").is_err());
  }
}
