use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::due_date::{DirectoryError, VendorTerms, VendorTermsLookup};

/// Vendor terms loaded once from configuration
#[derive(Debug, Default)]
pub struct ConfiguredVendorDirectory {
  terms: HashMap<String, VendorTerms>,
}

impl ConfiguredVendorDirectory {
  pub fn new(terms: impl IntoIterator<Item = VendorTerms>) -> Self {
    let terms: HashMap<_, _> = terms
      .into_iter()
      .map(|terms| (terms.vendor_id.clone(), terms))
      .collect();
    tracing::debug!("Vendor directory holds {} vendors", terms.len());
    Self { terms }
  }

  pub fn len(&self) -> usize {
    self.terms.len()
  }

  pub fn is_empty(&self) -> bool {
    self.terms.is_empty()
  }
}

#[async_trait]
impl VendorTermsLookup for ConfiguredVendorDirectory {
  async fn find_by_id(&self, vendor_id: &str) -> Result<Option<VendorTerms>, DirectoryError> {
    Ok(self.terms.get(vendor_id.trim()).cloned())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::due_date::Region;

  #[tokio::test]
  async fn test_find_by_id() {
    let us = Region::new("US").unwrap();
    let directory = ConfiguredVendorDirectory::new([
      VendorTerms::new("V1", 30, us.clone()),
      VendorTerms::new("V2", 0, us),
    ]);

    assert_eq!(directory.len(), 2);
    let terms = directory.find_by_id("V1").await.unwrap().unwrap();
    assert_eq!(terms.net_days, 30);
    assert_eq!(directory.find_by_id(" V2 ").await.unwrap().unwrap().net_days, 0);
    assert!(directory.find_by_id("v1").await.unwrap().is_none());
    assert!(ConfiguredVendorDirectory::default().is_empty());
  }
}
