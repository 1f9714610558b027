use async_trait::async_trait;
use chrono::NaiveDate;

use super::errors::{CalendarError, DirectoryError};
use super::value_objects::{Region, VendorTerms};

#[async_trait]
pub trait VendorTermsLookup: Send + Sync {
  async fn find_by_id(&self, vendor_id: &str) -> Result<Option<VendorTerms>, DirectoryError>;
}

#[async_trait]
pub trait HolidayLookup: Send + Sync {
  /// Returns `false` for holidays and any other day the region does not do business on.
  async fn is_business_day(&self, date: NaiveDate, region: &Region) -> Result<bool, CalendarError>;
}
