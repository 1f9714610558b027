use chrono::{Days, NaiveDate};
use std::sync::Arc;

use super::errors::DueDateError;
use super::ports::{HolidayLookup, VendorTermsLookup};
use super::value_objects::Region;

/// How far a due date may be pushed off non-business days.
///
/// A run of consecutive holidays and weekend days is skipped as a whole; the
/// due date lands on the first business day on or after the net-terms date.
/// Needing more than `max_adjustment_days` shifts is treated as a calendar
/// fault rather than a legitimate date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustmentPolicy {
  pub max_adjustment_days: u32,
}

impl Default for AdjustmentPolicy {
  fn default() -> Self {
    Self {
      max_adjustment_days: 30,
    }
  }
}

pub struct DueDateService {
  vendor_terms: Arc<dyn VendorTermsLookup>,
  holidays: Arc<dyn HolidayLookup>,
  policy: AdjustmentPolicy,
}

impl DueDateService {
  pub fn new(vendor_terms: Arc<dyn VendorTermsLookup>, holidays: Arc<dyn HolidayLookup>) -> Self {
    Self {
      vendor_terms,
      holidays,
      policy: AdjustmentPolicy::default(),
    }
  }

  pub fn with_policy(mut self, policy: AdjustmentPolicy) -> Self {
    self.policy = policy;
    self
  }

  /// Computes the payment due date for an invoice dated `base_date`.
  ///
  /// Adds the vendor's net days as calendar days, then moves forward until
  /// the vendor's region has a business day.
  pub async fn calculate_due_date(
    &self,
    vendor_id: &str,
    base_date: NaiveDate,
  ) -> Result<NaiveDate, DueDateError> {
    let terms = self
      .vendor_terms
      .find_by_id(vendor_id)
      .await?
      .ok_or_else(|| DueDateError::VendorNotFound(vendor_id.to_string()))?;

    let candidate = base_date
      .checked_add_days(Days::new(u64::from(terms.net_days)))
      .ok_or_else(|| {
        DueDateError::HolidayLookup(format!(
          "{} plus {} days is outside the supported calendar range",
          base_date, terms.net_days
        ))
      })?;

    let due_date = self.next_business_day(candidate, &terms.region).await?;

    tracing::debug!(
      vendor_id,
      region = %terms.region,
      net_days = terms.net_days,
      %candidate,
      %due_date,
      "Calculated due date"
    );

    Ok(due_date)
  }

  async fn next_business_day(
    &self,
    candidate: NaiveDate,
    region: &Region,
  ) -> Result<NaiveDate, DueDateError> {
    let mut date = candidate;
    let mut shifted = 0;

    loop {
      if self.holidays.is_business_day(date, region).await? {
        if shifted > 0 {
          tracing::info!(
            "Due date moved from {} to {} ({} non-business days in {})",
            candidate,
            date,
            shifted,
            region
          );
        }
        return Ok(date);
      }

      if shifted >= self.policy.max_adjustment_days {
        return Err(DueDateError::HolidayLookup(format!(
          "no business day in {} within {} days after {}",
          region, self.policy.max_adjustment_days, candidate
        )));
      }

      date = date.succ_opt().ok_or_else(|| {
        DueDateError::HolidayLookup(format!(
          "ran past the end of the calendar while adjusting {}",
          candidate
        ))
      })?;
      shifted += 1;
    }
  }
}
