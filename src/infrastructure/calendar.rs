use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::{HashMap, HashSet};

use crate::domain::due_date::{CalendarError, HolidayLookup, Region};

/// Weekend days and dated holidays of one region
#[derive(Debug, Clone)]
pub struct RegionCalendar {
  region: Region,
  weekend: HashSet<Weekday>,
  holidays: HashMap<NaiveDate, Option<String>>,
}

impl RegionCalendar {
  pub fn new(region: Region, weekend: impl IntoIterator<Item = Weekday>) -> Self {
    Self {
      region,
      weekend: weekend.into_iter().collect(),
      holidays: HashMap::new(),
    }
  }

  pub fn with_holiday(mut self, date: NaiveDate, name: Option<&str>) -> Self {
    self.holidays.insert(date, name.map(str::to_string));
    self
  }

  pub fn region(&self) -> &Region {
    &self.region
  }

  pub fn is_holiday(&self, date: NaiveDate) -> bool {
    self.holidays.contains_key(&date)
  }

  pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
    self.holidays.get(&date).and_then(|name| name.as_deref())
  }

  pub fn is_business_day(&self, date: NaiveDate) -> bool {
    !self.weekend.contains(&date.weekday()) && !self.is_holiday(date)
  }
}

/// Holiday lookup over a fixed set of configured regions
#[derive(Debug, Default)]
pub struct RegionalHolidayCalendar {
  regions: HashMap<Region, RegionCalendar>,
}

impl RegionalHolidayCalendar {
  pub fn new(calendars: impl IntoIterator<Item = RegionCalendar>) -> Self {
    Self {
      regions: calendars
        .into_iter()
        .map(|calendar| (calendar.region.clone(), calendar))
        .collect(),
    }
  }
}

#[async_trait]
impl HolidayLookup for RegionalHolidayCalendar {
  async fn is_business_day(&self, date: NaiveDate, region: &Region) -> Result<bool, CalendarError> {
    let calendar = self
      .regions
      .get(region)
      .ok_or_else(|| CalendarError::UnknownRegion(region.clone()))?;

    if let Some(name) = calendar.holiday_name(date) {
      tracing::debug!("{} is {} in {}", date, name, region);
    }

    Ok(calendar.is_business_day(date))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn us() -> Region {
    Region::new("US").unwrap()
  }

  fn lookup() -> RegionalHolidayCalendar {
    RegionalHolidayCalendar::new([
      RegionCalendar::new(us(), [Weekday::Sat, Weekday::Sun])
        .with_holiday(date(2024, 7, 4), Some("Independence Day"))
        .with_holiday(date(2024, 11, 29), None),
      RegionCalendar::new(Region::new("IL").unwrap(), [Weekday::Fri, Weekday::Sat]),
    ])
  }

  #[tokio::test]
  async fn test_weekdays_are_business_days() {
    // 2024-07-03 is a Wednesday
    assert!(lookup().is_business_day(date(2024, 7, 3), &us()).await.unwrap());
  }

  #[tokio::test]
  async fn test_weekends_and_holidays_are_closed() {
    let lookup = lookup();
    assert!(!lookup.is_business_day(date(2024, 7, 4), &us()).await.unwrap());
    assert!(!lookup.is_business_day(date(2024, 11, 29), &us()).await.unwrap());
    assert!(!lookup.is_business_day(date(2024, 7, 6), &us()).await.unwrap());
    assert!(!lookup.is_business_day(date(2024, 7, 7), &us()).await.unwrap());
  }

  #[tokio::test]
  async fn test_weekend_is_per_region() {
    let lookup = lookup();
    let il = Region::new("il").unwrap();
    // Friday 2024-07-05 and Sunday 2024-07-07
    assert!(!lookup.is_business_day(date(2024, 7, 5), &il).await.unwrap());
    assert!(lookup.is_business_day(date(2024, 7, 7), &il).await.unwrap());
  }

  #[tokio::test]
  async fn test_unknown_region() {
    let err = lookup()
      .is_business_day(date(2024, 7, 3), &Region::new("FR").unwrap())
      .await
      .unwrap_err();
    assert_eq!(err, CalendarError::UnknownRegion(Region::new("FR").unwrap()));
  }

  #[test]
  fn test_holiday_names() {
    let calendar = RegionCalendar::new(us(), [Weekday::Sat, Weekday::Sun]).with_holiday(date(2024, 7, 4), Some("Independence Day"));
    assert_eq!(calendar.holiday_name(date(2024, 7, 4)), Some("Independence Day"));
    assert!(calendar.is_holiday(date(2024, 7, 4)));
    assert!(!calendar.is_holiday(date(2024, 7, 5)));
  }
}
