//! Date → items lookup for the displayed month.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::date::ISO_DATE_FORMAT;
use crate::grid::YearMonth;
use crate::models::ScheduleItem;

/// Items of the displayed month bucketed by date. Rebuilt from scratch
/// whenever the item list or the displayed month changes.
#[derive(Debug, Clone, Default)]
pub struct DateIndex {
    by_date: HashMap<NaiveDate, Vec<ScheduleItem>>,
}

impl DateIndex {
    pub fn build(items: &[ScheduleItem], period: YearMonth) -> Self {
        let mut by_date: HashMap<NaiveDate, Vec<ScheduleItem>> = HashMap::new();
        for item in items.iter().filter(|i| period.contains(i.date)) {
            by_date.entry(item.date).or_default().push(item.clone());
        }
        DateIndex { by_date }
    }

    pub fn get(&self, date: NaiveDate) -> &[ScheduleItem] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Lookup by canonical `YYYY-MM-DD` key.
    pub fn get_iso(&self, iso_date: &str) -> &[ScheduleItem] {
        match NaiveDate::parse_from_str(iso_date, ISO_DATE_FORMAT) {
            Ok(date) => self.get(date),
            Err(_) => &[],
        }
    }

    /// Number of distinct dates with at least one item.
    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.by_date.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleType;

    fn item(id: &str, date: &str) -> ScheduleItem {
        ScheduleItem {
            id: id.into(),
            pet_id: "p1".into(),
            kind: ScheduleType::Walk,
            date: NaiveDate::parse_from_str(date, ISO_DATE_FORMAT).unwrap(),
        }
    }

    #[test]
    fn buckets_only_the_displayed_month() {
        let items = vec![
            item("a", "2024-06-01"),
            item("b", "2024-06-01"),
            item("c", "2024-06-30"),
            item("d", "2024-07-01"),
            item("e", "2023-06-01"),
        ];
        let index = DateIndex::build(&items, YearMonth::new(2024, 5).unwrap());

        assert_eq!(index.len(), 2);
        assert_eq!(index.item_count(), 3);
        let ids: Vec<_> = index.get_iso("2024-06-01").iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(index.get_iso("2024-07-01").is_empty());
        assert!(index.get_iso("not a date").is_empty());
    }
}
