//! Calendar event store implementations and date-grouping helpers.
//!
//! The planner groups events for display by exact date-string equality
//! (`YYYY-MM-DD`) — no timezone arithmetic, no range queries.

pub mod file_store;
pub mod in_memory;

pub use file_store::FileStore;
pub use in_memory::InMemoryStore;

use std::collections::BTreeMap;

use kabeuchi_core::CalendarEvent;

/// The events falling on one exact date.
pub fn events_on<'a>(events: &'a [CalendarEvent], date: &str) -> Vec<&'a CalendarEvent> {
    events.iter().filter(|e| e.date == date).collect()
}

/// All events bucketed by date string, dates ascending.
pub fn group_by_date(events: &[CalendarEvent]) -> BTreeMap<&str, Vec<&CalendarEvent>> {
    let mut grouped: BTreeMap<&str, Vec<&CalendarEvent>> = BTreeMap::new();
    for event in events {
        grouped.entry(event.date.as_str()).or_default().push(event);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use kabeuchi_core::EventStatus;

    fn event(date: &str, title: &str) -> CalendarEvent {
        CalendarEvent::new(date, title, "", EventStatus::Draft)
    }

    #[test]
    fn events_on_matches_exact_date_strings() {
        let events = vec![
            event("2026-08-07", "一次面談"),
            event("2026-08-08", "二次面談"),
            event("2026-08-07", "振り返り"),
        ];
        let today = events_on(&events, "2026-08-07");
        assert_eq!(today.len(), 2);
        assert!(events_on(&events, "2026-08-09").is_empty());
    }

    #[test]
    fn grouping_sorts_dates_ascending() {
        let events = vec![
            event("2026-09-01", "後"),
            event("2026-08-07", "先"),
        ];
        let grouped = group_by_date(&events);
        let dates: Vec<_> = grouped.keys().copied().collect();
        assert_eq!(dates, ["2026-08-07", "2026-09-01"]);
    }
}
