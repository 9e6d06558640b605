use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

use crate::domain::{EventId, RepoError, RepoRetrieveError, RepoUpdateError};

/// Number of full days that must pass after an event's date before it is
/// moved to the past collection.
pub const PROMOTION_GRACE_DAYS: i64 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventStatus {
    Upcoming,
    Past,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::Upcoming => write!(f, "upcoming"),
            EventStatus::Past => write!(f, "past"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    pub description: String,
}

impl Event {
    /// The instant from which the event is eligible for promotion:
    /// midnight (UTC) of its date plus the grace period.
    ///
    /// `None` when that instant lies beyond the representable range, in which
    /// case the event never expires.
    pub fn promotion_due_at(&self) -> Option<DateTime<Utc>> {
        promotion_due_on(self.date)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.promotion_due_at().is_some_and(|due| now >= due)
    }
}

fn promotion_due_on(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .checked_add_signed(TimeDelta::days(PROMOTION_GRACE_DAYS))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidEventError {
    #[error("event title must not be empty")]
    EmptyTitle,
    #[error("event date {0} is out of range")]
    DateOutOfRange(NaiveDate),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    pub description: String,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date,
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), InvalidEventError> {
        validate_title(&self.title)?;
        validate_date(self.date)
    }

    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            date: self.date,
            description: self.description,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl EventPatch {
    pub fn validate(&self) -> Result<(), InvalidEventError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(date) = self.date {
            validate_date(date)?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), InvalidEventError> {
    if title.trim().is_empty() {
        return Err(InvalidEventError::EmptyTitle);
    }
    Ok(())
}

fn validate_date(date: NaiveDate) -> Result<(), InvalidEventError> {
    match promotion_due_on(date) {
        Some(_) => Ok(()),
        None => Err(InvalidEventError::DateOutOfRange(date)),
    }
}

/// Stable ascending sort by date; events sharing a date keep their relative order.
pub fn sort_by_date(events: &mut [Event]) {
    events.sort_by_key(|event| event.date);
}

#[async_trait::async_trait]
pub trait EventRepository {
    async fn get_events(&self, status: EventStatus) -> Result<Vec<Event>, RepoError>;
    async fn get_upcoming_event(&self, id: &EventId) -> Result<Event, RepoRetrieveError>;
    async fn create_upcoming_event(&self, draft: &EventDraft) -> Result<Event, RepoError>;
    async fn update_upcoming_event(
        &self,
        id: &EventId,
        patch: &EventPatch,
    ) -> Result<Event, RepoUpdateError>;
    /// Removing an id that is not present is not an error.
    async fn remove_upcoming_event(&self, id: &EventId) -> Result<(), RepoError>;
    /// Upsert keyed by the event's id.
    async fn put_past_event(&self, event: &Event) -> Result<(), RepoError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_on(date: NaiveDate) -> Event {
        Event {
            id: EventId::new("e1"),
            title: "Chapter meeting".to_string(),
            date,
            description: String::new(),
        }
    }

    fn at(date: NaiveDate, hour: u32) -> DateTime<Utc> {
        date.and_hms_opt(hour, 0, 0).unwrap().and_utc()
    }

    #[test]
    fn test_not_expired_during_grace_day() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let event = event_on(date);

        assert!(!event.is_expired(at(date, 0)));
        assert!(!event.is_expired(at(date, 23)));
        assert!(!event.is_expired(at(date.succ_opt().unwrap(), 0) - TimeDelta::seconds(1)));
    }

    #[test]
    fn test_expired_once_full_day_elapsed() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let event = event_on(date);
        let next_day = date.succ_opt().unwrap();

        assert_eq!(event.promotion_due_at(), Some(at(next_day, 0)));
        assert!(event.is_expired(at(next_day, 0)));
        assert!(event.is_expired(at(next_day, 18)));
    }

    #[test]
    fn test_last_representable_date_never_expires() {
        let event = event_on(NaiveDate::MAX);

        assert_eq!(event.promotion_due_at(), None);
        assert!(!event.is_expired(Utc::now()));
        assert!(!event.is_expired(DateTime::<Utc>::MAX_UTC));
    }

    #[test]
    fn test_out_of_range_dates_are_rejected() {
        assert_eq!(
            EventDraft::new("Far future", NaiveDate::MAX, "").validate(),
            Err(InvalidEventError::DateOutOfRange(NaiveDate::MAX))
        );
        assert_eq!(
            EventPatch {
                date: Some(NaiveDate::MAX),
                ..Default::default()
            }
            .validate(),
            Err(InvalidEventError::DateOutOfRange(NaiveDate::MAX))
        );
        let last_valid = NaiveDate::MAX.pred_opt().unwrap();
        assert!(EventDraft::new("Far future", last_valid, "").validate().is_ok());
    }

    #[test]
    fn test_draft_requires_title() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert_eq!(
            EventDraft::new("   ", date, "").validate(),
            Err(InvalidEventError::EmptyTitle)
        );
        assert!(EventDraft::new("Bay Section", date, "").validate().is_ok());
    }

    #[test]
    fn test_patch_validates_only_given_title() {
        assert!(EventPatch::default().validate().is_ok());
        assert_eq!(
            EventPatch {
                title: Some(String::new()),
                ..Default::default()
            }
            .validate(),
            Err(InvalidEventError::EmptyTitle)
        );
    }

    #[test]
    fn test_sort_by_date_is_stable() {
        let d1 = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut events = vec![
            Event {
                id: EventId::new("a"),
                ..event_on(d1)
            },
            Event {
                id: EventId::new("b"),
                ..event_on(d2)
            },
            Event {
                id: EventId::new("c"),
                ..event_on(d1)
            },
        ];

        sort_by_date(&mut events);

        let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
