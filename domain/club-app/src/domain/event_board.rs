use tokio::sync::RwLock;

use crate::domain::{EventId, event::Event};

/// Local, per-session view of the two event lists.
///
/// Mutations made through this process are applied here optimistically right
/// after the store write succeeds; a refresh replaces the view with the store
/// contents. A newly created event is prepended, so until the next refresh
/// the upcoming view is not necessarily in date order.
pub struct EventBoard {
    upcoming: RwLock<Option<Vec<Event>>>,
    past: RwLock<Option<Vec<Event>>>,
}

impl EventBoard {
    pub fn new() -> Self {
        Self {
            upcoming: RwLock::new(None),
            past: RwLock::new(None),
        }
    }

    pub async fn upcoming(&self) -> Option<Vec<Event>> {
        self.upcoming.read().await.clone()
    }

    pub async fn set_upcoming(&self, events: Vec<Event>) {
        *self.upcoming.write().await = Some(events);
    }

    /// No-op while the upcoming view has not been loaded yet; the first load
    /// will pick the event up from the store.
    pub async fn prepend_upcoming(&self, event: Event) {
        if let Some(events) = self.upcoming.write().await.as_mut() {
            events.retain(|e| e.id != event.id);
            events.insert(0, event);
        }
    }

    pub async fn replace_upcoming(&self, event: Event) {
        if let Some(events) = self.upcoming.write().await.as_mut() {
            if let Some(slot) = events.iter_mut().find(|e| e.id == event.id) {
                *slot = event;
            }
        }
    }

    pub async fn remove_upcoming(&self, id: &EventId) {
        if let Some(events) = self.upcoming.write().await.as_mut() {
            events.retain(|e| &e.id != id);
        }
    }

    pub async fn past(&self) -> Option<Vec<Event>> {
        self.past.read().await.clone()
    }

    pub async fn set_past(&self, events: Vec<Event>) {
        *self.past.write().await = Some(events);
    }

    /// Moves a promoted event between the two views.
    pub async fn record_promoted(&self, event: &Event) {
        self.remove_upcoming(&event.id).await;
        if let Some(events) = self.past.write().await.as_mut() {
            events.retain(|e| e.id != event.id);
            let index = events.partition_point(|e| e.date <= event.date);
            events.insert(index, event.clone());
        }
    }
}

impl Default for EventBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn event(id: &str, day: u32) -> Event {
        Event {
            id: EventId::new(id),
            title: format!("Event {}", id),
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            description: String::new(),
        }
    }

    fn ids(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_prepend_keeps_new_event_at_head() {
        let board = EventBoard::new();
        board.set_upcoming(vec![event("a", 1), event("b", 2)]).await;

        board.prepend_upcoming(event("c", 30)).await;

        let upcoming = board.upcoming().await.unwrap();
        assert_eq!(ids(&upcoming), vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_prepend_before_first_load_is_ignored() {
        let board = EventBoard::new();
        board.prepend_upcoming(event("c", 30)).await;
        assert!(board.upcoming().await.is_none());
    }

    #[tokio::test]
    async fn test_record_promoted_moves_between_views() {
        let board = EventBoard::new();
        board.set_upcoming(vec![event("a", 1), event("b", 2)]).await;
        board.set_past(vec![event("x", 1), event("y", 3)]).await;

        board.record_promoted(&event("b", 2)).await;
        board.record_promoted(&event("b", 2)).await;

        assert_eq!(ids(&board.upcoming().await.unwrap()), vec!["a"]);
        assert_eq!(ids(&board.past().await.unwrap()), vec!["x", "b", "y"]);
    }
}
