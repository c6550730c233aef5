//! Due-card selection.

use chrono::{DateTime, Utc};

use crate::types::Flashcard;

/// Select the next due card from a deck.
///
/// A card is due when its due date is at or before `now`; never-reviewed
/// cards are due immediately and sort before any dated card. Ordering is
/// oldest-due first with ties broken by creation time, so repeated calls
/// over an unchanged deck return the same card. `None` means no card is due,
/// which signals session completion rather than an error.
pub fn select_next_due<'a, I>(cards: I, now: DateTime<Utc>) -> Option<&'a Flashcard>
where
    I: IntoIterator<Item = &'a Flashcard>,
{
    cards
        .into_iter()
        .filter(|card| card.srs.is_due(now))
        .min_by_key(|card| (card.srs.due_date.unwrap_or(DateTime::<Utc>::MIN_UTC), card.created_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap()
    }

    fn card_due(front: &str, due_offset_days: i64, created_offset_days: i64) -> Flashcard {
        let mut card = Flashcard::new(front, "answer", now() + Duration::days(created_offset_days));
        card.srs.due_date = Some(now() + Duration::days(due_offset_days));
        card
    }

    #[test]
    fn returns_earliest_due_card() {
        let deck = vec![
            card_due("a", -1, -30),
            card_due("b", -3, -30),
            card_due("c", 2, -30),
        ];
        let next = select_next_due(&deck, now()).unwrap();
        assert_eq!(next.front, "b");
    }

    #[test]
    fn never_reviewed_cards_come_first() {
        let mut fresh = Flashcard::new("fresh", "answer", now() - Duration::days(1));
        fresh.srs.due_date = None;
        let deck = vec![card_due("overdue", -10, -30), fresh];
        let next = select_next_due(&deck, now()).unwrap();
        assert_eq!(next.front, "fresh");
    }

    #[test]
    fn ties_broken_by_creation_time() {
        let deck = vec![card_due("newer", -2, -5), card_due("older", -2, -20)];
        let next = select_next_due(&deck, now()).unwrap();
        assert_eq!(next.front, "older");
    }

    #[test]
    fn none_when_nothing_is_due() {
        let deck = vec![card_due("a", 1, -30), card_due("b", 5, -30)];
        assert!(select_next_due(&deck, now()).is_none());
        assert!(select_next_due(&[], now()).is_none());
    }

    #[test]
    fn selection_is_deterministic() {
        let deck = vec![
            card_due("a", -2, -10),
            card_due("b", -2, -10),
            card_due("c", -1, -10),
        ];
        let first = select_next_due(&deck, now()).unwrap().id;
        for _ in 0..10 {
            assert_eq!(select_next_due(&deck, now()).unwrap().id, first);
        }
    }
}
