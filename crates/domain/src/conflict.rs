use crate::{event::EventWithParticipants, shared::entity::ID, timespan::TimeSpan};

/// Finds the events that collide with a candidate timespan.
///
/// An event is a conflict when its timespan overlaps `candidate` and at least
/// one of its participants has an external identity contained in
/// `external_ids`. An empty identity set never conflicts with anything.
/// `exclude` skips an event, used when an existing event is checked against
/// all the others.
pub fn find_conflicts<'a, I>(
    candidate: &TimeSpan,
    external_ids: &[String],
    exclude: Option<&ID>,
    events: I,
) -> Vec<EventWithParticipants>
where
    I: IntoIterator<Item = &'a EventWithParticipants>,
{
    if external_ids.is_empty() {
        return Vec::new();
    }

    events
        .into_iter()
        .filter(|e| Some(&e.event.id) != exclude)
        .filter(|e| e.event.timespan().overlaps(candidate))
        .filter(|e| e.shares_participant_with(external_ids))
        .cloned()
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Event, EventType, Participant, ParticipantRole, ParticipantWithRole};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, hour, minute, 0).unwrap()
    }

    fn span(start: (u32, u32), end: (u32, u32)) -> TimeSpan {
        TimeSpan::new(at(start.0, start.1), at(end.0, end.1)).unwrap()
    }

    fn participant(external_id: &str) -> ParticipantWithRole {
        ParticipantWithRole {
            participant: Participant::new(
                external_id.into(),
                format!("{}@example.com", external_id),
                external_id.into(),
                at(0, 0),
            ),
            role: ParticipantRole::Viewer,
        }
    }

    fn event(title: &str, timespan: TimeSpan, external_ids: &[&str]) -> EventWithParticipants {
        EventWithParticipants {
            event: Event::new(title.into(), timespan, EventType::Team, at(0, 0)).unwrap(),
            participants: external_ids.iter().map(|id| participant(id)).collect(),
        }
    }

    #[test]
    fn empty_identity_set_never_conflicts() {
        let events = vec![event("A", span((10, 0), (12, 0)), &["john"])];
        let conflicts = find_conflicts(&span((10, 0), (12, 0)), &[], None, &events);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn finds_overlapping_event_with_shared_participant() {
        let events = vec![
            event("A", span((10, 0), (12, 0)), &["john"]),
            event("B", span((10, 0), (12, 0)), &["jane"]),
            event("C", span((13, 0), (14, 0)), &["john"]),
        ];
        let conflicts =
            find_conflicts(&span((11, 0), (13, 0)), &["john".to_string()], None, &events);
        let titles = conflicts
            .iter()
            .map(|e| e.event.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn back_to_back_events_conflict() {
        let events = vec![event("A", span((10, 0), (12, 0)), &["john"])];
        let ids = vec!["john".to_string()];
        assert_eq!(
            find_conflicts(&span((12, 0), (13, 0)), &ids, None, &events).len(),
            1
        );
        assert!(find_conflicts(&span((12, 1), (13, 0)), &ids, None, &events).is_empty());
    }

    #[test]
    fn excluded_event_is_skipped() {
        let events = vec![event("A", span((10, 0), (12, 0)), &["john"])];
        let ids = vec!["john".to_string()];
        let conflicts = find_conflicts(
            &span((10, 0), (12, 0)),
            &ids,
            Some(&events[0].event.id),
            &events,
        );
        assert!(conflicts.is_empty());
    }
}
