//! # Event Priority Resolution
//!
//! Determines the display ordering of a prison's scheduled events. A prison
//! may override the per-type default priorities, optionally narrowing an
//! override to an event category; categories are matched against raw
//! upstream category codes by prefix, which is what reconciles the
//! differing naming conventions of the source systems.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::models::{EventPriorityOverride, ScheduledEventType};
use crate::repository::EventPriorityRepository;

pub struct EventPriorityResolver {
    overrides: Arc<dyn EventPriorityRepository>,
}

impl EventPriorityResolver {
    pub fn new(overrides: Arc<dyn EventPriorityRepository>) -> Self {
        Self { overrides }
    }

    /// Resolve the priority for an event type, optionally narrowed by the
    /// raw category code supplied by the source system
    ///
    /// Overrides are folded in configuration order: an uncategorized
    /// override becomes the candidate only when nothing has matched yet,
    /// while a categorized override whose prefix matches the code overwrites
    /// any earlier candidate. With no match at all the event type's
    /// hard-coded default applies.
    pub async fn resolve_priority(
        &self,
        prison_code: &str,
        event_type: ScheduledEventType,
        category_code: Option<&str>,
    ) -> Result<i32> {
        let overrides = self.overrides.find_by_prison_code(prison_code).await?;

        let priority = Self::fold_overrides(&overrides, event_type, category_code)
            .unwrap_or_else(|| event_type.default_priority());

        debug!(
            prison_code = %prison_code,
            event_type = %event_type,
            category_code = category_code,
            priority = priority,
            "Priority resolved"
        );

        Ok(priority)
    }

    fn fold_overrides(
        overrides: &[EventPriorityOverride],
        event_type: ScheduledEventType,
        category_code: Option<&str>,
    ) -> Option<i32> {
        let mut candidate: Option<i32> = None;

        for entry in overrides.iter().filter(|o| o.event_type == event_type) {
            match (&entry.category, category_code) {
                (None, _) => {
                    if candidate.is_none() {
                        candidate = Some(entry.priority);
                    }
                }
                (Some(category), Some(code)) => {
                    if category.matches(code) {
                        candidate = Some(entry.priority);
                    }
                }
                (Some(_), None) => {}
            }
        }

        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventCategory;

    fn entry(
        event_type: ScheduledEventType,
        category: Option<EventCategory>,
        priority: i32,
    ) -> EventPriorityOverride {
        EventPriorityOverride {
            prison_code: "MDI".to_string(),
            event_type,
            category,
            priority,
        }
    }

    #[test]
    fn test_no_overrides_falls_back_to_default() {
        assert_eq!(
            EventPriorityResolver::fold_overrides(&[], ScheduledEventType::Appointment, None),
            None
        );
    }

    #[test]
    fn test_category_match_wins() {
        let overrides = vec![entry(
            ScheduledEventType::Activity,
            Some(EventCategory::Education),
            1,
        )];

        assert_eq!(
            EventPriorityResolver::fold_overrides(
                &overrides,
                ScheduledEventType::Activity,
                Some("EDU_CLASS_101")
            ),
            Some(1)
        );
        assert_eq!(
            EventPriorityResolver::fold_overrides(
                &overrides,
                ScheduledEventType::Activity,
                Some("GYM_SESSION")
            ),
            None
        );
    }

    #[test]
    fn test_categorized_match_overwrites_uncategorized_candidate() {
        let overrides = vec![
            entry(ScheduledEventType::Activity, None, 7),
            entry(
                ScheduledEventType::Activity,
                Some(EventCategory::FaithSpirituality),
                2,
            ),
        ];

        assert_eq!(
            EventPriorityResolver::fold_overrides(
                &overrides,
                ScheduledEventType::Activity,
                Some("FAI_CHAPEL")
            ),
            Some(2)
        );
        // No category supplied: the uncategorized override stands
        assert_eq!(
            EventPriorityResolver::fold_overrides(&overrides, ScheduledEventType::Activity, None),
            Some(7)
        );
    }

    #[test]
    fn test_overrides_for_other_event_types_are_ignored() {
        let overrides = vec![entry(ScheduledEventType::Visit, None, 1)];

        assert_eq!(
            EventPriorityResolver::fold_overrides(
                &overrides,
                ScheduledEventType::Appointment,
                None
            ),
            None
        );
    }

    #[tokio::test]
    async fn test_resolver_applies_default_through_repository() {
        use crate::test_helpers::InMemoryEventPriorityRepository;

        let repository = Arc::new(InMemoryEventPriorityRepository::new(vec![]));
        let resolver = EventPriorityResolver::new(repository);

        let priority = resolver
            .resolve_priority("MDI", ScheduledEventType::Appointment, None)
            .await
            .unwrap();
        assert_eq!(priority, 5);
    }
}
