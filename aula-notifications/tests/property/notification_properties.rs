use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use proptest::prelude::*;

use aula_core::errors::StreamError;
use aula_fixtures::notification_at;
use aula_notifications::{
    group_notifications, HeuristicGroupKey, ReconnectController, ReconnectDecision,
    ReconnectPolicy,
};

const TITLES: &[&str] = &[
    "Nueva tarea de Matemáticas",
    "Guía de Historia",
    "Reunión de apoderados",
    "Reunión de curso",
    "Mantención",
    "Nota publicada",
];
const CATEGORIES: &[Option<&str>] = &[
    Some("academic"),
    Some("meeting"),
    Some("system"),
    Some("grades"),
    None,
];

proptest! {
    #[test]
    fn groups_always_have_at_least_two_members(
        picks in prop::collection::vec((0usize..6, 0usize..5, 0i64..500), 0..40),
    ) {
        let list: Vec<_> = picks
            .iter()
            .map(|(t, c, age)| notification_at(TITLES[*t], CATEGORIES[*c], *age))
            .collect();

        let groups = group_notifications(&list, &HeuristicGroupKey);
        let grouped: usize = groups.iter().map(|g| g.len()).sum();
        prop_assert!(grouped <= list.len());
        for g in &groups {
            prop_assert!(g.len() >= 2);
            prop_assert!(g.notifications.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        }
        prop_assert!(groups.windows(2).all(|w| w[0].latest_created_at >= w[1].latest_created_at));
    }

    #[test]
    fn closed_errors_get_exactly_max_attempts_retries(
        max_attempts in 1u32..6,
        transient_between in prop::collection::vec(0usize..3, 10),
    ) {
        let policy = ReconnectPolicy { max_attempts, ..ReconnectPolicy::default() };
        let mut controller = ReconnectController::new(policy, Arc::new(AtomicBool::new(false)));

        let mut retries = 0;
        let mut gave_up = false;
        for transient in transient_between {
            for _ in 0..transient {
                let d = controller.on_error(&StreamError::Transient { reason: "blip".into() });
                prop_assert_eq!(d, ReconnectDecision::Ignore);
            }
            match controller.on_error(&StreamError::Closed) {
                ReconnectDecision::Retry { delay, .. } => {
                    prop_assert!(!gave_up);
                    prop_assert!(delay <= policy.max);
                    retries += 1;
                }
                ReconnectDecision::GiveUp { .. } => gave_up = true,
                other => prop_assert!(false, "unexpected decision {:?}", other),
            }
        }
        prop_assert_eq!(retries, max_attempts.min(10));
        prop_assert_eq!(gave_up, max_attempts < 10);
    }
}
