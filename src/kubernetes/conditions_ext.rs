use k8s_openapi::apimachinery::pkg::apis::meta::v1::Condition;

pub trait ConditionsExt {
    /// Overlays `other` on `self` by condition type.
    ///
    /// A condition whose status, reason and message are unchanged keeps its
    /// original `last_transition_time`.
    fn merge_from(&self, other: &Self) -> Self;
}

impl ConditionsExt for Vec<Condition> {
    fn merge_from(&self, other: &Self) -> Self {
        let unchanged = |current: &Condition, next: &Condition| {
            current.status == next.status
                && current.reason == next.reason
                && current.message == next.message
        };

        let mut results: Vec<_> = self
            .iter()
            .map(|current| {
                match other.iter().find(|next| next.type_ == current.type_) {
                    Some(next) if !unchanged(current, next) => next.clone(),
                    _ => current.clone(),
                }
            })
            .collect();

        results.extend(
            other
                .iter()
                .filter(|next| !self.iter().any(|current| current.type_ == next.type_))
                .cloned(),
        );

        results
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::{
        apimachinery::pkg::apis::meta::v1::{Condition, Time},
        chrono::{TimeZone, Utc},
    };

    use super::ConditionsExt;

    fn condition(type_: &str, status: &str, reason: &str, seconds: i64) -> Condition {
        Condition {
            last_transition_time: Time(Utc.timestamp_opt(seconds, 0).unwrap()),
            message: String::new(),
            observed_generation: None,
            reason: reason.into(),
            status: status.into(),
            type_: type_.into(),
        }
    }

    #[test]
    fn unchanged_condition_keeps_transition_time() {
        // arrange
        let current = vec![condition("Ready", "True", "Ready", 1)];
        let next = vec![condition("Ready", "True", "Ready", 2)];

        // act
        let merged = current.merge_from(&next);

        // assert
        assert_eq!(merged, current);
    }

    #[test]
    fn changed_condition_is_replaced() {
        // arrange
        let current = vec![
            condition("ManilaOwner", "False", "OwnerNotFound", 1),
            condition("Other", "True", "Kept", 1),
        ];
        let next = vec![
            condition("ManilaOwner", "True", "OwnerFound", 2),
            condition("Ready", "True", "Ready", 2),
        ];

        // act
        let merged = current.merge_from(&next);

        // assert
        assert_eq!(
            merged,
            vec![
                condition("ManilaOwner", "True", "OwnerFound", 2),
                condition("Other", "True", "Kept", 1),
                condition("Ready", "True", "Ready", 2),
            ]
        );
    }
}
