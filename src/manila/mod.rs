mod config_data;
mod metallb;
mod volumes;

pub use config_data::ConfigData;
pub use metallb::service_annotations;
pub use volumes::{init_volume_mounts, volume_mount, volume_mounts, volumes};

use crate::api::PropagationType;

/// Manila component the shared volume helpers tailor their output for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationScope {
    ManilaApi,
    ManilaScheduler,
    ManilaShare,
    DbSync,
}

impl PropagationScope {
    /// Propagation tags matched by the component: the global `Manila` tag and its own.
    #[must_use]
    pub fn tags(self) -> &'static [PropagationType] {
        match self {
            PropagationScope::ManilaApi => &[PropagationType::Manila, PropagationType::ManilaApi],
            PropagationScope::ManilaScheduler => &[
                PropagationType::Manila,
                PropagationType::ManilaScheduler,
            ],
            PropagationScope::ManilaShare => {
                &[PropagationType::Manila, PropagationType::ManilaShare]
            }
            PropagationScope::DbSync => &[PropagationType::Manila, PropagationType::DbSync],
        }
    }
}
