use k8s_openapi::api::core::v1::{ConfigMapVolumeSource, Volume, VolumeMount};

use crate::{
    api::ManilaExtraVolMounts,
    manila::{self, PropagationScope},
};

const CONFIG_DATA_CUSTOM_VOLUME: &str = "config-data-custom";
const CONFIG_DATA_CUSTOM_MOUNT_PATH: &str = "/var/lib/config-data/custom";
const CONFIG_DATA_CUSTOM_DEFAULT_MODE: i32 = 0o640;

/// Name of the config map holding the scheduler's custom configuration.
#[must_use]
pub fn config_data_name(name: &str) -> String {
    format!("{name}-config-data")
}

/// Pod volumes of the scheduler: the shared Manila volumes followed by `config-data-custom`.
#[must_use]
pub fn volumes(parent_name: &str, name: &str, extra_vol: &[ManilaExtraVolMounts]) -> Vec<Volume> {
    let mut volumes = manila::volumes(parent_name, extra_vol, PropagationScope::ManilaScheduler);
    volumes.push(Volume {
        name: CONFIG_DATA_CUSTOM_VOLUME.into(),
        config_map: Some(ConfigMapVolumeSource {
            default_mode: Some(CONFIG_DATA_CUSTOM_DEFAULT_MODE),
            name: config_data_name(name),
            ..Default::default()
        }),
        ..Default::default()
    });
    volumes
}

/// Init container mounts of the scheduler: the shared init mounts followed by `config-data-custom`.
#[must_use]
pub fn init_volume_mounts(extra_vol: &[ManilaExtraVolMounts]) -> Vec<VolumeMount> {
    let mut volume_mounts =
        manila::init_volume_mounts(extra_vol, PropagationScope::ManilaScheduler);
    volume_mounts.push(manila::volume_mount(
        CONFIG_DATA_CUSTOM_VOLUME,
        CONFIG_DATA_CUSTOM_MOUNT_PATH,
        true,
    ));
    volume_mounts
}

/// Service container mounts of the scheduler.
#[must_use]
pub fn volume_mounts(extra_vol: &[ManilaExtraVolMounts]) -> Vec<VolumeMount> {
    manila::volume_mounts(extra_vol, PropagationScope::ManilaScheduler)
}
