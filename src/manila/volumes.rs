use k8s_openapi::api::core::v1::{
    ConfigMapVolumeSource, EmptyDirVolumeSource, HostPathVolumeSource, Volume, VolumeMount,
};

use crate::api::ManilaExtraVolMounts;

use super::PropagationScope;

const SCRIPTS_VOLUME_DEFAULT_MODE: i32 = 0o755;
const CONFIG_VOLUME_DEFAULT_MODE: i32 = 0o640;

/// Volumes shared by every Manila component, followed by the extra volumes propagated to `scope`.
#[must_use]
pub fn volumes(
    parent_name: &str,
    extra_vol: &[ManilaExtraVolMounts],
    scope: PropagationScope,
) -> Vec<Volume> {
    let mut volumes = vec![
        Volume {
            name: "scripts".into(),
            config_map: Some(ConfigMapVolumeSource {
                default_mode: Some(SCRIPTS_VOLUME_DEFAULT_MODE),
                name: format!("{parent_name}-scripts"),
                ..Default::default()
            }),
            ..Default::default()
        },
        Volume {
            name: "config-data".into(),
            config_map: Some(ConfigMapVolumeSource {
                default_mode: Some(CONFIG_VOLUME_DEFAULT_MODE),
                name: format!("{parent_name}-config-data"),
                ..Default::default()
            }),
            ..Default::default()
        },
        Volume {
            name: "config-data-merged".into(),
            empty_dir: Some(EmptyDirVolumeSource::default()),
            ..Default::default()
        },
        Volume {
            name: "etc-machine-id".into(),
            host_path: Some(HostPathVolumeSource {
                path: "/etc/machine-id".into(),
                ..Default::default()
            }),
            ..Default::default()
        },
    ];

    volumes.extend(
        extra_vol
            .iter()
            .flat_map(|extra| extra.propagate(scope.tags()))
            .flat_map(|vol_mounts| vol_mounts.volumes.iter())
            .map(crate::api::VolumeSource::to_volume),
    );

    volumes
}

/// Mounts of the init container, followed by the extra mounts propagated to `scope`.
#[must_use]
pub fn init_volume_mounts(
    extra_vol: &[ManilaExtraVolMounts],
    scope: PropagationScope,
) -> Vec<VolumeMount> {
    let mut volume_mounts = vec![
        volume_mount("scripts", "/usr/local/bin/container-scripts", true),
        volume_mount("config-data", "/var/lib/config-data/default", true),
        volume_mount("config-data-merged", "/var/lib/config-data/merged", false),
    ];
    volume_mounts.extend(extra_volume_mounts(extra_vol, scope));
    volume_mounts
}

/// Mounts of the service container, followed by the extra mounts propagated to `scope`.
#[must_use]
pub fn volume_mounts(
    extra_vol: &[ManilaExtraVolMounts],
    scope: PropagationScope,
) -> Vec<VolumeMount> {
    let mut volume_mounts = vec![
        volume_mount("scripts", "/usr/local/bin/container-scripts", true),
        volume_mount("config-data-merged", "/var/lib/config-data/merged", false),
        volume_mount("etc-machine-id", "/etc/machine-id", true),
    ];
    volume_mounts.extend(extra_volume_mounts(extra_vol, scope));
    volume_mounts
}

fn extra_volume_mounts(
    extra_vol: &[ManilaExtraVolMounts],
    scope: PropagationScope,
) -> impl Iterator<Item = VolumeMount> {
    extra_vol
        .iter()
        .flat_map(move |extra| extra.propagate(scope.tags()))
        .flat_map(|vol_mounts| vol_mounts.mounts.iter().cloned())
}

/// Mount of volume `name` at `mount_path`.
#[must_use]
pub fn volume_mount(name: &str, mount_path: &str, read_only: bool) -> VolumeMount {
    VolumeMount {
        mount_path: mount_path.into(),
        name: name.into(),
        read_only: Some(read_only),
        ..Default::default()
    }
}
