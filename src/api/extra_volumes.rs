use k8s_openapi::api::core::v1::{
    CephFSVolumeSource, ConfigMapVolumeSource, EmptyDirVolumeSource, FCVolumeSource,
    HostPathVolumeSource, ISCSIVolumeSource, NFSVolumeSource, ProjectedVolumeSource,
    SecretVolumeSource, Volume, VolumeMount,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Manila component an extra volume is propagated to.
///
/// `Manila` is the global tag and matches every component deployed by the operator.
#[derive(JsonSchema, Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropagationType {
    Manila,
    #[serde(rename = "ManilaAPI")]
    ManilaApi,
    ManilaScheduler,
    ManilaShare,
    #[serde(rename = "DBSync")]
    DbSync,
}

/// Kind of backend an extra volume belongs to.
#[derive(JsonSchema, Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ExtraVolType {
    #[default]
    Undefined,
    Ceph,
}

/// VolumeSource describes a named volume that is added to the pods of the components it is propagated to.
#[derive(JsonSchema, Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSource {
    /// Name of the volume. Must be a DNS_LABEL and unique within the pod.
    pub name: String,

    /// cephFS represents a Ceph FS mount on the host that shares a pod's lifetime.
    pub cephfs: Option<CephFSVolumeSource>,

    /// configMap represents a configMap that should populate this volume.
    pub config_map: Option<ConfigMapVolumeSource>,

    /// emptyDir represents a temporary directory that shares a pod's lifetime. More info: https://kubernetes.io/docs/concepts/storage/volumes#emptydir
    pub empty_dir: Option<EmptyDirVolumeSource>,

    /// fc represents a Fibre Channel resource that is attached to a kubelet's host machine and then exposed to the pod.
    pub fc: Option<FCVolumeSource>,

    /// hostPath represents a pre-existing file or directory on the host machine that is directly exposed to the container. More info: https://kubernetes.io/docs/concepts/storage/volumes#hostpath
    pub host_path: Option<HostPathVolumeSource>,

    /// iscsi represents an ISCSI Disk resource that is attached to a kubelet's host machine and then exposed to the pod.
    pub iscsi: Option<ISCSIVolumeSource>,

    /// nfs represents an NFS mount on the host that shares a pod's lifetime. More info: https://kubernetes.io/docs/concepts/storage/volumes#nfs
    pub nfs: Option<NFSVolumeSource>,

    /// projected items for all in one resources secrets, configmaps, and downward API.
    pub projected: Option<ProjectedVolumeSource>,

    /// secret represents a secret that should populate this volume. More info: https://kubernetes.io/docs/concepts/storage/volumes#secret
    pub secret: Option<SecretVolumeSource>,
}

impl VolumeSource {
    /// Pod volume carrying the same name and source.
    #[must_use]
    pub fn to_volume(&self) -> Volume {
        Volume {
            cephfs: self.cephfs.clone(),
            config_map: self.config_map.clone(),
            empty_dir: self.empty_dir.clone(),
            fc: self.fc.clone(),
            host_path: self.host_path.clone(),
            iscsi: self.iscsi.clone(),
            name: self.name.clone(),
            nfs: self.nfs.clone(),
            projected: self.projected.clone(),
            secret: self.secret.clone(),
            ..Default::default()
        }
    }
}

/// A group of extra volumes and mounts together with the components they are propagated to.
#[derive(JsonSchema, Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolMounts {
    /// Components the volumes and mounts are added to.
    #[serde(default)]
    pub propagation: Vec<PropagationType>,

    /// Kind of backend the volumes belong to.
    #[serde(default)]
    pub extra_vol_type: ExtraVolType,

    /// Volumes added to the pod.
    pub volumes: Vec<VolumeSource>,

    /// Mounts added to the containers.
    pub mounts: Vec<VolumeMount>,
}

impl VolMounts {
    /// True when any propagation tag of the group is part of `scope`.
    #[must_use]
    pub fn propagates_to(&self, scope: &[PropagationType]) -> bool {
        self.propagation.iter().any(|tag| scope.contains(tag))
    }
}

/// Extra volumes and mounts declared on a Manila resource.
#[derive(JsonSchema, Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManilaExtraVolMounts {
    /// Name of the group.
    pub name: Option<String>,

    /// Region the group applies to.
    pub region: Option<String>,

    /// Volume and mount groups.
    #[serde(rename = "extraVol")]
    pub vol_mounts: Vec<VolMounts>,
}

impl ManilaExtraVolMounts {
    /// Groups propagated to `scope`, in declaration order.
    pub fn propagate<'a>(
        &'a self,
        scope: &'a [PropagationType],
    ) -> impl Iterator<Item = &'a VolMounts> + 'a {
        self.vol_mounts
            .iter()
            .filter(move |vol_mounts| vol_mounts.propagates_to(scope))
    }
}
