mod common_types;
mod extra_volumes;

pub use common_types::{
    Endpoint, ManilaDebug, ManilaServiceDebug, ManilaServiceTemplate, ManilaTemplate,
    MetalLbConfig, PasswordSelector,
};
pub use extra_volumes::{
    ExtraVolType, ManilaExtraVolMounts, PropagationType, VolMounts, VolumeSource,
};

pub const MANILA_OPENSTACK_ORG: &str = "manila.openstack.org";
