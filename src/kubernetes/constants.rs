pub const APP_KUBERNETES_IO_COMPONENT_KEY: &str = "app.kubernetes.io/component";

pub const APP_KUBERNETES_IO_INSTANCE_KEY: &str = "app.kubernetes.io/instance";

pub const APP_KUBERNETES_IO_MANAGED_BY_KEY: &str = "app.kubernetes.io/managed-by";
pub const APP_KUBERNETES_IO_MANAGED_BY_VALUE: &str = "manila-operator";

pub const APP_KUBERNETES_IO_NAME_KEY: &str = "app.kubernetes.io/name";
pub const APP_KUBERNETES_IO_NAME_VALUE: &str = "manila";

pub const K8S_V1_CNI_CNCF_IO_NETWORKS_KEY: &str = "k8s.v1.cni.cncf.io/networks";

pub const MANILA_OPENSTACK_ORG_OWNED_BY_KEY: &str = "manila.openstack.org/owned-by";
