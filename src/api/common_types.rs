use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::ResourceRequirements;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/*
 * ============================================================================
 * Manila Template
 * ============================================================================
 */
/// Common input parameters used by all Manila services.
#[derive(JsonSchema, Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManilaTemplate {
    /// Username used for this service to register in keystone.
    ///
    /// Default: manila
    #[serde(default = "default_manila_user")]
    pub service_user: String,

    /// Username used for the manila database.
    ///
    /// Default: manila
    #[serde(default = "default_manila_user")]
    pub database_user: String,

    /// Secret containing the OpenStack password information for `ManilaDatabasePassword` and `ManilaPassword`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secret: String,

    /// Selectors to identify the database and service user passwords in the Secret.
    #[serde(default)]
    pub password_selectors: PasswordSelector,
}

impl Default for ManilaTemplate {
    fn default() -> Self {
        Self {
            service_user: default_manila_user(),
            database_user: default_manila_user(),
            secret: String::new(),
            password_selectors: PasswordSelector::default(),
        }
    }
}

fn default_manila_user() -> String {
    "manila".into()
}

/*
 * ============================================================================
 * Manila Service Template
 * ============================================================================
 */
/// Input parameters that can be defined for a given Manila service.
#[derive(JsonSchema, Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManilaServiceTemplate {
    /// Manila container image URL.
    #[schemars(length(min = 1))]
    pub container_image: String,

    /// NodeSelector to target a subset of worker nodes running this service. Setting it here overrides any global NodeSelector set on the Manila resource.
    pub node_selector: Option<BTreeMap<String, String>>,

    /// Enable debug for different deploy stages. If an init container is used, it runs and the actual service pod gets started with `sleep infinity`.
    #[serde(default)]
    pub debug: ManilaServiceDebug,

    /// Customize the service config using raw OpenStack config format. The content is added to the `/etc/<service>/<service>.conf.d` directory as `custom.conf`.
    #[serde(default = "default_custom_service_config")]
    pub custom_service_config: String,

    /// Overwrite default config files like `policy.json`, or add additional files to the service config directory.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub default_config_overwrite: BTreeMap<String, String>,

    /// Compute resources required by this service (Limits/Requests). More info: https://kubernetes.io/docs/concepts/configuration/manage-resources-containers/
    pub resources: Option<ResourceRequirements>,

    /// List of NetworkAttachment resource names to expose the service on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub network_attachments: Vec<String>,
}

impl Default for ManilaServiceTemplate {
    fn default() -> Self {
        Self {
            container_image: String::new(),
            node_selector: None,
            debug: ManilaServiceDebug::default(),
            custom_service_config: default_custom_service_config(),
            default_config_overwrite: BTreeMap::new(),
            resources: None,
            network_attachments: Vec::new(),
        }
    }
}

fn default_custom_service_config() -> String {
    "# add your customization here".into()
}

/*
 * ============================================================================
 * Password Selector
 * ============================================================================
 */
/// Identifies the database and service user passwords in the Secret.
#[derive(JsonSchema, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PasswordSelector {
    /// Key of the manila database user password.
    ///
    /// Default: ManilaDatabasePassword
    #[serde(default = "default_database_password_selector")]
    pub database: String,

    /// Key of the manila service user password.
    ///
    /// Default: ManilaPassword
    #[serde(default = "default_service_password_selector")]
    pub service: String,
}

impl Default for PasswordSelector {
    fn default() -> Self {
        Self {
            database: default_database_password_selector(),
            service: default_service_password_selector(),
        }
    }
}

fn default_database_password_selector() -> String {
    "ManilaDatabasePassword".into()
}

fn default_service_password_selector() -> String {
    "ManilaPassword".into()
}

/*
 * ============================================================================
 * Debug
 * ============================================================================
 */
/// Whether the database stages of a Manila deployment pause for debugging.
#[derive(JsonSchema, Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ManilaDebug {
    /// Pause the database init container (waits until `/tmp/stop-init-container` disappears).
    #[serde(default)]
    pub db_init_container: bool,

    /// Pause the database sync job.
    #[serde(default)]
    pub db_sync: bool,
}

/// Whether the stages of a Manila service deployment pause for debugging.
#[derive(JsonSchema, Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ManilaServiceDebug {
    /// Pause the init container (waits until `/tmp/stop-init-container` disappears).
    #[serde(default)]
    pub init_container: bool,

    /// Start the service container with `sleep infinity` instead of the service.
    #[serde(default)]
    pub service: bool,
}

/*
 * ============================================================================
 * MetalLB
 * ============================================================================
 */
/// OpenStack endpoint a load balanced service maps to.
#[derive(JsonSchema, Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    #[default]
    Internal,
    Public,
}

impl Endpoint {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Internal => "internal",
            Endpoint::Public => "public",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configures the MetalLB load balancer service.
#[derive(JsonSchema, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MetalLbConfig {
    /// OpenStack endpoint this service maps to.
    #[serde(default)]
    pub endpoint: Endpoint,

    /// Expose the VIP via MetalLB on this IPAddressPool.
    #[schemars(length(min = 1))]
    pub ip_address_pool: String,

    /// If true, the VIP is shared with other services.
    ///
    /// Default: true
    #[serde(default = "default_shared_ip", rename = "sharedIP")]
    pub shared_ip: bool,

    /// Sharing key set as annotation on the LoadBalancer service. Services sharing a VIP must use the same key. Defaults to the IPAddressPool when `sharedIP` is true and no key is given.
    #[serde(default, rename = "sharedIPKey")]
    pub shared_ip_key: String,

    /// Request the given IPs from the pool if available. A list allows dual stack (IPv4/IPv6).
    #[serde(
        default,
        rename = "loadBalancerIPs",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub load_balancer_ips: Vec<String>,
}

fn default_shared_ip() -> bool {
    true
}

impl MetalLbConfig {
    /// Key under which the VIP is shared, `None` when sharing is disabled.
    #[must_use]
    pub fn sharing_key(&self) -> Option<&str> {
        if !self.shared_ip {
            return None;
        }

        if self.shared_ip_key.is_empty() {
            Some(&self.ip_address_pool)
        } else {
            Some(&self.shared_ip_key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Endpoint, ManilaDebug, ManilaServiceTemplate, ManilaTemplate, MetalLbConfig,
        PasswordSelector,
    };

    #[test]
    fn manila_template_defaults() {
        // act
        let template: ManilaTemplate = serde_yaml::from_str("{}").unwrap();

        // assert
        assert_eq!(template, ManilaTemplate::default());
        assert_eq!(template.service_user, "manila");
        assert_eq!(template.database_user, "manila");
        assert_eq!(template.secret, "");
        assert_eq!(
            template.password_selectors,
            PasswordSelector {
                database: "ManilaDatabasePassword".into(),
                service: "ManilaPassword".into(),
            }
        );
    }

    #[test]
    fn manila_template_partial_password_selectors() {
        // act
        let template: ManilaTemplate = serde_yaml::from_str(
            "
secret: osp-secret
passwordSelectors:
  service: CustomPassword
",
        )
        .unwrap();

        // assert
        assert_eq!(template.secret, "osp-secret");
        assert_eq!(template.password_selectors.database, "ManilaDatabasePassword");
        assert_eq!(template.password_selectors.service, "CustomPassword");
    }

    #[test]
    fn manila_service_template_defaults() {
        // act
        let template: ManilaServiceTemplate =
            serde_yaml::from_str("containerImage: quay.io/manila-scheduler:latest").unwrap();

        // assert
        assert_eq!(template.container_image, "quay.io/manila-scheduler:latest");
        assert_eq!(template.custom_service_config, "# add your customization here");
        assert!(template.default_config_overwrite.is_empty());
        assert!(template.network_attachments.is_empty());
        assert!(template.node_selector.is_none());
        assert!(template.resources.is_none());
        assert!(!template.debug.init_container);
        assert!(!template.debug.service);
    }

    #[test]
    fn metallb_config_schema_requires_ip_address_pool() {
        // act
        let schema = serde_json::to_value(schemars::schema_for!(MetalLbConfig)).unwrap();

        // assert
        assert_eq!(schema["properties"]["ipAddressPool"]["minLength"], 1);
        assert!(
            schema["required"]
                .as_array()
                .unwrap()
                .contains(&"ipAddressPool".into())
        );
    }

    #[test]
    fn manila_service_template_requires_container_image() {
        assert!(serde_yaml::from_str::<ManilaServiceTemplate>("{}").is_err());
    }

    #[test]
    fn manila_debug_wire_names() {
        // act
        let debug: ManilaDebug =
            serde_yaml::from_str("{dbInitContainer: true, dbSync: false}").unwrap();

        // assert
        assert!(debug.db_init_container);
        assert!(!debug.db_sync);
    }

    #[test]
    fn metal_lb_config_defaults() {
        // act
        let config: MetalLbConfig = serde_yaml::from_str("ipAddressPool: internalapi").unwrap();

        // assert
        assert_eq!(config.endpoint, Endpoint::Internal);
        assert!(config.shared_ip);
        assert_eq!(config.shared_ip_key, "");
        assert!(config.load_balancer_ips.is_empty());
    }

    #[test]
    fn metal_lb_config_wire_names() {
        // act
        let config: MetalLbConfig = serde_yaml::from_str(
            "
endpoint: public
ipAddressPool: ctlplane
sharedIP: false
sharedIPKey: key
loadBalancerIPs:
  - 172.17.0.80
  - fd00:bbbb::80
",
        )
        .unwrap();

        // assert
        assert_eq!(config.endpoint, Endpoint::Public);
        assert!(!config.shared_ip);
        assert_eq!(config.shared_ip_key, "key");
        assert_eq!(config.load_balancer_ips, ["172.17.0.80", "fd00:bbbb::80"]);
    }

    #[test]
    fn metal_lb_config_sharing_key() {
        // arrange
        let mut config: MetalLbConfig = serde_yaml::from_str("ipAddressPool: internalapi").unwrap();

        // assert
        assert_eq!(config.sharing_key(), Some("internalapi"));

        // act
        config.shared_ip_key = "manila".into();

        // assert
        assert_eq!(config.sharing_key(), Some("manila"));

        // act
        config.shared_ip = false;

        // assert
        assert_eq!(config.sharing_key(), None);
    }

    #[test]
    fn metal_lb_config_rejects_unknown_endpoint() {
        assert!(
            serde_yaml::from_str::<MetalLbConfig>("{endpoint: admin, ipAddressPool: a}").is_err()
        );
    }
}
