use std::collections::BTreeMap;

use crate::api::MetalLbConfig;

const ENDPOINT_KEY: &str = "endpoint";
const METALLB_ADDRESS_POOL_KEY: &str = "metallb.universe.tf/address-pool";
const METALLB_ALLOW_SHARED_IP_KEY: &str = "metallb.universe.tf/allow-shared-ip";
const METALLB_LOAD_BALANCER_IPS_KEY: &str = "metallb.universe.tf/loadBalancerIPs";

/// Annotations of a `LoadBalancer` service exposed through MetalLB.
#[must_use]
pub fn service_annotations(config: &MetalLbConfig) -> BTreeMap<String, String> {
    let mut annotations = BTreeMap::from([
        (ENDPOINT_KEY.into(), config.endpoint.to_string()),
        (
            METALLB_ADDRESS_POOL_KEY.into(),
            config.ip_address_pool.clone(),
        ),
    ]);

    if let Some(key) = config.sharing_key() {
        annotations.insert(METALLB_ALLOW_SHARED_IP_KEY.into(), key.into());
    }

    if !config.load_balancer_ips.is_empty() {
        annotations.insert(
            METALLB_LOAD_BALANCER_IPS_KEY.into(),
            config.load_balancer_ips.join(","),
        );
    }

    annotations
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::api::{Endpoint, MetalLbConfig};

    use super::service_annotations;

    fn config() -> MetalLbConfig {
        MetalLbConfig {
            endpoint: Endpoint::Internal,
            ip_address_pool: "internalapi".into(),
            shared_ip: true,
            shared_ip_key: String::new(),
            load_balancer_ips: Vec::new(),
        }
    }

    #[test]
    fn shared_ip_defaults_to_pool() {
        // act
        let annotations = service_annotations(&config());

        // assert
        assert_eq!(
            annotations,
            BTreeMap::from([
                ("endpoint".to_string(), "internal".to_string()),
                (
                    "metallb.universe.tf/address-pool".to_string(),
                    "internalapi".to_string()
                ),
                (
                    "metallb.universe.tf/allow-shared-ip".to_string(),
                    "internalapi".to_string()
                ),
            ])
        );
    }

    #[test]
    fn unshared_dual_stack() {
        // arrange
        let config = MetalLbConfig {
            endpoint: Endpoint::Public,
            shared_ip: false,
            shared_ip_key: "ignored".into(),
            load_balancer_ips: vec!["172.17.0.80".into(), "fd00:bbbb::80".into()],
            ..config()
        };

        // act
        let annotations = service_annotations(&config);

        // assert
        assert_eq!(annotations.get("endpoint").map(String::as_str), Some("public"));
        assert!(!annotations.contains_key("metallb.universe.tf/allow-shared-ip"));
        assert_eq!(
            annotations
                .get("metallb.universe.tf/loadBalancerIPs")
                .map(String::as_str),
            Some("172.17.0.80,fd00:bbbb::80")
        );
    }
}
