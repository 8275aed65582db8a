use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::DeploymentSpec;

/// True when every field set on `self` has the same value on `superset`.
///
/// Used to skip patches of objects the API server already holds, where the
/// server may have populated additional fields.
pub trait Subset {
    fn is_subset(&self, superset: &Self) -> bool;
}

impl Subset for BTreeMap<String, String> {
    fn is_subset(&self, superset: &Self) -> bool {
        self.iter()
            .all(|(key, value)| superset.get(key) == Some(value))
    }
}

impl Subset for Option<BTreeMap<String, String>> {
    fn is_subset(&self, superset: &Self) -> bool {
        match (self, superset) {
            (None, _) => true,
            (Some(subset), None) => subset.is_empty(),
            (Some(subset), Some(superset)) => subset.is_subset(superset),
        }
    }
}

impl Subset for kube::core::ObjectMeta {
    fn is_subset(&self, superset: &Self) -> bool {
        self.annotations.is_subset(&superset.annotations)
            && self.labels.is_subset(&superset.labels)
            && self.name == superset.name
            && self.owner_references == superset.owner_references
    }
}

impl Subset for Option<DeploymentSpec> {
    fn is_subset(&self, superset: &Self) -> bool {
        match (self, superset) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(subset), Some(superset)) => {
                /* The API server defaults several pod template fields, e.g.
                 *  - `termination_message_path`
                 *  - `termination_message_policy`
                 *  - `dns_policy`
                 * so any difference in the template forces a patch.
                 */
                subset.replicas == superset.replicas
                    && subset.selector == superset.selector
                    && subset.template.metadata == superset.template.metadata
                    && subset.template.spec == superset.template.spec
            }
        }
    }
}
