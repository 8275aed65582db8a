use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::api::{DeleteParams, ListParams, Patch, PatchParams};

use super::{
    constants::{
        APP_KUBERNETES_IO_COMPONENT_KEY, APP_KUBERNETES_IO_INSTANCE_KEY,
        APP_KUBERNETES_IO_MANAGED_BY_KEY, APP_KUBERNETES_IO_MANAGED_BY_VALUE,
        APP_KUBERNETES_IO_NAME_KEY, APP_KUBERNETES_IO_NAME_VALUE,
        MANILA_OPENSTACK_ORG_OWNED_BY_KEY,
    },
    resource::Resource,
    Labels, SelectorLabels,
};

use crate::{Error, Result};

/// A custom resource reconciled by this operator.
pub trait Object: kube::Resource<DynamicType = ()> {
    const APP_KUBERNETES_IO_COMPONENT_VALUE: &'static str;

    type Status: PartialEq + serde::Serialize;

    fn delete_params(&self) -> DeleteParams {
        DeleteParams::default()
    }

    fn patch_params(&self) -> PatchParams {
        PatchParams::apply(APP_KUBERNETES_IO_MANAGED_BY_VALUE).force()
    }

    fn patch_status(&self, status: Self::Status) -> Patch<serde_json::Value> {
        Patch::Merge(serde_json::json!({ "status": status }))
    }

    fn patch_status_params(&self) -> PatchParams {
        PatchParams::default()
    }

    fn status(&self) -> Option<&Self::Status>;

    fn try_owner_reference(&self) -> Result<(String, String, OwnerReference)>
    where
        Self: Resource,
    {
        let uid = self.try_uid()?;
        let reference = self
            .controller_owner_ref(&())
            .ok_or(Error::MissingObjectKey(".metadata.uid"))?;
        Ok((
            MANILA_OPENSTACK_ORG_OWNED_BY_KEY.into(),
            uid.to_string(),
            reference,
        ))
    }

    fn try_owned_list_params(&self) -> Result<ListParams>
    where
        Self: Resource,
    {
        Ok(ListParams::default().labels(&format!(
            "{MANILA_OPENSTACK_ORG_OWNED_BY_KEY}={}",
            self.try_uid()?
        )))
    }

    fn try_labels(&self) -> Result<Labels>
    where
        Self: Resource,
    {
        let mut labels: BTreeMap<String, String> = (&self.try_selector_labels()?).into();
        labels.insert(
            APP_KUBERNETES_IO_MANAGED_BY_KEY.into(),
            APP_KUBERNETES_IO_MANAGED_BY_VALUE.into(),
        );
        labels.insert(
            MANILA_OPENSTACK_ORG_OWNED_BY_KEY.into(),
            self.try_uid()?.to_string(),
        );
        Ok(labels.into())
    }

    fn try_selector_labels(&self) -> Result<SelectorLabels>
    where
        Self: Resource,
    {
        Ok(BTreeMap::from([
            (
                APP_KUBERNETES_IO_COMPONENT_KEY.into(),
                Self::APP_KUBERNETES_IO_COMPONENT_VALUE.into(),
            ),
            (
                APP_KUBERNETES_IO_INSTANCE_KEY.into(),
                self.try_name()?.to_string(),
            ),
            (
                APP_KUBERNETES_IO_NAME_KEY.into(),
                APP_KUBERNETES_IO_NAME_VALUE.into(),
            ),
        ])
        .into())
    }
}
