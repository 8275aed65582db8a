use std::{collections::BTreeMap, fmt::Debug};

use k8s_openapi::api::{
    apps::v1::{Deployment, DeploymentSpec},
    core::v1::ConfigMap,
};

use crate::{Error, Result};

use super::{Object, ResourceName, ResourceNamespace, ResourceUid};

pub trait Resource: kube::ResourceExt<DynamicType = ()> {
    type Spec: PartialEq + Debug;

    fn spec(&self) -> &Self::Spec;

    fn try_name(&self) -> Result<ResourceName> {
        self.meta()
            .name
            .clone()
            .ok_or(Error::MissingObjectKey(".metadata.name"))
            .map(ResourceName::new)
    }

    fn try_namespace(&self) -> Result<ResourceNamespace> {
        self.meta()
            .namespace
            .clone()
            .ok_or(Error::MissingObjectKey(".metadata.namespace"))
            .map(Into::into)
    }

    fn try_uid(&self) -> Result<ResourceUid> {
        self.meta()
            .uid
            .clone()
            .ok_or(Error::MissingObjectKey(".metadata.uid"))
            .map(Into::into)
    }

    /// Marks `self` as controlled by `object` and labels it for owned list queries.
    fn try_with_owner(mut self, object: &(impl Object + Resource)) -> Result<Self>
    where
        Self: Sized,
    {
        let (key, value, reference) = object.try_owner_reference()?;
        *self.owner_references_mut() = vec![reference];
        self.labels_mut().insert(key, value);
        Ok(self)
    }
}

impl Resource for ConfigMap {
    type Spec = Option<BTreeMap<String, String>>;

    fn spec(&self) -> &Self::Spec {
        &self.data
    }
}

impl Resource for Deployment {
    type Spec = Option<DeploymentSpec>;

    fn spec(&self) -> &Self::Spec {
        &self.spec
    }
}
