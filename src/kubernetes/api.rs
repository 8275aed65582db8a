use std::{collections::HashMap, hash::Hash};

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result, metrics::Metrics};

use super::{Object, Resource, ResourceName, subset::Subset};

/// A [`kube::Api`] that records its usage and applies owned resources with server-side apply.
pub struct Api<R> {
    api: kube::Api<R>,
    metrics: Metrics,
}

impl<R> Api<R> {
    pub fn new(api: kube::Api<R>, metrics: &Metrics) -> Self {
        Self {
            api,
            metrics: metrics.clone(),
        }
    }
}

impl<R> Api<R>
where
    R: Resource + Clone + std::fmt::Debug + DeserializeOwned + Serialize,
{
    pub async fn delete<O>(&self, object: &O, resources: Vec<R>) -> Result<()>
    where
        O: Object,
    {
        for resource in resources {
            let resource_name = resource.try_name()?;

            tracing::info!(name =% resource_name, kind =% R::kind(&()), "deleting");
            self.metrics.kubernetes_api_usage_count::<R>("delete");
            self.api
                .delete(&resource_name, &object.delete_params())
                .await
                .map_err(Error::Kube)?;
        }

        Ok(())
    }
}

impl<R> Api<R>
where
    R: Resource + Clone + std::fmt::Debug + DeserializeOwned + Serialize,
    R::Spec: Subset,
{
    /// Applies `resources` and deletes every other resource owned by `object`.
    pub async fn sync<O, I>(&self, object: &O, resources: HashMap<I, R>) -> Result<HashMap<I, R>>
    where
        I: Eq + Hash,
        O: Object + Resource,
    {
        let (results, deprecated) = self.update(object, resources).await?;
        self.delete(object, deprecated).await?;
        Ok(results)
    }

    /// Applies `resources`, returning them as stored by the API server along
    /// with the owned resources that were not part of `resources`.
    pub async fn update<O, I>(
        &self,
        object: &O,
        resources: HashMap<I, R>,
    ) -> Result<(HashMap<I, R>, Vec<R>)>
    where
        I: Eq + Hash,
        O: Object + Resource,
    {
        let mut resources = resources
            .into_iter()
            .map(|(identifier, resource)| {
                let resource_name = resource.try_name()?;
                let resource = resource.try_with_owner(object)?;
                Ok::<_, Error>((resource_name, (identifier, resource)))
            })
            .collect::<Result<HashMap<ResourceName, (I, R)>>>()?;

        for (resource_name, (_, resource)) in &resources {
            self.metrics.kubernetes_api_usage_count::<R>("get");
            match self.api.get_opt(resource_name).await.map_err(Error::Kube)? {
                Some(api_resource)
                    if resource.spec().is_subset(api_resource.spec())
                        && resource.meta().is_subset(api_resource.meta()) => {}
                _ => {
                    tracing::info!(name =% resource_name, kind =% R::kind(&()), "applying");
                    self.metrics.kubernetes_api_usage_count::<R>("patch");
                    self.api
                        .patch(
                            resource_name,
                            &object.patch_params(),
                            &kube::api::Patch::Apply(&resource),
                        )
                        .await
                        .map_err(Error::Kube)?;
                }
            }
        }

        let mut applied = HashMap::new();
        let mut deprecated = Vec::new();

        self.metrics.kubernetes_api_usage_count::<R>("list");
        for api_resource in self
            .api
            .list(&object.try_owned_list_params()?)
            .await
            .map_err(Error::Kube)?
        {
            if let Some((identifier, _)) = resources.remove(&api_resource.try_name()?) {
                applied.insert(identifier, api_resource);
            } else {
                deprecated.push(api_resource);
            }
        }

        if !resources.is_empty() {
            tracing::warn!(
                count = resources.len(),
                "applied resources missing from owned list"
            );
        }

        Ok((applied, deprecated))
    }
}

impl<O> Api<O>
where
    O: Object + Resource + Clone + std::fmt::Debug + DeserializeOwned,
{
    /// Patches the status subresource unless it already matches `status`.
    pub async fn update_status(&self, object: &O, status: O::Status) -> Result<()> {
        if object.status() == Some(&status) {
            return Ok(());
        }

        self.metrics.kubernetes_api_usage_count::<O>("patch");
        self.api
            .patch_status(
                &object.try_name()?,
                &object.patch_status_params(),
                &object.patch_status(status),
            )
            .await
            .map_err(Error::Kube)?;

        Ok(())
    }
}
