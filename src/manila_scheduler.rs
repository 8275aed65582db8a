pub mod volumes;

use std::{collections::HashMap, sync::Arc, time::Duration};

use futures::StreamExt;
use k8s_openapi::{
    api::{
        apps::v1::{Deployment, DeploymentSpec},
        core::v1::{
            ConfigMap, Container, EnvVar, EnvVarSource, PodSpec, PodTemplateSpec,
            SecretKeySelector,
        },
    },
    apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition,
    apimachinery::pkg::apis::meta::v1::{Condition, LabelSelector, Time},
    chrono::Utc,
};
use kube::{
    Client, CustomResource, CustomResourceExt,
    core::ObjectMeta,
    runtime::{Controller, controller::Action, watcher::Config as WatcherConfig},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    api::{ManilaExtraVolMounts, ManilaServiceTemplate, ManilaTemplate},
    kubernetes::{
        self, Annotations, Api, ConditionsExt, K8S_V1_CNI_CNCF_IO_NETWORKS_KEY, Labels, Object,
        Resource as KubernetesResource, SelectorLabels, error_policy,
    },
    manila::ConfigData,
    metrics::Metrics,
};

/*
 * ============================================================================
 * Custom Resource Definition
 * ============================================================================
 */
/// # `ManilaScheduler`
///
/// A `ManilaScheduler` is the scheduler service of a Manila deployment.
#[allow(clippy::module_name_repetitions)]
#[derive(CustomResource, JsonSchema, Deserialize, Serialize, Debug, Clone, PartialEq)]
#[kube(
    derive = "PartialEq",
    group = "manila.openstack.org",
    kind = "ManilaScheduler",
    namespaced,
    printcolumn = r#"{"name":"Ready", "type":"integer", "description":"Number of ready replicas", "jsonPath":".status.readyCount"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#,
    status = "ManilaSchedulerStatus",
    version = "v1beta1"
)]
#[serde(rename_all = "camelCase")]
pub struct ManilaSchedulerSpec {
    #[serde(flatten)]
    pub manila: ManilaTemplate,

    #[serde(flatten)]
    pub service: ManilaServiceTemplate,

    /// Number of scheduler replicas.
    ///
    /// Default: 1
    #[serde(default = "default_replicas")]
    #[schemars(range(min = 0))]
    pub replicas: i32,

    /// Hostname of the manila database.
    #[serde(default)]
    pub database_hostname: String,

    /// Secret containing the RabbitMQ `transport_url`.
    #[serde(default, rename = "transportURLSecret")]
    pub transport_url_secret: String,

    /// Extra volumes and mounts propagated to the scheduler pods.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_mounts: Vec<ManilaExtraVolMounts>,

    /// Service account the scheduler pods run as.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_account: String,
}

fn default_replicas() -> i32 {
    1
}

#[allow(clippy::module_name_repetitions)]
#[derive(JsonSchema, Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManilaSchedulerStatus {
    /// Represents the latest available observations of the scheduler's current state.
    ///
    /// ### ManilaOwner
    /// `OwnerFound`, `OwnerNotFound`
    ///
    /// ### DeploymentReady
    /// `Ready`, `Progressing`, `OwnerNotFound`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,

    /// Network attachments requested for the scheduler pods.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub network_attachments: Vec<String>,

    /// Number of ready scheduler replicas.
    #[serde(default)]
    pub ready_count: i32,
}

impl ManilaScheduler {
    /// Name of the `Manila` resource owning this scheduler.
    #[must_use]
    pub fn owning_manila_name(&self) -> Option<&str> {
        self.metadata
            .owner_references
            .iter()
            .flatten()
            .find(|owner| owner.kind == "Manila")
            .map(|owner| owner.name.as_str())
    }

    #[must_use]
    pub fn status_conditions(&self) -> Option<&Vec<Condition>> {
        self.status.as_ref().map(|f| &f.conditions)
    }
}

impl KubernetesResource for ManilaScheduler {
    type Spec = ManilaSchedulerSpec;

    fn spec(&self) -> &Self::Spec {
        &self.spec
    }
}

impl Object for ManilaScheduler {
    const APP_KUBERNETES_IO_COMPONENT_VALUE: &'static str = "manila-scheduler";

    type Status = ManilaSchedulerStatus;

    fn status(&self) -> Option<&Self::Status> {
        self.status.as_ref()
    }
}

#[must_use]
pub fn generate_custom_resource_definition() -> CustomResourceDefinition {
    ManilaScheduler::crd()
}

/*
 * ============================================================================
 * Config
 * ============================================================================
 */
pub struct Config {
    pub image_pull_policy: String,
}

/*
 * ============================================================================
 * Controller
 * ============================================================================
 */
pub async fn run_controller(client: Client, config: Config, metrics: Metrics) {
    metrics.kubernetes_api_usage_count::<ManilaScheduler>("watch");
    metrics.kubernetes_api_usage_count::<ConfigMap>("watch");
    metrics.kubernetes_api_usage_count::<Deployment>("watch");
    Controller::new(
        kube::Api::<ManilaScheduler>::all(client.clone()),
        WatcherConfig::default(),
    )
    .owns(
        kube::Api::<ConfigMap>::all(client.clone()),
        WatcherConfig::default(),
    )
    .owns(
        kube::Api::<Deployment>::all(client.clone()),
        WatcherConfig::default(),
    )
    .shutdown_on_signal()
    .run(
        reconciler,
        error_policy,
        Arc::new(Context {
            client,
            config,
            metrics,
        }),
    )
    .for_each(|_| async {})
    .await;
}

/*
 * ============================================================================
 * Context
 * ============================================================================
 */
struct Context {
    client: Client,
    config: Config,
    metrics: Metrics,
}

impl kubernetes::Context for Context {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

/*
 * ============================================================================
 * State
 * ============================================================================
 */
#[derive(Debug, PartialEq)]
enum State {
    OwnerNotFound,
    Initialized { ready_count: i32 },
}

impl State {
    fn conditions(&self, replicas: i32) -> Vec<Condition> {
        match self {
            State::OwnerNotFound => vec![
                Condition {
                    last_transition_time: Time(Utc::now()),
                    message: "The owning Manila resource was not found.".into(),
                    observed_generation: None,
                    reason: "OwnerNotFound".into(),
                    status: "False".into(),
                    type_: "ManilaOwner".into(),
                },
                Condition {
                    last_transition_time: Time(Utc::now()),
                    message: "The ManilaScheduler deployment is not reconciled without its owner."
                        .into(),
                    observed_generation: None,
                    reason: "OwnerNotFound".into(),
                    status: "False".into(),
                    type_: "DeploymentReady".into(),
                },
            ],
            State::Initialized { ready_count } => vec![
                Condition {
                    last_transition_time: Time(Utc::now()),
                    message: "The owning Manila resource was found.".into(),
                    observed_generation: None,
                    reason: "OwnerFound".into(),
                    status: "True".into(),
                    type_: "ManilaOwner".into(),
                },
                if *ready_count >= replicas {
                    Condition {
                        last_transition_time: Time(Utc::now()),
                        message: "The ManilaScheduler deployment is ready.".into(),
                        observed_generation: None,
                        reason: "Ready".into(),
                        status: "True".into(),
                        type_: "DeploymentReady".into(),
                    }
                } else {
                    Condition {
                        last_transition_time: Time(Utc::now()),
                        message: format!(
                            "The ManilaScheduler deployment has {ready_count} of {replicas} replicas ready."
                        ),
                        observed_generation: None,
                        reason: "Progressing".into(),
                        status: "False".into(),
                        type_: "DeploymentReady".into(),
                    }
                },
            ],
        }
    }

    fn ready_count(&self) -> i32 {
        match self {
            State::OwnerNotFound => 0,
            State::Initialized { ready_count } => *ready_count,
        }
    }
}

/*
 * ============================================================================
 * Reconciler
 * ============================================================================
 */
#[tracing::instrument(skip(object, ctx))]
async fn reconciler(object: Arc<ManilaScheduler>, ctx: Arc<Context>) -> Result<Action> {
    let _timer = ctx
        .metrics
        .count_and_measure(ManilaScheduler::APP_KUBERNETES_IO_COMPONENT_VALUE);
    tracing::info!("reconciling");

    let namespace = object.try_namespace()?;

    let state = if let Some(parent_name) = object.owning_manila_name() {
        let config_data = ConfigData::new(
            &object.spec.service.custom_service_config,
            &object.spec.service.default_config_overwrite,
        );

        let annotations = Annotations::new().add(&config_data);
        let labels = object.try_labels()?;
        let selector_labels = object.try_selector_labels()?;

        // ConfigMap
        reconcile_config_map(
            &Api::new(
                kube::Api::namespaced(ctx.client.clone(), &namespace),
                &ctx.metrics,
            ),
            &object,
            &labels,
            &config_data,
        )
        .await?;

        // Deployment
        let deployment = reconcile_deployment(
            &Api::new(
                kube::Api::namespaced(ctx.client.clone(), &namespace),
                &ctx.metrics,
            ),
            &ctx.config,
            &object,
            parent_name,
            &namespace,
            &annotations,
            &labels,
            &selector_labels,
        )
        .await?;

        State::Initialized {
            ready_count: deployment
                .and_then(|deployment| deployment.status)
                .and_then(|status| status.ready_replicas)
                .unwrap_or_default(),
        }
    } else {
        tracing::warn!("owning manila resource not found");
        State::OwnerNotFound
    };

    // ManilaScheduler
    reconcile_manila_scheduler(
        &Api::new(
            kube::Api::namespaced(ctx.client.clone(), &namespace),
            &ctx.metrics,
        ),
        &object,
        &state,
    )
    .await?;

    tracing::info!("reconciled");

    match state {
        State::OwnerNotFound => Ok(Action::requeue(Duration::from_secs(60))),
        State::Initialized { .. } => Ok(Action::requeue(Duration::from_secs(3600))),
    }
}

async fn reconcile_config_map(
    api: &Api<ConfigMap>,
    object: &ManilaScheduler,
    labels: &Labels,
    config_data: &ConfigData,
) -> Result<()> {
    api.sync(
        object,
        [((), generate_config_map(object, labels, config_data)?)].into(),
    )
    .await
    .map(|_| ())
}

#[allow(clippy::too_many_arguments)]
async fn reconcile_deployment(
    api: &Api<Deployment>,
    config: &Config,
    object: &ManilaScheduler,
    parent_name: &str,
    namespace: &str,
    annotations: &Annotations,
    labels: &Labels,
    selector_labels: &SelectorLabels,
) -> Result<Option<Deployment>> {
    let deployment = generate_deployment(
        object,
        config,
        parent_name,
        namespace,
        annotations,
        labels,
        selector_labels,
    )?;

    let mut deployments: HashMap<(), Deployment> =
        api.sync(object, [((), deployment)].into()).await?;
    Ok(deployments.remove(&()))
}

async fn reconcile_manila_scheduler(
    api: &Api<ManilaScheduler>,
    object: &ManilaScheduler,
    state: &State,
) -> Result<()> {
    let conditions = object
        .status_conditions()
        .unwrap_or(&Vec::new())
        .merge_from(&state.conditions(object.spec.replicas));

    api.update_status(
        object,
        ManilaSchedulerStatus {
            conditions,
            network_attachments: object.spec.service.network_attachments.clone(),
            ready_count: state.ready_count(),
        },
    )
    .await
}

/*
 * ============================================================================
 * Generators
 * ============================================================================
 */
const INIT_CONTAINER_SCRIPT: &str = "/usr/local/bin/container-scripts/init.sh";
const KOLLA_START: &str = "/usr/local/bin/kolla_start";
const MANILA_DATABASE_NAME: &str = "manila";
const TRANSPORT_URL_SECRET_KEY: &str = "transport_url";

fn generate_config_map(
    object: &ManilaScheduler,
    labels: &Labels,
    config_data: &ConfigData,
) -> Result<ConfigMap> {
    Ok(ConfigMap {
        metadata: ObjectMeta {
            name: Some(volumes::config_data_name(&object.try_name()?)),
            labels: Some(labels.into()),
            ..Default::default()
        },
        data: Some(config_data.into()),
        ..Default::default()
    })
}

fn generate_deployment(
    object: &ManilaScheduler,
    config: &Config,
    parent_name: &str,
    namespace: &str,
    annotations: &Annotations,
    labels: &Labels,
    selector_labels: &SelectorLabels,
) -> Result<Deployment> {
    let name = object.try_name()?;
    let spec = &object.spec;

    let mut pod_annotations = annotations.clone();
    if let Some(networks) =
        generate_networks_annotation(namespace, &spec.service.network_attachments)?
    {
        pod_annotations = pod_annotations.insert(K8S_V1_CNI_CNCF_IO_NETWORKS_KEY, networks);
    }

    Ok(Deployment {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            labels: Some(labels.into()),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(spec.replicas),
            selector: LabelSelector {
                match_labels: Some(selector_labels.into()),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    annotations: Some(pod_annotations.into()),
                    labels: Some(labels.into()),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![generate_service_container(object, config)],
                    init_containers: Some(vec![generate_init_container(object, config)]),
                    node_selector: spec.service.node_selector.clone(),
                    service_account_name: Some(spec.service_account.clone())
                        .filter(|service_account| !service_account.is_empty()),
                    volumes: Some(volumes::volumes(parent_name, &name, &spec.extra_mounts)),
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn generate_init_container(object: &ManilaScheduler, config: &Config) -> Container {
    let spec = &object.spec;

    let mut env = vec![
        env_var("DatabaseHost", &spec.database_hostname),
        env_var("DatabaseName", MANILA_DATABASE_NAME),
        env_var("DatabaseUser", &spec.manila.database_user),
    ];

    if !spec.manila.secret.is_empty() {
        env.push(secret_env_var(
            "DatabasePassword",
            &spec.manila.secret,
            &spec.manila.password_selectors.database,
        ));
        env.push(secret_env_var(
            "ManilaPassword",
            &spec.manila.secret,
            &spec.manila.password_selectors.service,
        ));
    }

    if !spec.transport_url_secret.is_empty() {
        env.push(secret_env_var(
            "TransportURL",
            &spec.transport_url_secret,
            TRANSPORT_URL_SECRET_KEY,
        ));
    }

    if spec.service.debug.init_container {
        env.push(env_var("Debug", "true"));
    }

    Container {
        args: Some(vec!["-c".into(), INIT_CONTAINER_SCRIPT.into()]),
        command: Some(vec!["/bin/bash".into()]),
        env: Some(env),
        image: Some(spec.service.container_image.clone()),
        image_pull_policy: Some(config.image_pull_policy.clone()),
        name: "init".into(),
        volume_mounts: Some(volumes::init_volume_mounts(&spec.extra_mounts)),
        ..Default::default()
    }
}

fn generate_service_container(object: &ManilaScheduler, config: &Config) -> Container {
    let spec = &object.spec;

    let (command, args) = if spec.service.debug.service {
        ("/bin/sleep", vec!["infinity".into()])
    } else {
        ("/bin/bash", vec!["-c".into(), KOLLA_START.into()])
    };

    Container {
        args: Some(args),
        command: Some(vec![command.into()]),
        env: Some(vec![env_var("KOLLA_CONFIG_STRATEGY", "COPY_ALWAYS")]),
        image: Some(spec.service.container_image.clone()),
        image_pull_policy: Some(config.image_pull_policy.clone()),
        name: ManilaScheduler::APP_KUBERNETES_IO_COMPONENT_VALUE.into(),
        resources: spec.service.resources.clone(),
        volume_mounts: Some(volumes::volume_mounts(&spec.extra_mounts)),
        ..Default::default()
    }
}

/// Multus network selection for `attachments`, `None` when there are none.
fn generate_networks_annotation(
    namespace: &str,
    attachments: &[String],
) -> Result<Option<String>> {
    #[derive(Serialize)]
    struct NetworkSelectionElement<'a> {
        name: &'a str,
        namespace: &'a str,
    }

    if attachments.is_empty() {
        return Ok(None);
    }

    let networks: Vec<_> = attachments
        .iter()
        .map(|name| NetworkSelectionElement { name, namespace })
        .collect();

    serde_json::to_string(&networks)
        .map(Some)
        .map_err(Error::Serialize)
}

fn env_var(name: &str, value: &str) -> EnvVar {
    EnvVar {
        name: name.into(),
        value: Some(value.into()),
        ..Default::default()
    }
}

fn secret_env_var(name: &str, secret: &str, key: &str) -> EnvVar {
    EnvVar {
        name: name.into(),
        value_from: Some(EnvVarSource {
            secret_key_ref: Some(SecretKeySelector {
                key: key.into(),
                name: secret.into(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::{api::core::v1::Container, apimachinery::pkg::apis::meta::v1::Condition};

    use crate::{
        kubernetes::{Annotations, ConditionsExt, Object},
        manila::ConfigData,
    };

    use super::{
        Config, ManilaScheduler, State, generate_config_map, generate_custom_resource_definition,
        generate_deployment, generate_networks_annotation,
    };

    fn manila_scheduler(spec: &str) -> ManilaScheduler {
        serde_yaml::from_str(&format!(
            "
apiVersion: manila.openstack.org/v1beta1
kind: ManilaScheduler
metadata:
  name: manila-scheduler
  namespace: openstack
  uid: 6f1d7b9e-0c2a-4d3b-9f4e-2a1b3c4d5e6f
  ownerReferences:
    - apiVersion: manila.openstack.org/v1beta1
      kind: Manila
      name: manila
      uid: 0a9b8c7d-6e5f-4a3b-2c1d-0e9f8a7b6c5d
      controller: true
spec:
{spec}"
        ))
        .unwrap()
    }

    fn config() -> Config {
        Config {
            image_pull_policy: "IfNotPresent".into(),
        }
    }

    fn containers(object: &ManilaScheduler, annotations: &Annotations) -> (Container, Container) {
        let deployment = generate_deployment(
            object,
            &config(),
            object.owning_manila_name().unwrap(),
            "openstack",
            annotations,
            &object.try_labels().unwrap(),
            &object.try_selector_labels().unwrap(),
        )
        .unwrap();
        let pod = deployment.spec.unwrap().template.spec.unwrap();
        (
            pod.init_containers.unwrap().remove(0),
            pod.containers.into_iter().next().unwrap(),
        )
    }

    fn env(container: &Container) -> Vec<(&str, Option<&str>)> {
        container
            .env
            .iter()
            .flatten()
            .map(|env| (env.name.as_str(), env.value.as_deref()))
            .collect()
    }

    #[test]
    fn custom_resource_definition() {
        // act
        let crd = generate_custom_resource_definition();

        // assert
        assert_eq!(crd.spec.group, "manila.openstack.org");
        assert_eq!(crd.spec.names.kind, "ManilaScheduler");
        assert_eq!(crd.spec.scope, "Namespaced");
        assert_eq!(crd.spec.versions[0].name, "v1beta1");
        assert!(crd.spec.versions[0].subresources.is_some());

        let schema = serde_json::to_value(&crd).unwrap();
        let spec =
            &schema["spec"]["versions"][0]["schema"]["openAPIV3Schema"]["properties"]["spec"];
        assert_eq!(spec["properties"]["containerImage"]["minLength"], 1);
        assert!(
            spec["required"]
                .as_array()
                .unwrap()
                .contains(&"containerImage".into())
        );
        assert_eq!(spec["properties"]["replicas"]["minimum"].as_f64(), Some(0.0));
        assert_eq!(spec["properties"]["replicas"]["default"], 1);
    }

    #[test]
    fn spec_defaults() {
        // act
        let object = manila_scheduler("  containerImage: manila-scheduler:latest\n");

        // assert
        assert_eq!(object.spec.replicas, 1);
        assert_eq!(object.spec.manila.service_user, "manila");
        assert_eq!(object.spec.service.container_image, "manila-scheduler:latest");
        assert!(object.spec.extra_mounts.is_empty());
        assert!(object.spec.service_account.is_empty());
    }

    #[test]
    fn owning_manila_name() {
        // arrange
        let mut object = manila_scheduler("  containerImage: manila-scheduler:latest\n");

        // assert
        assert_eq!(object.owning_manila_name(), Some("manila"));

        // act
        object.metadata.owner_references = None;

        // assert
        assert_eq!(object.owning_manila_name(), None);
    }

    #[test]
    fn config_map() {
        // arrange
        let object = manila_scheduler(
            "
  containerImage: manila-scheduler:latest
  customServiceConfig: |
    [DEFAULT]
    debug = true
  defaultConfigOverwrite:
    policy.yaml: 'rules: {}'
",
        );
        let config_data = ConfigData::new(
            &object.spec.service.custom_service_config,
            &object.spec.service.default_config_overwrite,
        );

        // act
        let config_map =
            generate_config_map(&object, &object.try_labels().unwrap(), &config_data).unwrap();

        // assert
        assert_eq!(
            config_map.metadata.name.as_deref(),
            Some("manila-scheduler-config-data")
        );
        let data = config_map.data.unwrap();
        assert_eq!(data["custom.conf"], "[DEFAULT]\ndebug = true\n");
        assert_eq!(data["policy.yaml"], "rules: {}");
    }

    #[test]
    fn deployment() {
        // arrange
        let object = manila_scheduler(
            "
  containerImage: manila-scheduler:latest
  replicas: 3
  serviceAccount: manila-manila
  nodeSelector:
    node-role.kubernetes.io/worker: ''
",
        );
        let annotations = Annotations::new().add(&ConfigData::new("", &Default::default()));

        // act
        let deployment = generate_deployment(
            &object,
            &config(),
            "manila",
            "openstack",
            &annotations,
            &object.try_labels().unwrap(),
            &object.try_selector_labels().unwrap(),
        )
        .unwrap();

        // assert
        assert_eq!(deployment.metadata.name.as_deref(), Some("manila-scheduler"));
        let spec = deployment.spec.unwrap();
        assert_eq!(spec.replicas, Some(3));

        let template_metadata = spec.template.metadata.unwrap();
        let template_annotations = template_metadata.annotations.unwrap();
        assert!(template_annotations.contains_key("manila.openstack.org/config-data-hash"));
        assert!(!template_annotations.contains_key("k8s.v1.cni.cncf.io/networks"));

        let selector = spec.selector.match_labels.unwrap();
        let labels = template_metadata.labels.unwrap();
        assert!(selector.iter().all(|(k, v)| labels.get(k) == Some(v)));

        let pod = spec.template.spec.unwrap();
        assert_eq!(pod.service_account_name.as_deref(), Some("manila-manila"));
        assert_eq!(
            pod.node_selector.unwrap().keys().collect::<Vec<_>>(),
            ["node-role.kubernetes.io/worker"]
        );
        assert_eq!(
            pod.volumes,
            Some(super::volumes::volumes("manila", "manila-scheduler", &[]))
        );
    }

    #[test]
    fn deployment_without_service_account() {
        // arrange
        let object = manila_scheduler("  containerImage: manila-scheduler:latest\n");

        // act
        let deployment = generate_deployment(
            &object,
            &config(),
            "manila",
            "openstack",
            &Annotations::new(),
            &object.try_labels().unwrap(),
            &object.try_selector_labels().unwrap(),
        )
        .unwrap();

        // assert
        let pod = deployment.spec.unwrap().template.spec.unwrap();
        assert_eq!(pod.service_account_name, None);
        assert_eq!(pod.node_selector, None);
    }

    #[test]
    fn init_container() {
        // arrange
        let object = manila_scheduler(
            "
  containerImage: manila-scheduler:latest
  secret: osp-secret
  databaseHostname: openstack.openstack.svc
  transportURLSecret: rabbitmq-transport-url-manila
",
        );

        // act
        let (init, _) = containers(&object, &Annotations::new());

        // assert
        assert_eq!(init.name, "init");
        assert_eq!(init.image.as_deref(), Some("manila-scheduler:latest"));
        assert_eq!(init.image_pull_policy.as_deref(), Some("IfNotPresent"));
        assert_eq!(init.command, Some(vec!["/bin/bash".to_string()]));
        assert_eq!(
            init.args,
            Some(vec![
                "-c".to_string(),
                "/usr/local/bin/container-scripts/init.sh".to_string()
            ])
        );
        assert_eq!(
            env(&init),
            [
                ("DatabaseHost", Some("openstack.openstack.svc")),
                ("DatabaseName", Some("manila")),
                ("DatabaseUser", Some("manila")),
                ("DatabasePassword", None),
                ("ManilaPassword", None),
                ("TransportURL", None),
            ]
        );

        let secret_keys: Vec<_> = init
            .env
            .iter()
            .flatten()
            .filter_map(|env| env.value_from.as_ref()?.secret_key_ref.as_ref())
            .map(|selector| (selector.name.as_str(), selector.key.as_str()))
            .collect();
        assert_eq!(
            secret_keys,
            [
                ("osp-secret", "ManilaDatabasePassword"),
                ("osp-secret", "ManilaPassword"),
                ("rabbitmq-transport-url-manila", "transport_url"),
            ]
        );
        assert_eq!(
            init.volume_mounts,
            Some(super::volumes::init_volume_mounts(&[]))
        );
    }

    #[test]
    fn init_container_without_secrets() {
        // arrange
        let object = manila_scheduler(
            "
  containerImage: manila-scheduler:latest
  debug:
    initContainer: true
",
        );

        // act
        let (init, _) = containers(&object, &Annotations::new());

        // assert
        assert_eq!(
            env(&init),
            [
                ("DatabaseHost", Some("")),
                ("DatabaseName", Some("manila")),
                ("DatabaseUser", Some("manila")),
                ("Debug", Some("true")),
            ]
        );
    }

    #[test]
    fn service_container() {
        // arrange
        let object = manila_scheduler(
            "
  containerImage: manila-scheduler:latest
  resources:
    limits:
      memory: 512Mi
",
        );

        // act
        let (_, service) = containers(&object, &Annotations::new());

        // assert
        assert_eq!(service.name, "manila-scheduler");
        assert_eq!(service.command, Some(vec!["/bin/bash".to_string()]));
        assert_eq!(
            service.args,
            Some(vec![
                "-c".to_string(),
                "/usr/local/bin/kolla_start".to_string()
            ])
        );
        assert_eq!(env(&service), [("KOLLA_CONFIG_STRATEGY", Some("COPY_ALWAYS"))]);
        assert!(service.resources.is_some());
        assert_eq!(service.volume_mounts, Some(super::volumes::volume_mounts(&[])));
    }

    #[test]
    fn service_container_debug() {
        // arrange
        let object = manila_scheduler(
            "
  containerImage: manila-scheduler:latest
  debug:
    service: true
",
        );

        // act
        let (_, service) = containers(&object, &Annotations::new());

        // assert
        assert_eq!(service.command, Some(vec!["/bin/sleep".to_string()]));
        assert_eq!(service.args, Some(vec!["infinity".to_string()]));
    }

    #[test]
    fn networks_annotation() {
        // act
        let none = generate_networks_annotation("openstack", &[]).unwrap();
        let some = generate_networks_annotation(
            "openstack",
            &["internalapi".to_string(), "storage".to_string()],
        )
        .unwrap();

        // assert
        assert_eq!(none, None);
        assert_eq!(
            some.as_deref(),
            Some(
                r#"[{"name":"internalapi","namespace":"openstack"},{"name":"storage","namespace":"openstack"}]"#
            )
        );
    }

    #[test]
    fn deployment_networks_annotation() {
        // arrange
        let object = manila_scheduler(
            "
  containerImage: manila-scheduler:latest
  networkAttachments: [internalapi]
",
        );

        // act
        let deployment = generate_deployment(
            &object,
            &config(),
            "manila",
            "openstack",
            &Annotations::new(),
            &object.try_labels().unwrap(),
            &object.try_selector_labels().unwrap(),
        )
        .unwrap();

        // assert
        let annotations = deployment
            .spec
            .unwrap()
            .template
            .metadata
            .unwrap()
            .annotations
            .unwrap();
        assert_eq!(
            annotations["k8s.v1.cni.cncf.io/networks"],
            r#"[{"name":"internalapi","namespace":"openstack"}]"#
        );
    }

    fn summary(conditions: &[Condition]) -> Vec<(&str, &str, &str)> {
        conditions
            .iter()
            .map(|c| (c.type_.as_str(), c.status.as_str(), c.reason.as_str()))
            .collect()
    }

    #[test]
    fn state_conditions() {
        // act
        let owner_not_found = State::OwnerNotFound.conditions(1);
        let progressing = State::Initialized { ready_count: 0 }.conditions(2);
        let ready = State::Initialized { ready_count: 2 }.conditions(2);

        // assert
        assert_eq!(
            summary(&owner_not_found),
            [
                ("ManilaOwner", "False", "OwnerNotFound"),
                ("DeploymentReady", "False", "OwnerNotFound"),
            ]
        );
        assert_eq!(
            summary(&progressing),
            [
                ("ManilaOwner", "True", "OwnerFound"),
                ("DeploymentReady", "False", "Progressing"),
            ]
        );
        assert_eq!(summary(&ready)[1], ("DeploymentReady", "True", "Ready"));
        assert_eq!(State::OwnerNotFound.ready_count(), 0);
        assert_eq!(State::Initialized { ready_count: 2 }.ready_count(), 2);
    }

    #[test]
    fn lost_owner_clears_ready_condition() {
        // arrange
        let current = State::Initialized { ready_count: 1 }.conditions(1);

        // act
        let merged = current.merge_from(&State::OwnerNotFound.conditions(1));

        // assert
        assert_eq!(
            summary(&merged),
            [
                ("ManilaOwner", "False", "OwnerNotFound"),
                ("DeploymentReady", "False", "OwnerNotFound"),
            ]
        );
    }
}
