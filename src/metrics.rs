use std::time::Instant;

use opentelemetry::{
    KeyValue,
    metrics::{Counter, Histogram, MeterProvider as _},
};

use crate::Error;

#[derive(Clone)]
pub struct Metrics {
    kubernetes_api_usage_total: Counter<u64>,
    reconciliation_errors_total: Counter<u64>,
    reconciliations_total: Counter<u64>,
    reconcile_duration_seconds: Histogram<f64>,
}

impl Metrics {
    #[must_use]
    pub fn new(provider: &opentelemetry_sdk::metrics::SdkMeterProvider) -> Self {
        let meter = provider.meter("manila-operator");

        Self {
            kubernetes_api_usage_total: meter
                .u64_counter("manila_operator_kubernetes_api_usage_total")
                .with_description("The total number of Kubernetes API requests made.")
                .build(),
            reconciliation_errors_total: meter
                .u64_counter("manila_operator_reconciliation_errors_total")
                .with_description("The total number of reconciliation errors.")
                .build(),
            reconciliations_total: meter
                .u64_counter("manila_operator_reconciliations_total")
                .with_description("The total number of reconciliations.")
                .build(),
            reconcile_duration_seconds: meter
                .f64_histogram("manila_operator_reconcile_duration_seconds")
                .with_description("The reconcile duration in seconds.")
                .with_unit("s")
                .build(),
        }
    }

    /// Counts a reconciliation and measures its duration until the returned timer is dropped.
    #[must_use]
    pub fn count_and_measure(&self, controller: &'static str) -> ReconcileTimer {
        self.reconciliations_total
            .add(1, &[KeyValue::new("controller", controller)]);
        ReconcileTimer {
            controller,
            histogram: self.reconcile_duration_seconds.clone(),
            start: Instant::now(),
        }
    }

    pub fn reconcile_failure(&self, controller: &'static str, error: &Error) {
        let error = match error {
            Error::Kube(_) => "kube",
            Error::MissingObjectKey(_) => "missing object key",
            Error::Serialize(_) => "serialize",
        };
        self.reconciliation_errors_total.add(
            1,
            &[
                KeyValue::new("controller", controller),
                KeyValue::new("error", error),
            ],
        );
    }

    pub fn kubernetes_api_usage_count<R>(&self, verb: &'static str)
    where
        R: kube::Resource<DynamicType = ()>,
    {
        self.kubernetes_api_usage_total.add(
            1,
            &[
                KeyValue::new("group", R::group(&()).to_string()),
                KeyValue::new("kind", R::kind(&()).to_string()),
                KeyValue::new("verb", verb),
                KeyValue::new("version", R::version(&()).to_string()),
            ],
        );
    }
}

pub struct ReconcileTimer {
    controller: &'static str,
    histogram: Histogram<f64>,
    start: Instant,
}

impl Drop for ReconcileTimer {
    fn drop(&mut self) {
        self.histogram.record(
            self.start.elapsed().as_secs_f64(),
            &[KeyValue::new("controller", self.controller)],
        );
    }
}
