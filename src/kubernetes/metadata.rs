use std::{collections::BTreeMap, ops::Deref};

use super::annotation::Annotation;

/*
 * ============================================================================
 * Annotations
 * ============================================================================
 */
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Annotations(BTreeMap<String, String>);

impl Annotations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn add<A: Annotation>(mut self, annotation: &A) -> Self {
        let (key, value) = annotation.to_tuple();
        self.0.insert(key, value);
        self
    }

    #[must_use]
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

impl Deref for Annotations {
    type Target = BTreeMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Annotations> for BTreeMap<String, String> {
    fn from(value: Annotations) -> Self {
        value.0
    }
}

impl From<&Annotations> for BTreeMap<String, String> {
    fn from(value: &Annotations) -> Self {
        value.0.clone()
    }
}

/*
 * ============================================================================
 * Labels
 * ============================================================================
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels(BTreeMap<String, String>);

impl Deref for Labels {
    type Target = BTreeMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<BTreeMap<String, String>> for Labels {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self(value)
    }
}

impl From<&Labels> for BTreeMap<String, String> {
    fn from(value: &Labels) -> Self {
        value.0.clone()
    }
}

/// Subset of [`Labels`] that is stable for the lifetime of an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorLabels(BTreeMap<String, String>);

impl From<BTreeMap<String, String>> for SelectorLabels {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self(value)
    }
}

impl From<&SelectorLabels> for BTreeMap<String, String> {
    fn from(value: &SelectorLabels) -> Self {
        value.0.clone()
    }
}
