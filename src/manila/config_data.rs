use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use crate::kubernetes::Annotation;

const CUSTOM_CONF_KEY: &str = "custom.conf";

/// Files of a service's custom config map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigData(BTreeMap<String, String>);

impl ConfigData {
    /// `custom.conf` holding `custom_service_config`, plus one file per config overwrite.
    ///
    /// An overwrite named `custom.conf` is ignored.
    #[must_use]
    pub fn new(custom_service_config: &str, overwrites: &BTreeMap<String, String>) -> Self {
        let mut files = overwrites.clone();
        files.insert(CUSTOM_CONF_KEY.into(), custom_service_config.into());
        Self(files)
    }
}

impl Annotation for ConfigData {
    const NAME: &'static str = "config-data";

    fn digest(&self, sha: &mut Sha256) {
        for (name, content) in &self.0 {
            sha.update(name.as_bytes());
            sha.update([0]);
            sha.update(content.as_bytes());
            sha.update([0]);
        }
    }
}

impl From<&ConfigData> for BTreeMap<String, String> {
    fn from(value: &ConfigData) -> Self {
        value.0.clone()
    }
}
