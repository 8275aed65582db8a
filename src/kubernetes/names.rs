use std::{
    fmt::{Display, Formatter, Result},
    ops::Deref,
};

/*
 * ============================================================================
 * Resource Name
 * ============================================================================
 */
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceName(String);

impl ResourceName {
    #[must_use]
    pub fn new(value: String) -> Self {
        Self(value)
    }
}

impl Deref for ResourceName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ResourceName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.0)
    }
}

impl From<ResourceName> for String {
    fn from(value: ResourceName) -> Self {
        value.0
    }
}

/*
 * ============================================================================
 * Resource Namespace
 * ============================================================================
 */
pub struct ResourceNamespace(String);

impl Deref for ResourceNamespace {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for ResourceNamespace {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/*
 * ============================================================================
 * Resource Uid
 * ============================================================================
 */
pub struct ResourceUid(String);

impl Display for ResourceUid {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ResourceUid {
    fn from(value: String) -> Self {
        Self(value)
    }
}
