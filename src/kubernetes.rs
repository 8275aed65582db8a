mod annotation;
mod api;
mod conditions_ext;
mod constants;
mod error_policy;
mod metadata;
mod names;
mod object;
mod resource;
mod subset;

pub use annotation::Annotation;
pub use api::Api;
pub use conditions_ext::ConditionsExt;
pub use constants::*;
pub use error_policy::{Context, error_policy};
pub use metadata::{Annotations, Labels, SelectorLabels};
pub use names::{ResourceName, ResourceNamespace, ResourceUid};
pub use object::Object;
pub use resource::Resource;
pub use subset::Subset;
