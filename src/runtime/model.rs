//! Model descriptors as seen by the version gate

use serde::{Deserialize, Serialize};

/// Anything that knows whether it is served by a remote provider
pub trait HostedModel {
    /// True when the model runs on a remote/managed service rather than the
    /// local runtime
    fn is_external(&self) -> bool;
}

/// Minimal model description for callers without their own model type
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelDescriptor {
    pub name: String,
    #[serde(default)]
    pub is_external: bool,
}

impl ModelDescriptor {
    /// A model served by the local runtime
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_external: false,
        }
    }

    /// A model served by a remote provider
    pub fn external(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_external: true,
        }
    }
}

impl HostedModel for ModelDescriptor {
    fn is_external(&self) -> bool {
        self.is_external
    }
}

impl<T: HostedModel + ?Sized> HostedModel for &T {
    fn is_external(&self) -> bool {
        (**self).is_external()
    }
}
