//! Opaque OAuth parameter bag.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provider-specific OAuth parameters (auth URL, token URL, scopes, provider
/// key, ...) forwarded verbatim into the emitted configuration.
///
/// The registry never interprets the contents; the bag exists so a host
/// loader can drive its own authorization flow.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OAuthDescriptor(Map<String, Value>);

impl OAuthDescriptor {
    /// Wraps a parameter map.
    #[must_use]
    pub fn new(params: Map<String, Value>) -> Self {
        Self(params)
    }

    /// Returns the underlying parameters.
    #[must_use]
    pub fn params(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for OAuthDescriptor {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}
