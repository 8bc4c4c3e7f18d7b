//! The emitted configuration document.

use serde::{Deserialize, Serialize};
use toolset_primitives::{HeaderDescriptor, OAuthDescriptor, ToolkitInfo};

use crate::catalog::ToolDescriptor;

/// Serialized manifest describing a toolkit's identity and all of its tools'
/// schemas; the contract a host loader consumes.
///
/// The canonical identity key is `toolkitName`. The legacy spelling
/// `toolkit-name` is accepted when deserializing and never emitted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ToolkitManifest {
    #[serde(rename = "toolkitName", alias = "toolkit-name")]
    name: String,
    author: String,
    version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    oauth: Option<OAuthDescriptor>,
    #[serde(
        rename = "toolkitHeaders",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    headers: Vec<HeaderDescriptor>,
    tools: Vec<ToolDescriptor>,
}

impl ToolkitManifest {
    pub(crate) fn new(info: &ToolkitInfo, tools: Vec<ToolDescriptor>) -> Self {
        Self {
            name: info.name().to_string(),
            author: info.author().to_string(),
            version: info.version().to_string(),
            oauth: info.oauth().cloned(),
            headers: info.headers().to_vec(),
            tools,
        }
    }

    /// Returns the toolkit name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the author string.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the toolkit version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the toolkit-wide OAuth requirement, if declared.
    #[must_use]
    pub fn oauth(&self) -> Option<&OAuthDescriptor> {
        self.oauth.as_ref()
    }

    /// Returns the shared setup headers in declaration order.
    #[must_use]
    pub fn headers(&self) -> &[HeaderDescriptor] {
        &self.headers
    }

    /// Returns the tools in registration order.
    #[must_use]
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }
}
