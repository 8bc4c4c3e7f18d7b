//! Toolkit identity declared once per package.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::header::HeaderDescriptor;
use crate::oauth::OAuthDescriptor;

/// Identity of a toolkit: name, author, version, plus shared setup headers
/// and an optional OAuth requirement covering every tool in the bundle.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ToolkitInfo {
    name: String,
    author: String,
    version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    oauth: Option<OAuthDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    headers: Vec<HeaderDescriptor>,
}

impl ToolkitInfo {
    /// Starts building a [`ToolkitInfo`].
    #[must_use]
    pub fn builder() -> ToolkitInfoBuilder {
        ToolkitInfoBuilder {
            name: None,
            author: None,
            version: None,
            oauth: None,
            headers: Vec::new(),
        }
    }

    /// Returns the toolkit display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the author string.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the semantic version string identifying the toolkit release.
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
}

/// Builder for [`ToolkitInfo`].
#[derive(Debug)]
pub struct ToolkitInfoBuilder {
    name: Option<String>,
    author: Option<String>,
    version: Option<String>,
    oauth: Option<OAuthDescriptor>,
    headers: Vec<HeaderDescriptor>,
}

impl ToolkitInfoBuilder {
    /// Sets the toolkit name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToolkit`] when the name is empty.
    pub fn name(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidToolkit {
                reason: "toolkit name cannot be empty".into(),
            });
        }
        self.name = Some(name);
        Ok(self)
    }

    /// Sets the author string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToolkit`] when the author is empty.
    pub fn author(mut self, author: impl Into<String>) -> Result<Self> {
        let author = author.into();
        if author.trim().is_empty() {
            return Err(Error::InvalidToolkit {
                reason: "toolkit author cannot be empty".into(),
            });
        }
        self.author = Some(author);
        Ok(self)
    }

    /// Sets the semantic version string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToolkit`] when the version string is empty.
    pub fn version(mut self, version: impl Into<String>) -> Result<Self> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(Error::InvalidToolkit {
                reason: "toolkit version cannot be empty".into(),
            });
        }
        self.version = Some(version);
        Ok(self)
    }

    /// Attaches a toolkit-wide OAuth requirement.
    #[must_use]
    pub fn oauth(mut self, oauth: OAuthDescriptor) -> Self {
        self.oauth = Some(oauth);
        self
    }

    /// Appends a shared setup header.
    #[must_use]
    pub fn add_header(mut self, header: HeaderDescriptor) -> Self {
        self.headers.push(header);
        self
    }

    /// Consumes the builder and returns the identity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToolkit`] if mandatory fields are missing.
    pub fn build(self) -> Result<ToolkitInfo> {
        let name = self.name.ok_or_else(|| Error::InvalidToolkit {
            reason: "toolkit name must be provided".into(),
        })?;
        let author = self.author.ok_or_else(|| Error::InvalidToolkit {
            reason: "toolkit author must be provided".into(),
        })?;
        let version = self.version.ok_or_else(|| Error::InvalidToolkit {
            reason: "toolkit version must be provided".into(),
        })?;

        Ok(ToolkitInfo {
            name,
            author,
            version,
            oauth: self.oauth,
            headers: self.headers,
        })
    }
}
