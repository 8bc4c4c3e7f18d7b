//! Setup header descriptors advertised at the toolkit level.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::TypeKind;

/// Describes one setup header a caller supplies before invoking tools.
///
/// `header_key` is the transport key the value travels under; when not given
/// explicitly it is derived from the descriptor name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HeaderDescriptor {
    name: String,
    #[serde(rename = "type")]
    kind: TypeKind,
    description: String,
    #[serde(rename = "isOptional", default, skip_serializing_if = "is_false")]
    optional: bool,
    #[serde(rename = "header")]
    header_key: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl HeaderDescriptor {
    /// Creates a required header descriptor with a derived transport key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeader`] if the name is empty.
    pub fn new(
        name: impl Into<String>,
        kind: TypeKind,
        description: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidHeader {
                reason: "header name cannot be empty".into(),
            });
        }
        let header_key = derive_header_key(&name);
        Ok(Self {
            name,
            kind,
            description: description.into(),
            optional: false,
            header_key,
        })
    }

    /// Marks the header optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Overrides the derived transport header key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeader`] if the key is empty or contains
    /// whitespace.
    pub fn with_header_key(mut self, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            return Err(Error::InvalidHeader {
                reason: format!("header key `{key}` must be non-empty without whitespace"),
            });
        }
        self.header_key = key;
        Ok(self)
    }

    /// Returns the header name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type constraint.
    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns whether the header may be omitted.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    /// Returns the transport key the header value travels under.
    #[must_use]
    pub fn header_key(&self) -> &str {
        &self.header_key
    }
}

fn derive_header_key(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!("x-toolset-{slug}")
}
