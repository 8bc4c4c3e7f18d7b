//! Validated name newtypes used to key registry lookups.
//!
//! Every schema reference in the registry is an explicit string key resolved
//! through these types; there is no reflection or implicit class identity
//! anywhere in the lookup path.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MAX_SCHEMA_NAME_LEN: usize = 96;
const MAX_CLASS_KEY_LEN: usize = 64;

/// Logical name under which an input/output/setup shape is registered.
///
/// Independent of any declaration-site identity; two declaration blocks may
/// never bind the same `(role, name)` pair.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaName(String);

impl SchemaName {
    /// Creates a new logical schema name after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSchemaName`] if the name is empty, too long,
    /// or contains `/` or control characters.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidSchemaName {
                name,
                reason: "name cannot be empty".into(),
            });
        }
        if name.len() > MAX_SCHEMA_NAME_LEN {
            return Err(Error::InvalidSchemaName {
                name,
                reason: format!("name length must be <= {MAX_SCHEMA_NAME_LEN}"),
            });
        }
        if name.chars().any(|c| c == '/' || c.is_control()) {
            return Err(Error::InvalidSchemaName {
                name,
                reason: "name must not contain '/' or control characters".into(),
            });
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SchemaName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<SchemaName> for String {
    fn from(value: SchemaName) -> Self {
        value.0
    }
}

/// Identifier for a declaration block contributing field descriptors.
///
/// Plays the part the source class identity played in annotation-driven
/// designs, as an explicit key chosen by the declaring module.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassKey(String);

impl ClassKey {
    /// Creates a new class key after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidClassKey`] if the key is empty, too long, or
    /// contains characters outside alphanumerics, `-`, `_`, and `.`.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::InvalidClassKey {
                key,
                reason: "key cannot be empty".into(),
            });
        }
        if key.len() > MAX_CLASS_KEY_LEN {
            return Err(Error::InvalidClassKey {
                key,
                reason: format!("key length must be <= {MAX_CLASS_KEY_LEN}"),
            });
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(Error::InvalidClassKey {
                key,
                reason: "key must contain alphanumeric, dash, underscore, or dot".into(),
            });
        }
        Ok(Self(key))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ClassKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ClassKey> for String {
    fn from(value: ClassKey) -> Self {
        value.0
    }
}

/// Role a declaration block plays inside a toolkit.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaRole {
    /// Shape of the values a tool accepts.
    Input,
    /// Shape of the values a tool produces.
    Output,
    /// Shape of the setup/credential headers a tool requires.
    Setup,
    /// A tool declaration.
    Tool,
    /// A toolkit declaration.
    Toolkit,
}

impl Display for SchemaRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Setup => "setup",
            Self::Tool => "tool",
            Self::Toolkit => "toolkit",
        };
        f.write_str(label)
    }
}
