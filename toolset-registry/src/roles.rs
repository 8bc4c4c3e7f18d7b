//! Class role registry.
//!
//! Binds `(role, logical name)` pairs to declaration blocks. Unintentional
//! duplicate names are a contract violation surfaced at registration time;
//! overwriting requires the explicit [`RoleRegistry::rebind`] path.

use std::collections::HashMap;

use tracing::debug;
use toolset_primitives::{ClassKey, SchemaName, SchemaRole};

use crate::error::{RegistryError, RegistryResult};

/// Lookup table from `(role, logical name)` to the owning class key.
#[derive(Debug, Default)]
pub struct RoleRegistry {
    bindings: HashMap<(SchemaRole, SchemaName), ClassKey>,
}

impl RoleRegistry {
    /// Creates an empty role registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a logical name under a role to a class key.
    ///
    /// Binding the same class key again is a no-op, so a declaration module
    /// may be initialized more than once without error.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateSchemaName`] when the pair is
    /// already bound to a different class key.
    pub fn bind(
        &mut self,
        role: SchemaRole,
        name: SchemaName,
        class: ClassKey,
    ) -> RegistryResult<()> {
        if let Some(existing) = self.bindings.get(&(role, name.clone())) {
            if *existing == class {
                return Ok(());
            }
            return Err(RegistryError::DuplicateSchemaName {
                role,
                name,
                existing: existing.clone(),
                offered: class,
            });
        }
        debug!(%role, name = %name, class = %class, "bound schema role");
        self.bindings.insert((role, name), class);
        Ok(())
    }

    /// Explicitly rebinds a logical name, replacing any previous binding.
    ///
    /// This is the only path by which "last registration wins".
    pub fn rebind(&mut self, role: SchemaRole, name: SchemaName, class: ClassKey) {
        debug!(%role, name = %name, class = %class, "rebound schema role");
        self.bindings.insert((role, name), class);
    }

    /// Resolves the class key bound under `(role, name)`.
    #[must_use]
    pub fn resolve(&self, role: SchemaRole, name: &SchemaName) -> Option<&ClassKey> {
        self.bindings.get(&(role, name.clone()))
    }
}
