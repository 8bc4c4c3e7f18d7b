//! Field descriptor collector.
//!
//! Records, per declaration block, an ordered set of field descriptors as
//! registration calls arrive. Registration is synchronous and happens during
//! the declaration phase, before any validation or emission is requested.

use std::collections::HashMap;

use tracing::debug;
use toolset_primitives::{ClassKey, FieldDescriptor};

use crate::error::{RegistryError, RegistryResult};

/// Ordered per-class store of field descriptors.
#[derive(Debug, Default)]
pub struct FieldCollector {
    blocks: HashMap<ClassKey, Vec<FieldDescriptor>>,
}

impl FieldCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a field descriptor for the given class.
    ///
    /// Appends preserving first-seen order. If the field name already has a
    /// descriptor on that class, the type constraint, description, and enum
    /// values are overwritten in place (latest registration wins) while the
    /// optionality flag and position are preserved.
    pub fn record(&mut self, class: &ClassKey, descriptor: FieldDescriptor) {
        debug!(class = %class, field = descriptor.name(), "recorded field descriptor");
        let block = self.blocks.entry(class.clone()).or_default();
        if let Some(existing) = block.iter_mut().find(|d| d.name() == descriptor.name()) {
            existing.overwrite_from(descriptor);
        } else {
            block.push(descriptor);
        }
    }

    /// Marks an already recorded field optional.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownField`] when no descriptor exists yet
    /// for that field on that class; the optionality marker must compose with
    /// a previously recorded type marker.
    pub fn mark_optional(&mut self, class: &ClassKey, field: &str) -> RegistryResult<()> {
        let descriptor = self
            .blocks
            .get_mut(class)
            .and_then(|block| block.iter_mut().find(|d| d.name() == field))
            .ok_or_else(|| RegistryError::UnknownField {
                class: class.clone(),
                field: field.to_string(),
            })?;
        descriptor.set_optional();
        Ok(())
    }

    /// Returns the descriptors recorded for a class, in declaration order.
    #[must_use]
    pub fn descriptors(&self, class: &ClassKey) -> &[FieldDescriptor] {
        self.blocks.get(class).map_or(&[], Vec::as_slice)
    }
}
