// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-material uniform storage: a name -> slot layout over flat `f32`
//! buffers, the staging block the control side writes, the batch slots
//! `submit` snapshots into, and the applied buffer the consumer reads.

use glint_core::error::MaterialError;
use glint_core::material::PropKind;
use glint_core::math::{Mat4, Vec4};
use std::collections::HashMap;

/// Location and shape of one named property inside a block's flat buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PropSlot {
    kind: PropKind,
    offset: usize,
    len: usize,
}

/// A name -> slot map over one flat `f32` buffer.
///
/// The layout is append-only: a new property, a kind change, or an array
/// growing past its slot all allocate fresh storage at the end of the buffer
/// and retire the old slot in place. Existing offsets never move, so every
/// buffer sharing this layout (batch slots, the applied buffer) stays valid
/// across growth.
#[derive(Debug, Default)]
struct UniformBlock {
    slots: HashMap<String, PropSlot>,
    data: Vec<f32>,
}

impl UniformBlock {
    /// Stages a flattened value under `name`, classifying its kind by element
    /// count. Same-kind writes that fit land in place (arrays may narrow; the
    /// recorded length always reflects the most recent write).
    fn write(&mut self, name: &str, values: &[f32]) {
        let kind = PropKind::kind_for_len(values.len());
        if let Some(slot) = self.slots.get_mut(name) {
            if slot.kind == kind && values.len() <= slot.len {
                slot.len = values.len();
                let offset = slot.offset;
                self.data[offset..offset + values.len()].copy_from_slice(values);
                return;
            }
        }
        // New name, kind change, or array growth: retire any old slot and
        // append a fresh one at the end of the buffer.
        let offset = self.data.len();
        self.data.extend_from_slice(values);
        self.slots.insert(
            name.to_string(),
            PropSlot {
                kind,
                offset,
                len: values.len(),
            },
        );
    }

    fn resolve_any(&self, name: &str) -> Result<PropSlot, MaterialError> {
        self.slots
            .get(name)
            .copied()
            .ok_or_else(|| MaterialError::UnknownProperty {
                name: name.to_string(),
            })
    }

    fn resolve(&self, name: &str, requested: PropKind) -> Result<PropSlot, MaterialError> {
        let slot = self.resolve_any(name)?;
        if slot.kind != requested {
            return Err(MaterialError::KindMismatch {
                name: name.to_string(),
                requested,
                stored: slot.kind,
            });
        }
        Ok(slot)
    }

    fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// One line per property, in staging-buffer order.
    fn describe(&self) -> Vec<String> {
        let mut slots: Vec<(&String, &PropSlot)> = self.slots.iter().collect();
        slots.sort_by_key(|(_, slot)| slot.offset);
        slots
            .into_iter()
            .map(|(name, slot)| {
                let values = &self.data[slot.offset..slot.offset + slot.len];
                format!(
                    "{name}: {} ({} floats at offset {}) = {values:?}",
                    slot.kind, slot.len, slot.offset
                )
            })
            .collect()
    }
}

/// All uniform storage attached to one material.
///
/// The control side writes the staging block; `submit` snapshots staging into
/// a numbered batch slot; the consumer's `apply` copies a batch slot into the
/// applied buffer, which is what every read observes. All buffers share the
/// staging block's layout.
#[derive(Debug)]
pub(crate) struct MaterialBuffers {
    staging: UniformBlock,
    batches: Vec<Vec<f32>>,
    applied: Vec<f32>,
}

impl MaterialBuffers {
    pub(crate) fn new(batch_slots: usize) -> Self {
        Self {
            staging: UniformBlock::default(),
            batches: vec![Vec::new(); batch_slots],
            applied: Vec::new(),
        }
    }

    pub(crate) fn write_float(&mut self, name: &str, value: f32) {
        self.staging.write(name, &[value]);
    }

    pub(crate) fn write_vector4(&mut self, name: &str, value: Vec4) {
        self.staging
            .write(name, bytemuck::cast_slice(std::slice::from_ref(&value)));
    }

    pub(crate) fn write_matrix4x4(&mut self, name: &str, value: Mat4) {
        self.staging
            .write(name, bytemuck::cast_slice(std::slice::from_ref(&value)));
    }

    pub(crate) fn write_float_array(&mut self, name: &str, values: &[f32]) {
        self.staging.write(name, values);
    }

    pub(crate) fn has_property(&self, name: &str) -> bool {
        self.staging.contains(name)
    }

    /// Snapshots the staging buffer into batch slot `batch_index`.
    pub(crate) fn submit(&mut self, batch_index: u32) -> Result<(), MaterialError> {
        let slots = self.batches.len();
        let Some(batch) = self.batches.get_mut(batch_index as usize) else {
            return Err(MaterialError::BatchOutOfRange {
                index: batch_index,
                slots,
            });
        };
        batch.clear();
        batch.extend_from_slice(&self.staging.data);
        Ok(())
    }

    /// Copies batch slot `batch_index` into the applied buffer.
    ///
    /// A batch submitted before the layout last grew is shorter than the
    /// current layout; the missing tail reads as zeroes.
    pub(crate) fn apply(&mut self, batch_index: u32) -> Result<(), MaterialError> {
        let slots = self.batches.len();
        let Some(batch) = self.batches.get(batch_index as usize) else {
            return Err(MaterialError::BatchOutOfRange {
                index: batch_index,
                slots,
            });
        };
        self.applied.clear();
        self.applied.extend_from_slice(batch);
        self.applied.resize(self.staging.data.len(), 0.0);
        Ok(())
    }

    pub(crate) fn read_float(&self, name: &str) -> Result<f32, MaterialError> {
        let slot = self.staging.resolve(name, PropKind::Float)?;
        Ok(self.applied_floats(slot)[0])
    }

    pub(crate) fn read_vector4(&self, name: &str) -> Result<Vec4, MaterialError> {
        let slot = self.staging.resolve(name, PropKind::Vector4)?;
        Ok(bytemuck::cast_slice::<f32, Vec4>(&self.applied_floats(slot))[0])
    }

    pub(crate) fn read_matrix4x4(&self, name: &str) -> Result<Mat4, MaterialError> {
        let slot = self.staging.resolve(name, PropKind::Matrix4x4)?;
        Ok(bytemuck::cast_slice::<f32, Mat4>(&self.applied_floats(slot))[0])
    }

    /// Reads the flattened applied value of any kind, with the exact element
    /// count most recently staged for the property.
    pub(crate) fn read_float_array(&self, name: &str) -> Result<Vec<f32>, MaterialError> {
        let slot = self.staging.resolve_any(name)?;
        Ok(self.applied_floats(slot))
    }

    pub(crate) fn describe(&self) -> Vec<String> {
        self.staging.describe()
    }

    /// The slot's applied values, zero-filled where no batch has reached the
    /// applied buffer yet.
    fn applied_floats(&self, slot: PropSlot) -> Vec<f32> {
        let mut values = vec![0.0f32; slot.len];
        if slot.offset < self.applied.len() {
            let available = (self.applied.len() - slot.offset).min(slot.len);
            values[..available].copy_from_slice(&self.applied[slot.offset..slot.offset + available]);
        }
        values
    }
}
