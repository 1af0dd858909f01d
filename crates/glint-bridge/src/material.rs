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

//! The control-side wrapper owning one engine material.

use crate::dispatch::FrameDispatcher;
use glint_core::device::{MaterialDevice, MaterialStats};
use glint_core::error::MaterialError;
use glint_core::material::{MaterialId, ShaderSourceSet, UniformValue};
use glint_core::math::{Mat4, Vec4};
use std::sync::Arc;

/// Exclusive owner of one native live material.
///
/// The native resource is realized lazily: the first operation that needs an
/// id (including [`native_id`]) creates it. The wrapper holds the only strong
/// ownership of the resource; anything else keeps at most the small-integer
/// id as a weak back-reference.
///
/// [`destroy`] is idempotent, and dropping the wrapper destroys the resource.
/// After destruction the id snapshot is [`MaterialId::DESTROYED`] forever;
/// staging and submitting become reported no-ops, and reads fail with
/// `MaterialError::NotFound`, so a teardown race never addresses some other
/// material.
///
/// [`native_id`]: LiveMaterial::native_id
/// [`destroy`]: LiveMaterial::destroy
#[derive(Debug)]
pub struct LiveMaterial {
    device: Arc<dyn MaterialDevice>,
    dispatcher: FrameDispatcher,
    id: MaterialId,
}

impl LiveMaterial {
    /// Creates an unrealized wrapper. Usually spawned through
    /// `MaterialHost::create_material`.
    pub fn new(device: Arc<dyn MaterialDevice>, dispatcher: FrameDispatcher) -> Self {
        Self {
            device,
            dispatcher,
            id: MaterialId::UNSET,
        }
    }

    /// The native id, realizing the material on first call.
    ///
    /// Returns [`MaterialId::DESTROYED`] forever once the wrapper has been
    /// destroyed.
    pub fn native_id(&mut self) -> MaterialId {
        self.realize();
        self.id
    }

    /// Hands shader source for both stages to the engine's install pipeline.
    pub fn set_shader_source(
        &mut self,
        fragment_src: &str,
        fragment_entry: &str,
        vertex_src: &str,
        vertex_entry: &str,
    ) -> Result<(), MaterialError> {
        let Some(id) = self.realize() else {
            return self.dead_write("set_shader_source");
        };
        self.device.set_shader_source(
            id,
            ShaderSourceSet::new(fragment_src, fragment_entry, vertex_src, vertex_entry),
        )
    }

    /// Stages a scalar uniform write.
    pub fn set_float(&mut self, name: &str, value: f32) -> Result<(), MaterialError> {
        let Some(id) = self.realize() else {
            return self.dead_write("set_float");
        };
        self.device.set_float(id, name, value)
    }

    /// Stages a 4-component vector uniform write.
    pub fn set_vector4(&mut self, name: &str, value: Vec4) -> Result<(), MaterialError> {
        let Some(id) = self.realize() else {
            return self.dead_write("set_vector4");
        };
        self.device.set_vector4(id, name, value)
    }

    /// Stages a 4x4 matrix uniform write.
    pub fn set_matrix4x4(&mut self, name: &str, value: Mat4) -> Result<(), MaterialError> {
        let Some(id) = self.realize() else {
            return self.dead_write("set_matrix4x4");
        };
        self.device.set_matrix4x4(id, name, value)
    }

    /// Stages a float-array uniform write; the exact element count survives
    /// the round trip.
    pub fn set_float_array(&mut self, name: &str, values: &[f32]) -> Result<(), MaterialError> {
        let Some(id) = self.realize() else {
            return self.dead_write("set_float_array");
        };
        self.device.set_float_array(id, name, values)
    }

    /// Stages any uniform value through one generic entry point.
    pub fn set_value(
        &mut self,
        name: &str,
        value: impl Into<UniformValue>,
    ) -> Result<(), MaterialError> {
        match value.into() {
            UniformValue::Float(v) => self.set_float(name, v),
            UniformValue::Vector4(v) => self.set_vector4(name, v),
            UniformValue::Matrix4x4(m) => self.set_matrix4x4(name, m),
            UniformValue::FloatArray(values) => self.set_float_array(name, &values),
        }
    }

    /// Reads a scalar from the applied (consumer-visible) state.
    pub fn get_float(&mut self, name: &str) -> Result<f32, MaterialError> {
        match self.realize() {
            Some(id) => self.device.get_float(id, name),
            None => Err(MaterialError::NotFound(self.id)),
        }
    }

    /// Reads a 4-component vector from the applied state.
    pub fn get_vector4(&mut self, name: &str) -> Result<Vec4, MaterialError> {
        match self.realize() {
            Some(id) => self.device.get_vector4(id, name),
            None => Err(MaterialError::NotFound(self.id)),
        }
    }

    /// Reads a 4x4 matrix from the applied state.
    pub fn get_matrix4x4(&mut self, name: &str) -> Result<Mat4, MaterialError> {
        match self.realize() {
            Some(id) => self.device.get_matrix4x4(id, name),
            None => Err(MaterialError::NotFound(self.id)),
        }
    }

    /// Reads a float array from the applied state.
    pub fn get_float_array(&mut self, name: &str) -> Result<Vec<f32>, MaterialError> {
        match self.realize() {
            Some(id) => self.device.get_float_array(id, name),
            None => Err(MaterialError::NotFound(self.id)),
        }
    }

    /// Whether the staging block has a property with this name. Destroyed
    /// wrappers report `false`.
    pub fn has_property(&mut self, name: &str) -> Result<bool, MaterialError> {
        match self.realize() {
            Some(id) => self.device.has_property(id, name),
            None => Ok(false),
        }
    }

    /// Snapshots the staging block into `batch_index` and stages the frame
    /// dispatch for it.
    pub fn submit(&mut self, batch_index: u32) -> Result<(), MaterialError> {
        let Some(id) = self.realize() else {
            return self.dead_write("submit");
        };
        self.device.submit_uniforms(id, batch_index)?;
        self.dispatcher.submission_staged(id, batch_index);
        Ok(())
    }

    /// The material's install bookkeeping.
    pub fn stats(&mut self) -> Result<MaterialStats, MaterialError> {
        match self.realize() {
            Some(id) => self.device.get_material_stats(id),
            None => Err(MaterialError::NotFound(self.id)),
        }
    }

    /// Destroys the native material.
    ///
    /// Idempotent: a second call, or a call on a never-realized wrapper, only
    /// settles the snapshot at [`MaterialId::DESTROYED`] without touching the
    /// engine.
    pub fn destroy(&mut self) {
        if self.id.is_live() {
            if let Err(err) = self.device.destroy_material(self.id) {
                log::warn!("Destroying material {} failed: {err}", self.id.0);
            }
            self.dispatcher.material_destroyed(self.id);
        }
        self.id = MaterialId::DESTROYED;
    }

    /// Resolves a live id, creating the native material if this wrapper has
    /// never been realized. `None` means the wrapper is destroyed (or the
    /// engine refused the creation).
    fn realize(&mut self) -> Option<MaterialId> {
        match self.id {
            MaterialId::UNSET => match self.device.create_material() {
                Ok(id) => {
                    self.dispatcher.material_realized(id);
                    self.id = id;
                    log::debug!("Realized live material {}", id.0);
                    Some(id)
                }
                Err(err) => {
                    log::warn!("Could not realize a live material: {err}");
                    None
                }
            },
            MaterialId::DESTROYED => None,
            id => Some(id),
        }
    }

    fn dead_write(&self, operation: &str) -> Result<(), MaterialError> {
        log::warn!("{operation} on a destroyed live material; ignoring");
        Ok(())
    }
}

impl Drop for LiveMaterial {
    fn drop(&mut self) {
        if self.id.is_live() {
            self.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{DeviceCall, MockMaterialDevice};

    fn setup() -> (Arc<MockMaterialDevice>, FrameDispatcher) {
        let device = Arc::new(MockMaterialDevice::new());
        let dispatcher = FrameDispatcher::new(device.clone());
        (device, dispatcher)
    }

    #[test]
    fn realization_is_lazy_and_happens_once() {
        let (device, dispatcher) = setup();
        let mut material = LiveMaterial::new(device.clone(), dispatcher.clone());
        assert!(device.calls().is_empty());

        let id = material.native_id();
        assert_eq!(id, MaterialId(1));
        assert_eq!(material.native_id(), id);
        assert_eq!(device.calls(), vec![DeviceCall::Create(id)]);
        assert_eq!(dispatcher.phase(id), crate::DispatchPhase::Live);
    }

    #[test]
    fn first_uniform_write_realizes_the_material() {
        let (device, dispatcher) = setup();
        let mut material = LiveMaterial::new(device.clone(), dispatcher);
        material.set_float("floatVal", 0.35).unwrap();

        assert_eq!(
            device.calls(),
            vec![
                DeviceCall::Create(MaterialId(1)),
                DeviceCall::SetFloat(MaterialId(1), "floatVal".to_string(), 0.35),
            ]
        );
    }

    #[test]
    fn generic_set_value_routes_to_the_typed_setters() {
        let (device, dispatcher) = setup();
        let mut material = LiveMaterial::new(device.clone(), dispatcher);
        material.set_value("a", 0.5f32).unwrap();
        material.set_value("b", glint_core::math::Vec4::ONE).unwrap();
        material.set_value("c", vec![1.0, 2.0, 3.0]).unwrap();

        let calls = device.calls();
        assert!(calls.contains(&DeviceCall::SetFloat(MaterialId(1), "a".to_string(), 0.5)));
        assert!(calls.contains(&DeviceCall::SetVector4(MaterialId(1), "b".to_string())));
        assert!(calls.contains(&DeviceCall::SetFloatArray(
            MaterialId(1),
            "c".to_string(),
            3
        )));
    }

    #[test]
    fn sibling_wrappers_get_distinct_ids() {
        let (device, dispatcher) = setup();
        let mut a = LiveMaterial::new(device.clone(), dispatcher.clone());
        let mut b = LiveMaterial::new(device, dispatcher);
        assert_ne!(a.native_id(), b.native_id());
    }

    #[test]
    fn destroy_is_idempotent_and_settles_the_sentinel() {
        let (device, dispatcher) = setup();
        let mut material = LiveMaterial::new(device.clone(), dispatcher.clone());
        let id = material.native_id();

        material.destroy();
        material.destroy();
        assert_eq!(material.native_id(), MaterialId::DESTROYED);
        assert_eq!(dispatcher.phase(id), crate::DispatchPhase::Destroyed);

        let destroys = device
            .calls()
            .into_iter()
            .filter(|c| matches!(c, DeviceCall::Destroy(_)))
            .count();
        assert_eq!(destroys, 1);
    }

    #[test]
    fn destroying_a_never_realized_wrapper_skips_the_engine() {
        let (device, dispatcher) = setup();
        let mut material = LiveMaterial::new(device.clone(), dispatcher);
        material.destroy();
        assert!(device.calls().is_empty());
        assert_eq!(material.native_id(), MaterialId::DESTROYED);
    }

    #[test]
    fn writes_after_destroy_are_reported_no_ops() {
        let (device, dispatcher) = setup();
        let mut material = LiveMaterial::new(device.clone(), dispatcher);
        material.native_id();
        material.destroy();
        let calls_before = device.calls().len();

        assert_eq!(material.set_float("x", 1.0), Ok(()));
        assert_eq!(material.submit(0), Ok(()));
        assert_eq!(
            material
                .set_shader_source("frag", "fragMain", "vert", "vertMain"),
            Ok(())
        );
        assert_eq!(device.calls().len(), calls_before);
    }

    #[test]
    fn reads_after_destroy_fail_with_the_destroyed_sentinel() {
        let (device, dispatcher) = setup();
        let mut material = LiveMaterial::new(device, dispatcher);
        material.native_id();
        material.destroy();

        assert_eq!(
            material.get_float("x"),
            Err(MaterialError::NotFound(MaterialId::DESTROYED))
        );
        assert_eq!(material.has_property("x"), Ok(false));
    }

    #[test]
    fn submit_stages_the_dispatch_only_on_engine_success() {
        let (device, dispatcher) = setup();
        let mut material = LiveMaterial::new(device.clone(), dispatcher.clone());
        let id = material.native_id();

        // The mock rejects batch indices >= 4, like the default engine.
        assert!(matches!(
            material.submit(9),
            Err(MaterialError::BatchOutOfRange { .. })
        ));
        assert_eq!(dispatcher.phase(id), crate::DispatchPhase::Live);

        material.submit(1).unwrap();
        assert_eq!(dispatcher.phase(id), crate::DispatchPhase::PendingDispatch);
    }

    #[test]
    fn dropping_a_live_wrapper_destroys_the_material() {
        let (device, dispatcher) = setup();
        let id;
        {
            let mut material = LiveMaterial::new(device.clone(), dispatcher.clone());
            id = material.native_id();
        }
        assert!(device.calls().contains(&DeviceCall::Destroy(id)));
        assert_eq!(dispatcher.phase(id), crate::DispatchPhase::Destroyed);
    }
}
