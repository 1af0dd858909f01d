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

//! A recording `MaterialDevice` for bridge-side unit tests.

use glint_core::device::{
    DebugSink, EngineDebugInfo, MaterialDevice, MaterialStats, RenderEventSink,
};
use glint_core::error::MaterialError;
use glint_core::event::EventToken;
use glint_core::material::{MaterialId, ShaderSourceSet};
use glint_core::math::{Mat4, Vec4};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

/// Everything the mock observed, in call order. Consumer events land in the
/// same list so tests can assert cross-boundary ordering.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DeviceCall {
    Create(MaterialId),
    Destroy(MaterialId),
    SetShaderSource(MaterialId),
    SetFloat(MaterialId, String, f32),
    SetVector4(MaterialId, String),
    SetMatrix4x4(MaterialId, String),
    SetFloatArray(MaterialId, String, usize),
    Submit(MaterialId, u32),
    AdvanceTime(f32),
    Event(EventToken),
    SetDebugSink(bool),
}

#[derive(Debug)]
pub(crate) struct MockMaterialDevice {
    next_id: AtomicI32,
    batch_slots: u32,
    calls: Arc<Mutex<Vec<DeviceCall>>>,
}

impl MockMaterialDevice {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicI32::new(1),
            batch_slots: 4,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn calls(&self) -> Vec<DeviceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn events(&self) -> Vec<EventToken> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DeviceCall::Event(token) => Some(token),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: DeviceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[derive(Debug)]
struct MockEventSink {
    calls: Arc<Mutex<Vec<DeviceCall>>>,
}

impl RenderEventSink for MockEventSink {
    fn on_render_event(&self, token: EventToken) {
        self.calls.lock().unwrap().push(DeviceCall::Event(token));
    }
}

impl MaterialDevice for MockMaterialDevice {
    fn create_material(&self) -> Result<MaterialId, MaterialError> {
        let id = MaterialId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.record(DeviceCall::Create(id));
        Ok(id)
    }

    fn destroy_material(&self, id: MaterialId) -> Result<(), MaterialError> {
        self.record(DeviceCall::Destroy(id));
        Ok(())
    }

    fn set_shader_source(
        &self,
        id: MaterialId,
        _sources: ShaderSourceSet,
    ) -> Result<(), MaterialError> {
        self.record(DeviceCall::SetShaderSource(id));
        Ok(())
    }

    fn set_float(&self, id: MaterialId, name: &str, value: f32) -> Result<(), MaterialError> {
        self.record(DeviceCall::SetFloat(id, name.to_string(), value));
        Ok(())
    }

    fn set_vector4(&self, id: MaterialId, name: &str, _value: Vec4) -> Result<(), MaterialError> {
        self.record(DeviceCall::SetVector4(id, name.to_string()));
        Ok(())
    }

    fn set_matrix4x4(&self, id: MaterialId, name: &str, _value: Mat4) -> Result<(), MaterialError> {
        self.record(DeviceCall::SetMatrix4x4(id, name.to_string()));
        Ok(())
    }

    fn set_float_array(
        &self,
        id: MaterialId,
        name: &str,
        values: &[f32],
    ) -> Result<(), MaterialError> {
        self.record(DeviceCall::SetFloatArray(id, name.to_string(), values.len()));
        Ok(())
    }

    fn get_float(&self, _id: MaterialId, name: &str) -> Result<f32, MaterialError> {
        Err(MaterialError::UnknownProperty {
            name: name.to_string(),
        })
    }

    fn get_vector4(&self, _id: MaterialId, name: &str) -> Result<Vec4, MaterialError> {
        Err(MaterialError::UnknownProperty {
            name: name.to_string(),
        })
    }

    fn get_matrix4x4(&self, _id: MaterialId, name: &str) -> Result<Mat4, MaterialError> {
        Err(MaterialError::UnknownProperty {
            name: name.to_string(),
        })
    }

    fn get_float_array(&self, _id: MaterialId, name: &str) -> Result<Vec<f32>, MaterialError> {
        Err(MaterialError::UnknownProperty {
            name: name.to_string(),
        })
    }

    fn has_property(&self, _id: MaterialId, _name: &str) -> Result<bool, MaterialError> {
        Ok(false)
    }

    fn submit_uniforms(&self, id: MaterialId, batch_index: u32) -> Result<(), MaterialError> {
        if batch_index >= self.batch_slots {
            return Err(MaterialError::BatchOutOfRange {
                index: batch_index,
                slots: self.batch_slots as usize,
            });
        }
        self.record(DeviceCall::Submit(id, batch_index));
        Ok(())
    }

    fn get_render_event_handler(&self) -> Arc<dyn RenderEventSink> {
        Arc::new(MockEventSink {
            calls: self.calls.clone(),
        })
    }

    fn set_debug_sink(&self, sink: Option<Arc<dyn DebugSink>>) {
        self.record(DeviceCall::SetDebugSink(sink.is_some()));
    }

    fn advance_time(&self, elapsed_seconds: f32) {
        self.record(DeviceCall::AdvanceTime(elapsed_seconds));
    }

    fn get_material_stats(&self, _id: MaterialId) -> Result<MaterialStats, MaterialError> {
        Ok(MaterialStats::default())
    }

    fn get_debug_info(&self) -> EngineDebugInfo {
        EngineDebugInfo::default()
    }

    fn log_uniforms(&self, _id: MaterialId) -> Result<(), MaterialError> {
        Ok(())
    }
}
