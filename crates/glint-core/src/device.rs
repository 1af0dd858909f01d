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

//! The engine-facing contract of the live-material protocol.
//!
//! [`MaterialDevice`] is the full operation table the control side programs
//! against; the native engine implements it. [`RenderEventSink`] is the one
//! entry point the render context drives, obtained once per dispatcher from
//! [`MaterialDevice::get_render_event_handler`] and invoked with an encoded
//! [`EventToken`] at each frame boundary.

use crate::error::MaterialError;
use crate::event::EventToken;
use crate::material::{MaterialId, ShaderSourceSet};
use crate::math::{Mat4, Vec4};
use std::fmt::Debug;
use std::sync::Arc;

/// Where a material currently stands in the shader install pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    /// No shader source has ever been handed to the engine.
    NeverInstalled,
    /// Source has been queued; the install worker has not finished it yet.
    Installing,
    /// The most recent install completed.
    Installed,
    /// The most recent install was rejected; details went to the debug sink.
    Failed,
}

/// Per-material install bookkeeping, readable by the control side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialStats {
    /// The state of the most recent shader install, if any.
    pub install_state: InstallState,
    /// Wall-clock duration of the most recently finished install.
    pub install_time_ms: u64,
}

impl Default for MaterialStats {
    fn default() -> Self {
        Self {
            install_state: InstallState::NeverInstalled,
            install_time_ms: 0,
        }
    }
}

/// A point-in-time snapshot of engine-wide counters, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineDebugInfo {
    /// Materials currently alive in the engine registry.
    pub live_materials: usize,
    /// Shader installs queued or running but not yet adopted.
    pub pending_installs: usize,
}

/// Severity attached to a message delivered through a [`DebugSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugLevel {
    /// Routine diagnostics (uniform dumps, install traces).
    Info,
    /// Tolerated-but-unusual conditions (events for vanished materials).
    Warning,
    /// Failures the engine absorbed (rejected installs).
    Error,
}

/// A host-provided receiver for engine diagnostics.
///
/// Registration is explicit and idempotent in both directions: the host
/// registers a sink once per host generation and clears it on unload, so an
/// engine never holds a callback into a host that no longer exists.
pub trait DebugSink: Send + Sync + Debug + 'static {
    /// Delivers one diagnostic message.
    fn message(&self, level: DebugLevel, message: &str);
}

/// The consumer entry point driven by the render context.
///
/// Implementations decode the token, adopt any finished shader installs, and
/// apply the named batch slot. They must tolerate tokens whose material id no
/// longer resolves — a destroy can race an already-fired event — by logging
/// and returning, never by panicking.
pub trait RenderEventSink: Send + Sync + Debug + 'static {
    /// Consumes one dispatched event at the frame-boundary sync point.
    fn on_render_event(&self, token: EventToken);
}

/// The native engine interface for live materials.
///
/// All staging writes (`set_*`) land in a per-material staging block and have
/// no effect on consumer-visible state until a [`submit_uniforms`] batch is
/// applied by the render context. All reads (`get_*`) observe the applied,
/// consumer-visible state — they are not an echo of staged values, so a
/// read-after-write is only consistent once the written batch has been
/// submitted and consumed at least once.
///
/// [`submit_uniforms`]: MaterialDevice::submit_uniforms
pub trait MaterialDevice: Send + Sync + Debug + 'static {
    /// Allocates a new live material and returns its id.
    ///
    /// Ids come from a monotonic counter and are never reused within a
    /// process run, even after the material they named is destroyed.
    fn create_material(&self) -> Result<MaterialId, MaterialError>;

    /// Destroys a live material and releases its resources.
    ///
    /// Destroying an unknown or already-destroyed id is a safe no-op (the
    /// engine reports it through the warn log); the id is retired either way.
    fn destroy_material(&self, id: MaterialId) -> Result<(), MaterialError>;

    /// Hands shader source for both program stages to the install pipeline.
    ///
    /// Installation happens on a background worker; the new program is
    /// adopted at the next frame-boundary event for this material. Progress
    /// is observable through [`get_material_stats`].
    ///
    /// ## Errors
    /// * `MaterialError::NotFound` - if `id` does not name a live material.
    /// * `MaterialError::InstallQueueClosed` - if the engine is shutting down.
    ///
    /// [`get_material_stats`]: MaterialDevice::get_material_stats
    fn set_shader_source(
        &self,
        id: MaterialId,
        sources: ShaderSourceSet,
    ) -> Result<(), MaterialError>;

    /// Stages a scalar uniform write.
    ///
    /// ## Arguments
    /// * `id` - The material whose staging block receives the value.
    /// * `name` - The property name; created on first write, last write wins.
    /// * `value` - The scalar value.
    fn set_float(&self, id: MaterialId, name: &str, value: f32) -> Result<(), MaterialError>;

    /// Stages a 4-component vector uniform write.
    fn set_vector4(&self, id: MaterialId, name: &str, value: Vec4) -> Result<(), MaterialError>;

    /// Stages a 4x4 matrix uniform write (column-major).
    fn set_matrix4x4(&self, id: MaterialId, name: &str, value: Mat4) -> Result<(), MaterialError>;

    /// Stages a float-array uniform write.
    ///
    /// The exact element count of `values` is preserved through submit and
    /// apply, including zero-length arrays.
    fn set_float_array(
        &self,
        id: MaterialId,
        name: &str,
        values: &[f32],
    ) -> Result<(), MaterialError>;

    /// Reads a scalar uniform from the applied (consumer-visible) state.
    ///
    /// ## Errors
    /// * `MaterialError::NotFound` - if `id` does not name a live material.
    /// * `MaterialError::UnknownProperty` - if no property has this name.
    /// * `MaterialError::KindMismatch` - if the property is not a scalar.
    fn get_float(&self, id: MaterialId, name: &str) -> Result<f32, MaterialError>;

    /// Reads a 4-component vector uniform from the applied state.
    fn get_vector4(&self, id: MaterialId, name: &str) -> Result<Vec4, MaterialError>;

    /// Reads a 4x4 matrix uniform from the applied state.
    fn get_matrix4x4(&self, id: MaterialId, name: &str) -> Result<Mat4, MaterialError>;

    /// Reads a float-array uniform from the applied state.
    ///
    /// The returned vector has exactly the element count most recently
    /// staged for this property, which may be zero.
    fn get_float_array(&self, id: MaterialId, name: &str) -> Result<Vec<f32>, MaterialError>;

    /// Returns `true` if the material's staging block has a property with
    /// this name, of any kind.
    fn has_property(&self, id: MaterialId, name: &str) -> Result<bool, MaterialError>;

    /// Snapshots the staging block into the numbered batch slot.
    ///
    /// The snapshot is atomic from the consumer's point of view: the render
    /// event that carries `batch_index` applies exactly the values present
    /// at submit time.
    ///
    /// ## Errors
    /// * `MaterialError::NotFound` - if `id` does not name a live material.
    /// * `MaterialError::BatchOutOfRange` - if `batch_index` is not backed by
    ///   a configured slot. Out-of-range indices are rejected here rather
    ///   than silently remapped onto another slot.
    fn submit_uniforms(&self, id: MaterialId, batch_index: u32) -> Result<(), MaterialError>;

    /// Returns the consumer entry point the render context's dispatcher
    /// fires tokens into.
    ///
    /// Obtained once at dispatcher construction. The returned value is
    /// shared: both sides may hold it, and the last drop frees it.
    fn get_render_event_handler(&self) -> Arc<dyn RenderEventSink>;

    /// Registers (`Some`) or clears (`None`) the host's debug sink.
    ///
    /// Idempotent in both directions; while no sink is registered the engine
    /// falls back to its own log output.
    fn set_debug_sink(&self, sink: Option<Arc<dyn DebugSink>>);

    /// Accumulates the control side's frame time.
    ///
    /// The render-context driver calls this once per frame, before any
    /// events fire, so time-dependent consumer state observes a consistent
    /// value for the whole frame.
    fn advance_time(&self, elapsed_seconds: f32);

    /// Returns the install bookkeeping for one material.
    fn get_material_stats(&self, id: MaterialId) -> Result<MaterialStats, MaterialError>;

    /// Returns engine-wide diagnostic counters.
    fn get_debug_info(&self) -> EngineDebugInfo;

    /// Writes the material's staged properties to the debug output, one line
    /// per property in staging-buffer order.
    fn log_uniforms(&self, id: MaterialId) -> Result<(), MaterialError>;
}
