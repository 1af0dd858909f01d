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

//! The in-memory native engine behind the `MaterialDevice` contract.

use crate::event::EngineEventSink;
use crate::install::{InstallRequest, InstallWorker};
use crate::lock;
use crate::material::Material;
use crate::registry::MaterialRegistry;
use glint_core::device::{
    DebugLevel, DebugSink, EngineDebugInfo, InstallState, MaterialDevice, MaterialStats,
    RenderEventSink,
};
use glint_core::error::MaterialError;
use glint_core::material::{MaterialId, ShaderSourceSet};
use glint_core::math::{Mat4, Vec4};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Construction-time knobs for [`MaterialEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How many uniform batch slots each material carries. Batch indices at
    /// or above this count are rejected by `submit_uniforms`.
    pub uniform_batch_slots: usize,
    /// Gates Warning-level diagnostics (unknown-id destroys, events for
    /// vanished materials). Info and Error diagnostics always flow.
    pub show_warnings: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            uniform_batch_slots: 4,
            show_warnings: true,
        }
    }
}

/// The non-clonable engine state shared behind an `Arc`.
#[derive(Debug)]
pub(crate) struct EngineShared {
    config: EngineConfig,
    registry: MaterialRegistry,
    installer: InstallWorker,
    /// Installs queued or finished but not yet adopted at a frame boundary.
    pending_installs: AtomicUsize,
    debug_sink: Mutex<Option<Arc<dyn DebugSink>>>,
    /// Accumulated frame time as `f32` bits. Written by the render-context
    /// driver only, so load+store is enough.
    time_bits: AtomicU32,
}

impl EngineShared {
    pub(crate) fn registry(&self) -> &MaterialRegistry {
        &self.registry
    }

    fn material(&self, id: MaterialId) -> Result<Arc<Material>, MaterialError> {
        self.registry.get(id).ok_or(MaterialError::NotFound(id))
    }

    /// Routes one diagnostic to the registered sink, or to the `log` facade
    /// while no sink is registered. Warnings honour `show_warnings`.
    pub(crate) fn debug_message(&self, level: DebugLevel, message: &str) {
        if level == DebugLevel::Warning && !self.config.show_warnings {
            return;
        }
        if let Some(sink) = lock(&self.debug_sink).clone() {
            sink.message(level, message);
            return;
        }
        match level {
            DebugLevel::Info => log::debug!("{message}"),
            DebugLevel::Warning => log::warn!("{message}"),
            DebugLevel::Error => log::error!("{message}"),
        }
    }

    /// Drains the install worker's results channel, updating stats.
    ///
    /// Called by the render-event consumer before applying a batch, so new
    /// shader programs take effect at the frame-boundary sync point. Outcomes
    /// for materials destroyed in the meantime are discarded.
    pub(crate) fn adopt_finished_installs(&self) {
        for outcome in self.installer.finished().try_iter() {
            self.pending_installs.fetch_sub(1, Ordering::Relaxed);
            let Some(material) = self.registry.get(outcome.id) else {
                log::debug!(
                    "Discarding finished shader install for destroyed material {}",
                    outcome.id.0
                );
                continue;
            };
            match outcome.result {
                Ok(()) => {
                    material.finish_install(InstallState::Installed, outcome.duration_ms);
                    log::debug!(
                        "Material {}: shader install finished in {} ms",
                        outcome.id.0,
                        outcome.duration_ms
                    );
                }
                Err(reason) => {
                    material.finish_install(InstallState::Failed, outcome.duration_ms);
                    self.debug_message(
                        DebugLevel::Error,
                        &format!("Material {}: shader install failed: {reason}", outcome.id.0),
                    );
                }
            }
        }
    }
}

/// The in-memory native engine for live materials.
///
/// A cheap-to-clone handle over shared engine state; every clone addresses
/// the same registry, install worker, and clock. Implements
/// [`MaterialDevice`], which is the only surface the control side sees.
#[derive(Debug, Clone)]
pub struct MaterialEngine {
    shared: Arc<EngineShared>,
}

impl MaterialEngine {
    /// Creates an engine and spawns its shader install worker.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            shared: Arc::new(EngineShared {
                config,
                registry: MaterialRegistry::new(),
                installer: InstallWorker::spawn(),
                pending_installs: AtomicUsize::new(0),
                debug_sink: Mutex::new(None),
                time_bits: AtomicU32::new(0.0f32.to_bits()),
            }),
        }
    }

    /// The accumulated frame time, as advanced by the render-context driver.
    pub fn time_seconds(&self) -> f32 {
        f32::from_bits(self.shared.time_bits.load(Ordering::Relaxed))
    }
}

impl Default for MaterialEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl MaterialDevice for MaterialEngine {
    fn create_material(&self) -> Result<MaterialId, MaterialError> {
        let material = self
            .shared
            .registry
            .allocate(self.shared.config.uniform_batch_slots);
        log::debug!("Created material {}", material.id().0);
        Ok(material.id())
    }

    fn destroy_material(&self, id: MaterialId) -> Result<(), MaterialError> {
        match self.shared.registry.remove(id) {
            Some(_) => {
                log::debug!("Destroyed material {}", id.0);
            }
            None => {
                self.shared.debug_message(
                    DebugLevel::Warning,
                    &format!("Destroy of unknown material id {}; ignoring", id.0),
                );
            }
        }
        Ok(())
    }

    fn set_shader_source(
        &self,
        id: MaterialId,
        sources: ShaderSourceSet,
    ) -> Result<(), MaterialError> {
        let material = self.shared.material(id)?;
        material.mark_installing();
        self.shared.pending_installs.fetch_add(1, Ordering::Relaxed);
        if let Err(err) = self.shared.installer.queue(InstallRequest { id, sources }) {
            self.shared.pending_installs.fetch_sub(1, Ordering::Relaxed);
            material.finish_install(InstallState::Failed, 0);
            return Err(err);
        }
        Ok(())
    }

    fn set_float(&self, id: MaterialId, name: &str, value: f32) -> Result<(), MaterialError> {
        self.shared.material(id)?.uniforms().write_float(name, value);
        Ok(())
    }

    fn set_vector4(&self, id: MaterialId, name: &str, value: Vec4) -> Result<(), MaterialError> {
        self.shared
            .material(id)?
            .uniforms()
            .write_vector4(name, value);
        Ok(())
    }

    fn set_matrix4x4(&self, id: MaterialId, name: &str, value: Mat4) -> Result<(), MaterialError> {
        self.shared
            .material(id)?
            .uniforms()
            .write_matrix4x4(name, value);
        Ok(())
    }

    fn set_float_array(
        &self,
        id: MaterialId,
        name: &str,
        values: &[f32],
    ) -> Result<(), MaterialError> {
        self.shared
            .material(id)?
            .uniforms()
            .write_float_array(name, values);
        Ok(())
    }

    fn get_float(&self, id: MaterialId, name: &str) -> Result<f32, MaterialError> {
        self.shared.material(id)?.uniforms().read_float(name)
    }

    fn get_vector4(&self, id: MaterialId, name: &str) -> Result<Vec4, MaterialError> {
        self.shared.material(id)?.uniforms().read_vector4(name)
    }

    fn get_matrix4x4(&self, id: MaterialId, name: &str) -> Result<Mat4, MaterialError> {
        self.shared.material(id)?.uniforms().read_matrix4x4(name)
    }

    fn get_float_array(&self, id: MaterialId, name: &str) -> Result<Vec<f32>, MaterialError> {
        self.shared.material(id)?.uniforms().read_float_array(name)
    }

    fn has_property(&self, id: MaterialId, name: &str) -> Result<bool, MaterialError> {
        Ok(self.shared.material(id)?.uniforms().has_property(name))
    }

    fn submit_uniforms(&self, id: MaterialId, batch_index: u32) -> Result<(), MaterialError> {
        self.shared.material(id)?.uniforms().submit(batch_index)
    }

    fn get_render_event_handler(&self) -> Arc<dyn RenderEventSink> {
        Arc::new(EngineEventSink::new(self.shared.clone()))
    }

    fn set_debug_sink(&self, sink: Option<Arc<dyn DebugSink>>) {
        let mut slot = lock(&self.shared.debug_sink);
        match (&*slot, &sink) {
            (None, Some(_)) => log::debug!("Engine debug sink registered."),
            (Some(_), None) => log::debug!("Engine debug sink cleared."),
            _ => {}
        }
        *slot = sink;
    }

    fn advance_time(&self, elapsed_seconds: f32) {
        let current = f32::from_bits(self.shared.time_bits.load(Ordering::Relaxed));
        self.shared
            .time_bits
            .store((current + elapsed_seconds).to_bits(), Ordering::Relaxed);
    }

    fn get_material_stats(&self, id: MaterialId) -> Result<MaterialStats, MaterialError> {
        Ok(self.shared.material(id)?.stats())
    }

    fn get_debug_info(&self) -> EngineDebugInfo {
        EngineDebugInfo {
            live_materials: self.shared.registry.live_count(),
            pending_installs: self.shared.pending_installs.load(Ordering::Relaxed),
        }
    }

    fn log_uniforms(&self, id: MaterialId) -> Result<(), MaterialError> {
        let material = self.shared.material(id)?;
        let lines = material.uniforms().describe();
        self.shared.debug_message(
            DebugLevel::Info,
            &format!("Material {}: {} staged properties", id.0, lines.len()),
        );
        for line in &lines {
            self.shared
                .debug_message(DebugLevel::Info, &format!("  {line}"));
        }
        Ok(())
    }
}
