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

//! Host-side lifecycle: the facade that ties a device, a dispatcher, and the
//! host's debug sink together for one host generation.
//!
//! Hosts that hot-reload invalidate every callback they handed out. The
//! protocol handles this with explicit, idempotent registration: the host
//! registers a sink once per generation and calls [`MaterialHost::on_host_unload`]
//! when the generation dies; the engine never holds a callback into a host
//! that no longer exists.

use crate::dispatch::FrameDispatcher;
use crate::material::LiveMaterial;
use glint_core::device::{DebugLevel, DebugSink, MaterialDevice};
use std::sync::Arc;

/// Owns the engine-facing device and dispatcher for one host generation.
#[derive(Debug)]
pub struct MaterialHost {
    device: Arc<dyn MaterialDevice>,
    dispatcher: FrameDispatcher,
    debug_sink: Option<Arc<dyn DebugSink>>,
}

impl MaterialHost {
    /// Creates a host over `device`, building its frame dispatcher.
    pub fn new(device: Arc<dyn MaterialDevice>) -> Self {
        let dispatcher = FrameDispatcher::new(device.clone());
        Self {
            device,
            dispatcher,
            debug_sink: None,
        }
    }

    /// Spawns an unrealized [`LiveMaterial`] wired to this host's dispatcher.
    pub fn create_material(&self) -> LiveMaterial {
        LiveMaterial::new(self.device.clone(), self.dispatcher.clone())
    }

    /// Registers the debug sink for this host generation.
    ///
    /// Idempotent: while a sink is registered, further calls keep the
    /// existing one. After [`on_host_unload`] a new registration takes.
    ///
    /// [`on_host_unload`]: MaterialHost::on_host_unload
    pub fn register_debug_sink(&mut self, sink: Arc<dyn DebugSink>) {
        if self.debug_sink.is_some() {
            log::debug!("Debug sink already registered for this host generation; keeping it.");
            return;
        }
        self.device.set_debug_sink(Some(sink.clone()));
        self.debug_sink = Some(sink);
    }

    /// Host unload notification: the sink registered for this generation is
    /// about to become invalid, so clear it from the engine. Idempotent.
    pub fn on_host_unload(&mut self) {
        if self.debug_sink.take().is_some() {
            self.device.set_debug_sink(None);
            log::debug!("Host unloading; cleared the engine debug sink.");
        }
    }

    /// The once-per-frame boundary: advances engine time, then fires the
    /// pending dispatches.
    pub fn end_frame(&self, elapsed_seconds: f32) {
        self.dispatcher.end_frame(elapsed_seconds);
    }

    /// The host's frame dispatcher.
    pub fn dispatcher(&self) -> &FrameDispatcher {
        &self.dispatcher
    }

    /// The device this host drives.
    pub fn device(&self) -> &Arc<dyn MaterialDevice> {
        &self.device
    }
}

/// A [`DebugSink`] forwarding engine diagnostics to the `log` facade.
#[derive(Debug, Default)]
pub struct LogDebugSink;

impl DebugSink for LogDebugSink {
    fn message(&self, level: DebugLevel, message: &str) {
        match level {
            DebugLevel::Info => log::debug!("[engine] {message}"),
            DebugLevel::Warning => log::warn!("[engine] {message}"),
            DebugLevel::Error => log::error!("[engine] {message}"),
        }
    }
}
