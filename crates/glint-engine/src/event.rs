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

//! The render-context consumer of dispatched event tokens.

use crate::engine::EngineShared;
use glint_core::device::{DebugLevel, RenderEventSink};
use glint_core::event::EventToken;
use std::sync::Arc;

/// Applies one dispatched token to engine state.
///
/// Handed across the boundary once, via `get_render_event_handler`; the
/// dispatcher invokes it at each frame-boundary sync point.
#[derive(Debug)]
pub(crate) struct EngineEventSink {
    shared: Arc<EngineShared>,
}

impl EngineEventSink {
    pub(crate) fn new(shared: Arc<EngineShared>) -> Self {
        Self { shared }
    }
}

impl RenderEventSink for EngineEventSink {
    fn on_render_event(&self, token: EventToken) {
        let (id, batch) = token.decode();

        // New shader programs take effect at the same sync point as uniform
        // batches.
        self.shared.adopt_finished_installs();

        let Some(material) = self.shared.registry().get(id) else {
            // A destroy can race a token already in flight for this frame;
            // dropping the event is the tolerated outcome.
            self.shared.debug_message(
                DebugLevel::Warning,
                &format!(
                    "Render event for material {} which no longer exists; dropping token {:#010x}",
                    id.0, token.0
                ),
            );
            return;
        };

        if let Err(err) = material.uniforms().apply(u32::from(batch)) {
            self.shared
                .debug_message(DebugLevel::Warning, &format!("Material {}: {err}", id.0));
        };
    }
}
