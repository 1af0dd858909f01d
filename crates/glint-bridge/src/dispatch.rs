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

//! The frame-boundary event scheduler.
//!
//! The dispatcher tracks every realized material and fires at most one
//! encoded token per material into the consumer entry point, only from
//! [`FrameDispatcher::end_frame`]. That single-fire-per-frame discipline is
//! the protocol's ordering mechanism: every staged write and submit on the
//! control side happens-before the event that applies it.

use glint_core::device::{MaterialDevice, RenderEventSink};
use glint_core::event::EventToken;
use glint_core::material::MaterialId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Where one material stands in the per-frame dispatch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    /// No native material has been realized; the dispatcher has no entry.
    /// Also reported for destroyed entries after they have been pruned.
    Unrealized,
    /// Realized, with nothing staged for the next frame boundary.
    Live,
    /// A submitted batch is waiting for the next frame boundary.
    PendingDispatch,
    /// Destroyed; excluded from dispatch and pruned at the next boundary.
    Destroyed,
}

#[derive(Debug, Clone, Copy)]
enum Entry {
    Live,
    Pending { batch: u32 },
    Destroyed,
}

#[derive(Debug)]
struct DispatcherInner {
    device: Arc<dyn MaterialDevice>,
    /// The consumer entry point, obtained once at construction.
    sink: Arc<dyn RenderEventSink>,
    entries: Mutex<HashMap<MaterialId, Entry>>,
}

/// A cheap-to-clone handle to the frame-boundary scheduler.
///
/// Every `LiveMaterial` spawned from the same host holds a clone, so
/// realizations, submissions, and destroys all feed one dispatch table.
#[derive(Debug, Clone)]
pub struct FrameDispatcher {
    inner: Arc<DispatcherInner>,
}

impl FrameDispatcher {
    /// Creates a dispatcher for `device`, fetching the consumer entry point
    /// from it once.
    pub fn new(device: Arc<dyn MaterialDevice>) -> Self {
        let sink = device.get_render_event_handler();
        Self {
            inner: Arc::new(DispatcherInner {
                device,
                sink,
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Registers a freshly created material as live.
    pub fn material_realized(&self, id: MaterialId) {
        self.entries().insert(id, Entry::Live);
    }

    /// Stages `batch_index` for dispatch at the next frame boundary.
    ///
    /// A later submission in the same frame overwrites the pending batch:
    /// last submission wins, and still only one event fires. Staging against
    /// a destroyed or unknown id is reported and dropped.
    pub fn submission_staged(&self, id: MaterialId, batch_index: u32) {
        match self.entries().get_mut(&id) {
            Some(Entry::Destroyed) => {
                log::warn!("Submission staged for destroyed material {}; dropping", id.0);
            }
            Some(entry) => {
                *entry = Entry::Pending { batch: batch_index };
            }
            None => {
                log::warn!("Submission staged for unknown material {}; dropping", id.0);
            }
        }
    }

    /// Marks the material destroyed, cancelling any pending dispatch.
    pub fn material_destroyed(&self, id: MaterialId) {
        self.entries().insert(id, Entry::Destroyed);
    }

    /// The once-per-frame sync point.
    ///
    /// Advances engine time first, so every event fired this frame observes
    /// the same value; then fires one encoded token per pending material and
    /// returns those entries to live; finally prunes destroyed entries.
    pub fn end_frame(&self, elapsed_seconds: f32) {
        self.inner.device.advance_time(elapsed_seconds);

        let due: Vec<(MaterialId, u32)> = {
            let mut entries = self.entries();
            entries.retain(|_, entry| !matches!(entry, Entry::Destroyed));
            entries
                .iter_mut()
                .filter_map(|(id, entry)| match *entry {
                    Entry::Pending { batch } => {
                        *entry = Entry::Live;
                        Some((*id, batch))
                    }
                    _ => None,
                })
                .collect()
        };

        // Fired outside the lock; the consumer may call back into the device.
        for (id, batch) in due {
            self.inner.sink.on_render_event(EventToken::encode(id, batch));
        }
    }

    /// The material's current dispatch phase.
    pub fn phase(&self, id: MaterialId) -> DispatchPhase {
        match self.entries().get(&id) {
            None => DispatchPhase::Unrealized,
            Some(Entry::Live) => DispatchPhase::Live,
            Some(Entry::Pending { .. }) => DispatchPhase::PendingDispatch,
            Some(Entry::Destroyed) => DispatchPhase::Destroyed,
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<MaterialId, Entry>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
