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

//! The authoritative id -> material mapping.

use crate::lock;
use crate::material::Material;
use glint_core::material::MaterialId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

/// Owns every live material and allocates their ids.
///
/// Ids come from a monotonic counter starting at 1. The counter never rewinds
/// and removed ids are never re-inserted, so an id observed by the control
/// side names at most one resource for the whole process run.
#[derive(Debug)]
pub(crate) struct MaterialRegistry {
    materials: Mutex<HashMap<MaterialId, Arc<Material>>>,
    next_id: AtomicI32,
}

impl MaterialRegistry {
    pub(crate) fn new() -> Self {
        Self {
            materials: Mutex::new(HashMap::new()),
            next_id: AtomicI32::new(1),
        }
    }

    /// Creates a material record under a freshly allocated id.
    pub(crate) fn allocate(&self, batch_slots: usize) -> Arc<Material> {
        let id = MaterialId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let material = Arc::new(Material::new(id, batch_slots));
        lock(&self.materials).insert(id, material.clone());
        material
    }

    pub(crate) fn get(&self, id: MaterialId) -> Option<Arc<Material>> {
        lock(&self.materials).get(&id).cloned()
    }

    /// Removes and returns the material, if it is (still) live.
    pub(crate) fn remove(&self, id: MaterialId) -> Option<Arc<Material>> {
        lock(&self.materials).remove(&id)
    }

    pub(crate) fn live_count(&self) -> usize {
        lock(&self.materials).len()
    }
}
