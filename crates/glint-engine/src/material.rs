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

//! The engine-side record for one live material.

use crate::block::MaterialBuffers;
use crate::lock;
use glint_core::device::{InstallState, MaterialStats};
use glint_core::material::MaterialId;
use std::sync::{Mutex, MutexGuard};

/// One live material as the engine sees it.
///
/// Uniform buffers and install stats sit behind their own mutexes so
/// control-side writes never hold the registry lock.
#[derive(Debug)]
pub(crate) struct Material {
    id: MaterialId,
    uniforms: Mutex<MaterialBuffers>,
    stats: Mutex<MaterialStats>,
}

impl Material {
    pub(crate) fn new(id: MaterialId, batch_slots: usize) -> Self {
        Self {
            id,
            uniforms: Mutex::new(MaterialBuffers::new(batch_slots)),
            stats: Mutex::new(MaterialStats::default()),
        }
    }

    pub(crate) fn id(&self) -> MaterialId {
        self.id
    }

    pub(crate) fn uniforms(&self) -> MutexGuard<'_, MaterialBuffers> {
        lock(&self.uniforms)
    }

    pub(crate) fn stats(&self) -> MaterialStats {
        *lock(&self.stats)
    }

    pub(crate) fn mark_installing(&self) {
        lock(&self.stats).install_state = InstallState::Installing;
    }

    pub(crate) fn finish_install(&self, state: InstallState, install_time_ms: u64) {
        let mut stats = lock(&self.stats);
        stats.install_state = state;
        stats.install_time_ms = install_time_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_state_transitions_are_recorded() {
        let material = Material::new(MaterialId(1), 4);
        assert_eq!(material.stats().install_state, InstallState::NeverInstalled);

        material.mark_installing();
        assert_eq!(material.stats().install_state, InstallState::Installing);

        material.finish_install(InstallState::Installed, 12);
        let stats = material.stats();
        assert_eq!(stats.install_state, InstallState::Installed);
        assert_eq!(stats.install_time_ms, 12);
    }
}
