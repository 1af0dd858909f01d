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

//! Defines the opaque identifier for engine-owned live materials.

/// Opaque identifier for a live material owned by the native engine.
///
/// The engine allocates ids from a monotonic counter starting at 1 and never
/// hands the same id out twice, even after the material it named has been
/// destroyed. Negative values are control-side snapshot sentinels and are
/// never allocated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub i32);

impl MaterialId {
    /// Snapshot sentinel: the wrapper has not yet realized a native material.
    pub const UNSET: Self = Self(-1);

    /// Snapshot sentinel: the wrapper's native material has been destroyed.
    ///
    /// Once a wrapper reports this value it reports it forever; the id it
    /// used to hold is retired and will not name a new resource.
    pub const DESTROYED: Self = Self(-2);

    /// Returns `true` if this id could name a living engine resource.
    ///
    /// Sentinels and the never-allocated id 0 are not live.
    #[inline]
    pub const fn is_live(self) -> bool {
        self.0 >= 1
    }
}
