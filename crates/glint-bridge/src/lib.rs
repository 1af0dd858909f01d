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

//! # Glint Bridge
//!
//! The control side of the live-material protocol: [`LiveMaterial`] wrappers
//! that own engine materials, the [`FrameDispatcher`] that fires at most one
//! encoded event per material per frame boundary, and the [`MaterialHost`]
//! that ties a device, a dispatcher, and the host's debug sink together for
//! one host generation.

#![warn(missing_docs)]

pub mod dispatch;
pub mod host;
pub mod material;

#[cfg(test)]
mod mock;

pub use dispatch::{DispatchPhase, FrameDispatcher};
pub use host::{LogDebugSink, MaterialHost};
pub use material::LiveMaterial;
