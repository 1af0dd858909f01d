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

//! # Glint Core
//!
//! Protocol contracts for live materials: the types and traits that let a
//! control context reconfigure engine-owned shader programs and uniforms at
//! runtime, with application deferred to a once-per-frame event consumed by
//! the render context.
//!
//! This crate holds no engine state. The in-memory engine lives in
//! `glint-engine`; the control-side wrappers and the frame dispatcher live
//! in `glint-bridge`.

#![warn(missing_docs)]

pub mod device;
pub mod error;
pub mod event;
pub mod material;
pub mod math;

pub use device::{
    DebugLevel, DebugSink, EngineDebugInfo, InstallState, MaterialDevice, MaterialStats,
    RenderEventSink,
};
pub use error::MaterialError;
pub use event::{EventToken, MAX_ENCODABLE_ID};
pub use material::{MaterialId, PropKind, ShaderSourceSet, StageSource, UniformValue};
pub use math::{Mat4, Vec4};
