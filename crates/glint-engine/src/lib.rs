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

//! # Glint Engine
//!
//! The in-memory native side of the live-material protocol: the authoritative
//! material registry, per-material uniform staging and batch slots, the
//! background shader install worker, and the render-event consumer that
//! applies submitted batches at the frame boundary.
//!
//! The public surface is [`MaterialEngine`], which implements
//! `glint_core::MaterialDevice`, plus its construction-time [`EngineConfig`].
//! Everything else is internal.

#![warn(missing_docs)]

mod block;
mod event;
mod install;
mod material;
mod registry;

pub mod engine;

pub use engine::{EngineConfig, MaterialEngine};

/// Locks a mutex, taking the data even if a previous holder panicked.
pub(crate) fn lock<T: ?Sized>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
