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

//! Defines the error type shared by every fallible material operation.

use crate::material::{MaterialId, PropKind};
use std::fmt;

/// An error from a material operation at the engine boundary.
///
/// The one failure this type deliberately does not model is an out-of-range
/// material id at event-encode time; that is a contract violation handled by
/// a fatal assertion in the token codec, because a silently misrouted event
/// is worse than a crash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterialError {
    /// The id does not name a living material (never created, or destroyed).
    NotFound(MaterialId),
    /// The material has no property with this name.
    UnknownProperty {
        /// The property name that was looked up.
        name: String,
    },
    /// The property exists but holds a value of a different kind.
    KindMismatch {
        /// The property name that was accessed.
        name: String,
        /// The kind the caller asked for.
        requested: PropKind,
        /// The kind the property actually holds.
        stored: PropKind,
    },
    /// The batch index is outside the engine's configured slot range.
    BatchOutOfRange {
        /// The rejected batch index.
        index: u32,
        /// The number of batch slots the engine was configured with.
        slots: usize,
    },
    /// The shader install worker is no longer accepting work (the engine is
    /// shutting down).
    InstallQueueClosed,
}

impl fmt::Display for MaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialError::NotFound(id) => {
                write!(f, "No live material with id {}", id.0)
            }
            MaterialError::UnknownProperty { name } => {
                write!(f, "Material has no property named '{name}'")
            }
            MaterialError::KindMismatch {
                name,
                requested,
                stored,
            } => {
                write!(
                    f,
                    "Property '{name}' holds a {stored} value, not a {requested}"
                )
            }
            MaterialError::BatchOutOfRange { index, slots } => {
                write!(
                    f,
                    "Batch index {index} is out of range (engine has {slots} batch slots)"
                )
            }
            MaterialError::InstallQueueClosed => {
                write!(f, "The shader install worker is no longer running")
            }
        }
    }
}

impl std::error::Error for MaterialError {}
