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

//! Minimal math value types moved by the uniform protocol.
//!
//! These types are deliberately thin. The protocol only needs to carry
//! vectors and matrices across the staging/dispatch boundary with a stable
//! memory layout; anything that transforms them lives on the GPU side and is
//! out of scope here.

pub mod matrix;
pub mod vector;

pub use matrix::Mat4;
pub use vector::Vec4;
