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

//! Describes the shader source payload handed to the engine on install.

/// Source text and entry-point name for one program stage.
///
/// The strings are owned because the payload outlives the caller's frame: it
/// crosses into the engine's install worker thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSource {
    /// The shader source text. Compilation is the engine's concern; this
    /// layer never inspects the text beyond checking it is non-empty.
    pub source: String,
    /// The entry-point function name within `source`.
    pub entry_point: String,
}

impl StageSource {
    /// Creates a stage descriptor from source text and an entry-point name.
    pub fn new(source: impl Into<String>, entry_point: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            entry_point: entry_point.into(),
        }
    }
}

/// The full shader payload for a material: a fragment stage and a vertex
/// stage, each with its own entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSourceSet {
    /// The fragment program stage.
    pub fragment: StageSource,
    /// The vertex program stage.
    pub vertex: StageSource,
}

impl ShaderSourceSet {
    /// Creates a shader set from the four raw pieces the control side hands
    /// over: fragment source + entry, vertex source + entry.
    pub fn new(
        fragment_src: impl Into<String>,
        fragment_entry: impl Into<String>,
        vertex_src: impl Into<String>,
        vertex_entry: impl Into<String>,
    ) -> Self {
        Self {
            fragment: StageSource::new(fragment_src, fragment_entry),
            vertex: StageSource::new(vertex_src, vertex_entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_source_set_carries_both_stages() {
        let set = ShaderSourceSet::new("frag", "fragMain", "vert", "vertMain");
        assert_eq!(set.fragment.source, "frag");
        assert_eq!(set.fragment.entry_point, "fragMain");
        assert_eq!(set.vertex.source, "vert");
        assert_eq!(set.vertex.entry_point, "vertMain");
    }
}
