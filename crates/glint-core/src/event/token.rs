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

//! Packs a material id and a uniform-batch index into one 32-bit event token.

use crate::material::MaterialId;

/// The largest material id the token format can carry.
///
/// The id travels in the upper 16 bits of a signed 32-bit token, and the
/// consumer side treats it as a signed 16-bit quantity, so ids above
/// `i16::MAX` have no representation on the wire.
pub const MAX_ENCODABLE_ID: i32 = i16::MAX as i32;

/// A single 32-bit value carrying `{material id, batch index}` across the
/// control/render context boundary.
///
/// Layout: `(id << 16) | (batch & 0xFFFF)`. Every token built from a valid
/// id is non-negative as an `i32` (the sign bit stays clear).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventToken(pub i32);

impl EventToken {
    /// Packs a material id and a batch index into a token.
    ///
    /// The batch index is truncated to its low 16 bits without saturation.
    /// This is a known limitation of the wire format, not a checked error:
    /// callers keep batch indices small, and the engine-side slot bound
    /// rejects indices that alias after truncation.
    ///
    /// # Panics
    ///
    /// Panics if `id` is negative or exceeds [`MAX_ENCODABLE_ID`]. A token
    /// built from such an id would silently address the wrong material on
    /// the consumer side, so this is a contract violation with no recovery
    /// path, not a recoverable error.
    #[inline]
    pub fn encode(id: MaterialId, batch_index: u32) -> Self {
        assert!(
            id.0 >= 0 && id.0 <= MAX_ENCODABLE_ID,
            "material id {} does not fit the 16-bit token field (0..={MAX_ENCODABLE_ID})",
            id.0
        );
        EventToken((id.0 << 16) | (batch_index as i32 & 0xFFFF))
    }

    /// Unpacks a token into its material id and batch index.
    ///
    /// Exact inverse of [`EventToken::encode`] over the valid domain
    /// (`id in 0..=32767`, `batch in 0..=65535`).
    #[inline]
    pub fn decode(self) -> (MaterialId, u16) {
        let id = (self.0 >> 16) & 0xFFFF;
        let batch = (self.0 & 0xFFFF) as u16;
        (MaterialId(id), batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trips_across_the_valid_domain() {
        // Stride-sample the id space; cover the batch corners for each.
        for raw_id in (0..=MAX_ENCODABLE_ID).step_by(97).chain([MAX_ENCODABLE_ID]) {
            let id = MaterialId(raw_id);
            for batch in [0u32, 1, 0x7FFF, 0xFFFF] {
                let token = EventToken::encode(id, batch);
                assert_eq!(token.decode(), (id, batch as u16));
            }
        }
    }

    #[test]
    fn tokens_for_valid_ids_are_non_negative() {
        let token = EventToken::encode(MaterialId(MAX_ENCODABLE_ID), 0xFFFF);
        assert!(token.0 >= 0);
    }

    #[test]
    fn batch_index_is_truncated_to_low_16_bits() {
        let token = EventToken::encode(MaterialId(5), 0x2_0001);
        assert_eq!(token.decode(), (MaterialId(5), 1));
    }

    #[test]
    #[should_panic(expected = "does not fit the 16-bit token field")]
    fn encoding_an_oversized_id_is_fatal() {
        let _ = EventToken::encode(MaterialId(MAX_ENCODABLE_ID + 1), 0);
    }

    #[test]
    #[should_panic(expected = "does not fit the 16-bit token field")]
    fn encoding_a_sentinel_id_is_fatal() {
        let _ = EventToken::encode(MaterialId::UNSET, 0);
    }

    #[test]
    fn known_layout_example() {
        // id 3, batch 2 -> 0x0003_0002
        let token = EventToken::encode(MaterialId(3), 2);
        assert_eq!(token.0, 0x0003_0002);
    }
}
