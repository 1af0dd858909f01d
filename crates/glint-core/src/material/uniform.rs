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

//! Defines the tagged value model for named shader uniforms.

use crate::math::{Mat4, Vec4};
use std::fmt;

/// The kind of a named uniform property.
///
/// A property's kind is fixed for as long as the property keeps its staging
/// slot; writing a value of a different kind under the same name retires the
/// old slot and allocates a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropKind {
    /// A single `f32` scalar.
    Float,
    /// Four `f32` components ([`Vec4`]).
    Vector4,
    /// Sixteen `f32` components in column-major order ([`Mat4`]).
    Matrix4x4,
    /// A homogeneous run of `f32` elements with a caller-defined length.
    FloatArray,
}

impl PropKind {
    /// Classifies a flattened value by its `f32` element count.
    ///
    /// Counts of 1, 4 and 16 map to the fixed-size kinds; every other count
    /// (including 0) is a [`PropKind::FloatArray`].
    #[inline]
    pub const fn kind_for_len(len: usize) -> Self {
        match len {
            1 => PropKind::Float,
            4 => PropKind::Vector4,
            16 => PropKind::Matrix4x4,
            _ => PropKind::FloatArray,
        }
    }

    /// Returns the fixed `f32` element count of this kind, or `None` for
    /// variable-length arrays.
    #[inline]
    pub const fn len(self) -> Option<usize> {
        match self {
            PropKind::Float => Some(1),
            PropKind::Vector4 => Some(4),
            PropKind::Matrix4x4 => Some(16),
            PropKind::FloatArray => None,
        }
    }
}

impl fmt::Display for PropKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropKind::Float => "Float",
            PropKind::Vector4 => "Vector4",
            PropKind::Matrix4x4 => "Matrix4x4",
            PropKind::FloatArray => "FloatArray",
        };
        write!(f, "{name}")
    }
}

/// A tagged uniform value as staged by the control side.
///
/// This is the generic carrier for code paths that handle uniforms uniformly
/// (logging, generic setters); the hot-path setters on the device trait take
/// the unwrapped payloads directly.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// A scalar value.
    Float(f32),
    /// A 4-component vector value.
    Vector4(Vec4),
    /// A 4x4 matrix value.
    Matrix4x4(Mat4),
    /// A float array value of arbitrary (possibly zero) length.
    FloatArray(Vec<f32>),
}

impl UniformValue {
    /// Returns the [`PropKind`] of this value.
    #[inline]
    pub fn kind(&self) -> PropKind {
        match self {
            UniformValue::Float(_) => PropKind::Float,
            UniformValue::Vector4(_) => PropKind::Vector4,
            UniformValue::Matrix4x4(_) => PropKind::Matrix4x4,
            UniformValue::FloatArray(_) => PropKind::FloatArray,
        }
    }

    /// Returns the number of `f32` elements this value flattens to.
    #[inline]
    pub fn float_len(&self) -> usize {
        match self {
            UniformValue::Float(_) => 1,
            UniformValue::Vector4(_) => 4,
            UniformValue::Matrix4x4(_) => 16,
            UniformValue::FloatArray(values) => values.len(),
        }
    }

    /// Flattens the value into a contiguous `f32` vector.
    pub fn to_floats(&self) -> Vec<f32> {
        match self {
            UniformValue::Float(v) => vec![*v],
            UniformValue::Vector4(v) => v.to_array().to_vec(),
            UniformValue::Matrix4x4(m) => m.to_cols_array().to_vec(),
            UniformValue::FloatArray(values) => values.clone(),
        }
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float(value)
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        UniformValue::Vector4(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        UniformValue::Matrix4x4(value)
    }
}

impl From<Vec<f32>> for UniformValue {
    fn from(values: Vec<f32>) -> Self {
        UniformValue::FloatArray(values)
    }
}
