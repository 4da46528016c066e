//! # Manifest
//!
//! Layout of a packed batch: one backing buffer per attribute name, one
//! index buffer and one bounding-volume buffer, plus a slot per task that
//! says where its share lives.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shape_geometry::geometry::{
    GeometryOffsetAttribute, IndexDatatype, PrimitiveType, VertexAttribute,
};

/// Concatenated values of one attribute across every result of a batch.
pub type PackedAttribute = VertexAttribute;

/// A contiguous range in a backing buffer.
///
/// Counted in vertices for attributes, in indices for the index buffer and
/// in words for bounding volumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BufferRange {
    pub offset: usize,
    pub length: usize,
}

impl BufferRange {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Empty range at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, 0)
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Index buffer in the narrowest width the batch allows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndexBuffer {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexBuffer {
    pub fn datatype(&self) -> IndexDatatype {
        match self {
            Self::U16(_) => IndexDatatype::UInt16,
            Self::U32(_) => IndexDatatype::UInt32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::U16(values) => values.len(),
            Self::U32(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn byte_length(&self) -> usize {
        self.len() * self.datatype().size_in_bytes()
    }

    /// Copies a range out as `u32` indices.
    ///
    /// Returns `None` if the range is out of bounds.
    pub fn get(&self, range: BufferRange) -> Option<Vec<u32>> {
        match self {
            Self::U16(values) => values
                .get(range.offset..range.end())
                .map(|v| v.iter().map(|&i| u32::from(i)).collect()),
            Self::U32(values) => values.get(range.offset..range.end()).map(<[u32]>::to_vec),
        }
    }
}

/// Where one task's result lives in the backing buffers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSlot {
    /// False when the task produced no geometry
    pub defined: bool,
    pub vertex_count: usize,
    /// Vertex range per attribute the result carries
    pub attributes: BTreeMap<String, BufferRange>,
    pub indices: BufferRange,
    pub bounding_volume: BufferRange,
    /// `None` for undefined slots
    pub primitive_type: Option<PrimitiveType>,
    pub offset_attribute: GeometryOffsetAttribute,
}

impl ResultSlot {
    /// Zero-length slot for a task without geometry.
    pub fn undefined(index_offset: usize, bounding_volume_offset: usize) -> Self {
        Self {
            defined: false,
            vertex_count: 0,
            attributes: BTreeMap::new(),
            indices: BufferRange::empty(index_offset),
            bounding_volume: BufferRange::empty(bounding_volume_offset),
            primitive_type: None,
            offset_attribute: GeometryOffsetAttribute::None,
        }
    }
}

/// Packed results of one batch, in task order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub packed_data: BTreeMap<String, PackedAttribute>,
    pub indices: IndexBuffer,
    pub index_datatype: IndexDatatype,
    /// Four words (center xyz, radius) per defined result
    pub bounding_volumes: Vec<f64>,
    pub result_slots: Vec<ResultSlot>,
}

impl Manifest {
    /// Number of tasks the manifest describes.
    #[inline]
    pub fn len(&self) -> usize {
        self.result_slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.result_slots.is_empty()
    }

    /// Total bytes held by the backing buffers.
    pub fn byte_length(&self) -> usize {
        self.packed_data
            .values()
            .map(|attribute| attribute.values.byte_length())
            .sum::<usize>()
            + self.indices.byte_length()
            + self.bounding_volumes.len() * std::mem::size_of::<f64>()
    }
}

/// A backing buffer whose ownership moves to the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transferable {
    /// Buffer name within the manifest
    pub buffer: String,
    pub byte_length: usize,
}

/// Buffers handed over with a response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransferList {
    entries: Vec<Transferable>,
}

impl TransferList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, buffer: impl Into<String>, byte_length: usize) {
        self.entries.push(Transferable {
            buffer: buffer.into(),
            byte_length,
        });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transferable> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(|entry| entry.byte_length).sum()
    }
}

impl<'a> IntoIterator for &'a TransferList {
    type Item = &'a Transferable;
    type IntoIter = std::slice::Iter<'a, Transferable>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
