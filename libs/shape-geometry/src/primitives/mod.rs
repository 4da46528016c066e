//! # Primitives
//!
//! Tessellation for the two canonical base descriptions. Shape variants
//! never tessellate on their own; they delegate here through their base.

pub mod ellipse;
pub mod ellipsoid;

use glam::DVec3;

use crate::base::Topology;
use crate::geometry::{BoundingSphere, GeometryOffsetAttribute, GeometryResult};

/// Vertex and index accumulator shared by the tessellators.
#[derive(Debug, Default)]
pub(crate) struct GeometryBuilder {
    positions: Vec<DVec3>,
    normals: Vec<DVec3>,
    st: Vec<[f64; 2]>,
    /// Whether each vertex belongs to the top of an extruded shape
    top: Vec<bool>,
    indices: Vec<u32>,
}

impl GeometryBuilder {
    pub(crate) fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            st: Vec::with_capacity(vertex_count),
            top: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Adds a vertex and returns its index.
    pub(crate) fn vertex(
        &mut self,
        position: DVec3,
        normal: DVec3,
        st: [f64; 2],
        top: bool,
    ) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.st.push(st);
        self.top.push(top);
        index
    }

    #[inline]
    pub(crate) fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }

    pub(crate) fn triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub(crate) fn line(&mut self, a: u32, b: u32) {
        self.indices.extend_from_slice(&[a, b]);
    }

    /// Builds the result. Outlines carry positions only.
    pub(crate) fn finish(
        self,
        topology: Topology,
        bounding_sphere: BoundingSphere,
        offset_attribute: GeometryOffsetAttribute,
    ) -> GeometryResult {
        let mut geometry = GeometryResult::new(
            &self.positions,
            self.indices,
            topology.primitive_type(),
            bounding_sphere,
        );

        if topology == Topology::Fill {
            geometry.set_normals(&self.normals);
            geometry.set_st(&self.st);
        }

        let flags = match offset_attribute {
            GeometryOffsetAttribute::None => None,
            GeometryOffsetAttribute::All => Some(vec![1u8; self.top.len()]),
            GeometryOffsetAttribute::Top => {
                Some(self.top.iter().map(|&top| u8::from(top)).collect())
            }
        };
        if let Some(flags) = flags {
            geometry.set_offset(offset_attribute, flags);
        }

        geometry
    }
}
