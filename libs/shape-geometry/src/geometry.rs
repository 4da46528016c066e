//! # Geometry Result
//!
//! Output of tessellation: named vertex attribute buffers, a local index
//! buffer, a primitive type and a bounding sphere.

use std::collections::BTreeMap;

use config::constants::{BOUNDING_SPHERE_PACKED_LENGTH, SIXTY_FOUR_KILOBYTES};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

/// Name of the position attribute (f64, 3 components).
pub const POSITION: &str = "position";
/// Name of the normal attribute (f32, 3 components).
pub const NORMAL: &str = "normal";
/// Name of the texture coordinate attribute (f32, 2 components).
pub const ST: &str = "st";
/// Name of the offset flag attribute (u8, 1 component).
pub const APPLY_OFFSET: &str = "apply_offset";

/// Scalar type stored in an attribute buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentDatatype {
    UnsignedByte,
    Float32,
    Float64,
}

impl ComponentDatatype {
    /// Size of one component in bytes.
    pub fn size_in_bytes(self) -> usize {
        match self {
            Self::UnsignedByte => 1,
            Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }
}

/// Typed storage behind one vertex attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeBuffer {
    U8(Vec<u8>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl AttributeBuffer {
    /// Creates an empty buffer of the given datatype.
    pub fn empty(datatype: ComponentDatatype) -> Self {
        match datatype {
            ComponentDatatype::UnsignedByte => Self::U8(Vec::new()),
            ComponentDatatype::Float32 => Self::F32(Vec::new()),
            ComponentDatatype::Float64 => Self::F64(Vec::new()),
        }
    }

    /// Returns the datatype of the stored components.
    pub fn datatype(&self) -> ComponentDatatype {
        match self {
            Self::U8(_) => ComponentDatatype::UnsignedByte,
            Self::F32(_) => ComponentDatatype::Float32,
            Self::F64(_) => ComponentDatatype::Float64,
        }
    }

    /// Number of scalar components stored.
    pub fn len(&self) -> usize {
        match self {
            Self::U8(values) => values.len(),
            Self::F32(values) => values.len(),
            Self::F64(values) => values.len(),
        }
    }

    /// Returns true if no components are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the stored components in bytes.
    pub fn byte_length(&self) -> usize {
        self.len() * self.datatype().size_in_bytes()
    }

    /// Appends the components of `other`.
    ///
    /// Returns false (and leaves `self` untouched) if the datatypes differ.
    pub fn append(&mut self, other: &AttributeBuffer) -> bool {
        match (self, other) {
            (Self::U8(a), Self::U8(b)) => a.extend_from_slice(b),
            (Self::F32(a), Self::F32(b)) => a.extend_from_slice(b),
            (Self::F64(a), Self::F64(b)) => a.extend_from_slice(b),
            _ => return false,
        }
        true
    }

    /// Copies the components in `start..end` into a new buffer.
    ///
    /// Returns `None` if the range is out of bounds.
    pub fn slice(&self, start: usize, end: usize) -> Option<AttributeBuffer> {
        match self {
            Self::U8(values) => values.get(start..end).map(|v| Self::U8(v.to_vec())),
            Self::F32(values) => values.get(start..end).map(|v| Self::F32(v.to_vec())),
            Self::F64(values) => values.get(start..end).map(|v| Self::F64(v.to_vec())),
        }
    }
}

/// One named per-vertex attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexAttribute {
    /// Number of components per vertex (1 to 4)
    pub components_per_attribute: u8,
    /// Flat component storage, `vertex_count * components_per_attribute` long
    pub values: AttributeBuffer,
}

impl VertexAttribute {
    /// Creates an attribute.
    pub fn new(components_per_attribute: u8, values: AttributeBuffer) -> Self {
        Self {
            components_per_attribute,
            values,
        }
    }

    /// Number of vertices described by this attribute.
    pub fn vertex_count(&self) -> usize {
        match self.components_per_attribute {
            0 => 0,
            n => self.values.len() / n as usize,
        }
    }
}

/// How indices group vertices into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveType {
    Lines,
    Triangles,
}

impl PrimitiveType {
    /// Number of indices per primitive.
    pub fn indices_per_primitive(self) -> usize {
        match self {
            Self::Lines => 2,
            Self::Triangles => 3,
        }
    }
}

/// Width of the indices needed to address a vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndexDatatype {
    UInt16,
    UInt32,
}

impl IndexDatatype {
    /// Narrowest index type able to address `vertex_count` vertices.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shape_geometry::geometry::IndexDatatype;
    ///
    /// assert_eq!(IndexDatatype::for_vertex_count(65_535), IndexDatatype::UInt16);
    /// assert_eq!(IndexDatatype::for_vertex_count(65_536), IndexDatatype::UInt32);
    /// ```
    pub fn for_vertex_count(vertex_count: usize) -> Self {
        if vertex_count >= SIXTY_FOUR_KILOBYTES {
            Self::UInt32
        } else {
            Self::UInt16
        }
    }

    /// Size of one index in bytes.
    pub fn size_in_bytes(self) -> usize {
        match self {
            Self::UInt16 => 2,
            Self::UInt32 => 4,
        }
    }
}

/// Which vertices receive a per-instance height offset downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GeometryOffsetAttribute {
    /// No offset attribute is generated.
    #[default]
    None,
    /// Only the top vertices of an extruded shape move.
    Top,
    /// Every vertex moves.
    All,
}

impl GeometryOffsetAttribute {
    /// Packed tag of this value.
    pub fn tag(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Top => 1,
            Self::All => 2,
        }
    }

    /// Value for a packed tag.
    pub fn from_tag(tag: u32) -> Result<Self> {
        match tag {
            0 => Ok(Self::None),
            1 => Ok(Self::Top),
            2 => Ok(Self::All),
            other => Err(GeometryError::invalid_argument(
                "offset_attribute",
                format!("unknown tag {other}"),
            )),
        }
    }
}

/// Sphere enclosing every vertex of a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub center: DVec3,
    pub radius: f64,
}

impl BoundingSphere {
    /// Creates a bounding sphere.
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Smallest sphere containing both spheres.
    pub fn union(&self, other: &BoundingSphere) -> BoundingSphere {
        let offset = other.center - self.center;
        let distance = offset.length();

        if distance + other.radius <= self.radius {
            return *self;
        }
        if distance + self.radius <= other.radius {
            return *other;
        }

        let radius = (self.radius + distance + other.radius) * 0.5;
        let center = self.center + offset * ((radius - self.radius) / distance);
        BoundingSphere { center, radius }
    }

    /// Sphere centered on the midpoint of the axis-aligned bounds.
    ///
    /// Returns `None` for an empty point set.
    pub fn from_points(points: &[DVec3]) -> Option<BoundingSphere> {
        let first = *points.first()?;
        let (min, max) = points[1..]
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));

        let center = (min + max) * 0.5;
        let radius = points
            .iter()
            .map(|p| p.distance_squared(center))
            .fold(0.0_f64, f64::max)
            .sqrt();

        Some(BoundingSphere { center, radius })
    }

    /// Writes center and radius into `out` (exactly four words).
    pub fn write_packed(&self, out: &mut [f64]) {
        out[..BOUNDING_SPHERE_PACKED_LENGTH]
            .copy_from_slice(&[self.center.x, self.center.y, self.center.z, self.radius]);
    }

    /// Reads a sphere written by [`BoundingSphere::write_packed`].
    pub fn read_packed(input: &[f64]) -> Option<BoundingSphere> {
        match input {
            [x, y, z, radius, ..] => Some(BoundingSphere {
                center: DVec3::new(*x, *y, *z),
                radius: *radius,
            }),
            _ => None,
        }
    }
}

/// Tessellated geometry of one shape.
///
/// Indices are local to this result. Positions are f64; the remaining
/// attributes are narrowed to f32 or u8 at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryResult {
    attributes: BTreeMap<String, VertexAttribute>,
    indices: Vec<u32>,
    primitive_type: PrimitiveType,
    bounding_sphere: BoundingSphere,
    offset_attribute: GeometryOffsetAttribute,
}

impl GeometryResult {
    /// Creates a geometry from positions and indices.
    pub fn new(
        positions: &[DVec3],
        indices: Vec<u32>,
        primitive_type: PrimitiveType,
        bounding_sphere: BoundingSphere,
    ) -> Self {
        let mut flat = Vec::with_capacity(positions.len() * 3);
        for p in positions {
            flat.extend_from_slice(&[p.x, p.y, p.z]);
        }

        let mut attributes = BTreeMap::new();
        attributes.insert(
            POSITION.to_string(),
            VertexAttribute::new(3, AttributeBuffer::F64(flat)),
        );

        Self {
            attributes,
            indices,
            primitive_type,
            bounding_sphere,
            offset_attribute: GeometryOffsetAttribute::None,
        }
    }

    /// Reassembles a geometry from its parts without re-validating.
    pub fn from_parts(
        attributes: BTreeMap<String, VertexAttribute>,
        indices: Vec<u32>,
        primitive_type: PrimitiveType,
        bounding_sphere: BoundingSphere,
        offset_attribute: GeometryOffsetAttribute,
    ) -> Self {
        Self {
            attributes,
            indices,
            primitive_type,
            bounding_sphere,
            offset_attribute,
        }
    }

    /// Adds or replaces a named attribute.
    pub fn set_attribute(&mut self, name: &str, attribute: VertexAttribute) {
        self.attributes.insert(name.to_string(), attribute);
    }

    /// Sets normals from f64 vectors, narrowing to f32.
    pub fn set_normals(&mut self, normals: &[DVec3]) {
        let mut flat = Vec::with_capacity(normals.len() * 3);
        for n in normals {
            flat.extend_from_slice(&[n.x as f32, n.y as f32, n.z as f32]);
        }
        self.set_attribute(NORMAL, VertexAttribute::new(3, AttributeBuffer::F32(flat)));
    }

    /// Sets texture coordinates, narrowing to f32.
    pub fn set_st(&mut self, st: &[[f64; 2]]) {
        let flat = st.iter().flat_map(|[s, t]| [*s as f32, *t as f32]).collect();
        self.set_attribute(ST, VertexAttribute::new(2, AttributeBuffer::F32(flat)));
    }

    /// Sets the offset attribute and its per-vertex flags.
    pub fn set_offset(&mut self, offset_attribute: GeometryOffsetAttribute, flags: Vec<u8>) {
        self.offset_attribute = offset_attribute;
        self.set_attribute(
            APPLY_OFFSET,
            VertexAttribute::new(1, AttributeBuffer::U8(flags)),
        );
    }

    /// Returns the named attribute.
    pub fn attribute(&self, name: &str) -> Option<&VertexAttribute> {
        self.attributes.get(name)
    }

    /// Returns all attributes keyed by name.
    #[inline]
    pub fn attributes(&self) -> &BTreeMap<String, VertexAttribute> {
        &self.attributes
    }

    /// Returns the local index buffer.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn primitive_type(&self) -> PrimitiveType {
        self.primitive_type
    }

    #[inline]
    pub fn bounding_sphere(&self) -> BoundingSphere {
        self.bounding_sphere
    }

    #[inline]
    pub fn offset_attribute(&self) -> GeometryOffsetAttribute {
        self.offset_attribute
    }

    /// Number of vertices, taken from the position attribute.
    pub fn vertex_count(&self) -> usize {
        self.attributes
            .get(POSITION)
            .map(VertexAttribute::vertex_count)
            .unwrap_or(0)
    }

    /// Number of lines or triangles.
    pub fn primitive_count(&self) -> usize {
        self.indices.len() / self.primitive_type.indices_per_primitive()
    }

    /// Index width needed by this geometry.
    pub fn index_datatype(&self) -> IndexDatatype {
        IndexDatatype::for_vertex_count(self.vertex_count())
    }

    /// Positions as vectors.
    pub fn positions(&self) -> Vec<DVec3> {
        match self.attributes.get(POSITION).map(|a| &a.values) {
            Some(AttributeBuffer::F64(values)) => values
                .chunks_exact(3)
                .map(|c| DVec3::new(c[0], c[1], c[2]))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Validates the geometry for consistency.
    ///
    /// Checks:
    /// - Every attribute describes the same number of vertices
    /// - Every index addresses an existing vertex
    /// - The index count is a whole number of primitives
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertex_count();

        for attribute in self.attributes.values() {
            if attribute.components_per_attribute == 0
                || attribute.values.len()
                    != vertex_count * attribute.components_per_attribute as usize
            {
                return false;
            }
        }

        if self.indices.len() % self.primitive_type.indices_per_primitive() != 0 {
            return false;
        }

        self.indices.iter().all(|&i| (i as usize) < vertex_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> GeometryResult {
        let positions = [DVec3::ZERO, DVec3::X, DVec3::Y];
        let sphere = BoundingSphere::from_points(&positions).unwrap();
        GeometryResult::new(&positions, vec![0, 1, 2], PrimitiveType::Triangles, sphere)
    }

    #[test]
    fn test_geometry_new() {
        let geometry = triangle();
        assert_eq!(geometry.vertex_count(), 3);
        assert_eq!(geometry.primitive_count(), 1);
        assert!(geometry.validate());
    }

    #[test]
    fn test_geometry_invalid_index() {
        let mut geometry = triangle();
        geometry.indices = vec![0, 1, 3];
        assert!(!geometry.validate());
    }

    #[test]
    fn test_geometry_attribute_count_mismatch() {
        let mut geometry = triangle();
        geometry.set_normals(&[DVec3::Z, DVec3::Z]);
        assert!(!geometry.validate());
        geometry.set_normals(&[DVec3::Z; 3]);
        assert!(geometry.validate());
    }

    #[test]
    fn test_positions_round_trip() {
        let geometry = triangle();
        assert_eq!(geometry.positions(), vec![DVec3::ZERO, DVec3::X, DVec3::Y]);
    }

    #[test]
    fn test_bounding_sphere_from_points() {
        let sphere =
            BoundingSphere::from_points(&[DVec3::new(-2.0, 0.0, 0.0), DVec3::new(2.0, 0.0, 0.0)])
                .unwrap();
        assert_eq!(sphere.center, DVec3::ZERO);
        assert_eq!(sphere.radius, 2.0);
        assert!(BoundingSphere::from_points(&[]).is_none());
    }

    #[test]
    fn test_bounding_sphere_union() {
        let a = BoundingSphere::new(DVec3::ZERO, 1.0);
        let b = BoundingSphere::new(DVec3::new(4.0, 0.0, 0.0), 1.0);
        let u = a.union(&b);
        assert_eq!(u.center, DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(u.radius, 3.0);

        let inner = BoundingSphere::new(DVec3::new(0.5, 0.0, 0.0), 0.25);
        assert_eq!(a.union(&inner), a);
        assert_eq!(inner.union(&a), a);
    }

    #[test]
    fn test_bounding_sphere_packing() {
        let sphere = BoundingSphere::new(DVec3::new(1.0, 2.0, 3.0), 4.0);
        let mut out = [0.0; 4];
        sphere.write_packed(&mut out);
        assert_eq!(out, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(BoundingSphere::read_packed(&out), Some(sphere));
        assert_eq!(BoundingSphere::read_packed(&out[..3]), None);
    }

    #[test]
    fn test_attribute_buffer_append() {
        let mut a = AttributeBuffer::F32(vec![1.0]);
        assert!(a.append(&AttributeBuffer::F32(vec![2.0, 3.0])));
        assert_eq!(a.len(), 3);
        assert!(!a.append(&AttributeBuffer::F64(vec![4.0])));
        assert_eq!(a.byte_length(), 12);
    }

    #[test]
    fn test_attribute_buffer_slice() {
        let a = AttributeBuffer::U8(vec![1, 2, 3, 4]);
        assert_eq!(a.slice(1, 3), Some(AttributeBuffer::U8(vec![2, 3])));
        assert_eq!(a.slice(3, 5), None);
    }

    #[test]
    fn test_offset_attribute_tags() {
        for value in [
            GeometryOffsetAttribute::None,
            GeometryOffsetAttribute::Top,
            GeometryOffsetAttribute::All,
        ] {
            assert_eq!(GeometryOffsetAttribute::from_tag(value.tag()), Ok(value));
        }
        assert!(GeometryOffsetAttribute::from_tag(3).is_err());
    }
}
