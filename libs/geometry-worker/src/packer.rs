//! # Geometry Result Packer
//!
//! Concatenates the results of one batch into shared backing buffers so
//! they can move to the receiver as a handful of allocations instead of
//! one per attribute per result.
//!
//! Slot `i` of the manifest always describes result `i`. Indices stay local
//! to their result; the receiver rebases them if it merges geometries.

use std::collections::BTreeMap;

use config::constants::BOUNDING_SPHERE_PACKED_LENGTH;
use log::debug;
use shape_geometry::geometry::{
    AttributeBuffer, BoundingSphere, GeometryResult, IndexDatatype, VertexAttribute,
};

use crate::error::{Result, WorkerError};
use crate::manifest::{
    BufferRange, IndexBuffer, Manifest, PackedAttribute, ResultSlot, TransferList,
};

/// Transfer list name of the index buffer.
pub const INDICES_BUFFER: &str = "indices";
/// Transfer list name of the bounding-volume buffer.
pub const BOUNDING_VOLUMES_BUFFER: &str = "bounding_volumes";

/// Packs a batch of results into a manifest.
///
/// Every backing buffer is recorded in `transfer_list`. Fails with
/// [`WorkerError::AttributeMismatch`] if two results store the same
/// attribute name with a different datatype or component count.
pub fn pack_create_geometry_results(
    results: Vec<Option<GeometryResult>>,
    transfer_list: &mut TransferList,
) -> Result<Manifest> {
    let index_datatype = IndexDatatype::for_vertex_count(
        results.iter().flatten().map(index_span).max().unwrap_or(0),
    );

    let defined = results.iter().flatten().count();
    let index_count = results.iter().flatten().map(|g| g.indices().len()).sum();

    let mut packed_data: BTreeMap<String, PackedAttribute> = BTreeMap::new();
    let mut indices: Vec<u32> = Vec::with_capacity(index_count);
    let mut bounding_volumes = vec![0.0; defined * BOUNDING_SPHERE_PACKED_LENGTH];
    let mut result_slots = Vec::with_capacity(results.len());
    let mut bounding_volume_offset = 0;

    for geometry in &results {
        let Some(geometry) = geometry else {
            result_slots.push(ResultSlot::undefined(indices.len(), bounding_volume_offset));
            continue;
        };

        let mut attributes = BTreeMap::new();
        for (name, attribute) in geometry.attributes() {
            let packed = packed_data.entry(name.clone()).or_insert_with(|| {
                VertexAttribute::new(
                    attribute.components_per_attribute,
                    AttributeBuffer::empty(attribute.values.datatype()),
                )
            });
            if packed.components_per_attribute != attribute.components_per_attribute {
                return Err(WorkerError::AttributeMismatch { name: name.clone() });
            }
            let offset = packed.vertex_count();
            if !packed.values.append(&attribute.values) {
                return Err(WorkerError::AttributeMismatch { name: name.clone() });
            }
            attributes.insert(
                name.clone(),
                BufferRange::new(offset, attribute.vertex_count()),
            );
        }

        let index_range = BufferRange::new(indices.len(), geometry.indices().len());
        indices.extend_from_slice(geometry.indices());

        let bounding_volume =
            BufferRange::new(bounding_volume_offset, BOUNDING_SPHERE_PACKED_LENGTH);
        geometry
            .bounding_sphere()
            .write_packed(&mut bounding_volumes[bounding_volume.offset..bounding_volume.end()]);
        bounding_volume_offset = bounding_volume.end();

        result_slots.push(ResultSlot {
            defined: true,
            vertex_count: geometry.vertex_count(),
            attributes,
            indices: index_range,
            bounding_volume,
            primitive_type: Some(geometry.primitive_type()),
            offset_attribute: geometry.offset_attribute(),
        });
    }

    let indices = match index_datatype {
        // Every index of every result is below 65 536
        IndexDatatype::UInt16 => IndexBuffer::U16(indices.into_iter().map(|i| i as u16).collect()),
        IndexDatatype::UInt32 => IndexBuffer::U32(indices),
    };

    for (name, attribute) in &packed_data {
        transfer_list.push(name.as_str(), attribute.values.byte_length());
    }
    transfer_list.push(INDICES_BUFFER, indices.byte_length());
    transfer_list.push(
        BOUNDING_VOLUMES_BUFFER,
        bounding_volumes.len() * std::mem::size_of::<f64>(),
    );

    let manifest = Manifest {
        packed_data,
        indices,
        index_datatype,
        bounding_volumes,
        result_slots,
    };
    debug!(
        "Packed {} results ({} defined) into {} bytes, {:?} indices",
        manifest.len(),
        defined,
        manifest.byte_length(),
        index_datatype
    );
    Ok(manifest)
}

/// Number of addressable vertices a result needs, counting indices that
/// point past its positions.
fn index_span(geometry: &GeometryResult) -> usize {
    let max_index = geometry.indices().iter().max().map_or(0, |&i| i as usize + 1);
    geometry.vertex_count().max(max_index)
}

/// Splits a manifest back into per-task results, in task order.
///
/// Fails with [`WorkerError::CorruptManifest`] if a slot points outside the
/// backing buffers or names an attribute the manifest does not carry.
pub fn unpack_create_geometry_results(manifest: &Manifest) -> Result<Vec<Option<GeometryResult>>> {
    manifest
        .result_slots
        .iter()
        .enumerate()
        .map(|(index, slot)| unpack_slot(manifest, index, slot))
        .collect()
}

fn unpack_slot(
    manifest: &Manifest,
    index: usize,
    slot: &ResultSlot,
) -> Result<Option<GeometryResult>> {
    if !slot.defined {
        return Ok(None);
    }

    let mut attributes = BTreeMap::new();
    for (name, range) in &slot.attributes {
        let packed = manifest.packed_data.get(name).ok_or_else(|| {
            WorkerError::corrupt(format!("slot {index} names missing attribute `{name}`"))
        })?;
        let components = packed.components_per_attribute as usize;
        let values = packed
            .values
            .slice(range.offset * components, range.end() * components)
            .ok_or_else(|| {
                WorkerError::corrupt(format!("slot {index} attribute `{name}` is out of bounds"))
            })?;
        attributes.insert(
            name.clone(),
            VertexAttribute::new(packed.components_per_attribute, values),
        );
    }

    let indices = manifest
        .indices
        .get(slot.indices)
        .ok_or_else(|| WorkerError::corrupt(format!("slot {index} indices are out of bounds")))?;

    let bounding_sphere = manifest
        .bounding_volumes
        .get(slot.bounding_volume.offset..slot.bounding_volume.end())
        .and_then(BoundingSphere::read_packed)
        .ok_or_else(|| {
            WorkerError::corrupt(format!("slot {index} bounding volume is out of bounds"))
        })?;

    let primitive_type = slot
        .primitive_type
        .ok_or_else(|| WorkerError::corrupt(format!("slot {index} has no primitive type")))?;

    Ok(Some(GeometryResult::from_parts(
        attributes,
        indices,
        primitive_type,
        bounding_sphere,
        slot.offset_attribute,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use shape_geometry::geometry::{PrimitiveType, NORMAL, POSITION};

    fn triangle(offset: f64) -> GeometryResult {
        let positions = [
            DVec3::new(offset, 0.0, 0.0),
            DVec3::new(offset + 1.0, 0.0, 0.0),
            DVec3::new(offset, 1.0, 0.0),
        ];
        let mut geometry = GeometryResult::new(
            &positions,
            vec![0, 1, 2],
            PrimitiveType::Triangles,
            BoundingSphere::new(DVec3::new(offset, 0.0, 0.0), 1.5),
        );
        geometry.set_normals(&[DVec3::Z; 3]);
        geometry
    }

    fn segment() -> GeometryResult {
        GeometryResult::new(
            &[DVec3::ZERO, DVec3::X],
            vec![0, 1],
            PrimitiveType::Lines,
            BoundingSphere::new(DVec3::X * 0.5, 0.5),
        )
    }

    #[test]
    fn test_concatenates_in_order() {
        let mut transfer_list = TransferList::new();
        let manifest = pack_create_geometry_results(
            vec![Some(triangle(0.0)), None, Some(triangle(10.0))],
            &mut transfer_list,
        )
        .unwrap();

        assert_eq!(manifest.len(), 3);
        assert_eq!(manifest.index_datatype, IndexDatatype::UInt16);
        assert_eq!(manifest.indices, IndexBuffer::U16(vec![0, 1, 2, 0, 1, 2]));
        assert_eq!(manifest.bounding_volumes.len(), 8);
        assert_eq!(manifest.bounding_volumes[4], 10.0);

        let slots = &manifest.result_slots;
        assert!(slots[0].defined);
        assert!(!slots[1].defined);
        assert_eq!(slots[1].indices, BufferRange::empty(3));
        assert_eq!(slots[2].attributes[POSITION], BufferRange::new(3, 3));
        assert_eq!(slots[2].indices, BufferRange::new(3, 3));
        assert_eq!(slots[2].bounding_volume, BufferRange::new(4, 4));

        assert_eq!(manifest.packed_data[POSITION].values.len(), 18);
        assert_eq!(manifest.packed_data[NORMAL].values.len(), 18);
    }

    #[test]
    fn test_out_of_range_index_widens_buffer() {
        let stray = GeometryResult::new(
            &[DVec3::ZERO, DVec3::X],
            vec![0, 70_000],
            PrimitiveType::Lines,
            BoundingSphere::new(DVec3::ZERO, 1.0),
        );
        let manifest = pack_create_geometry_results(
            vec![Some(segment()), Some(stray)],
            &mut TransferList::new(),
        )
        .unwrap();
        assert_eq!(manifest.index_datatype, IndexDatatype::UInt32);
        assert_eq!(manifest.indices, IndexBuffer::U32(vec![0, 1, 0, 70_000]));
    }

    #[test]
    fn test_transfer_list_covers_every_buffer() {
        let mut transfer_list = TransferList::new();
        let manifest =
            pack_create_geometry_results(vec![Some(triangle(0.0))], &mut transfer_list).unwrap();
        // position, normal, indices, bounding volumes
        assert_eq!(transfer_list.len(), 4);
        assert_eq!(transfer_list.total_bytes(), manifest.byte_length());
    }

    #[test]
    fn test_mixed_attribute_sets() {
        let mut transfer_list = TransferList::new();
        let manifest = pack_create_geometry_results(
            vec![Some(segment()), Some(triangle(2.0))],
            &mut transfer_list,
        )
        .unwrap();

        let slots = &manifest.result_slots;
        assert!(!slots[0].attributes.contains_key(NORMAL));
        assert_eq!(slots[1].attributes[POSITION], BufferRange::new(2, 3));
        assert_eq!(slots[1].attributes[NORMAL], BufferRange::new(0, 3));

        let unpacked = unpack_create_geometry_results(&manifest).unwrap();
        assert_eq!(unpacked, vec![Some(segment()), Some(triangle(2.0))]);
    }

    #[test]
    fn test_attribute_mismatch() {
        let mut odd = triangle(0.0);
        odd.set_attribute(
            NORMAL,
            VertexAttribute::new(3, AttributeBuffer::F64(vec![0.0; 9])),
        );
        let result = pack_create_geometry_results(
            vec![Some(triangle(0.0)), Some(odd)],
            &mut TransferList::new(),
        );
        assert_eq!(
            result,
            Err(WorkerError::AttributeMismatch {
                name: NORMAL.to_string()
            })
        );
    }

    #[test]
    fn test_round_trip() {
        let results = vec![None, Some(triangle(1.0)), Some(segment()), None];
        let manifest =
            pack_create_geometry_results(results.clone(), &mut TransferList::new()).unwrap();
        assert_eq!(unpack_create_geometry_results(&manifest).unwrap(), results);
    }

    #[test]
    fn test_empty_batch() {
        let mut transfer_list = TransferList::new();
        let manifest = pack_create_geometry_results(Vec::new(), &mut transfer_list).unwrap();
        assert!(manifest.is_empty());
        assert!(manifest.indices.is_empty());
        assert_eq!(transfer_list.total_bytes(), 0);
    }

    #[test]
    fn test_corrupt_slot() {
        let mut manifest =
            pack_create_geometry_results(vec![Some(triangle(0.0))], &mut TransferList::new())
                .unwrap();
        manifest.result_slots[0].indices = BufferRange::new(2, 5);
        assert!(matches!(
            unpack_create_geometry_results(&manifest),
            Err(WorkerError::CorruptManifest(_))
        ));
    }
}
