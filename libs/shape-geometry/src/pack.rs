//! # Packing Protocol
//!
//! Fixed-arity encoding of descriptions into flat `f64` arrays so they can
//! cross a thread boundary as plain numbers.
//!
//! Every description writes exactly `PACKED_LENGTH` words at a starting
//! index. Integers and enum tags are stored as whole `f64` values and must
//! read back exactly; anything else on unpack is an `InvalidArgument`.
//!
//! ```rust
//! use shape_geometry::pack::Packable;
//! use shape_geometry::shapes::{Circle, CircleOptions};
//!
//! let circle = Circle::new(CircleOptions { radius: Some(10.0), ..Default::default() }).unwrap();
//!
//! let mut array = vec![0.0; 3];
//! circle.pack(&mut array, 3);
//! assert_eq!(array.len(), 3 + Circle::PACKED_LENGTH);
//!
//! let unpacked = Circle::unpack(&array, 3).unwrap();
//! assert_eq!(unpacked.radius(), 10.0);
//! ```

use std::ops::Range;

use glam::DVec3;

use crate::error::{GeometryError, Result};

/// Contract for values that move across threads as packed `f64` words.
///
/// Implementors provide the fixed-size read and write; the provided methods
/// handle bounds, growth and scratch reuse.
pub trait Packable: Default {
    /// Number of words one value occupies.
    const PACKED_LENGTH: usize;

    /// Writes the value into `out`, which is exactly `PACKED_LENGTH` long.
    fn write_packed(&self, out: &mut [f64]);

    /// Reads a value from `input`, which is exactly `PACKED_LENGTH` long,
    /// into `result`. On error `result` may be partially overwritten.
    fn read_packed(input: &[f64], result: &mut Self) -> Result<()>;

    /// Packs into a growable array at `starting_index`, extending it with
    /// zeros if it is too short. Returns the array for chaining.
    ///
    /// # Panics
    ///
    /// Panics if the array cannot grow to `starting_index + PACKED_LENGTH`
    /// words, as [`Vec::resize`] does.
    fn pack<'a>(&self, array: &'a mut Vec<f64>, starting_index: usize) -> &'a mut Vec<f64> {
        let end = starting_index.saturating_add(Self::PACKED_LENGTH);
        if array.len() < end {
            array.resize(end, 0.0);
        }
        self.write_packed(&mut array[starting_index..end]);
        array
    }

    /// Packs into a presized slice at `starting_index`.
    fn pack_into(&self, array: &mut [f64], starting_index: usize) -> Result<()> {
        let len = array.len();
        let slot = slot_range::<Self>(len, starting_index)
            .and_then(|range| array.get_mut(range))
            .ok_or_else(|| too_short(len, starting_index, Self::PACKED_LENGTH))?;
        self.write_packed(slot);
        Ok(())
    }

    /// Unpacks a newly allocated value from `array` at `starting_index`.
    fn unpack(array: &[f64], starting_index: usize) -> Result<Self> {
        let mut result = Self::default();
        Self::unpack_into(array, starting_index, &mut result)?;
        Ok(result)
    }

    /// Unpacks into a caller-owned scratch value.
    fn unpack_into(array: &[f64], starting_index: usize, result: &mut Self) -> Result<()> {
        let slot = slot_range::<Self>(array.len(), starting_index)
            .and_then(|range| array.get(range))
            .ok_or_else(|| too_short(array.len(), starting_index, Self::PACKED_LENGTH))?;
        Self::read_packed(slot, result)
    }

    /// Packs the value into a new array of exactly `PACKED_LENGTH` words.
    fn to_packed(&self) -> Vec<f64> {
        let mut array = Vec::with_capacity(Self::PACKED_LENGTH);
        self.pack(&mut array, 0);
        array
    }
}

/// Word range of one value at `starting_index`, if it fits in `len` words.
fn slot_range<T: Packable>(len: usize, starting_index: usize) -> Option<Range<usize>> {
    let end = starting_index.checked_add(T::PACKED_LENGTH)?;
    (end <= len).then_some(starting_index..end)
}

fn too_short(len: usize, starting_index: usize, packed_length: usize) -> GeometryError {
    GeometryError::invalid_argument(
        "packed_array",
        format!(
            "needs {packed_length} words at index {starting_index} but has length {len}"
        ),
    )
}

/// Sequential writer over one packed slot.
pub(crate) struct PackedWriter<'a> {
    out: &'a mut [f64],
    index: usize,
}

impl<'a> PackedWriter<'a> {
    pub(crate) fn new(out: &'a mut [f64]) -> Self {
        Self { out, index: 0 }
    }

    pub(crate) fn f64(&mut self, value: f64) -> &mut Self {
        self.out[self.index] = value;
        self.index += 1;
        self
    }

    pub(crate) fn vec3(&mut self, value: DVec3) -> &mut Self {
        self.f64(value.x).f64(value.y).f64(value.z)
    }

    pub(crate) fn u32(&mut self, value: u32) -> &mut Self {
        self.f64(value as f64)
    }

    pub(crate) fn flag(&mut self, value: bool) -> &mut Self {
        self.f64(if value { 1.0 } else { 0.0 })
    }

    /// Number of words written so far.
    pub(crate) fn written(&self) -> usize {
        self.index
    }
}

/// Sequential reader over one packed slot.
pub(crate) struct PackedReader<'a> {
    input: &'a [f64],
    index: usize,
}

impl<'a> PackedReader<'a> {
    pub(crate) fn new(input: &'a [f64]) -> Self {
        Self { input, index: 0 }
    }

    pub(crate) fn f64(&mut self) -> f64 {
        let value = self.input[self.index];
        self.index += 1;
        value
    }

    pub(crate) fn vec3(&mut self) -> DVec3 {
        let x = self.f64();
        let y = self.f64();
        let z = self.f64();
        DVec3::new(x, y, z)
    }

    /// Reads a whole number in `u32` range.
    pub(crate) fn u32(&mut self, parameter: &'static str) -> Result<u32> {
        let value = self.f64();
        if value.fract() != 0.0 || !(0.0..=u32::MAX as f64).contains(&value) {
            return Err(GeometryError::invalid_argument(
                parameter,
                format!("packed value {value} is not an unsigned integer"),
            ));
        }
        Ok(value as u32)
    }

    pub(crate) fn flag(&mut self, parameter: &'static str) -> Result<bool> {
        match self.u32(parameter)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(GeometryError::invalid_argument(
                parameter,
                format!("packed flag {other} is not 0 or 1"),
            )),
        }
    }

    pub(crate) fn consumed(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Pair {
        value: f64,
        count: u32,
    }

    impl Packable for Pair {
        const PACKED_LENGTH: usize = 2;

        fn write_packed(&self, out: &mut [f64]) {
            PackedWriter::new(out).f64(self.value).u32(self.count);
        }

        fn read_packed(input: &[f64], result: &mut Self) -> Result<()> {
            let mut reader = PackedReader::new(input);
            result.value = reader.f64();
            result.count = reader.u32("count")?;
            Ok(())
        }
    }

    #[test]
    fn test_pack_grows_array() {
        let pair = Pair { value: 1.5, count: 7 };
        let mut array = Vec::new();
        pair.pack(&mut array, 2);
        assert_eq!(array, vec![0.0, 0.0, 1.5, 7.0]);
    }

    #[test]
    fn test_pack_chains() {
        let a = Pair { value: 1.0, count: 1 };
        let b = Pair { value: 2.0, count: 2 };
        let mut array = Vec::new();
        let len = a.pack(&mut array, 0).len();
        b.pack(&mut array, len);
        assert_eq!(Pair::unpack(&array, 0), Ok(a));
        assert_eq!(Pair::unpack(&array, 2), Ok(b));
    }

    #[test]
    fn test_pack_into_too_short() {
        let pair = Pair::default();
        let mut array = [0.0; 3];
        assert!(pair.pack_into(&mut array, 1).is_ok());
        assert!(pair.pack_into(&mut array, 2).is_err());
    }

    #[test]
    fn test_unpack_too_short() {
        let err = Pair::unpack(&[1.0], 0).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidArgument { parameter: "packed_array", .. }));
    }

    #[test]
    fn test_offset_near_usize_max_is_error() {
        let array = [1.0, 2.0, 3.0];
        let err = Pair::unpack(&array, usize::MAX - 1).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidArgument { parameter: "packed_array", .. }));

        let mut array = [0.0; 3];
        assert!(Pair::default().pack_into(&mut array, usize::MAX).is_err());
    }

    #[test]
    fn test_unpack_into_reuses_scratch() {
        let mut scratch = Pair { value: 9.0, count: 9 };
        Pair::unpack_into(&[3.0, 4.0], 0, &mut scratch).unwrap();
        assert_eq!(scratch, Pair { value: 3.0, count: 4 });
    }

    #[test]
    fn test_unpack_rejects_fractional_integer() {
        assert!(Pair::unpack(&[3.0, 4.5], 0).is_err());
        assert!(Pair::unpack(&[3.0, -1.0], 0).is_err());
        assert!(Pair::unpack(&[3.0, f64::NAN], 0).is_err());
    }

    #[test]
    fn test_to_packed_exact_length() {
        let pair = Pair { value: -2.0, count: u32::MAX };
        let array = pair.to_packed();
        assert_eq!(array.len(), Pair::PACKED_LENGTH);
        assert_eq!(Pair::unpack(&array, 0), Ok(pair));
    }
}
