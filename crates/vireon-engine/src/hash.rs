//! Hashing utilities for comparing simulation state.
//!
//! Uses FNV-1a over the raw `f64` bit patterns, so two states hash equal
//! only if they are bit-identical. Not cryptographically secure.

use vireon_core::FieldMap;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

#[inline]
fn fnv1a_u64(hash: u64, v: u64) -> u64 {
    fnv1a_bytes(hash, &v.to_le_bytes())
}

/// Hash every field in `fields`, in map order.
///
/// Each field contributes its name, its side length, then every cell's
/// `f64::to_bits()`, so renaming, reordering, or reshaping changes the
/// digest. An empty map hashes to the FNV offset basis.
pub fn field_map_hash(fields: &FieldMap) -> u64 {
    let mut hash = FNV_OFFSET;
    for (name, field) in fields {
        hash = fnv1a_bytes(hash, name.as_bytes());
        hash = fnv1a_u64(hash, field.n() as u64);
        for &v in field.as_slice() {
            hash = fnv1a_u64(hash, v.to_bits());
        }
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use vireon_core::Field;

    fn map(pairs: &[(&'static str, Field)]) -> FieldMap {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn empty_map_is_offset_basis() {
        assert_eq!(field_map_hash(&FieldMap::new()), FNV_OFFSET);
    }

    #[test]
    fn identical_maps_hash_equal() {
        let a = map(&[("u", Field::filled(4, 1.0)), ("v", Field::zeros(4))]);
        let b = a.clone();
        assert_eq!(field_map_hash(&a), field_map_hash(&b));
    }

    #[test]
    fn single_bit_change_is_detected() {
        let a = map(&[("u", Field::filled(4, 1.0))]);
        let mut b = a.clone();
        b["u"][(2, 3)] = f64::from_bits(1.0f64.to_bits() + 1);
        assert_ne!(field_map_hash(&a), field_map_hash(&b));
    }

    #[test]
    fn order_and_names_matter() {
        let a = map(&[("u", Field::filled(2, 1.0)), ("v", Field::zeros(2))]);
        let b = map(&[("v", Field::zeros(2)), ("u", Field::filled(2, 1.0))]);
        let c = map(&[("x", Field::filled(2, 1.0)), ("v", Field::zeros(2))]);
        assert_ne!(field_map_hash(&a), field_map_hash(&b));
        assert_ne!(field_map_hash(&a), field_map_hash(&c));
    }

    #[test]
    fn negative_zero_differs_from_zero() {
        let a = map(&[("u", Field::filled(1, 0.0))]);
        let b = map(&[("u", Field::filled(1, -0.0))]);
        assert_ne!(field_map_hash(&a), field_map_hash(&b));
    }
}
