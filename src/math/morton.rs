//! Morton encoding (Z-order curve) for packing grid coordinates into one key

use crate::core::types::IVec3;

/// Bits per axis in a packed key
pub const AXIS_BITS: u32 = 21;

/// Offset that maps signed axis values onto the unsigned 21-bit range
pub const AXIS_BIAS: i32 = 1 << (AXIS_BITS - 1);

/// Spread bits of a 21-bit integer into every third bit of a 64-bit integer
fn spread_bits(x: u32) -> u64 {
    let mut x = x as u64 & 0x1fffff;
    x = (x | (x << 32)) & 0x1f00000000ffff;
    x = (x | (x << 16)) & 0x1f0000ff0000ff;
    x = (x | (x << 8)) & 0x100f00f00f00f00f;
    x = (x | (x << 4)) & 0x10c30c30c30c30c3;
    x = (x | (x << 2)) & 0x1249249249249249;
    x
}

/// Compact every third bit of a 64-bit integer into a 21-bit integer
fn compact_bits(x: u64) -> u32 {
    let mut x = x & 0x1249249249249249;
    x = (x | (x >> 2)) & 0x10c30c30c30c30c3;
    x = (x | (x >> 4)) & 0x100f00f00f00f00f;
    x = (x | (x >> 8)) & 0x1f0000ff0000ff;
    x = (x | (x >> 16)) & 0x1f00000000ffff;
    x = (x | (x >> 32)) & 0x1fffff;
    x as u32
}

/// Encode unsigned 3D coordinates (up to 21 bits each) into a Morton code
pub fn encode_morton_3d(x: u32, y: u32, z: u32) -> u64 {
    spread_bits(x) | (spread_bits(y) << 1) | (spread_bits(z) << 2)
}

/// Decode Morton code back to unsigned 3D coordinates
pub fn decode_morton_3d(code: u64) -> (u32, u32, u32) {
    (
        compact_bits(code),
        compact_bits(code >> 1),
        compact_bits(code >> 2),
    )
}

/// Encode signed coordinates in `[-AXIS_BIAS, AXIS_BIAS)`.
/// Values outside that range wrap and collide with other coordinates.
pub fn encode_signed(coord: IVec3) -> u64 {
    debug_assert!(
        in_signed_range(coord),
        "coordinate {coord} outside the packable range"
    );
    encode_morton_3d(
        coord.x.wrapping_add(AXIS_BIAS) as u32,
        coord.y.wrapping_add(AXIS_BIAS) as u32,
        coord.z.wrapping_add(AXIS_BIAS) as u32,
    )
}

/// Inverse of [`encode_signed`]
pub fn decode_signed(code: u64) -> IVec3 {
    let (x, y, z) = decode_morton_3d(code);
    IVec3::new(
        x as i32 - AXIS_BIAS,
        y as i32 - AXIS_BIAS,
        z as i32 - AXIS_BIAS,
    )
}

/// Whether every axis fits in the signed packable range
pub fn in_signed_range(coord: IVec3) -> bool {
    let ok = |v: i32| (-AXIS_BIAS..AXIS_BIAS).contains(&v);
    ok(coord.x) && ok(coord.y) && ok(coord.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        // Morton codes should interleave bits
        assert_eq!(encode_morton_3d(0, 0, 0), 0);
        assert_eq!(encode_morton_3d(1, 0, 0), 1);
        assert_eq!(encode_morton_3d(0, 1, 0), 2);
        assert_eq!(encode_morton_3d(0, 0, 1), 4);
        assert_eq!(encode_morton_3d(1, 1, 1), 7);
    }

    #[test]
    fn test_signed_negative_axes() {
        for coord in [
            IVec3::ZERO,
            IVec3::new(-1, 0, 1),
            IVec3::new(-48, 7, -2000),
            IVec3::splat(AXIS_BIAS - 1),
            IVec3::splat(-AXIS_BIAS),
        ] {
            assert_eq!(decode_signed(encode_signed(coord)), coord, "Failed for {}", coord);
        }
    }

    #[test]
    fn test_signed_neighbors_distinct() {
        let center = encode_signed(IVec3::ZERO);
        let neighbors = [
            IVec3::X, IVec3::NEG_X, IVec3::Y, IVec3::NEG_Y, IVec3::Z, IVec3::NEG_Z,
        ];
        for offset in neighbors {
            assert_ne!(encode_signed(offset), center);
        }
    }

    #[test]
    fn test_signed_range() {
        assert!(in_signed_range(IVec3::new(-AXIS_BIAS, 0, AXIS_BIAS - 1)));
        assert!(!in_signed_range(IVec3::new(AXIS_BIAS, 0, 0)));
    }
}
