//! Interleaved vertex layout handed to renderers and encoders

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Position, normal, and linear RGB color (36 bytes, tightly packed)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    pub const fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, normal, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size() {
        assert_eq!(Vertex::STRIDE, 36);
    }

    #[test]
    fn test_cast_to_bytes() {
        let vertices = [Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.5, 0.5, 0.5]); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 72);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
    }
}
