//! CPU mirror of the shader's uniform block.
//!
//! The layout must match the std140 block declared in [`crate::shader`]
//! field for field; a `#[cfg(test)]` assertion below pins the offsets. The
//! mirror is mutated in place by parameter setters and uploaded through the
//! queue before every draw, so writes are visible to the next frame without
//! any pipeline rebuild.

use bytemuck::{Pod, Zeroable};

use crate::color::hex_to_normalized_rgb;
use crate::params::SilkParams;

#[repr(C, align(16))]
#[derive(Clone, Copy, Debug)]
pub struct SilkUniforms {
    pub transform: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub time: f32,
    pub speed: f32,
    pub scale: f32,
    pub rotation: f32,
    pub noise_intensity: f32,
}

unsafe impl Zeroable for SilkUniforms {}
unsafe impl Pod for SilkUniforms {}

impl SilkUniforms {
    /// Seeds the uniform set from the cached parameter snapshot.
    ///
    /// Context creation always reads from the cache, never from compiled-in
    /// defaults, so setters that ran before mount are honored.
    pub fn from_params(params: &SilkParams, transform: [[f32; 4]; 4]) -> Self {
        Self {
            transform,
            color: hex_to_normalized_rgb(&params.color),
            time: 0.0,
            speed: params.speed,
            scale: params.scale,
            rotation: params.rotation,
            noise_intensity: params.noise_intensity,
        }
    }

    /// Advances the internally owned animation clock by one frame step.
    pub fn advance_time(&mut self, step: f32) {
        self.time += step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, size_of};

    /// Sanity-checks that the CPU mirror matches the std140 block layout
    /// declared in the GLSL sources.
    #[test]
    fn silk_uniforms_follow_std140_layout() {
        let uniforms = SilkUniforms::zeroed();
        let base = &uniforms as *const _ as usize;

        assert_eq!(align_of::<SilkUniforms>(), 16);
        assert_eq!(size_of::<SilkUniforms>(), 96);
        assert_eq!((&uniforms.transform as *const _ as usize) - base, 0);
        assert_eq!((&uniforms.color as *const _ as usize) - base, 64);
        assert_eq!((&uniforms.time as *const _ as usize) - base, 76);
        assert_eq!((&uniforms.speed as *const _ as usize) - base, 80);
        assert_eq!((&uniforms.scale as *const _ as usize) - base, 84);
        assert_eq!((&uniforms.rotation as *const _ as usize) - base, 88);
        assert_eq!((&uniforms.noise_intensity as *const _ as usize) - base, 92);
    }

    #[test]
    fn seeding_reads_every_parameter_field() {
        let params = SilkParams {
            speed: 0.7,
            scale: 2.0,
            color: "#FF0000".to_string(),
            noise_intensity: 0.25,
            rotation: 1.5,
        };
        let uniforms = SilkUniforms::from_params(&params, IDENTITY);
        assert_eq!(uniforms.speed, 0.7);
        assert_eq!(uniforms.scale, 2.0);
        assert_eq!(uniforms.rotation, 1.5);
        assert_eq!(uniforms.noise_intensity, 0.25);
        assert_eq!(uniforms.color, [1.0, 0.0, 0.0]);
        assert_eq!(uniforms.time, 0.0);
    }

    #[test]
    fn time_only_moves_forward() {
        let mut uniforms = SilkUniforms::from_params(&SilkParams::default(), IDENTITY);
        uniforms.advance_time(0.1);
        uniforms.advance_time(0.1);
        assert!((uniforms.time - 0.2).abs() < 1e-6);
    }

    const IDENTITY: [[f32; 4]; 4] = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
}
