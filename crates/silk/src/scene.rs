//! Quad-and-camera math for the full-viewport silk surface.
//!
//! The scene is a single unit quad spanning `[-1, 1]²` viewed through an
//! orthographic camera whose horizontal bounds track the container aspect
//! ratio. On resize the quad is scaled non-uniformly so its larger screen
//! dimension stays within `[-1, 1]`: the pattern fills the viewport without
//! stretching.

use winit::dpi::PhysicalSize;

pub(crate) const CAMERA_NEAR: f32 = 0.1;
pub(crate) const CAMERA_FAR: f32 = 10.0;
pub(crate) const CAMERA_Z: f32 = 1.0;

/// Orthographic camera bounds derived from the container aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// CPU-side scene state: camera bounds plus the non-uniform quad scale.
///
/// Rebuilt whenever the render context is (re)created and recomputed on
/// every resize notification.
#[derive(Clone, Copy, Debug)]
pub struct SceneState {
    bounds: CameraBounds,
    quad_scale: [f32; 3],
    aspect: f32,
}

impl SceneState {
    pub fn new(size: PhysicalSize<u32>) -> Self {
        let mut scene = Self {
            bounds: CameraBounds {
                left: -1.0,
                right: 1.0,
                top: 1.0,
                bottom: -1.0,
            },
            quad_scale: [1.0, 1.0, 1.0],
            aspect: 1.0,
        };
        scene.resize(size);
        scene
    }

    /// Recomputes camera bounds and quad scale for a new container size.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        let aspect = aspect_ratio(size);
        self.aspect = aspect;
        self.bounds = CameraBounds {
            left: -aspect,
            right: aspect,
            top: 1.0,
            bottom: -1.0,
        };
        self.quad_scale = [
            if aspect > 1.0 { aspect } else { 1.0 },
            if aspect < 1.0 { 1.0 / aspect } else { 1.0 },
            1.0,
        ];
    }

    pub fn bounds(&self) -> CameraBounds {
        self.bounds
    }

    pub fn quad_scale(&self) -> [f32; 3] {
        self.quad_scale
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Combined projection-view-model matrix for the uniform block.
    ///
    /// Column-major, mapping view-space depth to wgpu's `[0, 1]` clip range.
    /// The camera sits at `z = CAMERA_Z` looking down the negative z axis.
    pub fn transform(&self) -> [[f32; 4]; 4] {
        let CameraBounds {
            left,
            right,
            top,
            bottom,
        } = self.bounds;
        let [sx, sy, sz] = self.quad_scale;

        let x_scale = 2.0 / (right - left);
        let y_scale = 2.0 / (top - bottom);
        let z_scale = -1.0 / (CAMERA_FAR - CAMERA_NEAR);

        [
            [x_scale * sx, 0.0, 0.0, 0.0],
            [0.0, y_scale * sy, 0.0, 0.0],
            [0.0, 0.0, z_scale * sz, 0.0],
            [
                -(right + left) / (right - left),
                -(top + bottom) / (top - bottom),
                (CAMERA_Z - CAMERA_NEAR) / (CAMERA_FAR - CAMERA_NEAR),
                1.0,
            ],
        ]
    }
}

/// Width over height, falling back to 1 when either dimension is zero.
fn aspect_ratio(size: PhysicalSize<u32>) -> f32 {
    if size.width == 0 || size.height == 0 {
        1.0
    } else {
        size.width as f32 / size.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_container_widens_camera_and_quad() {
        let scene = SceneState::new(PhysicalSize::new(800, 400));
        let bounds = scene.bounds();
        assert_eq!(bounds.left, -2.0);
        assert_eq!(bounds.right, 2.0);
        assert_eq!(bounds.top, 1.0);
        assert_eq!(bounds.bottom, -1.0);
        assert_eq!(scene.quad_scale(), [2.0, 1.0, 1.0]);
    }

    #[test]
    fn tall_container_stretches_quad_vertically() {
        let scene = SceneState::new(PhysicalSize::new(400, 800));
        let bounds = scene.bounds();
        assert_eq!(bounds.left, -0.5);
        assert_eq!(bounds.right, 0.5);
        assert_eq!(scene.quad_scale(), [1.0, 2.0, 1.0]);
    }

    #[test]
    fn zero_sized_container_falls_back_to_square() {
        let scene = SceneState::new(PhysicalSize::new(0, 0));
        assert_eq!(scene.aspect(), 1.0);
        assert_eq!(scene.quad_scale(), [1.0, 1.0, 1.0]);
        let bounds = scene.bounds();
        assert_eq!((bounds.left, bounds.right), (-1.0, 1.0));
    }

    #[test]
    fn resize_updates_existing_scene_in_place() {
        let mut scene = SceneState::new(PhysicalSize::new(400, 400));
        scene.resize(PhysicalSize::new(800, 400));
        assert_eq!(scene.bounds().right, 2.0);
        assert_eq!(scene.quad_scale(), [2.0, 1.0, 1.0]);
    }

    #[test]
    fn quad_covers_the_viewport_regardless_of_aspect() {
        // The scaled quad corner must reach at least the clip edge (±1, ±1)
        // so the pattern always covers the viewport. On narrow aspects the
        // quad's unscaled axis overflows the camera on purpose; only wide
        // and square containers fit exactly.
        for (w, h) in [(800u32, 400u32), (400, 800), (300, 900), (512, 512)] {
            let scene = SceneState::new(PhysicalSize::new(w, h));
            let m = scene.transform();
            let corner = [1.0f32, 1.0, 0.0, 1.0];
            let x = m[0][0] * corner[0] + m[3][0];
            let y = m[1][1] * corner[1] + m[3][1];
            let z = m[2][2] * corner[2] + m[3][2];
            assert!(x >= 1.0 - 1e-6, "{w}x{h} clip x = {x}");
            assert!(y >= 1.0 - 1e-6, "{w}x{h} clip y = {y}");
            assert!((0.0..=1.0).contains(&z), "{w}x{h} clip z = {z}");
        }
    }

    #[test]
    fn quad_fits_exactly_on_wide_and_square_containers() {
        // With aspect >= 1 the scaled quad matches the camera bounds, so the
        // corner lands exactly on the clip edge.
        for (w, h) in [(800u32, 400u32), (512u32, 512u32)] {
            let scene = SceneState::new(PhysicalSize::new(w, h));
            let m = scene.transform();
            let x = m[0][0] + m[3][0];
            let y = m[1][1] + m[3][1];
            assert!((x - 1.0).abs() < 1e-6, "{w}x{h} clip x = {x}");
            assert!((y - 1.0).abs() < 1e-6, "{w}x{h} clip y = {y}");
        }
    }
}
