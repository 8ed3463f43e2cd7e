/// Externally supplied parameters that drive the silk pattern.
///
/// The struct is a flat snapshot: the lifecycle controller caches the latest
/// values so a context created after a setter call still picks them up. All
/// floats are expected to be finite and `color` a 6-hex-digit RGB string.
#[derive(Debug, Clone, PartialEq)]
pub struct SilkParams {
    /// Animation time-advance multiplier.
    pub speed: f32,
    /// Spatial frequency of the pattern.
    pub scale: f32,
    /// Base tint as a hex string, converted to normalized RGB for the shader.
    pub color: String,
    /// Magnitude of the subtracted dither noise.
    pub noise_intensity: f32,
    /// In-shader UV rotation angle in radians.
    pub rotation: f32,
}

impl Default for SilkParams {
    fn default() -> Self {
        Self {
            speed: 0.1,
            scale: 1.0,
            color: "#7B7481".to_string(),
            noise_intensity: 1.5,
            rotation: 0.0,
        }
    }
}
