//! Static program text for the silk pattern plus its declared uniform schema.
//!
//! The shader pair is an opaque, swappable asset: everything else in the
//! crate depends only on the uniform names and types declared in
//! [`UNIFORM_SCHEMA`], never on the pattern algorithm itself.

/// Semantic type of a declared uniform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniformKind {
    Float,
    Vec3,
    Mat4,
}

/// Uniform names the program declares, in block order.
///
/// The order and types here must match both the GLSL uniform block below and
/// the field order of [`crate::uniforms::SilkUniforms`].
pub const UNIFORM_SCHEMA: &[(&str, UniformKind)] = &[
    ("uTransform", UniformKind::Mat4),
    ("uColor", UniformKind::Vec3),
    ("uTime", UniformKind::Float),
    ("uSpeed", UniformKind::Float),
    ("uScale", UniformKind::Float),
    ("uRotation", UniformKind::Float),
    ("uNoiseIntensity", UniformKind::Float),
];

/// Bind group slot the uniform block occupies in both stages.
pub const UNIFORM_BLOCK_BINDING: u32 = 0;

/// Vertex program: positions the unit quad through the combined
/// projection-view-model transform and forwards UVs.
pub const VERTEX_SHADER_GLSL: &str = r"#version 450
layout(location = 0) in vec3 position;
layout(location = 1) in vec2 uv;
layout(location = 0) out vec2 v_uv;

layout(std140, set = 0, binding = 0) uniform SilkUniforms {
    mat4 uTransform;
    vec3 uColor;
    float uTime;
    float uSpeed;
    float uScale;
    float uRotation;
    float uNoiseIntensity;
} ubo;

void main() {
    v_uv = uv;
    gl_Position = ubo.uTransform * vec4(position, 1.0);
}
";

/// Fragment program: the procedural silk pattern.
///
/// A layered sine field is advected along x over time, tinted by `uColor`,
/// and dithered by subtracting per-fragment noise scaled with
/// `uNoiseIntensity`.
pub const FRAGMENT_SHADER_GLSL: &str = r"#version 450
layout(location = 0) in vec2 v_uv;
layout(location = 0) out vec4 out_color;

layout(std140, set = 0, binding = 0) uniform SilkUniforms {
    mat4 uTransform;
    vec3 uColor;
    float uTime;
    float uSpeed;
    float uScale;
    float uRotation;
    float uNoiseIntensity;
} ubo;

const float e = 2.71828182845904523536;

float noise(vec2 tex_coord) {
    float g = e;
    vec2 r = (g * sin(g * tex_coord));
    return fract(r.x * r.y * (1.0 + tex_coord.x));
}

vec2 rotate_uvs(vec2 uv, float angle) {
    float c = cos(angle);
    float s = sin(angle);
    mat2 rot = mat2(c, -s, s, c);
    return rot * uv;
}

void main() {
    float rnd = noise(gl_FragCoord.xy);
    vec2 uv = rotate_uvs(v_uv * ubo.uScale, ubo.uRotation);
    vec2 tex = uv * ubo.uScale;
    float t_offset = ubo.uSpeed * ubo.uTime;

    tex.y += 0.03 * sin(8.0 * tex.x - t_offset);

    float pattern = 0.6 +
                    0.4 * sin(5.0 * (tex.x + tex.y +
                                     cos(3.0 * tex.x + 5.0 * tex.y) +
                                     0.02 * t_offset) +
                              sin(20.0 * (tex.x + tex.y - 0.1 * t_offset)));

    vec4 col = vec4(ubo.uColor, 1.0) * vec4(pattern) - rnd / 15.0 * ubo.uNoiseIntensity;
    col.a = 1.0;
    out_color = col;
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_stages_declare_every_schema_uniform() {
        for (name, _) in UNIFORM_SCHEMA {
            assert!(
                VERTEX_SHADER_GLSL.contains(name),
                "vertex stage missing {name}"
            );
            assert!(
                FRAGMENT_SHADER_GLSL.contains(name),
                "fragment stage missing {name}"
            );
        }
    }

    #[test]
    fn schema_orders_mat4_first() {
        // std140 packs the mat4 at offset zero; the mirror struct relies on it.
        assert_eq!(UNIFORM_SCHEMA[0], ("uTransform", UniformKind::Mat4));
        assert_eq!(UNIFORM_SCHEMA[1], ("uColor", UniformKind::Vec3));
    }
}
