//! Hex color parsing for the public parameter surface.

/// Converts a 6-hex-digit RGB string into normalized channels in `[0, 1]`.
///
/// A single leading `#` is stripped before parsing. Malformed input (wrong
/// length, non-hex characters) yields `NaN` for the affected channels rather
/// than an error; the shader renders garbage but the pipeline stays alive.
/// Callers that want validation should check the string up front.
pub fn hex_to_normalized_rgb(hex: &str) -> [f32; 3] {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    [
        parse_channel(digits.get(0..2)),
        parse_channel(digits.get(2..4)),
        parse_channel(digits.get(4..6)),
    ]
}

fn parse_channel(pair: Option<&str>) -> f32 {
    pair.and_then(|digits| u8::from_str_radix(digits, 16).ok())
        .map(|byte| byte as f32 / 255.0)
        .unwrap_or(f32::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tint_converts_to_expected_channels() {
        let [r, g, b] = hex_to_normalized_rgb("#7B7481");
        assert!((r - 0.4824).abs() < 1.0 / 255.0);
        assert!((g - 0.4549).abs() < 1.0 / 255.0);
        assert!((b - 0.5059).abs() < 1.0 / 255.0);
    }

    #[test]
    fn channels_round_trip_to_bytes() {
        for hex in ["#000000", "#FFFFFF", "#7B7481", "ff8000", "#0a0B0c"] {
            let channels = hex_to_normalized_rgb(hex);
            let digits = hex.strip_prefix('#').unwrap_or(hex);
            for (index, channel) in channels.iter().enumerate() {
                assert!((0.0..=1.0).contains(channel));
                let expected =
                    u8::from_str_radix(&digits[index * 2..index * 2 + 2], 16).unwrap();
                assert_eq!((channel * 255.0).round() as u8, expected);
            }
        }
    }

    #[test]
    fn leading_hash_is_optional() {
        assert_eq!(hex_to_normalized_rgb("#336699"), hex_to_normalized_rgb("336699"));
    }

    #[test]
    fn malformed_input_yields_nan_channels() {
        assert!(hex_to_normalized_rgb("#12").iter().skip(1).all(|c| c.is_nan()));
        assert!(hex_to_normalized_rgb("zzzzzz").iter().all(|c| c.is_nan()));
        assert!(hex_to_normalized_rgb("").iter().all(|c| c.is_nan()));
    }
}
