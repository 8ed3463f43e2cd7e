use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "silkview",
    author,
    version,
    about = "Desktop preview window for the silk animated background"
)]
pub struct Args {
    /// Animation time-advance multiplier.
    #[arg(long, value_name = "FACTOR")]
    pub speed: Option<f32>,

    /// Spatial frequency of the pattern.
    #[arg(long, value_name = "FACTOR")]
    pub scale: Option<f32>,

    /// Base tint as a 6-hex-digit RGB string (e.g. `#7B7481`).
    #[arg(long, value_name = "HEX")]
    pub color: Option<String>,

    /// Magnitude of the subtracted dither noise.
    #[arg(long, value_name = "AMOUNT")]
    pub noise_intensity: Option<f32>,

    /// In-shader UV rotation angle in radians.
    #[arg(long, value_name = "RADIANS")]
    pub rotation: Option<f32>,

    /// Initial window size (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

/// Parses a `WIDTHxHEIGHT` string into a pixel pair.
pub fn parse_size(value: &str) -> anyhow::Result<(u32, u32)> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow::anyhow!("size must look like 1280x720, got '{value}'"))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid width in '{value}'"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid height in '{value}'"))?;
    anyhow::ensure!(width > 0 && height > 0, "size dimensions must be nonzero");
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_sizes() {
        assert_eq!(parse_size("1280x720").unwrap(), (1280, 720));
        assert_eq!(parse_size("800X400").unwrap(), (800, 400));
    }

    #[test]
    fn rejects_malformed_sizes() {
        assert!(parse_size("1280").is_err());
        assert!(parse_size("axb").is_err());
        assert!(parse_size("0x720").is_err());
    }
}
