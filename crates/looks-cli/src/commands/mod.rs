//! CLI command implementations

pub mod check;
pub mod list;
pub mod params;
pub mod previews;
pub mod render;

use anyhow::{Context, Result, bail};
use looks_core::{Image, PixelLayout};
use looks_gallery::SessionConfig;
use looks_tools::Parameter;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

/// Loads the session config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    match path {
        Some(path) => SessionConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(SessionConfig::default()),
    }
}

/// Loads an 8- or 16-bit PNG as a float image in `0..=1`.
pub fn load_image(path: &Path) -> Result<Image> {
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .with_context(|| format!("Failed to decode: {}", path.display()))?;
    let buf_size = reader
        .output_buffer_size()
        .context("cannot determine output buffer size")?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .with_context(|| format!("Failed to decode: {}", path.display()))?;
    let bytes = &buf[..info.buffer_size()];

    let layout = match info.color_type {
        png::ColorType::Grayscale => PixelLayout::Gray,
        png::ColorType::GrayscaleAlpha => PixelLayout::GrayAlpha,
        png::ColorType::Rgb => PixelLayout::Rgb,
        png::ColorType::Rgba => PixelLayout::Rgba,
        other => bail!("unsupported PNG color type {:?}", other),
    };
    let data: Vec<f32> = match info.bit_depth {
        png::BitDepth::Eight => bytes.iter().map(|&b| b as f32 / 255.0).collect(),
        png::BitDepth::Sixteen => bytes
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]) as f32 / 65535.0)
            .collect(),
        other => bail!("unsupported PNG bit depth {:?}", other),
    };
    debug!(path = %path.display(), width = info.width, height = info.height, %layout, "loaded PNG");
    Image::from_data(info.width, info.height, layout, data)
        .with_context(|| format!("Invalid image: {}", path.display()))
}

/// Writes an image as an 8-bit sRGB PNG.
pub fn save_image(path: &Path, image: &Image) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width(), image.height());
    encoder.set_color(match image.layout() {
        PixelLayout::Gray => png::ColorType::Grayscale,
        PixelLayout::GrayAlpha => png::ColorType::GrayscaleAlpha,
        PixelLayout::Rgb => png::ColorType::Rgb,
        PixelLayout::Rgba => png::ColorType::Rgba,
    });
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut writer = encoder
        .write_header()
        .with_context(|| format!("Failed to save: {}", path.display()))?;
    let bytes = to_u8(image.data());
    writer
        .write_image_data(&bytes)
        .with_context(|| format!("Failed to save: {}", path.display()))?;
    Ok(())
}

fn to_u8(samples: &[f32]) -> Vec<u8> {
    samples
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect()
}

/// Loads `input`, or builds the test card when no input is given.
pub fn load_or_card(input: Option<&Path>, card: &str) -> Result<Image> {
    match input {
        Some(path) => load_image(path),
        None => {
            let (width, height) = parse_size(card)?;
            info!(width, height, "using test card");
            test_card(width, height)
        }
    }
}

/// Colour test card: a hue sweep over the top half, a gray ramp below.
pub fn test_card(width: u32, height: u32) -> Result<Image> {
    let w = width.max(2) as f32 - 1.0;
    let image = Image::from_fn(width, height, PixelLayout::Rgba, |x, y| {
        let t = x as f32 / w;
        if y < height / 2 {
            let [r, g, b] = hue(t);
            vec![r, g, b, 1.0]
        } else {
            vec![t, t, t, 1.0]
        }
    })?;
    Ok(image)
}

/// Fully saturated colour at hue `t` in `0..=1`.
fn hue(t: f32) -> [f32; 3] {
    let h = t.clamp(0.0, 1.0) * 6.0;
    let f = |n: f32| {
        let k = (n + h) % 6.0;
        1.0 - (k.min(4.0 - k).clamp(0.0, 1.0))
    };
    [f(5.0), f(3.0), f(1.0)]
}

/// Parses `WIDTHxHEIGHT`.
pub fn parse_size(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let width: u32 = w.trim().parse().with_context(|| format!("bad width in '{}'", s))?;
    let height: u32 = h.trim().parse().with_context(|| format!("bad height in '{}'", s))?;
    if width == 0 || height == 0 {
        bail!("size must be non-zero, got '{}'", s);
    }
    Ok((width, height))
}

/// Parses `PARAM=VALUE`.
pub fn parse_assignment(s: &str) -> Result<(Parameter, f64)> {
    let (name, value) = s
        .split_once('=')
        .with_context(|| format!("expected PARAM=VALUE, got '{}'", s))?;
    let parameter: Parameter = name.parse()?;
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("bad value for {}: '{}'", parameter, value))?;
    Ok((parameter, value))
}
