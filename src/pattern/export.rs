//! 8-bit export of patterns and their cosine spectrum.
//!
//! The core only produces single-channel byte buffers; writing them to a
//! file is left to [`LumaImage::save_png`] (feature `png`) or the caller.

use super::grid::Pattern;
use std::f64::consts::TAU;

#[cfg(feature = "png")]
use crate::error::BlueNoiseResult;

/// Which channel of a multi-channel pattern is exported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelSelect {
    /// A single channel by index.
    Channel(usize),
    /// The mean of all channels.
    #[default]
    Mean,
}

fn cell_mean(cell: &[f32]) -> f64 {
    cell.iter().map(|&v| f64::from(v)).sum::<f64>() / cell.len() as f64
}

/// A single-channel 8-bit image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl LumaImage {
    /// Number of channels per pixel. Always 1.
    pub const CHANNELS: u32 = 1;

    /// Writes the image as an 8-bit grayscale PNG, creating missing parent
    /// directories.
    #[cfg(feature = "png")]
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> BlueNoiseResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ExtendedColorType::L8,
            image::ImageFormat::Png,
        )?;
        Ok(())
    }
}

fn to_byte(v: f64) -> u8 {
    (255.0 * v).clamp(0.0, 255.0) as u8
}

fn image_from(pattern: &Pattern, data: Vec<u8>) -> LumaImage {
    let side = u32::try_from(pattern.size()).expect("pattern size exceeds u32");
    LumaImage {
        width: side,
        height: side,
        data,
    }
}

/// Selected channel values of every cell, row-major.
pub fn channel_values(pattern: &Pattern, select: ChannelSelect) -> Vec<f64> {
    match select {
        ChannelSelect::Channel(c) => pattern.channel(c).into_iter().map(f64::from).collect(),
        ChannelSelect::Mean => (0..pattern.cell_count())
            .map(|i| {
                let (x, y) = pattern.position(i);
                cell_mean(pattern.cell(x, y))
            })
            .collect(),
    }
}

/// Raw export: each value `v` becomes `255 · v`, clamped to `[0, 255]`.
pub fn to_luma8(pattern: &Pattern, select: ChannelSelect) -> LumaImage {
    let data = channel_values(pattern, select)
        .into_iter()
        .map(to_byte)
        .collect();
    image_from(pattern, data)
}

/// Separable cosine transform of the selected channel.
///
/// With `S = size` and `v[y][x]` the cell values:
///
/// ```text
/// X[y][u] = 1/S Σ_x v[y][x] · cos(2π u x / S)      (along rows)
/// Y[w][u] = 1/S Σ_y X[y][u] · cos(2π w y / S)      (along columns)
/// result  = X ⊙ Y
/// ```
pub fn cosine_spectrum(pattern: &Pattern, select: ChannelSelect) -> Vec<f64> {
    let s = pattern.size();
    let inv_s = 1.0 / s as f64;
    let values = channel_values(pattern, select);

    let basis: Vec<f64> = (0..s * s)
        .map(|i| (TAU * (i / s) as f64 * (i % s) as f64 * inv_s).cos())
        .collect();
    let cos = |freq: usize, t: usize| basis[freq * s + t];

    let mut along_x = vec![0.0; s * s];
    for y in 0..s {
        for u in 0..s {
            let sum: f64 = (0..s).map(|x| values[y * s + x] * cos(u, x)).sum();
            along_x[y * s + u] = sum * inv_s;
        }
    }

    let mut along_y = vec![0.0; s * s];
    for u in 0..s {
        for w in 0..s {
            let sum: f64 = (0..s).map(|y| along_x[y * s + u] * cos(w, y)).sum();
            along_y[w * s + u] = sum * inv_s;
        }
    }

    along_x
        .iter()
        .zip(&along_y)
        .map(|(a, b)| a * b)
        .collect()
}

/// Spectrum export: values are divided by the observed maximum, then
/// scaled to 8 bits. Negative values clamp to 0; a spectrum with no
/// positive value exports as black.
pub fn spectrum_luma8(pattern: &Pattern, select: ChannelSelect) -> LumaImage {
    let spectrum = cosine_spectrum(pattern, select);
    let max = spectrum.iter().copied().fold(0.0f64, f64::max);

    let data = if max > 0.0 {
        spectrum.iter().map(|&v| to_byte(v / max)).collect()
    } else {
        vec![0; spectrum.len()]
    };
    image_from(pattern, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_to_luma8_scales_and_clamps() {
        let pattern = Pattern::from_values(2, 1, vec![0.0, 0.5, 0.999, 1.5]).expect("valid");
        let image = to_luma8(&pattern, ChannelSelect::Channel(0));

        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.data, vec![0, 127, 254, 255]);
    }

    #[test]
    fn test_channel_selection() {
        let pattern = Pattern::from_values(1, 3, vec![0.2, 0.4, 0.6]).expect("valid");
        assert_eq!(to_luma8(&pattern, ChannelSelect::Channel(2)).data, vec![153]);
        assert_eq!(to_luma8(&pattern, ChannelSelect::Mean).data, vec![102]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_bad_channel_panics() {
        let pattern = Pattern::from_values(1, 1, vec![0.5]).expect("valid");
        let _ = to_luma8(&pattern, ChannelSelect::Channel(1));
    }

    #[test]
    fn test_constant_pattern_spectrum_is_dc_only() {
        let size = 4;
        let pattern = Pattern::from_values(size, 1, vec![0.5; size * size]).expect("valid");
        let spectrum = cosine_spectrum(&pattern, ChannelSelect::Mean);

        // Row transform is 0.5 at u = 0; column transform keeps it only at w = 0.
        assert!((spectrum[0] - 0.25).abs() < 1e-12);

        let image = spectrum_luma8(&pattern, ChannelSelect::Mean);
        assert_eq!(image.data[0], 255);
        assert_eq!(image.data.len(), size * size);
    }

    #[test]
    fn test_zero_pattern_spectrum_is_black() {
        let pattern = Pattern::from_values(3, 1, vec![0.0; 9]).expect("valid");
        let image = spectrum_luma8(&pattern, ChannelSelect::Mean);
        assert!(image.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_spectrum_peak_maps_to_white() {
        let mut rng = StdRng::seed_from_u64(5);
        let pattern = Pattern::random(8, 1, &mut rng);
        let image = spectrum_luma8(&pattern, ChannelSelect::Channel(0));

        assert_eq!(image.data.len(), 64);
        assert_eq!(image.data.iter().copied().max(), Some(255));
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_save_png_roundtrip_dimensions() {
        let pattern = Pattern::from_values(2, 1, vec![0.0, 0.25, 0.5, 0.75]).expect("valid");
        let path = std::env::temp_dir().join(format!("u-bluenoise-{}.png", std::process::id()));

        to_luma8(&pattern, ChannelSelect::Mean)
            .save_png(&path)
            .expect("write png");
        let decoded = image::open(&path).expect("read png").to_luma8();
        std::fs::remove_file(&path).ok();

        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.into_raw(), vec![0, 63, 127, 191]);
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_save_png_creates_parent_dirs() {
        let pattern = Pattern::from_values(1, 1, vec![0.5]).expect("valid");
        let root = std::env::temp_dir().join(format!("u-bluenoise-dirs-{}", std::process::id()));
        let path = root.join("nested").join("out.png");

        to_luma8(&pattern, ChannelSelect::Mean)
            .save_png(&path)
            .expect("write png");
        assert!(path.is_file());
        std::fs::remove_dir_all(&root).ok();
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_save_png_reports_filesystem_failure_as_io() {
        let blocker =
            std::env::temp_dir().join(format!("u-bluenoise-blocker-{}", std::process::id()));
        std::fs::write(&blocker, b"not a directory").expect("write blocker");

        let pattern = Pattern::from_values(1, 1, vec![0.5]).expect("valid");
        let err = to_luma8(&pattern, ChannelSelect::Mean)
            .save_png(blocker.join("sub").join("out.png"))
            .unwrap_err();
        std::fs::remove_file(&blocker).ok();

        assert!(matches!(err, crate::error::BlueNoiseError::Io(_)), "got {err:?}");
    }
}
