use crate::error::{Result, SceneError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

/// One-row lookup texture that quantizes diffuse lighting into bands.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientMap {
    pub texels: Vec<[u8; 4]>,
    pub filter: TextureFilter,
}

impl GradientMap {
    /// Evenly spaced gray bands, brightest last.
    pub fn toon_ramp(steps: u32) -> Self {
        let steps = steps.max(1);
        let texels = (0..steps)
            .map(|i| {
                let v = ((i + 1) as f32 / steps as f32 * 255.0).round() as u8;
                [v, v, v, 255]
            })
            .collect();
        Self {
            texels,
            filter: TextureFilter::Nearest,
        }
    }

    /// Decode an image asset and keep its first row.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        if img.width() == 0 || img.height() == 0 {
            return Err(SceneError::EmptyTexture);
        }
        let texels = (0..img.width()).map(|x| img.get_pixel(x, 0).0).collect();
        Ok(Self {
            texels,
            filter: TextureFilter::Nearest,
        })
    }

    pub fn width(&self) -> u32 {
        self.texels.len() as u32
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }
}

impl Default for GradientMap {
    fn default() -> Self {
        Self::toon_ramp(crate::constants::GRADIENT_STEPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_has_one_texel_per_step() {
        let g = GradientMap::toon_ramp(3);
        assert_eq!(g.width(), 3);
        assert_eq!(g.texels[2], [255, 255, 255, 255]);
        assert_eq!(g.as_bytes().len(), 12);
        assert_eq!(g.filter, TextureFilter::Nearest);
    }

    #[test]
    fn decode_keeps_first_row() {
        let mut img = image::RgbaImage::new(3, 2);
        for (x, v) in [10u8, 128, 250].into_iter().enumerate() {
            img.put_pixel(x as u32, 0, image::Rgba([v, v, v, 255]));
            img.put_pixel(x as u32, 1, image::Rgba([0, 0, 0, 255]));
        }
        let mut png = std::io::Cursor::new(Vec::new());
        img.write_to(&mut png, image::ImageFormat::Png).expect("encode png");

        let g = GradientMap::decode(png.get_ref()).expect("decode png");
        assert_eq!(
            g.texels,
            vec![[10, 10, 10, 255], [128, 128, 128, 255], [250, 250, 250, 255]]
        );
        assert_eq!(g.width(), 3);
        assert_eq!(g.filter, TextureFilter::Nearest);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(GradientMap::decode(b"not an image").is_err());
    }
}
