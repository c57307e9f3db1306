use crate::foundation::core::{Rgba8, Rgba8Premul};
use crate::foundation::error::{KnobError, KnobResult};

/// One rendered image as premultiplied RGBA8 pixels, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Buffer of `width * height` pixels, every pixel set to `fill`.
    pub fn new_filled(width: u32, height: u32, fill: Rgba8Premul) -> KnobResult<Self> {
        let len = byte_len(width, height)?;
        let px = fill.to_array();
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / 4 {
            data.extend_from_slice(&px);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap premultiplied bytes; the length must match `width * height * 4`.
    pub fn from_premul_bytes(width: u32, height: u32, data: Vec<u8>) -> KnobResult<Self> {
        if data.len() != byte_len(width, height)? {
            return Err(KnobError::render(format!(
                "raster data length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some(Rgba8Premul::from_array([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]))
    }

    /// Copy `src` into this buffer with its top-left corner at `(x, y)`, clipped to bounds.
    pub(crate) fn blit(&mut self, src: &RasterBuffer, x: u32, y: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let cols = src.width.min(self.width - x) as usize;
        let rows = src.height.min(self.height - y);
        for row in 0..rows {
            let s = (row as usize) * (src.width as usize) * 4;
            let d = self.index(x, y + row);
            self.data[d..d + cols * 4].copy_from_slice(&src.data[s..s + cols * 4]);
        }
    }

    /// Straight-alpha RGBA8 bytes, as image files expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let s = Rgba8Premul::from_array([px[0], px[1], px[2], px[3]]).to_straight();
            out.extend_from_slice(&[s.r, s.g, s.b, s.a]);
        }
        out
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}

fn byte_len(width: u32, height: u32) -> KnobResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| KnobError::render(format!("raster size {width}x{height} overflows")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/buffer.rs"]
mod tests;
