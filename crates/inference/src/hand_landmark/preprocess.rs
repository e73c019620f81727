use super::INPUT_SIZE;
use image::Frame;

/// Mapping between frame pixels and the square model input.
///
/// The frame is scaled uniformly to fit and centered, padding the short side
/// with black.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
}

impl Letterbox {
    pub fn new(width: usize, height: usize) -> Self {
        let size = INPUT_SIZE as f32;
        let scale = size / width.max(height) as f32;
        Self {
            scale,
            pad_x: (size - width as f32 * scale) / 2.0,
            pad_y: (size - height as f32 * scale) / 2.0,
        }
    }

    /// Model input pixel to frame pixel.
    pub fn to_frame(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.pad_x) / self.scale, (y - self.pad_y) / self.scale)
    }
}

/// Letterbox `frame` into a `1×224×224×3` tensor, normalized to `[0, 1]`.
///
/// Uses bilinear sampling.
pub fn preprocess(frame: &Frame) -> (Vec<f32>, Letterbox) {
    let letterbox = Letterbox::new(frame.width(), frame.height());
    let mut data = vec![0.0f32; INPUT_SIZE * INPUT_SIZE * 3];

    let (width, height) = (frame.width(), frame.height());
    let pixels = frame.data();
    let max_x = (width - 1) as f32;
    let max_y = (height - 1) as f32;

    for oy in 0..INPUT_SIZE {
        let (_, fy) = letterbox.to_frame(0.0, oy as f32 + 0.5);
        let sy = fy - 0.5;
        if fy < 0.0 || fy > height as f32 {
            continue;
        }
        let sy = sy.clamp(0.0, max_y);
        let y0 = sy.floor() as usize;
        let y1 = (y0 + 1).min(height - 1);
        let wy = sy - y0 as f32;

        for ox in 0..INPUT_SIZE {
            let (fx, _) = letterbox.to_frame(ox as f32 + 0.5, 0.0);
            if fx < 0.0 || fx > width as f32 {
                continue;
            }
            let sx = (fx - 0.5).clamp(0.0, max_x);
            let x0 = sx.floor() as usize;
            let x1 = (x0 + 1).min(width - 1);
            let wx = sx - x0 as f32;

            let out = (oy * INPUT_SIZE + ox) * 3;
            for c in 0..3 {
                let p = |x: usize, y: usize| pixels[(y * width + x) * 3 + c] as f32;
                let top = p(x0, y0) * (1.0 - wx) + p(x1, y0) * wx;
                let bottom = p(x0, y1) * (1.0 - wx) + p(x1, y1) * wx;
                data[out + c] = (top * (1.0 - wy) + bottom * wy) / 255.0;
            }
        }
    }

    (data, letterbox)
}
