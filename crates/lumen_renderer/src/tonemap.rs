//! Tone mapping and quantization of the rendered image.

use lumen_math::Vec3;

use crate::error::RenderError;
use crate::framebuffer::FrameBuffer;

/// Post-gamma maximum intensities below this are judged too dark to
/// discretize.
pub const DARK_IMAGE_THRESHOLD: f32 = 4.0 * f32::EPSILON;

/// Scale chosen so the brightest channel rounds to exactly 255.
const QUANTIZATION_SCALE: f32 = 254.99;

/// Tone-map the float plane and quantize it into the 8-bit plane.
///
/// Applies a fixed square-root gamma to every channel, then rescales by
/// the post-gamma maximum so the brightest channel in the image lands on
/// exactly 255. Fails with [`RenderError::ImageTooDark`] when the
/// post-gamma maximum is near zero, leaving the quantized plane untouched.
pub fn quantize(frame: &mut FrameBuffer) -> Result<(), RenderError> {
    log::info!("creating a discretized image from the rendered image");

    let mut max_intensity = 0.0f32;
    for c in &frame.pixels {
        max_intensity = max_intensity.max(c.x).max(c.y).max(c.z);
    }

    for c in &mut frame.pixels {
        *c = Vec3::new(c.x.sqrt(), c.y.sqrt(), c.z.sqrt());
    }
    max_intensity = max_intensity.sqrt();

    if max_intensity < DARK_IMAGE_THRESHOLD {
        return Err(RenderError::ImageTooDark(max_intensity));
    }

    // Discretize using the max intensity; every channel must land in
    // [0, 255] with the global maximum hitting 255 exactly.
    let scale = QUANTIZATION_SCALE / max_intensity;
    let mut quantized_max = 0u8;
    for i in 0..frame.pixels.len() {
        let c = scale * frame.pixels[i];
        debug_assert!(c.x >= -f32::EPSILON && c.x <= 255.5 - f32::EPSILON);
        debug_assert!(c.y >= -f32::EPSILON && c.y <= 255.5 - f32::EPSILON);
        debug_assert!(c.z >= -f32::EPSILON && c.z <= 255.5 - f32::EPSILON);
        let q = [
            c.x.round() as u8,
            c.y.round() as u8,
            c.z.round() as u8,
        ];
        quantized_max = quantized_max.max(q[0]).max(q[1]).max(q[2]);
        frame.quantized[i] = q;
    }

    // A miss here is a scaling defect, not bad input.
    assert!(
        quantized_max == 255,
        "discretized max intensity is {quantized_max}, expected 255"
    );

    log::info!("image max intensity was {max_intensity}");
    Ok(())
}
