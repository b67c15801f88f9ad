//! Renderer error types.

use thiserror::Error;

use crate::camera::RenderMode;

/// Errors reported by rendering and quantization.
///
/// Both variants are recoverable diagnostics: the frame buffer is left in
/// a well-defined state and the process continues. Callers must check
/// before exporting an image.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The selected render mode needs a photon map, but the scene has not
    /// built one. The frame buffer is left untouched.
    #[error("photon map has not been built for the scene; impossible to render in {0:?} mode")]
    PhotonMapNotBuilt(RenderMode),

    /// Post-gamma maximum intensity was near zero; the image is too dark
    /// to discretize. The quantized buffer is left untouched.
    #[error("rendered image intensity was very low ({0}); impossible to discretize")]
    ImageTooDark(f32),
}
