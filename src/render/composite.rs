use crate::foundation::error::{KinescopeError, KinescopeResult};
use crate::render::surface::Frame;

/// Move `dst` toward `src` by `weight`: `dst + weight · (src − dst)` per channel.
pub fn blend(dst: [u8; 4], src: [u8; 4], weight: f32) -> [u8; 4] {
    let w = weight.clamp(0.0, 1.0);
    let mut out = [0u8; 4];
    for i in 0..4 {
        let d = f32::from(dst[i]);
        let s = f32::from(src[i]);
        out[i] = (d + w * (s - d)).round().clamp(0.0, 255.0) as u8;
    }
    out
}

pub fn blend_in_place(dst: &mut [u8], src: &[u8], weight: f32) -> KinescopeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(KinescopeError::render(
            "blend_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = blend([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], weight);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Blend `src` into the accumulated frame `dst`. Frames must share dimensions.
pub fn blend_frame(dst: &mut Frame, src: &Frame, weight: f32) -> KinescopeResult<()> {
    if dst.width != src.width || dst.height != src.height {
        return Err(KinescopeError::render(format!(
            "cannot blend {}x{} frame into {}x{}",
            src.width, src.height, dst.width, dst.height
        )));
    }
    blend_in_place(&mut dst.data, &src.data, weight)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
