//! Pure calculation functions for icon geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate dimensions needed to fill a target area (resize before crop).
///
/// Returns dimensions that completely cover the target area while maintaining
/// the source aspect ratio. One dimension will match exactly, the other may exceed.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `target` - Target area dimensions (width, height)
///
/// # Returns
/// * `(width, height)` - Fill dimensions (at least one matches target)
pub fn calculate_fill_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w as f64 / tgt_h as f64;

    if src_aspect > tgt_aspect {
        // Source is wider: height will match, width will exceed
        let h = tgt_h;
        let w = (h as f64 * src_aspect).round() as u32;
        (w.max(tgt_w), h)
    } else {
        // Source is taller: width will match, height will exceed
        let w = tgt_w;
        let h = (w as f64 / src_aspect).round() as u32;
        (w, h.max(tgt_h))
    }
}

/// Calculate dimensions that fit entirely inside a target area.
///
/// The inverse of [`calculate_fill_dimensions`]: one dimension matches the
/// target, the other is smaller or equal. Never returns a zero dimension.
pub fn calculate_contain_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w as f64 / tgt_h as f64;

    if src_aspect > tgt_aspect {
        // Source is wider: width matches, height shrinks
        let h = (tgt_w as f64 / src_aspect).round() as u32;
        (tgt_w, h.clamp(1, tgt_h))
    } else {
        // Source is taller: height matches, width shrinks
        let w = (tgt_h as f64 * src_aspect).round() as u32;
        (w.clamp(1, tgt_w), tgt_h)
    }
}

/// Offset that centers an `inner` box inside an `outer` box.
///
/// Works in both directions: for a crop (`inner` smaller than the resized
/// image) and for a letterbox (`inner` smaller than the canvas).
pub fn center_offset(outer: (u32, u32), inner: (u32, u32)) -> (u32, u32) {
    (
        outer.0.saturating_sub(inner.0) / 2,
        outer.1.saturating_sub(inner.1) / 2,
    )
}

/// Size of the image area left inside a canvas after padding both sides.
///
/// Returns `None` when the padding leaves no room for the image.
///
/// ```
/// # use pwa_assets::imaging::calculations::padded_inner_size;
/// // Apple touch icon: 180px canvas, 12px padding → 156px image
/// assert_eq!(padded_inner_size(180, 12), Some(156));
/// assert_eq!(padded_inner_size(180, 90), None);
/// ```
pub fn padded_inner_size(canvas: u32, padding: u32) -> Option<u32> {
    canvas
        .checked_sub(padding.checked_mul(2)?)
        .filter(|&inner| inner > 0)
}
