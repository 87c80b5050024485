//! High-level icon plans.
//!
//! These functions decide the exact [`RenderParams`] for every icon family.
//! They take configuration values and return parameters; the pipeline hands
//! the parameters to a backend. Keeping planning separate from execution lets
//! tests assert on what would be rendered without decoding a single pixel.

use super::calculations::padded_inner_size;
use super::params::{Color, EncodeOptions, PngOptions, RenderParams, ResizeFit};

/// Favicon sizes, in emission order.
pub const FAVICON_SIZES: [u32; 2] = [32, 16];

/// Apple touch icon canvas size.
pub const APPLE_TOUCH_ICON_SIZE: u32 = 180;

/// Square Microsoft tile sizes, in emission order.
pub const MS_TILE_SIZES: [u32; 3] = [70, 150, 310];

/// The rectangular Microsoft tile.
pub const MS_WIDE_TILE: (u32, u32) = (310, 150);

/// Largest Apple touch icon padding that still leaves an image.
pub fn max_apple_touch_icon_padding() -> u32 {
    (APPLE_TOUCH_ICON_SIZE - 1) / 2
}

/// Plan one default icon: a square resize in one output format.
pub fn plan_square_icon(size: u32, fit: ResizeFit, encode: &EncodeOptions) -> RenderParams {
    RenderParams::resize(size, size, fit, encode.clone())
}

/// Plan the favicons (always PNG).
pub fn plan_favicons(fit: ResizeFit, png: &PngOptions) -> Vec<RenderParams> {
    FAVICON_SIZES
        .iter()
        .map(|&size| plan_square_icon(size, fit, &EncodeOptions::Png(png.clone())))
        .collect()
}

/// Plan the Apple touch icon: shrink by `padding` on every side, pad back to
/// 180x180 with transparency, then flatten onto `background`.
///
/// Returns `None` when the padding leaves no room for the image.
pub fn plan_apple_touch_icon(
    fit: ResizeFit,
    padding: u32,
    background: Color,
    png: &PngOptions,
) -> Option<RenderParams> {
    padded_inner_size(APPLE_TOUCH_ICON_SIZE, padding)?;
    Some(RenderParams {
        padding,
        background: Some(background),
        ..RenderParams::resize(
            APPLE_TOUCH_ICON_SIZE,
            APPLE_TOUCH_ICON_SIZE,
            fit,
            EncodeOptions::Png(png.clone()),
        )
    })
}

/// Plan the Microsoft tiles: the squares in order, then the wide tile last.
pub fn plan_ms_tiles(fit: ResizeFit, png: &PngOptions) -> Vec<RenderParams> {
    let encode = EncodeOptions::Png(png.clone());
    let (wide_w, wide_h) = MS_WIDE_TILE;
    MS_TILE_SIZES
        .iter()
        .map(|&size| plan_square_icon(size, fit, &encode))
        .chain(std::iter::once(RenderParams::resize(
            wide_w, wide_h, fit, encode.clone(),
        )))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favicons_are_32_then_16_png() {
        let plans = plan_favicons(ResizeFit::Cover, &PngOptions::default());
        let sizes: Vec<(u32, u32)> = plans.iter().map(|p| (p.width, p.height)).collect();
        assert_eq!(sizes, vec![(32, 32), (16, 16)]);
        assert!(plans.iter().all(|p| matches!(p.encode, EncodeOptions::Png(_))));
        assert!(plans.iter().all(|p| p.padding == 0 && p.background.is_none()));
    }

    #[test]
    fn apple_touch_icon_plan_pads_and_flattens() {
        let plan =
            plan_apple_touch_icon(ResizeFit::Contain, 12, Color::WHITE, &PngOptions::default())
                .unwrap();
        assert_eq!((plan.width, plan.height), (180, 180));
        assert_eq!(plan.padding, 12);
        assert_eq!(plan.background, Some(Color::WHITE));
        assert_eq!(plan.fit, ResizeFit::Contain);
    }

    #[test]
    fn apple_touch_icon_plan_rejects_excess_padding() {
        let max = max_apple_touch_icon_padding();
        assert_eq!(max, 89);
        assert!(plan_apple_touch_icon(ResizeFit::Cover, max, Color::WHITE, &PngOptions::default()).is_some());
        assert!(
            plan_apple_touch_icon(ResizeFit::Cover, max + 1, Color::WHITE, &PngOptions::default())
                .is_none()
        );
    }

    #[test]
    fn ms_tiles_squares_then_wide() {
        let plans = plan_ms_tiles(ResizeFit::Cover, &PngOptions::default());
        let sizes: Vec<(u32, u32)> = plans.iter().map(|p| (p.width, p.height)).collect();
        assert_eq!(sizes, vec![(70, 70), (150, 150), (310, 310), (310, 150)]);
    }
}
