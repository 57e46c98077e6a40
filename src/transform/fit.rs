//! Aspect-fit sizing and the layer transforms derived from it.

use crate::foundation::core::{Affine, Size, Vec2};

/// Largest size with `source`'s aspect ratio that fits entirely inside `target`.
///
/// Returns [`Size::ZERO`] when either size has a zero dimension. When both axes bind
/// equally the result is `target` itself.
pub fn aspect_fit(source: Size, target: Size) -> Size {
    if target.width == 0.0 || target.height == 0.0 || source.width == 0.0 || source.height == 0.0 {
        return Size::ZERO;
    }

    let ratio_w = target.width / source.width;
    let ratio_h = target.height / source.height;
    if ratio_h < ratio_w {
        Size::new(ratio_h * source.width, target.height)
    } else if ratio_w < ratio_h {
        Size::new(target.width, ratio_w * source.height)
    } else {
        target
    }
}

/// Uniformly scale `size` to fit `render_size` and center it.
pub fn fit_transform(size: Size, render_size: Size) -> Affine {
    let fit = aspect_fit(size, render_size);
    let offset = Vec2::new(
        (render_size.width - fit.width) * 0.5,
        (render_size.height - fit.height) * 0.5,
    );
    Affine::translate(offset) * scale_to(size, fit)
}

/// Quadrant-sized overlay pinned to the `(0, render_height - height)` corner.
pub fn pip_transform(size: Size, render_size: Size) -> Affine {
    let fit = aspect_fit(size, render_size);
    let pip = Size::new(fit.width * 0.5, fit.height * 0.5);
    let offset = Vec2::new(0.0, render_size.height - pip.height);
    Affine::translate(offset) * scale_to(size, pip)
}

fn scale_to(from: Size, to: Size) -> Affine {
    if from.width == 0.0 || from.height == 0.0 {
        return Affine::scale(0.0);
    }
    Affine::scale_non_uniform(to.width / from.width, to.height / from.height)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/fit.rs"]
mod tests;
