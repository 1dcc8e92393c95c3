use crate::assets::PreparedImage;
use crate::foundation::core::{Canvas, Rect};
use crate::foundation::error::{CardError, CardResult};
use crate::layout::crop::{CropSpec, contain_fit, cover_crop};
use crate::layout::shift::detect_vertical_shift;
use crate::render::cpu::{Layer, affine_to_cpu, image_paint, rect_to_cpu};
use crate::render::surface::Surface;

/// How the photo was placed in the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PhotoPlacement {
    /// Cover draw of a source sub-rectangle.
    Cover { sx: f64, sy: f64, sw: f64, sh: f64 },
    /// Contain draw, shifted vertically by `shift_percent`.
    Contain {
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
        shift_percent: f64,
    },
}

/// Draw `photo` over the whole surface.
///
/// With a crop the photo is cover-fitted through the crop's source rectangle;
/// without one it is contain-fitted and recentered by the brightness heuristic.
/// Nothing is clamped: parts of the frame the photo does not reach keep the
/// surface's background.
pub fn draw_photo(
    surface: &mut Surface,
    photo: &PreparedImage,
    crop: Option<&CropSpec>,
) -> CardResult<PhotoPlacement> {
    if photo.width == 0 || photo.height == 0 {
        return Err(CardError::validation("photo dimensions must be > 0"));
    }
    let canvas: Canvas = surface.canvas();
    let (dst_w, dst_h) = (f64::from(canvas.width), f64::from(canvas.height));
    let (src_w, src_h) = (f64::from(photo.width), f64::from(photo.height));

    let mut layer = Layer::new(canvas)?;

    let placement = match crop {
        Some(crop) => {
            let src = cover_crop(photo.width, photo.height, canvas.width, canvas.height, crop);
            tracing::debug!(sx = src.sx, sy = src.sy, sw = src.sw, sh = src.sh, "cover crop");

            let visible = src.to_rect().intersect(Rect::new(0.0, 0.0, src_w, src_h));
            if visible.width() > 0.0 && visible.height() > 0.0 {
                let paint = image_paint(photo, (dst_w / src.sw).min(dst_h / src.sh))?;
                let ctx = layer.ctx();
                ctx.set_transform(affine_to_cpu(src.to_dest_affine(dst_w, dst_h)));
                ctx.set_paint(paint);
                ctx.fill_rect(&rect_to_cpu(visible));
            }
            PhotoPlacement::Cover {
                sx: src.sx,
                sy: src.sy,
                sw: src.sw,
                sh: src.sh,
            }
        }
        None => {
            let shift_percent = detect_vertical_shift(photo)?;
            let dest = contain_fit(
                photo.width,
                photo.height,
                canvas.width,
                canvas.height,
                shift_percent,
            );
            tracing::debug!(dy = dest.dy, shift_percent, "contain fit");

            let paint = image_paint(photo, dest.dw / src_w)?;
            let ctx = layer.ctx();
            ctx.set_transform(affine_to_cpu(dest.to_affine(src_w, src_h)));
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, src_w, src_h));
            PhotoPlacement::Contain {
                dx: dest.dx,
                dy: dest.dy,
                dw: dest.dw,
                dh: dest.dh,
                shift_percent,
            }
        }
    };

    layer.composite_onto(surface)?;
    Ok(placement)
}

#[cfg(test)]
#[path = "../../tests/unit/render/photo.rs"]
mod tests;
