use super::*;
use crate::foundation::core::Rgba8Premul;

fn white(width: u32, height: u32) -> Surface {
    Surface::filled(Canvas::new(width, height).unwrap(), Rgba8Premul::white())
}

fn px(surface: &Surface, x: u32, y: u32) -> [u8; 4] {
    let idx = (y as usize * surface.width() as usize + x as usize) * 4;
    let d = surface.data();
    [d[idx], d[idx + 1], d[idx + 2], d[idx + 3]]
}

fn assert_close(got: [u8; 4], want: [u8; 4]) {
    for (g, w) in got.iter().zip(want) {
        assert!((i32::from(*g) - i32::from(w)).abs() <= 2, "{got:?} != {want:?}");
    }
}

#[test]
fn neutral_cover_fills_the_frame() {
    let photo = PreparedImage::solid(100, 125, [200, 0, 0, 255]).unwrap();
    let mut s = white(40, 50);
    let placement = draw_photo(&mut s, &photo, Some(&CropSpec::default())).unwrap();
    assert_eq!(
        placement,
        PhotoPlacement::Cover {
            sx: 0.0,
            sy: 0.0,
            sw: 100.0,
            sh: 125.0
        }
    );
    assert_close(px(&s, 20, 25), [200, 0, 0, 255]);
    assert_close(px(&s, 2, 2), [200, 0, 0, 255]);
}

#[test]
fn cover_beyond_the_source_leaves_background() {
    let photo = PreparedImage::solid(100, 100, [0, 0, 200, 255]).unwrap();
    let mut s = white(40, 50);
    let crop = CropSpec {
        zoom: 1.0,
        offset_x: 0.0,
        offset_y: 200.0,
    };
    let placement = draw_photo(&mut s, &photo, Some(&crop)).unwrap();
    let PhotoPlacement::Cover { sy, .. } = placement else {
        panic!("expected cover placement");
    };
    assert_eq!(sy, 100.0);
    assert!(s.data().iter().all(|&b| b == 255));
}

#[test]
fn cover_half_over_scrolled_draws_top_half_only() {
    let photo = PreparedImage::solid(100, 100, [0, 0, 200, 255]).unwrap();
    let mut s = white(40, 50);
    let crop = CropSpec {
        zoom: 1.0,
        offset_x: 0.0,
        offset_y: 150.0,
    };
    draw_photo(&mut s, &photo, Some(&crop)).unwrap();
    assert_close(px(&s, 20, 10), [0, 0, 200, 255]);
    assert_close(px(&s, 20, 40), [255, 255, 255, 255]);
}

#[test]
fn contain_letterboxes_wide_photo() {
    let photo = PreparedImage::solid(100, 50, [0, 150, 0, 255]).unwrap();
    let mut s = white(40, 50);
    let placement = draw_photo(&mut s, &photo, None).unwrap();
    let PhotoPlacement::Contain {
        dy,
        dh,
        shift_percent,
        ..
    } = placement
    else {
        panic!("expected contain placement");
    };
    assert_eq!(shift_percent, 0.0);
    assert_eq!(dh, 20.0);
    assert_eq!(dy, 15.0);
    assert_close(px(&s, 20, 5), [255, 255, 255, 255]);
    assert_close(px(&s, 20, 25), [0, 150, 0, 255]);
    assert_close(px(&s, 20, 45), [255, 255, 255, 255]);
}

#[test]
fn contain_shifts_photo_with_bright_bottom_upwards() {
    // Dark top half, bright bottom half: recentered upwards by 50%.
    let (w, h) = (100u32, 50u32);
    let mut rgba = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        let v = if y < h / 2 { 0 } else { 250 };
        for _ in 0..w {
            rgba.extend_from_slice(&[v, v, v, 255]);
        }
    }
    let photo = PreparedImage::from_straight_rgba8(w, h, rgba).unwrap();
    let mut s = white(40, 50);
    let placement = draw_photo(&mut s, &photo, None).unwrap();
    let PhotoPlacement::Contain {
        dy, shift_percent, ..
    } = placement
    else {
        panic!("expected contain placement");
    };
    assert_eq!(shift_percent, -50.0);
    assert_eq!(dy, 0.0);
}
