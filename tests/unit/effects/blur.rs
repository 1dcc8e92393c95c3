use super::*;
use crate::foundation::core::{Canvas, Rgba8Premul};

fn black(width: u32, height: u32) -> Surface {
    Surface::filled(
        Canvas::new(width, height).unwrap(),
        Rgba8Premul::from_straight_rgba(0, 0, 0, 255),
    )
}

fn paint_column(surface: &mut Surface, x: u32) {
    let width = surface.width() as usize;
    let height = surface.height() as usize;
    let data = surface.data_mut();
    for y in 0..height {
        let idx = (y * width + x as usize) * 4;
        data[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
    }
}

fn red_at(surface: &Surface, x: u32, y: u32) -> u8 {
    surface.data()[(y as usize * surface.width() as usize + x as usize) * 4]
}

fn whole(surface: &Surface) -> PixelRect {
    PixelRect {
        x0: 0,
        y0: 0,
        x1: surface.width(),
        y1: surface.height(),
    }
}

#[test]
fn kernel_reach_follows_strength() {
    let weak = RegionKernel::for_strength(10);
    let strong = RegionKernel::for_strength(100);
    assert_eq!(weak.reach(), 6);
    assert_eq!(strong.reach(), 50);

    for kernel in [&weak, &strong] {
        let sum: f32 = kernel.taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
        let n = kernel.taps.len();
        assert!((0..n).all(|i| (kernel.taps[i] - kernel.taps[n - 1 - i]).abs() < 1e-7));
    }
}

#[test]
fn flat_region_is_unchanged() {
    let mut s = Surface::filled(
        Canvas::new(30, 20).unwrap(),
        Rgba8Premul::from_straight_rgba(40, 90, 160, 255),
    );
    let before = s.clone();
    let rect = whole(&s);
    blur_region(&mut s, rect, 100);
    assert_eq!(s, before);
}

#[test]
fn nothing_outside_the_region_leaks_in_or_changes() {
    // Left half white, right half black.
    let mut s = black(40, 20);
    for x in 0..20 {
        paint_column(&mut s, x);
    }
    let before = s.clone();

    let right = PixelRect {
        x0: 20,
        y0: 0,
        x1: 40,
        y1: 20,
    };
    blur_region(&mut s, right, 100);
    assert_eq!(s, before);

    let straddle = PixelRect {
        x0: 10,
        y0: 5,
        x1: 30,
        y1: 15,
    };
    blur_region(&mut s, straddle, 30);
    for y in 0..20 {
        for x in 0..40 {
            let inside = (10..30).contains(&x) && (5..15).contains(&y);
            if !inside {
                assert_eq!(red_at(&s, x, y), red_at(&before, x, y), "({x}, {y})");
            }
        }
    }
    // The hard edge at x = 20 is softened inside the region only.
    assert!(red_at(&s, 19, 10) < 255);
    assert!(red_at(&s, 20, 10) > 0);
}

#[test]
fn stronger_blur_spreads_further() {
    let spread = |strength: u32| {
        let mut s = black(101, 9);
        paint_column(&mut s, 50);
        let rect = whole(&s);
        blur_region(&mut s, rect, strength);
        (0..101).filter(|&x| red_at(&s, x, 4) > 0).count()
    };

    let weak = spread(10);
    let strong = spread(100);
    assert!((7..=13).contains(&weak), "weak spread {weak}");
    assert!(strong > 30, "strong spread {strong}");
}
