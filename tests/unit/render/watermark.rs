use super::*;

#[test]
fn box_without_logo_hugs_the_label() {
    let b = WatermarkBox::new(1080, 200.0, false);
    assert_eq!(b.logo, None);
    assert_eq!(b.label_origin, (850.0, 34.0));
    assert_eq!(b.pill, Rect::new(840.0, 24.0, 1060.0, 81.0));
}

#[test]
fn box_with_logo_puts_logo_left_of_label() {
    let b = WatermarkBox::new(1080, 200.0, true);
    assert_eq!(b.logo, Some(Rect::new(800.0, 30.0, 845.0, 75.0)));
    assert_eq!(b.label_origin, (850.0, 34.0));
    assert_eq!(b.pill.x0, 790.0);
    assert_eq!(b.pill.x1, 1060.0);
    assert_eq!(b.pill.height(), 57.0);
}

#[test]
fn silhouette_drops_near_white_and_whitens_the_rest() {
    let logo = PreparedImage::from_straight_rgba8(
        4,
        1,
        vec![
            255, 255, 255, 255, // background
            240, 241, 250, 255, // near-white background
            10, 20, 30, 255, // ink
            200, 0, 0, 128, // translucent ink
        ],
    )
    .unwrap();
    let s = white_silhouette(&logo);
    let px: Vec<&[u8]> = s.rgba8_premul.chunks_exact(4).collect();
    assert_eq!(px[0], &[0, 0, 0, 0]);
    assert_eq!(px[1], &[0, 0, 0, 0]);
    assert_eq!(px[2], &[255, 255, 255, 255]);
    assert_eq!(px[3], &[128, 128, 128, 128]);
}

#[test]
fn silhouette_threshold_is_per_channel() {
    let logo = PreparedImage::from_straight_rgba8(1, 1, vec![255, 255, 239, 255]).unwrap();
    let s = white_silhouette(&logo);
    assert_eq!(s.rgba8_premul.as_slice(), &[255, 255, 255, 255]);
}
