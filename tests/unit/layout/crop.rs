use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn neutral_crop_is_centered_with_target_aspect() {
    for (w, h) in [(1000u32, 1000u32), (4000, 3000), (600, 1800), (1080, 1350)] {
        let r = cover_crop(w, h, 1080, 1350, &CropSpec::default());
        assert!(approx(r.sw / r.sh, 0.8), "aspect for {w}x{h}");
        assert!(approx(r.sx, (f64::from(w) - r.sw) / 2.0));
        assert!(approx(r.sy, (f64::from(h) - r.sh) / 2.0));
        assert!(r.sw <= f64::from(w) + 1e-9 && r.sh <= f64::from(h) + 1e-9);
    }
}

#[test]
fn zoom_two_on_square_source_halves_the_fit_rect() {
    let crop = CropSpec {
        zoom: 2.0,
        ..CropSpec::default()
    };
    let r = cover_crop(1000, 1000, 1080, 1350, &crop);
    assert!(approx(r.sw, 400.0));
    assert!(approx(r.sh, 500.0));
    assert!(approx(r.sx, 300.0));
    assert!(approx(r.sy, 250.0));
}

#[test]
fn horizontal_offset_uses_slack_fraction() {
    let crop = CropSpec {
        zoom: 1.0,
        offset_x: 50.0,
        offset_y: 0.0,
    };
    // 2000x1000 source: fit is 800x1000, slack 1200.
    let r = cover_crop(2000, 1000, 1080, 1350, &crop);
    assert!(approx(r.sw, 800.0));
    assert!(approx(r.sx, 600.0 + 600.0));
}

#[test]
fn vertical_offset_beyond_slack_travels_by_source_height() {
    // 1000x2000 source: fit is 1000x1250, vertical slack 750.
    let at = |offset_y: f64| {
        cover_crop(
            1000,
            2000,
            1080,
            1350,
            &CropSpec {
                zoom: 1.0,
                offset_x: 0.0,
                offset_y,
            },
        )
        .sy
    };
    assert!(approx(at(0.0), 375.0));
    assert!(approx(at(100.0), 375.0 + 750.0));
    assert!(approx(at(-100.0), 375.0 - 750.0));
    assert!(approx(at(150.0), 375.0 + 750.0 + 1000.0));
    assert!(approx(at(-200.0), 375.0 - 750.0 - 2000.0));
}

#[test]
fn zoom_out_is_not_clamped_to_source() {
    let crop = CropSpec {
        zoom: 0.5,
        ..CropSpec::default()
    };
    let r = cover_crop(1000, 1000, 1080, 1350, &crop);
    assert!(r.sw > 1000.0);
    assert!(r.sx < 0.0 && r.sy < 0.0);
}

#[test]
fn dest_affine_maps_source_rect_onto_frame() {
    let r = cover_crop(1000, 1000, 1080, 1350, &CropSpec::default());
    let a = r.to_dest_affine(1080.0, 1350.0);
    let tl = a * kurbo::Point::new(r.sx, r.sy);
    let br = a * kurbo::Point::new(r.sx + r.sw, r.sy + r.sh);
    assert!(approx(tl.x, 0.0) && approx(tl.y, 0.0));
    assert!(approx(br.x, 1080.0) && approx(br.y, 1350.0));
}

#[test]
fn contain_letterboxes_wide_images_and_shifts_within_space() {
    let d = contain_fit(2000, 1000, 1080, 1350, 0.0);
    assert!(approx(d.dw, 1080.0));
    assert!(approx(d.dh, 540.0));
    assert!(approx(d.dx, 0.0));
    assert!(approx(d.dy, 405.0));

    let shifted = contain_fit(2000, 1000, 1080, 1350, -50.0);
    assert!(approx(shifted.dy, 405.0 - 405.0));
}

#[test]
fn contain_shift_on_tall_images_is_unbounded() {
    let d = contain_fit(1000, 3000, 1080, 1350, -50.0);
    assert!(approx(d.dh, 1350.0));
    assert!(approx(d.dw, 450.0));
    assert!(approx(d.dx, 315.0));
    assert!(approx(d.dy, -675.0));
}

#[test]
fn crop_validation_and_clamping() {
    assert!(CropSpec::default().validate().is_ok());
    let bad = CropSpec {
        zoom: 4.0,
        offset_x: -150.0,
        offset_y: 250.0,
    };
    assert!(bad.validate().is_err());
    let fixed = bad.clamped();
    assert_eq!(fixed.zoom, 3.0);
    assert_eq!(fixed.offset_x, -100.0);
    assert_eq!(fixed.offset_y, 200.0);
    assert!(fixed.validate().is_ok());

    let nan = CropSpec {
        zoom: f64::NAN,
        offset_x: f64::INFINITY,
        offset_y: 0.0,
    }
    .clamped();
    assert_eq!(nan, CropSpec::default());
}

#[test]
fn crop_spec_deserializes_with_defaults() {
    let c: CropSpec = serde_json::from_str(r#"{ "offset_y": -120 }"#).unwrap();
    assert_eq!(c.zoom, 1.0);
    assert_eq!(c.offset_x, 0.0);
    assert_eq!(c.offset_y, -120.0);
}
