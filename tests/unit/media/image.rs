use super::*;

fn grid(width: u32, height: u32) -> Image {
    let mut rgba = Vec::new();
    for y in 0..height {
        for x in 0..width {
            rgba.extend_from_slice(&[x as u8 * 10, y as u8 * 10, 0, 255]);
        }
    }
    Image::from_rgba(width, height, rgba).unwrap()
}

#[test]
fn from_rgba_checks_length() {
    assert!(matches!(
        Image::from_rgba(2, 2, vec![0; 15]),
        Err(MinimalError::Validation(_))
    ));
    let img = grid(3, 2);
    assert_eq!((img.width(), img.height()), (3, 2));
    assert_eq!(img.pixel(2, 1), Some([20, 10, 0, 255]));
    assert_eq!(img.pixel(3, 0), None);
}

#[test]
fn decode_reads_png_bytes() {
    let buf = image::RgbaImage::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    let mut bytes = Vec::new();
    buf.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();
    let img = Image::decode(&bytes).unwrap();
    assert_eq!(img.rgba(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(img.position(), Point::ORIGIN);
}

#[test]
fn decode_rejects_garbage() {
    let err = Image::decode(b"not an image").unwrap_err();
    assert!(err.to_string().contains("decode image"));
}

#[test]
fn mirror_flips_rows_and_columns() {
    let mut img = grid(3, 2);
    img.mirror(FlipAxis::Horizontal).unwrap();
    assert_eq!(img.pixel(0, 0), Some([20, 0, 0, 255]));

    let mut img = grid(3, 2);
    img.mirror(FlipAxis::Vertical).unwrap();
    assert_eq!(img.pixel(0, 0), Some([0, 10, 0, 255]));

    let mut img = grid(3, 2);
    img.mirror(FlipAxis::Both).unwrap();
    assert_eq!(img.pixel(0, 0), Some([20, 10, 0, 255]));
}

#[test]
fn resize_keeps_position() {
    let mut img = grid(4, 4).at((7.0, 9.0));
    img.resize(8, 2).unwrap();
    assert_eq!((img.width(), img.height()), (8, 2));
    assert_eq!(img.rgba().len(), 8 * 2 * 4);
    assert_eq!(img.position(), Point::new(7.0, 9.0));
    assert!(img.resize(0, 3).is_err());
}

#[test]
fn rotate_by_zero_is_identity() {
    let mut img = grid(5, 3);
    let before = img.clone();
    img.rotate(0.0);
    assert_eq!(img, before);
}

#[test]
fn rotate_half_turn_about_center() {
    let mut img = grid(4, 4);
    img.rotate(180.0);
    // (1, 1) maps back to (3, 3); column 0 samples from outside.
    assert_eq!(img.pixel(1, 1), Some([30, 30, 0, 255]));
    assert_eq!(img.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn rotate_quarter_turn_is_counterclockwise() {
    let mut rgba = vec![0u8; 4 * 4 * 4];
    // Marker right of center on the middle row.
    let i = (2 * 4 + 3) * 4;
    rgba[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);
    let mut img = Image::from_rgba(4, 4, rgba).unwrap();
    img.rotate(90.0);
    assert_eq!(img.pixel(2, 1), Some([255, 255, 255, 255]));
}

#[test]
fn visible_region_crops_to_canvas() {
    let img = grid(4, 4).at((-1.0, 2.0));
    let region = img.visible_region(10, 5).unwrap();
    assert_eq!(
        region,
        CropRegion {
            src_x: 1,
            src_y: 0,
            dst_x: 0,
            dst_y: 2,
            width: 3,
            height: 3,
        }
    );
    assert!(grid(2, 2).at((10.0, 0.0)).visible_region(10, 10).is_none());
    assert!(grid(2, 2).at((-2.0, 0.0)).visible_region(10, 10).is_none());
}

#[test]
fn premultiplied_region_scales_by_alpha() {
    let img = Image::from_rgba(2, 1, vec![200, 100, 50, 128, 9, 9, 9, 0]).unwrap();
    let region = img.visible_region(2, 1).unwrap();
    assert_eq!(
        img.premultiplied_region(&region),
        vec![100, 50, 25, 128, 0, 0, 0, 0]
    );
}

#[test]
fn translate_moves_position() {
    let mut img = grid(1, 1).at((1.0, 1.0));
    img.translate(Vec2::new(2.0, -1.0));
    assert_eq!(img.position(), Point::new(3.0, 0.0));
}
