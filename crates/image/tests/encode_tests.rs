use image::{Frame, PixelFormat, decode_encoded, decode_raw, encode_jpeg, encode_png, frame_to_bgra};

fn gradient(width: usize, height: usize) -> Frame {
    let data = (0..height)
        .flat_map(|y| (0..width).flat_map(move |x| [(x * 8) as u8, (y * 8) as u8, 64]))
        .collect();
    Frame::new(width, height, data).unwrap()
}

#[test]
fn test_jpeg_starts_with_soi_marker() {
    let jpeg = encode_jpeg(&gradient(4, 4), 90).unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
}

#[test]
fn test_jpeg_quality_affects_size() {
    let frame = gradient(32, 32);
    let low = encode_jpeg(&frame, 10).unwrap();
    let high = encode_jpeg(&frame, 100).unwrap();
    assert!(low.len() < high.len());
}

#[test]
fn test_jpeg_round_trip_keeps_dimensions() {
    for (w, h) in [(1, 1), (7, 3), (64, 48)] {
        let frame = gradient(w, h);
        let first = decode_encoded(&encode_jpeg(&frame, 80).unwrap()).unwrap();
        let second = decode_encoded(&encode_jpeg(&first, 80).unwrap()).unwrap();

        assert_eq!((first.width(), first.height()), (w, h));
        assert_eq!((second.width(), second.height()), (w, h));
    }
}

#[test]
fn test_png_round_trip_is_lossless() {
    let frame = gradient(9, 5);
    let decoded = decode_encoded(&encode_png(&frame).unwrap()).unwrap();
    assert_eq!(decoded, frame);
}

#[test]
fn test_bgra_round_trip() {
    let frame = gradient(3, 2);
    let bgra = frame_to_bgra(&frame);

    assert_eq!(bgra.len(), 3 * 2 * 4);
    assert!(bgra.chunks_exact(4).all(|px| px[3] == 0xFF));
    assert_eq!(decode_raw(&bgra, 3, 2, PixelFormat::Bgra8).unwrap(), frame);
}
