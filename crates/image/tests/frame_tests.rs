use image::{DecodeError, FRAME_CHANNELS, Frame, PixelFormat};

#[test]
fn test_frame_new_validates_length() {
    assert!(Frame::new(2, 2, vec![0; 12]).is_ok());
    assert_eq!(
        Frame::new(2, 2, vec![0; 11]),
        Err(DecodeError::LengthMismatch {
            expected: 12,
            got: 11
        })
    );
}

#[test]
fn test_frame_filled() {
    let frame = Frame::filled(3, 2, [10, 20, 30]).unwrap();
    assert_eq!(frame.shape(), [2, 3, FRAME_CHANNELS]);
    assert!(frame.pixels().all(|px| px == [10, 20, 30]));
}

#[test]
fn test_frame_pixel_out_of_bounds() {
    let frame = Frame::filled(2, 2, [0, 0, 0]).unwrap();
    assert_eq!(frame.pixel(1, 1), Some([0, 0, 0]));
    assert_eq!(frame.pixel(2, 0), None);
    assert_eq!(frame.pixel(0, 2), None);
}

#[test]
fn test_frame_debug_omits_pixels() {
    let frame = Frame::filled(640, 480, [1, 2, 3]).unwrap();
    let debug = format!("{:?}", frame);
    assert!(debug.contains("640"));
    assert!(debug.contains("921600"));
    assert!(debug.len() < 100);
}

#[test]
fn test_pixel_format_channels() {
    assert_eq!(PixelFormat::Bgra8.channels(), 4);
    assert_eq!(PixelFormat::Rgba8.channels(), 4);
    assert_eq!(PixelFormat::Bgr8.channels(), 3);
    assert_eq!(PixelFormat::Rgb8.channels(), 3);
}

#[test]
fn test_pixel_format_to_rgb() {
    assert_eq!(PixelFormat::Rgb8.to_rgb(&[1, 2, 3]), vec![1, 2, 3]);
    assert_eq!(PixelFormat::Rgba8.to_rgb(&[1, 2, 3, 4]), vec![1, 2, 3]);
    assert_eq!(PixelFormat::Bgr8.to_rgb(&[1, 2, 3]), vec![3, 2, 1]);
    assert_eq!(PixelFormat::Bgra8.to_rgb(&[1, 2, 3, 4, 5, 6, 7, 8]), vec![3, 2, 1, 7, 6, 5]);
}

#[test]
fn test_pixel_format_parse_and_display() {
    for format in [PixelFormat::Bgra8, PixelFormat::Bgr8, PixelFormat::Rgba8, PixelFormat::Rgb8] {
        let name = format.to_string();
        assert_eq!(name.parse::<PixelFormat>(), Ok(format));
    }
    assert_eq!("BGRA8".parse::<PixelFormat>(), Ok(PixelFormat::Bgra8));
    assert!("yuyv".parse::<PixelFormat>().is_err());
}

#[test]
fn test_decode_error_display() {
    let err = DecodeError::LengthMismatch {
        expected: 16,
        got: 15,
    };
    assert_eq!(
        err.to_string(),
        "frame length mismatch: expected 16 bytes, got 15"
    );
    assert_eq!(DecodeError::Empty.to_string(), "empty frame payload");
}

#[test]
fn test_decode_error_is_error_trait() {
    let err = DecodeError::Image("bad magic".to_string());
    let _: &dyn std::error::Error = &err;
}
