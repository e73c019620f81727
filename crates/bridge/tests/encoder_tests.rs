use bridge::{FrameError, ResultEncoder, WireLayout, format_text};
use com::ComError;
use image::DecodeError;
use inference::{FrameResult, HAND_LANDMARK_COUNT, Hand, LandmarkPoint};

fn hand(x: f32) -> Hand {
    Hand::new([LandmarkPoint::new(x, 0.25, -0.5); HAND_LANDMARK_COUNT], 0.9)
}

#[test]
fn test_empty_result_is_empty_array() {
    for layout in [WireLayout::Nested, WireLayout::Flat] {
        let bytes = ResultEncoder::new(layout).encode(&FrameResult::empty()).unwrap();
        assert_eq!(bytes, b"[]");
    }
}

#[test]
fn test_nested_layout() {
    let result = FrameResult::new(vec![hand(0.5)]);
    let json = String::from_utf8(ResultEncoder::default().encode(&result).unwrap()).unwrap();

    let point = r#"{"x":0.5,"y":0.25,"z":-0.5}"#;
    let expected = format!("[[{}]]", vec![point; HAND_LANDMARK_COUNT].join(","));
    assert_eq!(json, expected);
}

#[test]
fn test_flat_layout_concatenates_hands() {
    let result = FrameResult::new(vec![hand(0.5), hand(0.75)]);
    let bytes = ResultEncoder::new(WireLayout::Flat).encode(&result).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    let points = value.as_array().unwrap();
    assert_eq!(points.len(), 2 * HAND_LANDMARK_COUNT);
    assert_eq!(points[0]["x"], 0.5);
    assert_eq!(points[HAND_LANDMARK_COUNT]["x"], 0.75);
}

#[test]
fn test_full_precision() {
    let result = FrameResult::new(vec![Hand::new(
        [LandmarkPoint::new(0.123456, 0.987654, 0.015625); HAND_LANDMARK_COUNT],
        1.0,
    )]);
    let json = String::from_utf8(ResultEncoder::default().encode(&result).unwrap()).unwrap();
    assert!(json.starts_with(r#"[[{"x":0.123456,"y":0.987654,"z":0.015625}"#), "{json}");
}

#[test]
fn test_error_records() {
    let encoder = ResultEncoder::default();

    let decode = FrameError::Decode(DecodeError::Empty);
    let value: serde_json::Value =
        serde_json::from_slice(&encoder.encode_error(7, &decode).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"frame": 7, "error": "decode", "message": "empty frame payload"})
    );

    let framing = FrameError::Framing(ComError::FrameTooLarge { len: 9, max: 4 });
    let value: serde_json::Value =
        serde_json::from_slice(&encoder.encode_error(0, &framing).unwrap()).unwrap();
    assert_eq!(value["error"], "framing");
    assert_eq!(value["message"], "frame too large: 9 bytes (max 4)");
}

#[test]
fn test_error_record_field_order() {
    let err = FrameError::Decode(DecodeError::Empty);
    let bytes = ResultEncoder::default().encode_error(2, &err).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"{"frame":2,"error":"decode","message":"empty frame payload"}"#
    );
}

#[test]
fn test_format_text() {
    let mut points = [LandmarkPoint::default(); HAND_LANDMARK_COUNT];
    points[0] = LandmarkPoint::new(0.5, 0.25, -0.126);
    points[1] = LandmarkPoint::new(1.0, 0.0, 0.333);
    let text = format_text(&FrameResult::new(vec![Hand::new(points, 0.9)]));

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), HAND_LANDMARK_COUNT);
    assert_eq!(lines[0], "(0.50, 0.25, -0.13)");
    assert_eq!(lines[1], "(1.00, 0.00, 0.33)");
    assert!(!text.ends_with('\n'));
}

#[test]
fn test_format_text_empty() {
    assert_eq!(format_text(&FrameResult::empty()), "");
}
