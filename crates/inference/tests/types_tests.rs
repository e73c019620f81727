use inference::{
    FrameResult, HAND_LANDMARK_COUNT, Hand, HandLandmark, Handedness, LandmarkPoint,
};

#[test]
fn test_landmark_index_conversion() {
    assert_eq!(usize::from(HandLandmark::Wrist), 0);
    assert_eq!(usize::from(HandLandmark::IndexTip), 8);
    assert_eq!(usize::from(HandLandmark::PinkyTip), 20);
    assert_eq!(HandLandmark::try_from(4), Ok(HandLandmark::ThumbTip));
    assert!(HandLandmark::try_from(HAND_LANDMARK_COUNT).is_err());
}

#[test]
fn test_all_in_index_order() {
    for (i, landmark) in HandLandmark::ALL.iter().enumerate() {
        assert_eq!(usize::from(*landmark), i);
    }
}

#[test]
fn test_hand_landmark_lookup() {
    let mut points = [LandmarkPoint::default(); HAND_LANDMARK_COUNT];
    points[8] = LandmarkPoint::new(0.25, 0.75, -0.1);
    let hand = Hand::new(points, 0.9).with_handedness(Handedness::Left);

    assert_eq!(*hand.landmark(HandLandmark::IndexTip), LandmarkPoint::new(0.25, 0.75, -0.1));
    assert_eq!(*hand.wrist(), LandmarkPoint::default());
    assert_eq!(hand.handedness, Some(Handedness::Left));
}

#[test]
fn test_frame_result_points_order() {
    let a = Hand::new([LandmarkPoint::new(0.1, 0.1, 0.0); HAND_LANDMARK_COUNT], 0.9);
    let b = Hand::new([LandmarkPoint::new(0.2, 0.2, 0.0); HAND_LANDMARK_COUNT], 0.8);
    let result = FrameResult::new(vec![a, b]);

    assert_eq!(result.len(), 2);
    let points: Vec<_> = result.points().collect();
    assert_eq!(points.len(), 42);
    assert_eq!(points[20].x, 0.1);
    assert_eq!(points[21].x, 0.2);
}

#[test]
fn test_empty_frame_result() {
    let result = FrameResult::empty();
    assert!(result.is_empty());
    assert_eq!(result.points().count(), 0);
}

#[test]
fn test_point_serializes_in_field_order() {
    let json = serde_json::to_string(&LandmarkPoint::new(0.5, 0.25, -0.125)).unwrap();
    assert_eq!(json, r#"{"x":0.5,"y":0.25,"z":-0.125}"#);
}
