mod test_signals;

use approx::assert_abs_diff_eq;
use motionkit::config::WindowSize;
use motionkit::smoothing::{Filter, SlidingWindowAverager};
use motionkit::{MotionError, PipelineConfig};

#[test]
fn test_incremental_updates_capacity_five() {
    let mut smoother = SlidingWindowAverager::new(5).unwrap();

    smoother.update(10.0);
    assert_abs_diff_eq!(smoother.average(), 10.0, epsilon = 0.01);

    smoother.update(12.5);
    assert_abs_diff_eq!(smoother.average(), 11.25, epsilon = 0.01);

    smoother.update(12.5);
    assert_abs_diff_eq!(smoother.average(), 11.666_666_666_7, epsilon = 0.01);
}

#[test]
fn test_window_slides_capacity_three() {
    let mut smoother = SlidingWindowAverager::new(3).unwrap();
    for v in [1.0, 2.0, 3.0, 4.0] {
        smoother.update(v);
    }
    assert_abs_diff_eq!(smoother.average(), 3.0, epsilon = 1e-12);
}

#[test]
fn test_empty_window_is_exactly_zero() {
    for capacity in 1..=8 {
        let smoother = SlidingWindowAverager::new(capacity).unwrap();
        assert_eq!(smoother.average(), 0.0);
    }
}

#[test]
fn test_average_matches_mean_of_last_n() {
    let inputs: Vec<f64> = (0..40).map(|i| ((i * 37) % 11) as f64 - 4.5).collect();

    for capacity in 1..=10 {
        let mut smoother = SlidingWindowAverager::new(capacity).unwrap();
        for (i, &v) in inputs.iter().enumerate() {
            smoother.update(v);
            let start = (i + 1).saturating_sub(capacity);
            let expected = test_signals::mean(&inputs[start..=i]);
            assert_abs_diff_eq!(smoother.average(), expected, epsilon = 1e-9);
            assert!(smoother.len() <= capacity);
        }
    }
}

#[test]
fn test_average_is_idempotent() {
    let mut smoother = SlidingWindowAverager::new(4).unwrap();
    for v in [3.0, 9.0, -1.0] {
        smoother.update(v);
    }
    let first = smoother.average();
    let second = smoother.average();
    assert_eq!(first, second);
    assert_eq!(smoother.len(), 3);
}

#[test]
fn test_invalid_capacity() {
    assert!(matches!(
        SlidingWindowAverager::new(0),
        Err(MotionError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        WindowSize::try_from(-4_i64),
        Err(MotionError::InvalidConfiguration(_))
    ));
    assert!(PipelineConfig::from_toml_str("[smoother]\nwindow_size = -1\n").is_err());
}

#[test]
fn test_infinity_propagates() {
    let mut smoother = SlidingWindowAverager::new(2).unwrap();
    smoother.update(f64::INFINITY);
    assert_eq!(smoother.process(1.0), f64::INFINITY);
    assert_eq!(smoother.process(1.0), 1.0);
}

#[test]
fn test_window_from_config() {
    let config = PipelineConfig::from_toml_str("[smoother]\nwindow_size = 2\n").unwrap();
    let mut smoother = SlidingWindowAverager::with_size(config.smoother.window_size);
    assert_eq!(smoother.capacity(), 2);
    smoother.update(1.0);
    smoother.update(2.0);
    smoother.update(6.0);
    assert_abs_diff_eq!(smoother.average(), 4.0, epsilon = 1e-12);
}
