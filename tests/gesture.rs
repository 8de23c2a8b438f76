mod tests {
    use myrtio_saber::color::color_wheel;
    use myrtio_saber::{GestureClass, GestureSample, GestureThresholds, Mode, classify};

    const ARMED: Mode = Mode::On {
        idle_color: color_wheel(85),
    };

    fn class(x: f32, y: f32, z: f32, mode: Mode) -> GestureClass {
        classify(GestureSample::new(x, y, z), mode, &GestureThresholds::DEFAULT)
    }

    #[test]
    fn test_magnitude_squared_uses_all_axes() {
        assert_eq!(GestureSample::new(20.0, 10.0, 0.0).magnitude_squared(), 500.0);
        assert_eq!(GestureSample::new(1.0, 2.0, 3.0).magnitude_squared(), 14.0);
        assert_eq!(GestureSample::new(0.0, -21.0, 0.0).magnitude_squared(), 441.0);
    }

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(class(20.0, 10.0, 0.0, ARMED), GestureClass::Hit);
        assert_eq!(class(15.0, 5.0, 0.0, ARMED), GestureClass::Swing);
        assert_eq!(class(5.0, 5.0, 0.0, ARMED), GestureClass::Idle);
        assert_eq!(class(0.0, 21.0, 0.0, ARMED), GestureClass::Hit);
    }

    #[test]
    fn test_classify_threshold_edges_are_exclusive() {
        // 20² = 400 is not above the hit threshold
        assert_eq!(class(20.0, 0.0, 0.0, ARMED), GestureClass::Swing);
        // 10² + 10² = 200 is not above the swing threshold
        assert_eq!(class(10.0, 10.0, 0.0, ARMED), GestureClass::Idle);
    }

    #[test]
    fn test_swing_requires_armed_mode() {
        assert_eq!(class(15.0, 5.0, 0.0, Mode::Off), GestureClass::Idle);
        assert_eq!(class(20.0, 10.0, 0.0, Mode::Off), GestureClass::Hit);
    }

    #[test]
    fn test_classify_is_pure() {
        let sample = GestureSample::new(12.0, -7.5, 3.25);
        let first = classify(sample, ARMED, &GestureThresholds::DEFAULT);
        for _ in 0..100 {
            assert_eq!(classify(sample, ARMED, &GestureThresholds::DEFAULT), first);
        }
    }

    #[test]
    fn test_swing_unreachable_when_thresholds_inverted() {
        let inverted = GestureThresholds {
            hit: 100.0,
            swing: 200.0,
        };
        for magnitude in [50.0_f32, 150.0, 250.0, 500.0] {
            let sample = GestureSample::new(magnitude.sqrt(), 0.0, 0.0);
            assert_ne!(classify(sample, ARMED, &inverted), GestureClass::Swing);
        }
    }
}
