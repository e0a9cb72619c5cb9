mod tests {
    use strand_animator::math8::{
        blend8, ease_in_out_quad, qadd8, qsub8, scale8, sin8, sin16,
    };

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_blend8() {
        assert_eq!(blend8(255, 128, 128), 191);
        assert_eq!(blend8(0, 128, 255), 128);
        assert_eq!(blend8(255, 0, 128), 127);
        assert_eq!(blend8(255, 128, 0), 255);
    }

    #[test]
    fn test_qadd8_saturates() {
        assert_eq!(qadd8(200, 100), 255);
        assert_eq!(qadd8(100, 100), 200);
        assert_eq!(qadd8(0, 0), 0);
    }

    #[test]
    fn test_qsub8_floors_at_zero() {
        assert_eq!(qsub8(100, 200), 0);
        assert_eq!(qsub8(200, 100), 100);
    }

    #[test]
    fn test_sin8_zero_crossings() {
        // sin(0) and sin(pi) both map to the 128 midpoint.
        assert_eq!(sin8(0), 128);
        assert_eq!(sin8(128), 128);
    }

    #[test]
    fn test_sin8_extremes() {
        // Peak and trough, allowing one count of float truncation.
        assert!(sin8(64) >= 254);
        assert!(sin8(192) <= 2);
    }

    #[test]
    fn test_sin16_quadrants() {
        assert_eq!(sin16(0), 0);
        assert!(sin16(16384) >= 32765);
        assert!(sin16(49152) <= -32765);
    }

    #[test]
    fn test_sin16_range() {
        for angle in (0..=u16::MAX).step_by(97) {
            let s = sin16(angle);
            assert!((-32767..=32767).contains(&s));
        }
    }

    #[test]
    fn test_ease_in_out_quad_endpoints() {
        assert_eq!(ease_in_out_quad(0), 0);
        assert!(ease_in_out_quad(255) >= 253);
        // Monotone on the first half.
        assert!(ease_in_out_quad(64) < ease_in_out_quad(100));
    }
}
