mod tests {
    use embassy_time::Instant;
    use strand_animator::Rgb;
    use strand_animator::effect::{Effect, FireEffect, HeatMap};

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    fn t0() -> Instant {
        Instant::from_millis(0)
    }

    #[test]
    fn test_no_sparking_means_no_ignition() {
        // Heat starts at zero; without sparks it must stay there.
        let mut fire = FireEffect::new(80, 0, HeatMap::Palette, 7);
        let mut leds = [BLACK; 40];

        for _ in 0..200 {
            fire.step(t0(), &mut leds);
            assert!(fire.heat().iter().all(|&h| h == 0));
            assert!(leds.iter().all(|c| *c == BLACK));
        }
    }

    #[test]
    fn test_no_cooling_no_sparking_converges_to_black() {
        let mut fire = FireEffect::new(0, 0, HeatMap::Ramp, 7);
        let mut leds = [BLACK; 17];

        for _ in 0..50 {
            fire.step(t0(), &mut leds);
        }
        assert!(leds.iter().all(|c| *c == BLACK));
    }

    #[test]
    fn test_default_preset_ignites() {
        let mut fire = FireEffect::new(80, 220, HeatMap::Palette, 7);
        let mut leds = [BLACK; 40];

        let mut ever_lit = false;
        for _ in 0..100 {
            fire.step(t0(), &mut leds);
            if leds.iter().any(|c| *c != BLACK) {
                ever_lit = true;
            }
        }
        assert!(ever_lit, "a sparking fire never produced light");
    }

    #[test]
    fn test_heat_field_matches_strip_length() {
        let mut fire = FireEffect::new(55, 120, HeatMap::Ramp, 7);
        let mut leds = [BLACK; 23];

        assert!(fire.heat().is_empty());
        fire.step(t0(), &mut leds);
        assert_eq!(fire.heat().len(), 23);
    }

    #[test]
    fn test_reset_discards_the_heat_field() {
        let mut fire = FireEffect::new(80, 220, HeatMap::Palette, 7);
        let mut leds = [BLACK; 12];

        for _ in 0..20 {
            fire.step(t0(), &mut leds);
        }
        fire.reset();
        assert!(fire.heat().is_empty());
    }

    #[test]
    fn test_palette_and_ramp_mappings_both_stay_renderable() {
        // Exercise both color mappings across many frames; heat is u8
        // so the palette index arithmetic must never leave the table.
        for map in [HeatMap::Palette, HeatMap::Ramp] {
            let mut fire = FireEffect::new(80, 255, map, 999);
            let mut leds = [BLACK; 8];
            for _ in 0..500 {
                fire.step(t0(), &mut leds);
            }
        }
    }

    #[test]
    fn test_same_seed_same_flames() {
        let mut a = FireEffect::new(80, 220, HeatMap::Palette, 31);
        let mut b = FireEffect::new(80, 220, HeatMap::Palette, 31);
        let mut leds_a = [BLACK; 30];
        let mut leds_b = [BLACK; 30];

        for _ in 0..50 {
            a.step(t0(), &mut leds_a);
            b.step(t0(), &mut leds_b);
            assert_eq!(leds_a, leds_b);
        }
    }
}
