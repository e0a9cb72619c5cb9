mod tests {
    use strand_animator::EffectId;

    #[test]
    fn test_from_raw_covers_the_whole_catalog() {
        for raw in 0..EffectId::COUNT {
            let id = EffectId::from_raw(raw).expect("catalog ids are contiguous");
            assert_eq!(id as u8, raw);
        }
    }

    #[test]
    fn test_from_raw_rejects_out_of_range() {
        assert_eq!(EffectId::from_raw(EffectId::COUNT), None);
        assert_eq!(EffectId::from_raw(255), None);
    }

    #[test]
    fn test_next_wraps_modulo_table_size() {
        assert_eq!(EffectId::Breathe.next(), EffectId::Pacifica);
        assert_eq!(EffectId::Strobe.next(), EffectId::Breathe);
    }

    #[test]
    fn test_previous_wraps_modulo_table_size() {
        assert_eq!(EffectId::Pacifica.previous(), EffectId::Breathe);
        assert_eq!(EffectId::Breathe.previous(), EffectId::Strobe);
    }

    #[test]
    fn test_next_and_previous_are_inverse() {
        for raw in 0..EffectId::COUNT {
            let id = EffectId::from_raw(raw).unwrap();
            assert_eq!(id.next().previous(), id);
        }
    }

    #[test]
    fn test_parse_from_str() {
        assert_eq!(EffectId::parse_from_str("pacifica"), Some(EffectId::Pacifica));
        assert_eq!(EffectId::parse_from_str("fire"), Some(EffectId::Fire));
        assert_eq!(EffectId::parse_from_str("ember"), Some(EffectId::Ember));
        assert_eq!(EffectId::parse_from_str("nope"), None);
    }

    #[test]
    fn test_as_str_round_trips() {
        for raw in 0..EffectId::COUNT {
            let id = EffectId::from_raw(raw).unwrap();
            assert_eq!(EffectId::parse_from_str(id.as_str()), Some(id));
        }
    }

    #[test]
    fn test_to_slot_preserves_identity() {
        for raw in 0..EffectId::COUNT {
            let id = EffectId::from_raw(raw).unwrap();
            assert_eq!(id.to_slot(42).id(), id);
        }
    }

    #[test]
    fn test_fire_presets_are_distinct_entries() {
        assert_ne!(EffectId::Fire as u8, EffectId::Ember as u8);
        assert_ne!(
            EffectId::CylonNarrow as u8,
            EffectId::CylonWide as u8
        );
    }
}
