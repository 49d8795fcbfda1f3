//! Property tests for threshold classification and command dispatch

use envmon_core::controller::{Controller, Effect, Reply};
use envmon_core::threshold::{classify, Classification, ThresholdBand};
use envmon_core::Thresholds;
use proptest::prelude::*;

proptest! {
    #[test]
    fn inside_band_is_normal(
        min in -40.0f32..40.0,
        width in 0.0f32..60.0,
        frac in 0.0f32..=1.0,
    ) {
        let max = min + width;
        let value = (min + width * frac).clamp(min, max);
        prop_assert_eq!(classify(value, min, max), Classification::Normal);
    }

    #[test]
    fn outside_band_is_alert(
        min in -40.0f32..40.0,
        width in 0.0f32..60.0,
        gap in 0.1f32..100.0,
    ) {
        let band = ThresholdBand::new(min, min + width);
        prop_assert_eq!(band.classify(min - gap), Classification::Alert);
        prop_assert_eq!(band.classify(min + width + gap), Classification::Alert);
    }

    #[test]
    fn bounds_are_normal(min in -40.0f32..40.0, width in 0.0f32..60.0) {
        let band = ThresholdBand::new(min, min + width);
        prop_assert_eq!(band.classify(band.min), Classification::Normal);
        prop_assert_eq!(band.classify(band.max), Classification::Normal);
    }

    #[test]
    fn set_threshold_round_trips_integer_bounds(
        tmin in -50i32..50,
        tmax in -50i32..50,
        hmin in 0i32..100,
        hmax in 0i32..100,
    ) {
        let line = format!("SET_THRESHOLD,{tmin},{tmax},{hmin},{hmax}");
        let d = Controller::new().dispatch(&line);
        prop_assert_eq!(
            d.effect,
            Effect::ApplyThresholds(Thresholds::new(
                tmin as f32,
                tmax as f32,
                hmin as f32,
                hmax as f32,
            ))
        );
        prop_assert_eq!(d.reply, Reply::Response("THRESHOLD_OK"));
    }

    #[test]
    fn unknown_words_never_change_state(word in "[A-Z]{1,10}") {
        prop_assume!(!matches!(
            word.as_str(),
            "CONNECT" | "DISCONNECT" | "PING"
        ));
        let d = Controller::new().dispatch(&word);
        prop_assert_eq!(d.effect, Effect::None);
    }
}
