//! Property-based tests for coordinate normalization.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use crate::coords::{BoundingBox, Coords};

    fn arb_box(range: std::ops::Range<f64>) -> impl Strategy<Value = BoundingBox> {
        (
            range.clone(),
            range.clone(),
            range.clone(),
            range,
        )
            .prop_map(|(left, top, right, bottom)| BoundingBox::new(left, top, right, bottom))
    }

    proptest! {
        #[test]
        fn test_normalized_absolute_box_is_inside_unit_square(
            bbox in arb_box(0.0..5000.0),
            page_width in 1u32..4000,
            page_height in 1u32..4000,
        ) {
            let normalized = Coords::Absolute { bbox, page_width, page_height }.normalize();
            prop_assert!((0.0..=1.0).contains(&normalized.left));
            prop_assert!((0.0..=1.0).contains(&normalized.right));
            prop_assert!((0.0..=1.0).contains(&normalized.top));
            prop_assert!((0.0..=1.0).contains(&normalized.bottom));
            prop_assert!(normalized.left <= normalized.right);
            prop_assert!(normalized.top <= normalized.bottom);
        }

        #[test]
        fn test_normalized_relative_box_is_inside_unit_square(
            bbox in arb_box(-0.5..1.5),
        ) {
            let normalized = Coords::Relative { bbox }.normalize();
            prop_assert!((0.0..=1.0).contains(&normalized.left));
            prop_assert!((0.0..=1.0).contains(&normalized.bottom));
            prop_assert!(normalized.left <= normalized.right);
            prop_assert!(normalized.top <= normalized.bottom);
        }

        #[test]
        fn test_normalize_is_idempotent_for_relative(bbox in arb_box(0.0..1.0)) {
            let once = Coords::Relative { bbox }.normalize();
            let twice = Coords::Relative { bbox: once }.normalize();
            prop_assert_eq!(once, twice);
        }
    }
}
