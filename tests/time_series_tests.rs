use insta::assert_debug_snapshot;
use proptest::prelude::*;
use tasktop::error::MonitorError;
use tasktop::system::history::TimeSeriesBuffer;

#[test]
fn eviction_renumbers_from_zero() {
    let mut buf = TimeSeriesBuffer::new(3).unwrap();
    for v in [10.0, 20.0, 30.0, 40.0] {
        buf.append(v);
    }
    assert_debug_snapshot!("capacity_three_after_four_appends", buf.snapshot());
}

#[test]
fn zero_capacity_fails_fast() {
    assert!(matches!(
        TimeSeriesBuffer::new(0),
        Err(MonitorError::InvalidCapacity(0))
    ));
}

proptest! {
    #[test]
    fn keeps_last_capacity_values_in_order(
        capacity in 1usize..64,
        values in prop::collection::vec(0.0f64..100.0, 0..256),
    ) {
        let mut buf = TimeSeriesBuffer::new(capacity).unwrap();
        for &v in &values {
            buf.append(v);
        }

        let points = buf.snapshot();
        let expected_len = values.len().min(capacity);
        prop_assert_eq!(points.len(), expected_len);

        let tail = &values[values.len() - expected_len..];
        for (i, (index, value)) in points.iter().enumerate() {
            prop_assert_eq!(*index, i);
            prop_assert_eq!(*value, tail[i]);
        }
    }
}
