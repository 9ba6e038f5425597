// exact754 integration tests
//
// fp.rs
//
// Scenarios from the specification's testable-properties section,
// exercised through the public crate API rather than `#[cfg(test)]`
// internals.

use exact754::{Error, Fp, Overflow};

#[test]
fn from_binary_matches_the_one_point_two_fixture() {
    let bits = format!("{:064b}", 1.2_f64.to_bits());
    let fp = Fp::from_binary(&bits).unwrap();
    assert_eq!(fp.fp, 1.2);
    assert_eq!(
        fp.exact_decimal.to_string(),
        "1.1999999999999999555910790149937383830547332763671875"
    );
    assert_eq!(fp.unbiased_exp, 0);
}

#[test]
fn from_binary_rejects_infinity() {
    let bits = "0".to_string() + &"1".repeat(11) + &"0".repeat(52);
    assert_eq!(
        Fp::from_binary(&bits),
        Err(Error::Overflow(Overflow::Infinity))
    );
}

#[test]
fn from_binary_rejects_nan() {
    let bits = "0".to_string() + &"1".repeat(11) + "1" + &"0".repeat(51);
    assert_eq!(Fp::from_binary(&bits), Err(Error::Overflow(Overflow::Nan)));
}

#[test]
fn round_trip_holds_for_a_spread_of_doubles() {
    let samples = [
        0.0, 1.0, -1.0, 0.1, 1.2, 100.5, 1e300, 1e-300, f64::MIN_POSITIVE, f64::MAX,
    ];
    for &d in &samples {
        let fp = Fp::from_double(d).unwrap();
        assert_eq!(fp.fp, d);
        let via_bits = Fp::from_binary(&fp.bits).unwrap();
        assert_eq!(via_bits, fp);
        assert_eq!(fp.exact_decimal.to_f64(), d);
    }
}

#[test]
fn successor_is_strictly_monotonic_and_steps_by_one_bit() {
    let seed = Fp::from_double(100.0).unwrap();
    let next = seed.successors().unwrap().next().unwrap().unwrap();
    assert!(next.fp > seed.fp);
    assert_eq!(next.fp.to_bits(), seed.fp.to_bits() + 1);
}

#[test]
fn successor_sequence_ends_in_overflow_at_the_largest_finite_double() {
    let seed = Fp::from_double(f64::MAX).unwrap();
    let mut seq = seed.successors().unwrap();
    assert_eq!(seq.next(), Some(Err(Error::Overflow(Overflow::Infinity))));
    assert_eq!(seq.next(), None);
}

#[test]
fn successor_sequence_is_restartable_from_an_immutable_seed() {
    let seed = Fp::from_double(100.0).unwrap();
    let once: Vec<_> = seed.successors().unwrap().take(5).collect();
    let again: Vec<_> = seed.successors().unwrap().take(5).collect();
    assert_eq!(once, again);
    for item in &once {
        let fp = item.as_ref().unwrap();
        assert!(fp.fp > seed.fp);
    }
}

#[test]
fn successor_from_zero_seed_skips_the_subnormal_range() {
    let seed = Fp::from_double(0.0).unwrap();
    let sequence: Vec<_> = seed
        .successors()
        .unwrap()
        .take(5)
        .map(|item| item.unwrap())
        .collect();
    assert_eq!(sequence[0].fp, f64::MIN_POSITIVE);
    for w in sequence.windows(2) {
        assert!(w[1].fp > w[0].fp);
        assert_eq!(w[1].fp.to_bits(), w[0].fp.to_bits() + 1);
    }
}
