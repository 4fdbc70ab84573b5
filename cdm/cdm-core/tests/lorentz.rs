#![allow(unused_doc_comments)]
use cdm_core::*;
use proptest::prelude::*;

/// A massless four-vector of energy `e` pointing along (theta, phi).
fn massless(e: Scalar, theta: Scalar, phi: Scalar) -> FourVector {
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();
    FourVector::new(e, e * st * cp, e * st * sp, e * ct)
}

// Golden: boosting a timelike vector into its own frame leaves (m, 0).
#[test]
fn golden_boost_to_rest_frame() {
    let p = FourVector::new(10.0, 1.0, 2.0, 3.0);
    let boost = Boost::new(p).expect("timelike frame");
    let rest = boost.apply(p);
    let m = p.mass2().sqrt();
    assert!((rest.e - m).abs() < 1e-9, "rest energy {} != mass {m}", rest.e);
    assert!(rest.spatial_mag() < 1e-9, "residual momentum {}", rest.spatial_mag());
}

// Golden: spacelike and null frames are rejected.
#[test]
fn golden_degenerate_frames_rejected() {
    let spacelike = FourVector::new(1.0, 0.0, 0.0, 5.0);
    assert!(matches!(
        Boost::new(spacelike),
        Err(LorentzError::SpacelikeFrame { .. })
    ));
    let null = FourVector::new(5.0, 0.0, 0.0, 5.0);
    assert!(matches!(Boost::new(null), Err(LorentzError::NullFrame { .. })));
    let still = FourVector::new(3.0, 0.0, 0.0, 0.0);
    assert!(matches!(Rotation::new(&still), Err(LorentzError::NoDirection)));
}

// Golden: the dipole frame puts the non-recoiling end on +z and the
// pair back to back.
#[test]
fn golden_dipole_frame_alignment() {
    let p1 = massless(40.0, 0.7, 1.1);
    let p2 = massless(55.0, 2.4, -0.3);
    let frame = BoostAndRotate::new(p1, p2, End::Second).expect("valid dipole frame");
    let b1 = frame.forward(p1);
    let b2 = frame.forward(p2);
    assert!(b1.px.abs() < 1e-9 && b1.py.abs() < 1e-9, "emitter off axis: {b1:?}");
    assert!(b1.pz > 0.0, "emitter not on +z: {b1:?}");
    assert!((b1.pz + b2.pz).abs() < 1e-9, "pair not back to back");
    assert!((b1.e - b2.e).abs() < 1e-9, "unequal CM energies");
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    /// Boost round trip: inverse(apply(p)) == p.
    #[test]
    fn prop_boost_round_trip(
        e1 in 5.0f64..80.0, t1 in 0.1f64..3.0, f1 in -3.0f64..3.0,
        e2 in 5.0f64..80.0, t2 in 0.1f64..3.0, f2 in -3.0f64..3.0,
        ex in -20.0f64..20.0, ey in -20.0f64..20.0, ez in -20.0f64..20.0
    ) {
        let frame = massless(e1, t1, f1) + massless(e2, t2, f2);
        prop_assume!(frame.mass2() > 1.0);
        let boost = Boost::new(frame).unwrap();
        let p = FourVector::new((ex * ex + ey * ey + ez * ez + 25.0).sqrt(), ex, ey, ez);
        let back = boost.inverse(boost.apply(p));
        prop_assert!((back.e - p.e).abs() < 1e-8, "E: {} vs {}", back.e, p.e);
        prop_assert!((back.px - p.px).abs() < 1e-8);
        prop_assert!((back.py - p.py).abs() < 1e-8);
        prop_assert!((back.pz - p.pz).abs() < 1e-8);
    }

    /// Boosts preserve the Minkowski product of two vectors.
    #[test]
    fn prop_boost_preserves_invariants(
        e1 in 5.0f64..80.0, t1 in 0.1f64..3.0, f1 in -3.0f64..3.0,
        e2 in 5.0f64..80.0, t2 in 0.1f64..3.0, f2 in -3.0f64..3.0
    ) {
        let a = massless(e1, t1, f1);
        let b = massless(e2, t2, f2);
        let frame = a + b;
        prop_assume!(frame.mass2() > 1.0);
        let boost = Boost::new(frame).unwrap();
        let (ba, bb) = (boost.apply(a), boost.apply(b));
        let before = a.dot(&b);
        let after = ba.dot(&bb);
        prop_assert!(
            approx_eq(before, after, 1e-9),
            "dot product not invariant: {before} vs {after}"
        );
    }

    /// Rotation round trip and energy invariance.
    #[test]
    fn prop_rotation_round_trip(
        e in 1.0f64..50.0, t in 0.01f64..3.1, f in -3.0f64..3.0,
        px in -9.0f64..9.0, py in -9.0f64..9.0, pz in -9.0f64..9.0
    ) {
        let rot = Rotation::new(&massless(e, t, f)).unwrap();
        let p = FourVector::new(11.0, px, py, pz);
        let turned = rot.apply(p);
        prop_assert!((turned.e - p.e).abs() < 1e-12);
        prop_assert!((turned.spatial_mag() - p.spatial_mag()).abs() < 1e-9);
        let back = rot.inverse(turned);
        prop_assert!((back.px - p.px).abs() < 1e-9);
        prop_assert!((back.py - p.py).abs() < 1e-9);
        prop_assert!((back.pz - p.pz).abs() < 1e-9);
    }

    /// A rotation built from a vector puts that vector on +z.
    #[test]
    fn prop_rotation_aligns_reference(e in 1.0f64..50.0, t in 0.01f64..3.1, f in -3.0f64..3.0) {
        let v = massless(e, t, f);
        let rot = Rotation::new(&v).unwrap();
        let aligned = rot.apply(v);
        prop_assert!(aligned.px.abs() < 1e-9 && aligned.py.abs() < 1e-9, "off axis: {aligned:?}");
        prop_assert!((aligned.pz - e).abs() < 1e-9);
    }

    /// Full dipole-frame round trip.
    #[test]
    fn prop_dipole_frame_round_trip(
        e1 in 5.0f64..80.0, t1 in 0.1f64..3.0, f1 in -3.0f64..3.0,
        e2 in 5.0f64..80.0, t2 in 0.1f64..3.0, f2 in -3.0f64..3.0
    ) {
        let p1 = massless(e1, t1, f1);
        let p2 = massless(e2, t2, f2);
        prop_assume!((p1 + p2).mass2() > 1.0);
        for recoil in [End::First, End::Second] {
            let frame = BoostAndRotate::new(p1, p2, recoil).unwrap();
            for p in [p1, p2] {
                let back = frame.inverse(frame.forward(p));
                prop_assert!((back.e - p.e).abs() < 1e-8);
                prop_assert!((back.px - p.px).abs() < 1e-8);
                prop_assert!((back.py - p.py).abs() < 1e-8);
                prop_assert!((back.pz - p.pz).abs() < 1e-8);
            }
        }
    }
}
