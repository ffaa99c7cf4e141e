//! End-to-end mixture scenarios.
//!
//! Mirrors the reference behaviour of the gas correction factor tooling: parsing,
//! weighted blending, over-full and incompatible mixtures, and reference GCF values.

use gm_core::numeric::{Tolerances, nearly_equal};
use gm_gas::{Component, GasError, Mixture, standard_registry};

const TOL: Tolerances = Tolerances {
    abs: 1e-9,
    rel: 1e-9,
};

fn auto(components: &[(f64, &str)], balance: &str) -> Mixture {
    let registry = standard_registry();
    let components = components
        .iter()
        .map(|(fraction, name)| {
            Component::from_fraction(*fraction, registry.lookup(name).unwrap()).unwrap()
        })
        .collect();
    Mixture::auto_balance(components, registry.lookup(balance).unwrap()).unwrap()
}

#[test]
fn auto_balance_round_trip() {
    let mix = auto(&[(0.01, "hydrogen")], "air");
    assert_eq!(mix.components().len(), 1);
    assert!(nearly_equal(mix.balance().fraction(), 0.99, TOL));
}

#[test]
fn single_trace_gas_in_air() {
    let mix: Mixture = "1% hydrogen, air".parse().unwrap();

    assert_eq!(mix.components().len(), 1);
    let h2 = &mix.components()[0];
    assert_eq!(**h2.properties(), *standard_registry().lookup("hydrogen").unwrap());
    assert!(nearly_equal(h2.fraction(), 0.01, TOL));

    assert_eq!(mix.balance().properties().name(), "Air");
    assert!(nearly_equal(mix.balance().fraction(), 0.99, TOL));
}

#[test]
fn weighted_blend_of_two_mixtures() {
    let a: Mixture = "1% hydrogen, air".parse().unwrap();
    let b: Mixture = "1% methane, air".parse().unwrap();

    let mixed = a.scale(0.25).unwrap().mix(&b.scale(0.75).unwrap()).unwrap();

    assert_eq!(mixed.components().len(), 2);

    assert_eq!(mixed.components()[0].properties().name(), "Methane");
    assert!(nearly_equal(mixed.components()[0].fraction(), 0.0075, TOL));

    assert_eq!(mixed.components()[1].properties().name(), "Hydrogen");
    assert!(nearly_equal(mixed.components()[1].fraction(), 0.0025, TOL));

    assert_eq!(mixed.balance().properties().name(), "Air");
    assert!(nearly_equal(mixed.balance().fraction(), 0.99, Tolerances {
        abs: 1e-6,
        rel: 1e-6
    }));
}

#[test]
fn over_full_mixture_fails() {
    let err = "101% hydrogen, air".parse::<Mixture>().unwrap_err();
    assert!(err.is_calculation(), "unexpected error: {err}");
}

#[test]
fn incompatible_balance_fails_to_mix() {
    let a: Mixture = "1% hydrogen, air".parse().unwrap();
    let b: Mixture = "1% hydrogen, nitrogen".parse().unwrap();

    assert!(matches!(a.mix(&b), Err(GasError::Mixing { .. })));
}

#[test]
fn reference_gas_correction_factors() {
    let registry = standard_registry();
    for (name, expected) in [("air", 1.0), ("helium", 1.45), ("ammonia", 0.73)] {
        let component = Component::from_fraction(1.0, registry.lookup(name).unwrap()).unwrap();
        let gcf = component.gcf().unwrap();
        assert!(
            (gcf - expected).abs() <= 0.01,
            "gcf({name}) = {gcf}, expected {expected}"
        );
    }
}

#[test]
fn unknown_gas_fails() {
    assert!(matches!(
        "1% soup, air".parse::<Mixture>(),
        Err(GasError::UnknownGas { .. })
    ));
}

#[test]
fn labelled_lists_parse_like_auto_balance() {
    let cases = [
        ("1% hydrogen, air", auto(&[(0.01, "hydrogen")], "air")),
        (
            "1 kppm Hydrogen (H_2), 99.9% Air",
            auto(&[(0.001, "hydrogen")], "air"),
        ),
        (
            "1% Hydrogen (H_2), 99% Air",
            auto(&[(0.01, "hydrogen")], "air"),
        ),
        (
            "1.05% Carbon-dioxide (CO_2), 99% Air",
            auto(&[(0.0105, "carbon_dioxide")], "air"),
        ),
        ("100% Air", auto(&[], "air")),
        ("100% Humid Air", auto(&[], "humid_air")),
        (
            "12 ppm Nitrogen-dioxide (NO_2), 100% Air",
            auto(&[(12e-6, "nitrogen_dioxide")], "air"),
        ),
        (
            "50 ppm Acetone, 100% Air",
            auto(&[(50e-6, "acetone")], "air"),
        ),
        (
            "50 ppm Ammonia (NH_3), 100% Air",
            auto(&[(50e-6, "ammonia")], "air"),
        ),
        (
            "50 ppm Methane (CH_4), 100% Air",
            auto(&[(50e-6, "methane")], "air"),
        ),
    ];

    for (text, expected) in cases {
        let parsed: Mixture = text.parse().unwrap();
        assert_eq!(parsed.components(), expected.components(), "components of {text}");
        assert_eq!(parsed.balance(), expected.balance(), "balance of {text}");
    }
}

#[test]
fn mixture_gcf_between_its_constituents() {
    let mix: Mixture = "20% helium, nitrogen".parse().unwrap();
    let registry = standard_registry();
    let helium = Component::from_fraction(1.0, registry.lookup("helium").unwrap())
        .unwrap()
        .gcf()
        .unwrap();
    let nitrogen = Component::from_fraction(1.0, registry.lookup("nitrogen").unwrap())
        .unwrap()
        .gcf()
        .unwrap();

    let gcf = mix.gcf().unwrap();
    assert!(gcf > nitrogen && gcf < helium, "gcf = {gcf}");
}

#[test]
fn nitric_oxides_have_no_gcf() {
    let mix: Mixture = "10 ppm nitric-oxides, air".parse().unwrap();
    assert!(mix.gcf().unwrap_err().is_calculation());
}
