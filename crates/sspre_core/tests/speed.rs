use sspre_core::SpeedCode;
use sspre_core::speed::{SPEED_LABELS, code_to_label, label_to_code, multiplier_for};

#[test]
fn every_label_survives_code_lookup() {
    for label in SPEED_LABELS {
        let code = label_to_code(label).expect("table label should have a code");
        assert_eq!(code_to_label(code), label);
    }
}

#[test]
fn multiplier_is_reciprocal_of_display_value() {
    assert_eq!(multiplier_for("---"), 1.0 / 0.75);
    assert_eq!(multiplier_for("++++"), 1.0 / 1.45);
    assert_eq!(multiplier_for("="), 1.0);
}

#[test]
fn unknown_values_fall_back() {
    assert_eq!(label_to_code("Speed ~ (0.9)"), None);
    assert_eq!(code_to_label("~"), "Normal (1.0)");
    assert_eq!(multiplier_for("~"), 1.0);
    assert_eq!(multiplier_for(""), 1.0);
}

#[test]
fn speed_code_maps_known_and_unknown_codes() {
    assert_eq!(SpeedCode::from_code("++"), SpeedCode::Plus2);
    assert_eq!(SpeedCode::from_code("---"), SpeedCode::Minus3);
    assert_eq!(SpeedCode::from_code("="), SpeedCode::Normal);

    let unknown = SpeedCode::from_code("x2");
    assert_eq!(unknown, SpeedCode::Unknown("x2".to_string()));
    assert!(!unknown.is_known());
    assert_eq!(unknown.as_code(), "x2");
    assert_eq!(unknown.label(), "Normal (1.0)");
}

#[test]
fn speed_code_from_label() {
    assert_eq!(
        SpeedCode::from_label("Speed - (0.85)"),
        Some(SpeedCode::Minus1)
    );
    assert_eq!(SpeedCode::from_label("fast"), None);
    assert_eq!(SpeedCode::Plus3.to_string(), "+++");
    assert_eq!(SpeedCode::Plus1.multiplier(), 1.0 / 1.15);
}
