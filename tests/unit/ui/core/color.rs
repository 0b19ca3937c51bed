use super::*;

#[test]
fn parses_hex_with_and_without_hash() {
    assert_eq!("#FF8000".parse::<Color>().unwrap(), Color::rgb(255, 128, 0));
    assert_eq!("0a0b0c".parse::<Color>().unwrap(), Color::rgb(10, 11, 12));
    assert!("#12345".parse::<Color>().is_err());
    assert!("#GG0000".parse::<Color>().is_err());
}

#[test]
fn deserializes_from_array_or_string() {
    let a: Color = serde_json::from_str("[1, 2, 3]").unwrap();
    let b: Color = serde_json::from_str("\"#010203\"").unwrap();
    assert_eq!(a, b);
    assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
}

#[test]
fn inverse_and_mix() {
    assert_eq!(Color::BLACK.inverse(), Color::WHITE);
    assert_eq!(Color::BLACK.mix(Color::WHITE, 0.0), Color::BLACK);
    assert_eq!(Color::BLACK.mix(Color::WHITE, 1.0), Color::WHITE);
    assert_eq!(Color::BLACK.mix(Color::WHITE, 0.5), Color::rgb(128, 128, 128));
}

#[test]
fn hex_round_trips_through_display_form() {
    let c = Color::rgb(18, 52, 86);
    assert_eq!(c.to_hex(), "#123456");
    assert_eq!(c.to_hex().parse::<Color>().unwrap(), c);
}
