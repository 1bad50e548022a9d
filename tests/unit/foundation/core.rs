use super::*;

#[test]
fn placeholders_round_trip_through_wire_tokens() {
    let map: StyleMap = serde_json::from_str(r#"{"opacity":0,"height":"*","width":"!"}"#).unwrap();
    assert_eq!(map["opacity"], StyleValue::number(0.0));
    assert_eq!(map["height"], StyleValue::Auto);
    assert_eq!(map["width"], StyleValue::PreSnapshot);

    let back = serde_json::to_string(&map).unwrap();
    assert_eq!(back, r#"{"opacity":0.0,"height":"*","width":"!"}"#);
}

#[test]
fn style_map_keeps_insertion_order() {
    let map = style_map([("z", 1.0), ("a", 2.0), ("m", 3.0)]);
    let keys: Vec<_> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn scalar_display_matches_plain_numbers() {
    assert_eq!(Scalar::Number(100.0).to_string(), "100");
    assert_eq!(Scalar::Number(0.5).to_string(), "0.5");
    assert_eq!(Scalar::from("1s").to_string(), "1s");
}

#[test]
fn only_literals_are_real_values() {
    assert!(StyleValue::Auto.is_placeholder());
    assert!(StyleValue::PreSnapshot.is_placeholder());
    assert!(!StyleValue::text("red").is_placeholder());
}
