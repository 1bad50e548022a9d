use super::*;

#[test]
fn total_time_adds_delay() {
    let mut i = TimelineInstruction::empty(ElementId(1), 250.0);
    i.duration = 1000.0;
    assert_eq!(i.total_time(), 1250.0);
}

#[test]
fn instruction_map_appends_per_element() {
    let mut map = ElementInstructionMap::new();
    assert!(!map.has(ElementId(3)));
    assert!(map.get(ElementId(3)).is_empty());

    map.append(ElementId(3), [TimelineInstruction::empty(ElementId(3), 0.0)]);
    map.append(ElementId(3), [TimelineInstruction::empty(ElementId(3), 10.0)]);
    assert!(map.has(ElementId(3)));
    assert_eq!(map.get(ElementId(3)).len(), 2);
    assert_eq!(map.get(ElementId(3))[1].delay, 10.0);

    map.clear();
    assert!(!map.has(ElementId(3)));
}

#[test]
fn instruction_map_loads_from_json_keyed_by_element() {
    let json = r#"{
        "7": [{"element": 7, "keyframes": [], "duration": 100, "delay": 0}]
    }"#;
    let map: ElementInstructionMap = serde_json::from_str(json).unwrap();
    assert_eq!(map.get(ElementId(7))[0].duration, 100.0);
}
