use super::*;
use crate::foundation::core::style_map;

#[derive(Default)]
struct MemoryHost {
    styles: RefCell<HashMap<(ElementId, String), StyleValue>>,
}

impl MemoryHost {
    fn with(element: ElementId, prop: &str, value: &str) -> Self {
        let host = Self::default();
        host.set_style(element, prop, &StyleValue::text(value));
        host
    }

    fn get(&self, element: ElementId, prop: &str) -> Option<StyleValue> {
        self.style(element, prop)
    }
}

impl StyleHost for MemoryHost {
    fn style(&self, element: ElementId, prop: &str) -> Option<StyleValue> {
        self.styles
            .borrow()
            .get(&(element, prop.to_string()))
            .cloned()
    }

    fn set_style(&self, element: ElementId, prop: &str, value: &StyleValue) {
        self.styles
            .borrow_mut()
            .insert((element, prop.to_string()), value.clone());
    }

    fn erase_style(&self, element: ElementId, prop: &str) {
        self.styles.borrow_mut().remove(&(element, prop.to_string()));
    }
}

const EL: ElementId = ElementId(5);

fn frames() -> Vec<Keyframe> {
    vec![
        Keyframe {
            offset: 0.0,
            easing: None,
            styles: style_map([("display", "block"), ("opacity", "0")]),
        },
        Keyframe {
            offset: 1.0,
            easing: None,
            styles: style_map([("display", "none"), ("opacity", "1")]),
        },
    ]
}

#[test]
fn nothing_to_special_case_yields_none() {
    let host = MemoryHost::default();
    let table = InitialStyleTable::new();
    let keyframes = vec![Keyframe {
        offset: 0.0,
        easing: None,
        styles: style_map([("opacity", 0.0)]),
    }];
    assert!(SpecialCasedStyles::initialize(&host, &table, EL, &keyframes).is_none());
    assert!(!table.contains(EL));
}

#[test]
fn start_applies_and_remembers_initial_values() {
    let host = MemoryHost::with(EL, "display", "inline");
    let table = InitialStyleTable::new();
    let Some(mut special) = SpecialCasedStyles::initialize(&host, &table, EL, &frames()) else {
        panic!("display must be special-cased");
    };

    special.start();
    assert_eq!(special.state(), PlaybackState::Started);
    assert_eq!(host.get(EL, "display"), Some(StyleValue::text("block")));
    assert_eq!(host.get(EL, "opacity"), None);
    assert_eq!(
        table.initial_value(EL, "display"),
        Some(Some(StyleValue::text("inline")))
    );
}

#[test]
fn finish_applies_end_styles() {
    let host = MemoryHost::with(EL, "display", "inline");
    let table = InitialStyleTable::new();
    let Some(mut special) = SpecialCasedStyles::initialize(&host, &table, EL, &frames()) else {
        panic!("display must be special-cased");
    };

    special.finish();
    assert_eq!(special.state(), PlaybackState::Finished);
    assert_eq!(host.get(EL, "display"), Some(StyleValue::text("none")));

    special.start();
    assert_eq!(special.state(), PlaybackState::Finished);
    assert_eq!(host.get(EL, "display"), Some(StyleValue::text("none")));
}

#[test]
fn drop_restores_the_element() {
    let host = MemoryHost::with(EL, "display", "inline");
    let table = InitialStyleTable::new();
    {
        let Some(mut special) = SpecialCasedStyles::initialize(&host, &table, EL, &frames())
        else {
            panic!("display must be special-cased");
        };
        special.start();
        assert!(table.contains(EL));
    }
    assert_eq!(host.get(EL, "display"), Some(StyleValue::text("inline")));
    assert!(!table.contains(EL));
}

#[test]
fn destroy_erases_styles_that_were_unset_before() {
    let host = MemoryHost::default();
    let table = InitialStyleTable::new();
    let Some(mut special) = SpecialCasedStyles::initialize(&host, &table, EL, &frames()) else {
        panic!("display must be special-cased");
    };

    special.destroy();
    assert_eq!(special.state(), PlaybackState::Destroyed);
    assert_eq!(host.get(EL, "display"), None);

    special.destroy();
    assert_eq!(special.state(), PlaybackState::Destroyed);
}

#[test]
fn single_keyframe_has_no_end_styles() {
    let host = MemoryHost::default();
    let table = InitialStyleTable::new();
    let keyframes = vec![Keyframe {
        offset: 0.0,
        easing: None,
        styles: style_map([("position", "absolute")]),
    }];
    let Some(mut special) = SpecialCasedStyles::initialize(&host, &table, EL, &keyframes) else {
        panic!("position must be special-cased");
    };
    special.finish();
    assert_eq!(host.get(EL, "position"), None);
}

#[test]
fn later_players_keep_the_first_recorded_value() {
    let host = MemoryHost::with(EL, "display", "inline");
    let table = InitialStyleTable::new();
    let Some(mut first) = SpecialCasedStyles::initialize(&host, &table, EL, &frames()) else {
        panic!("display must be special-cased");
    };
    first.start();

    let Some(mut second) = SpecialCasedStyles::initialize(&host, &table, EL, &frames()) else {
        panic!("display must be special-cased");
    };
    second.start();
    assert_eq!(
        table.initial_value(EL, "display"),
        Some(Some(StyleValue::text("inline")))
    );

    drop(second);
    drop(first);
    assert_eq!(host.get(EL, "display"), Some(StyleValue::text("inline")));
}
