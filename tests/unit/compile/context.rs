use super::*;
use crate::compile::driver::StaticDriver;
use crate::foundation::core::Scalar;

fn driver() -> StaticDriver {
    let items = (10..15).map(ElementId);
    StaticDriver::new()
        .with(ElementId(1), ".item", items)
        .with(ElementId(1), ".kf-enter .child", [ElementId(20)])
        .with(ElementId(1), ".single", [ElementId(30), ElementId(31)])
}

fn with_collector<R>(f: impl FnOnce(&mut Collector<'_>) -> R) -> (R, Vec<AnimationError>) {
    let driver = driver();
    let subs = ElementInstructionMap::new();
    let mut errors = Vec::new();
    let mut c = Collector {
        driver: &driver,
        sub_instructions: &subs,
        enter_class_name: "kf-enter",
        leave_class_name: "kf-leave",
        errors: &mut errors,
        timelines: TimelineRegistry::new(),
    };
    let out = f(&mut c);
    (out, errors)
}

#[test]
fn query_limits_keep_first_or_last_matches() {
    let (found, errors) = with_collector(|c| {
        let ctx = Context::root(ElementId(1), c);
        (
            ctx.invoke_query(c, ".item", ".item", 2, false, false),
            ctx.invoke_query(c, ".item", ".item", -2, false, false),
            ctx.invoke_query(c, ".item", ".item", 0, false, false),
            ctx.invoke_query(c, ".item", ".item", -9, false, false),
        )
    });
    assert_eq!(found.0, vec![ElementId(10), ElementId(11)]);
    assert_eq!(found.1, vec![ElementId(13), ElementId(14)]);
    assert_eq!(found.2.len(), 5);
    assert_eq!(found.3.len(), 5);
    assert!(errors.is_empty());
}

#[test]
fn query_rewrites_enter_and_prepends_self() {
    let (found, _) = with_collector(|c| {
        let ctx = Context::root(ElementId(1), c);
        ctx.invoke_query(c, ":enter .child", ":self, :enter .child", 0, true, false)
    });
    assert_eq!(found, vec![ElementId(1), ElementId(20)]);
}

#[test]
fn limit_one_asks_the_driver_for_a_single_match() {
    let (found, _) = with_collector(|c| {
        let ctx = Context::root(ElementId(1), c);
        ctx.invoke_query(c, ".single", ".single", 1, false, false)
    });
    assert_eq!(found, vec![ElementId(30)]);
}

#[test]
fn empty_required_query_is_reported() {
    let (found, errors) = with_collector(|c| {
        let ctx = Context::root(ElementId(1), c);
        let optional = ctx.invoke_query(c, ".missing", ".missing", 0, false, true);
        assert!(optional.is_empty());
        ctx.invoke_query(c, ".missing", "#orig .missing", 0, false, false)
    });
    assert!(found.is_empty());
    assert_eq!(
        errors,
        vec![AnimationError::UnresolvableSelector {
            selector: "#orig .missing".to_string()
        }]
    );
}

#[test]
fn update_options_resolves_timings_and_interpolates_params() {
    let (ctx, errors) = with_collector(|c| {
        let mut ctx = Context::root(ElementId(1), c);
        let first = AnimationOptions::default()
            .with_delay("250ms")
            .with_duration(1.5)
            .with_param("x", "10")
            .with_param("y", "{{ x }}px");
        ctx.update_options(Some(&first), false, c.errors);

        let second = AnimationOptions::default()
            .with_param("x", "99")
            .with_param("z", "new");
        ctx.update_options(Some(&second), true, c.errors);
        ctx
    });
    assert_eq!(ctx.options.delay, Some(250.0));
    assert_eq!(ctx.options.duration, Some(1.5));
    assert_eq!(ctx.params()["x"], Scalar::from("10"));
    assert_eq!(ctx.params()["y"], Scalar::from("10px"));
    assert_eq!(ctx.params()["z"], Scalar::from("new"));
    assert!(errors.is_empty());
}

#[test]
fn sub_context_copies_params_but_not_timings() {
    let ((parent_count, child), _) = with_collector(|c| {
        let mut ctx = Context::root(ElementId(1), c);
        let opts = AnimationOptions::default()
            .with_delay(100.0)
            .with_param("a", "1");
        ctx.update_options(Some(&opts), false, c.errors);
        ctx.current_query_index = 2;
        ctx.current_query_total = 4;
        c.timeline_mut(ctx.timeline).forward_time(50.0);

        let child = ctx.create_sub_context(c, None, Some(ElementId(7)), None);
        assert_eq!(c.timeline(child.timeline).start_time(), 50.0);
        assert_eq!(c.timelines.len(), 2);
        (ctx.sub_context_count, child)
    });
    assert_eq!(parent_count, 1);
    assert_eq!(child.element, ElementId(7));
    assert_eq!(child.options.delay, None);
    assert_eq!(child.params()["a"], Scalar::from("1"));
    assert_eq!(child.current_query_index, 2);
    assert_eq!(child.current_query_total, 4);
    assert!(child.parent.is_some());
}

#[test]
fn transform_into_new_timeline_resets_previous_node() {
    let ((before, after, start), _) = with_collector(|c| {
        let mut ctx = Context::root(ElementId(1), c);
        ctx.previous_node = Some(NodeKind::Style);
        let before = ctx.timeline;
        ctx.transform_into_new_timeline(c, Some(300.0));
        assert_eq!(ctx.previous_node, None);
        (before, ctx.timeline, c.timeline(ctx.timeline).start_time())
    });
    assert_ne!(before, after);
    assert_eq!(start, 300.0);
}

#[test]
fn appended_instructions_start_at_the_current_time() {
    let (timings, _) = with_collector(|c| {
        let ctx = Context::root(ElementId(1), c);
        c.timeline_mut(ctx.timeline).forward_time(100.0);
        let mut inst = TimelineInstruction::empty(ElementId(2), 20.0);
        inst.duration = 400.0;
        (
            ctx.append_instruction_to_timeline(c, &inst, None, None),
            ctx.append_instruction_to_timeline(c, &inst, Some(50.0), Some(5.0)),
        )
    });
    assert_eq!(timings.0.duration, 400.0);
    assert_eq!(timings.0.delay, 120.0);
    assert_eq!(timings.1.duration, 50.0);
    assert_eq!(timings.1.delay, 125.0);
}

#[test]
fn context_delay_ignores_non_positive_values() {
    let (start, _) = with_collector(|c| {
        let ctx = Context::root(ElementId(1), c);
        ctx.delay_next_step(c, -10.0);
        ctx.delay_next_step(c, 0.0);
        ctx.delay_next_step(c, 40.0);
        ctx.increment_time(c, 60.0);
        let t = c.timeline(ctx.timeline);
        (t.start_time(), t.duration())
    });
    assert_eq!(start, (40.0, 60.0));
}
