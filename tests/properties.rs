//! End-to-end checks of resolution, state caching and fit-content
//! containers through the public API.
//!
//! Trees here are deliberately nested a few levels deep with non-zero
//! origins at every level, so any mistake in coordinate conversion shows up
//! as an offset.

use zenframe::*;

// ---- Fixtures ----

/// window(0,0) ─ panel(40,30) ─ card(12,8) ─ target(7,5)
///             └ sidebar(300,60) ─ subject
struct Nested {
    tree: BoxTree,
    target: BoxId,
    subject: BoxId,
}

fn nested() -> Nested {
    let mut tree = BoxTree::new();
    let window = tree.insert(Rect::new(0.0, 0.0, 800.0, 600.0));
    let panel = tree.insert(Rect::new(40.0, 30.0, 400.0, 300.0));
    let card = tree.insert(Rect::new(12.0, 8.0, 200.0, 120.0));
    let target = tree.insert(Rect::new(7.0, 5.0, 64.0, 32.0));
    let sidebar = tree.insert(Rect::new(300.0, 60.0, 200.0, 400.0));
    let subject = tree.insert(Rect::new(0.0, 0.0, 10.0, 10.0));
    tree.add_child(window, panel).unwrap();
    tree.add_child(panel, card).unwrap();
    tree.add_child(card, target).unwrap();
    tree.add_child(window, sidebar).unwrap();
    tree.add_child(sidebar, subject).unwrap();
    Nested {
        tree,
        target,
        subject,
    }
}

// ---- Edge relations across ancestor chains ----

#[test]
fn left_to_left_matches_converted_frame() {
    let Nested {
        mut tree,
        target,
        subject,
    } = nested();
    let relations = Relations::new().with(Relation::left(target.left()));
    let frame = tree.configure(subject, StateKey::DEFAULT, &relations).unwrap();

    let sidebar = tree.parent(subject).unwrap();
    let expected = tree.frame_in(target, sidebar).unwrap();
    assert_eq!(frame.min_x(), expected.min_x());
    // target sits at 40 + 12 + 7 = 59 in window space; sidebar starts at 300.
    assert_eq!(frame.min_x(), -241.0);
}

#[test]
fn every_positional_anchor_converts() {
    let Nested {
        mut tree,
        target,
        subject,
    } = nested();
    let in_sidebar = tree
        .frame_in(target, tree.parent(subject).unwrap())
        .unwrap();
    for anchor in Anchor::POSITIONS {
        let relations = Relations::new().with(Relation::anchor(anchor, target.anchor(anchor)));
        let frame = tree.configure(subject, StateKey::DEFAULT, &relations).unwrap();
        assert_eq!(frame.anchor(anchor), in_sidebar.anchor(anchor), "{anchor:?}");
    }
}

#[test]
fn min_over_two_siblings() {
    let mut tree = BoxTree::new();
    let row = tree.insert(Rect::new(5.0, 5.0, 500.0, 100.0));
    let a = tree.insert(Rect::new(120.0, 0.0, 30.0, 30.0));
    let b = tree.insert(Rect::new(45.0, 40.0, 30.0, 30.0));
    let c = tree.insert(Rect::ZERO);
    for id in [a, b, c] {
        tree.add_child(row, id).unwrap();
    }

    let min = Relations::new().with(Relation::left(Source::min([a.left(), b.left()])));
    assert_eq!(tree.configure(c, "min", &min).unwrap().min_x(), 45.0);

    let max = Relations::new().with(Relation::right(Source::max([a.right(), b.right()])));
    let frame = tree.configure(c, "max", &max).unwrap();
    assert_eq!(frame.max_x(), 150.0);
}

#[test]
fn center_x_reads_back_for_any_width() {
    let mut tree = BoxTree::new();
    let b = tree.insert(Rect::ZERO);
    for width in [0.0, 0.5, 17.0, 1000.0] {
        let relations = Relations::new()
            .with(Relation::width(width))
            .with(Relation::center_x(123.25));
        let frame = tree.configure(b, StateKey::DEFAULT, &relations).unwrap();
        assert_eq!(frame.mid_x(), 123.25);
    }
}

#[test]
fn aspect_ratio_from_width() {
    let mut tree = BoxTree::new();
    let b = tree.insert(Rect::ZERO);
    let relations = Relations::new()
        .with(Relation::width(200.0))
        .with(Relation::height_to_width(0.5));
    let frame = tree.configure(b, StateKey::DEFAULT, &relations).unwrap();
    assert_eq!(frame.size(), Size::new(200.0, 100.0));
}

#[test]
fn size_settles_before_position() {
    // The right edge relation comes first but must use the final width.
    let mut tree = BoxTree::new();
    let parent = tree.insert(Rect::new(0.0, 0.0, 300.0, 100.0));
    let b = tree.insert(Rect::new(0.0, 0.0, 999.0, 999.0));
    tree.add_child(parent, b).unwrap();
    let relations = Relations::new()
        .with(Relation::right(AnchorRef::parent_right()))
        .with(Relation::bottom(AnchorRef::parent_bottom()))
        .with(Relation::width(AnchorRef::parent_width()).multiplier(0.25))
        .with(Relation::height_to_width(1.0));
    let frame = tree.configure(b, StateKey::DEFAULT, &relations).unwrap();
    assert_eq!(frame, Rect::new(225.0, 25.0, 75.0, 75.0));
}

// ---- State cache ----

#[test]
fn states_are_isolated() {
    let mut tree = BoxTree::new();
    let parent = tree.insert(Rect::new(0.0, 0.0, 400.0, 400.0));
    let b = tree.insert(Rect::ZERO);
    tree.add_child(parent, b).unwrap();

    let compact = StateKey::new("compact");
    let expanded = StateKey::new("expanded");
    let s1 = tree
        .configure(
            b,
            compact.clone(),
            &Relations::new()
                .with(Relation::width(50.0))
                .with(Relation::height(50.0))
                .with(Relation::left(10.0)),
        )
        .unwrap();
    let s2 = tree
        .configure(
            b,
            expanded.clone(),
            &Relations::new()
                .with(Relation::equal_size(Target::Parent))
                .with(Relation::top(AnchorRef::parent_top())),
        )
        .unwrap();

    assert_eq!(s2.size(), Size::new(400.0, 400.0));
    assert_eq!(tree.cached_frame(b, &compact).unwrap(), Some(s1));

    assert_eq!(tree.set_state(b, compact).unwrap(), StateSwitch::Cached(s1));
    assert_eq!(tree.frame(b).unwrap(), s1);
    assert_eq!(tree.set_state(b, expanded).unwrap(), StateSwitch::Cached(s2));
    assert_eq!(tree.frame(b).unwrap(), s2);
}

#[test]
fn configure_ignores_stale_cache() {
    let mut tree = BoxTree::new();
    let b = tree.insert(Rect::ZERO);
    tree.configure(b, "s", &Relations::new().with(Relation::width(10.0)))
        .unwrap();
    let again = tree
        .configure(b, "s", &Relations::new().with(Relation::width(20.0)))
        .unwrap();
    assert_eq!(again.width, 20.0);
    assert_eq!(tree.cached_frame(b, &"s".into()).unwrap(), Some(again));
}

#[test]
fn switching_to_unknown_state_yields_zero() {
    let mut tree = BoxTree::new();
    let b = tree.insert(Rect::ZERO);
    tree.configure(b, StateKey::DEFAULT, &Relations::new().with(Relation::width(10.0)))
        .unwrap();
    let switch = tree.set_state(b, "never-configured").unwrap();
    assert_eq!(switch, StateSwitch::ZeroFallback);
    assert_eq!(tree.frame(b).unwrap(), Rect::ZERO);
    // The default state is still there to switch back to.
    assert_eq!(tree.set_state(b, StateKey::default()).unwrap().frame().width, 10.0);
}

// ---- Fit-content containers ----

fn toolbar(tree: &mut BoxTree) -> (BoxId, BoxId, Container) {
    let button = tree.insert(Rect::ZERO);
    let caption = tree.insert(Rect::ZERO);
    let wrap = Container::new()
        .member(
            button,
            Relations::new()
                .with(Relation::width(100.0))
                .with(Relation::height(30.0))
                .with(Relation::left(AnchorRef::parent_left()))
                .with(Relation::top(AnchorRef::parent_top())),
        )
        .member(
            caption,
            Relations::new()
                .with(Relation::width(60.0))
                .with(Relation::height(12.0))
                .with(Relation::center_x(AnchorRef::parent_center_x()))
                .with(Relation::top(button.bottom()).inset(4.0)),
        );
    (button, caption, wrap)
}

#[test]
fn padding_recenters_centered_member() {
    let mut tree = BoxTree::new();
    let (button, caption, wrap) = toolbar(&mut tree);
    let container = wrap
        .padding(Insets::new(0.0, 10.0, 0.0, 10.0))
        .layout(&mut tree)
        .unwrap();
    assert_eq!(tree.frame(container).unwrap().width, 120.0);
    assert_eq!(tree.frame(caption).unwrap().mid_x(), 60.0);
    assert_eq!(tree.frame(button).unwrap().min_x(), 10.0);
}

#[test]
fn fit_content_is_idempotent() {
    let mut tree = BoxTree::new();
    let (button, caption, wrap) = toolbar(&mut tree);
    let wrap = wrap.padding(Insets::new(6.0, 2.0, 9.0, 14.0)).state("toolbar");

    let snapshot = |tree: &BoxTree, c: BoxId| {
        [c, button, caption].map(|id| tree.frame(id).unwrap())
    };
    let c1 = wrap.layout(&mut tree).unwrap();
    let first = snapshot(&tree, c1);
    let c2 = wrap.layout(&mut tree).unwrap();
    let second = snapshot(&tree, c2);

    assert_eq!(c1, c2);
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
        assert_eq!(a.width.to_bits(), b.width.to_bits());
        assert_eq!(a.height.to_bits(), b.height.to_bits());
    }
}

#[test]
fn container_inside_a_positioned_parent() {
    let mut tree = BoxTree::new();
    let window = tree.insert(Rect::new(0.0, 0.0, 800.0, 600.0));
    let (button, caption, wrap) = toolbar(&mut tree);
    let container = wrap.layout(&mut tree).unwrap();
    tree.add_child(window, container).unwrap();

    // Place the container by relation once it has its size.
    let placed = tree
        .configure(
            container,
            StateKey::DEFAULT,
            &Relations::new()
                .with(Relation::center_x(AnchorRef::parent_center_x()))
                .with(Relation::bottom(AnchorRef::parent_bottom()).inset(-20.0)),
        )
        .unwrap();
    assert_eq!(placed, Rect::new(350.0, 534.0, 100.0, 46.0));

    // Members keep container-local frames and convert into window space.
    assert_eq!(tree.frame(caption).unwrap(), Rect::new(20.0, 34.0, 60.0, 12.0));
    assert_eq!(
        tree.frame_in(caption, Some(window)).unwrap(),
        Rect::new(370.0, 568.0, 60.0, 12.0)
    );
    assert_eq!(tree.frame_in(button, None).unwrap().min_x(), 350.0);
}

#[test]
fn two_phase_protocol_by_hand() {
    let mut tree = BoxTree::new();
    let (_, caption, wrap) = toolbar(&mut tree);
    let container = wrap.prepare(&mut tree).unwrap();
    let size = wrap.measure(&mut tree, container).unwrap();
    assert_eq!(size, Size::new(100.0, 46.0));
    wrap.place(&mut tree, container).unwrap();
    assert_eq!(tree.frame(caption).unwrap().mid_x(), 50.0);
}

// ---- Errors ----

#[test]
fn errors_display() {
    let mut tree = BoxTree::new();
    let a = tree.insert(Rect::ZERO);
    let b = tree.insert(Rect::ZERO);
    tree.add_child(a, b).unwrap();
    let err = tree.add_child(b, a).unwrap_err();
    assert_eq!(err, LayoutError::Cycle { parent: b, child: a });
    assert_eq!(
        err.to_string(),
        "attaching box 0 under box 1 would create a cycle"
    );
}
