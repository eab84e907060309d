// File: crates/stock-core/tests/panes.rs
// Purpose: Pane height distribution when indicator panes are added and removed.

use stock_core::pane::{pane_heights, PaneLayout};
use stock_core::AxisId;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn total(layout: &PaneLayout) -> f64 {
    layout.panes().iter().map(|p| p.height).sum()
}

#[test]
fn fixed_steps_up_to_four_extra_panes() {
    let mut layout = PaneLayout::new(AxisId(1));
    for (n, want_main) in [(1, 80.0), (2, 60.0), (3, 40.0), (4, 20.0)] {
        layout.add_pane(AxisId(1 + n));
        assert!(approx(layout.main().height, want_main), "after {n} adds");
        assert!(layout.panes()[1..].iter().all(|p| approx(p.height, 20.0)));
        assert!(approx(total(&layout), 100.0));
    }
}

#[test]
fn equal_shares_beyond_four() {
    let mut layout = PaneLayout::new(AxisId(1));
    for n in 1..=9usize {
        layout.add_pane(AxisId(1 + n));
        if n > 4 {
            let share = 100.0 / (n + 1) as f64;
            assert!(layout.panes().iter().all(|p| approx(p.height, share)), "after {n} adds");
        }
        assert!(approx(total(&layout), 100.0));
    }
    assert!(approx(layout.main().height, 10.0));
}

#[test]
fn removal_restores_main() {
    let mut layout = PaneLayout::new(AxisId(1));
    for n in 1..=9 {
        layout.add_pane(AxisId(1 + n));
    }
    for n in (1..=9).rev() {
        assert!(layout.remove_pane(AxisId(1 + n)));
        assert!(approx(layout.main().height, pane_heights(n - 1).0));
    }
    assert!(approx(layout.main().height, 100.0));
    assert_eq!(layout.extra_count(), 0);
}

#[test]
fn unknown_and_main_removal_are_noops() {
    let mut layout = PaneLayout::new(AxisId(1));
    layout.add_pane(AxisId(2));
    let before = layout.clone();
    assert!(!layout.remove_pane(AxisId(42)));
    assert!(!layout.remove_pane(AxisId(1)));
    assert_eq!(layout, before);

    layout.add_pane(AxisId(2));
    assert_eq!(layout, before);
}

#[test]
fn panes_stack_top_to_bottom() {
    let mut layout = PaneLayout::new(AxisId(1));
    layout.add_pane(AxisId(2));
    layout.add_pane(AxisId(3));
    for (axis, want) in [(1, (0.0, 300.0)), (2, (300.0, 100.0)), (3, (400.0, 100.0))] {
        let (offset, len) = layout.pixel_span(AxisId(axis), 500.0).unwrap();
        assert!(approx(offset, want.0) && approx(len, want.1), "axis {axis}: {offset} {len}");
    }
    assert_eq!(layout.pixel_span(AxisId(9), 500.0), None);

    assert_eq!(layout.pane_at(450.0, 500.0).map(|p| p.axis), Some(AxisId(3)));
    assert_eq!(layout.pane_at(10.0, 500.0).map(|p| p.axis), Some(AxisId(1)));
    assert!(layout.pane_at(600.0, 500.0).is_none());
}
