//! Tests for the render pass: transform order, opacity compositing,
//! visibility, draw order, and reveal geometry.

use std::f32::consts::{FRAC_PI_2, PI};
use std::time::Duration;

use noughts::{Color, DrawOp, Node, Point, RecordingSurface, Scene, Visual};

fn rect(color: Color) -> Node {
    Node::with_visual(Visual::Rect {
        width: 10.0,
        height: 10.0,
        color,
        stroke: 0.0,
    })
}

/// Colors of the visual ops, in draw order.
fn painted_colors(surface: &RecordingSurface) -> Vec<Color> {
    surface
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::StrokeSegments { color, .. }
            | DrawOp::StrokeRect { color, .. }
            | DrawOp::FillRect { color, .. }
            | DrawOp::StrokeArc { color, .. }
            | DrawOp::DrawText { color, .. } => Some(*color),
            _ => None,
        })
        .collect()
}

#[test]
fn test_transforms_apply_in_a_fixed_order() {
    let mut scene = Scene::new();
    let color = Color::rgb(0x12, 0x34, 0x56);
    scene.insert(
        Node::with_visual(Visual::Rect {
            width: 40.0,
            height: 30.0,
            color,
            stroke: 2.0,
        })
        .at(10.0, 20.0)
        .rotated(0.5)
        .scaled(2.0, 3.0)
        .pivot(5.0, 5.0),
        scene.root(),
    );

    let mut surface = RecordingSurface::new();
    scene.render(&mut surface);

    let expected = vec![
        // Root group scope.
        DrawOp::Push,
        DrawOp::Translate { dx: 0.0, dy: 0.0 },
        DrawOp::Rotate { radians: 0.0 },
        DrawOp::Scale { sx: 1.0, sy: 1.0 },
        DrawOp::Translate { dx: 0.0, dy: 0.0 },
        DrawOp::MultiplyAlpha { alpha: 1.0 },
        // The rect node: position, rotation, scale, then pivot shift.
        DrawOp::Push,
        DrawOp::Translate { dx: 10.0, dy: 20.0 },
        DrawOp::Rotate { radians: 0.5 },
        DrawOp::Scale { sx: 2.0, sy: 3.0 },
        DrawOp::Translate { dx: -5.0, dy: -5.0 },
        DrawOp::MultiplyAlpha { alpha: 1.0 },
        DrawOp::StrokeRect {
            origin: Point::ZERO,
            width: 40.0,
            height: 30.0,
            line: 2.0,
            color,
            alpha: 1.0,
        },
        DrawOp::Pop,
        DrawOp::Pop,
    ];
    assert_eq!(surface.ops(), &expected[..]);
}

#[test]
fn test_opacity_multiplies_down_the_tree() {
    let mut scene = Scene::new();
    let root = scene.root();
    let translucent = scene.insert(Node::group(), root);
    scene
        .get_mut(translucent)
        .expect("live node")
        .alpha = 0.5;
    let inner = scene.insert(rect(Color::BLACK), translucent);
    scene.get_mut(inner).expect("live node").alpha = 0.5;
    scene.insert(rect(Color::WHITE), root);

    let mut surface = RecordingSurface::new();
    scene.render(&mut surface);

    let alphas: Vec<f32> = surface
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::FillRect { alpha, .. } => Some(*alpha),
            _ => None,
        })
        .collect();
    // The nested rect composites at 0.25; the sibling pops back to 1.
    assert_eq!(alphas, vec![0.25, 1.0]);
}

#[test]
fn test_invisible_subtree_is_skipped_whole() {
    let mut scene = Scene::new();
    let root = scene.root();
    let hidden = scene.insert(Node::group().hidden(), root);
    scene.insert(rect(Color::BLACK), hidden);
    scene.insert(rect(Color::BLACK), hidden);
    scene.insert(rect(Color::WHITE), root);

    let mut surface = RecordingSurface::new();
    scene.render(&mut surface);
    assert_eq!(surface.visual_ops(), 1);
}

#[test]
fn test_hiding_the_root_blanks_the_scene() {
    let mut scene = Scene::new();
    let root = scene.root();
    scene.insert(rect(Color::BLACK), root);
    scene.get_mut(root).expect("live root").visible = false;

    let mut surface = RecordingSurface::new();
    scene.render(&mut surface);
    assert!(surface.ops().is_empty());
}

#[test]
fn test_children_paint_over_parents_in_insertion_order() {
    let mut scene = Scene::new();
    let root = scene.root();
    let back = Color::rgb(1, 0, 0);
    let mid = Color::rgb(2, 0, 0);
    let front = Color::rgb(3, 0, 0);
    let panel = scene.insert(rect(back), root);
    scene.insert(rect(mid), panel);
    scene.insert(rect(front), root);

    let mut surface = RecordingSurface::new();
    scene.render(&mut surface);
    assert_eq!(painted_colors(&surface), vec![back, mid, front]);
}

#[test]
fn test_cross_reveal_grows_stroke_by_stroke() {
    let mut scene = Scene::new();
    let node = scene.insert(
        Node::with_visual(Visual::CrossReveal {
            side: 100.0,
            color: Color::BLACK,
            stroke: 3.0,
        })
        .animated(Duration::from_millis(1000)),
        scene.root(),
    );

    let segments_at = |scene: &Scene| -> Vec<(Point, Point)> {
        let mut surface = RecordingSurface::new();
        scene.render(&mut surface);
        surface
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::StrokeSegments { segments, .. } => Some(segments.clone()),
                _ => None,
            })
            .expect("a cross emits segments")
    };

    // Quarter way in: the first stroke has reached the center.
    scene.tick(Duration::from_millis(250));
    assert_eq!(
        segments_at(&scene),
        vec![(Point::new(-50.0, -50.0), Point::new(0.0, 0.0))]
    );

    // Three quarters in: first stroke full, second back at its corner.
    scene.tick(Duration::from_millis(500));
    assert_eq!(
        segments_at(&scene),
        vec![
            (Point::new(-50.0, -50.0), Point::new(50.0, 50.0)),
            (Point::new(50.0, -50.0), Point::new(0.0, 0.0)),
        ]
    );

    // Past the end: both strokes corner to corner.
    scene.tick(Duration::from_millis(500));
    assert_eq!(
        segments_at(&scene),
        vec![
            (Point::new(-50.0, -50.0), Point::new(50.0, 50.0)),
            (Point::new(50.0, -50.0), Point::new(-50.0, 50.0)),
        ]
    );
    assert!(scene.get(node).is_some());
}

#[test]
fn test_circle_reveal_sweeps_clockwise_from_the_top() {
    let mut scene = Scene::new();
    scene.insert(
        Node::with_visual(Visual::CircleReveal {
            radius: 90.0,
            color: Color::BLACK,
            stroke: 3.0,
        })
        .animated(Duration::from_millis(1000)),
        scene.root(),
    );
    scene.tick(Duration::from_millis(500));

    let mut surface = RecordingSurface::new();
    scene.render(&mut surface);
    let arc = surface
        .ops()
        .iter()
        .find_map(|op| match op {
            DrawOp::StrokeArc { start, sweep, radius, .. } => Some((*start, *sweep, *radius)),
            _ => None,
        })
        .expect("a circle emits an arc");
    assert_eq!(arc.0, -FRAC_PI_2);
    assert!((arc.1 - PI).abs() < 1e-5);
    assert_eq!(arc.2, 90.0);
}

#[test]
fn test_lattice_draws_only_inner_separators() {
    let mut scene = Scene::new();
    scene.insert(
        Node::with_visual(Visual::Lattice {
            cell: 200.0,
            cols: 3,
            rows: 3,
            color: Color::BLACK,
            stroke: 4.0,
        }),
        scene.root(),
    );

    let mut surface = RecordingSurface::new();
    scene.render(&mut surface);
    let segments = surface
        .ops()
        .iter()
        .find_map(|op| match op {
            DrawOp::StrokeSegments { segments, .. } => Some(segments.clone()),
            _ => None,
        })
        .expect("a lattice emits segments");
    // Two vertical and two horizontal separators, no outer border.
    assert_eq!(
        segments,
        vec![
            (Point::new(200.0, 0.0), Point::new(200.0, 600.0)),
            (Point::new(400.0, 0.0), Point::new(400.0, 600.0)),
            (Point::new(0.0, 200.0), Point::new(600.0, 200.0)),
            (Point::new(0.0, 400.0), Point::new(600.0, 400.0)),
        ]
    );
}

#[test]
fn test_node_without_a_clock_renders_complete() {
    let mut scene = Scene::new();
    scene.insert(
        Node::with_visual(Visual::CrossReveal {
            side: 100.0,
            color: Color::BLACK,
            stroke: 3.0,
        }),
        scene.root(),
    );

    let mut surface = RecordingSurface::new();
    scene.render(&mut surface);
    let segments = surface
        .ops()
        .iter()
        .find_map(|op| match op {
            DrawOp::StrokeSegments { segments, .. } => Some(segments.clone()),
            _ => None,
        })
        .expect("a cross emits segments");
    assert_eq!(segments.len(), 2);
}
