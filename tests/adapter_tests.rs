mod support;

use bimcsg::adapter::{
    apply_mesh_styles, apply_polyline_styles, compute_difference, compute_intersection,
    compute_union, create_entity, create_mesh, create_polygon, create_polyline, transform_meshes,
    transform_polylines, Mesh, Style, StyleKind,
};
use bimcsg::shapes::{cuboid, unit_cube};
use nalgebra::{Matrix4, Point3, Vector3};

use crate::support::{approx_eq, volume};

const VOLUME_EPS: f64 = 1e-6;

fn cube_mesh() -> Mesh {
    create_mesh(unit_cube())
}

fn offset_cube_mesh() -> Mesh {
    create_mesh(cuboid(
        Point3::new(0.5, 0.0, 0.0),
        Point3::new(1.5, 1.0, 1.0),
    ))
}

#[test]
fn create_polygon_requires_exactly_three_indices() {
    let vertices = [
        Point3::origin(),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];

    // Malformed input policy: wrong index count yields the empty polygon.
    assert!(create_polygon(&vertices, &[0, 1, 2, 3]).is_empty());
    assert!(create_polygon(&vertices, &[0, 1]).is_empty());

    let triangle = create_polygon(&vertices, &[0, 1, 2]);
    assert_eq!(triangle.vertices.len(), 3);
    assert!(triangle.plane.is_valid());
}

#[test]
fn create_entity_carries_geometry_and_reference() {
    let entity = create_entity(
        "wall-17",
        vec![cube_mesh()],
        vec![create_polyline(vec![
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
        ])],
    );
    assert_eq!(entity.object, "wall-17");
    assert_eq!(entity.meshes.len(), 1);
    assert_eq!(entity.polylines.len(), 1);
    assert_eq!(entity.meshes[0].color, 0);
}

#[test]
fn transform_moves_vertices_and_recomputes_planes() {
    let mut meshes = vec![cube_mesh()];
    let translation = Matrix4::new_translation(&Vector3::new(10.0, -5.0, 3.0));
    transform_meshes(&mut meshes, &translation);

    assert_eq!(meshes[0].polygons.len(), 6);
    assert!(approx_eq(volume(&meshes[0].polygons), 1.0, VOLUME_EPS));
    for polygon in &meshes[0].polygons {
        let plane = polygon.plane;
        for vertex in &polygon.vertices {
            assert!((plane.normal().dot(&vertex.coords) - plane.offset()).abs() < 1e-9);
        }
    }
}

#[test]
fn transform_drops_degenerated_polygons() {
    let mut meshes = vec![cube_mesh()];
    // Flattening z collapses the four side faces to line segments.
    let flatten = Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 1.0, 0.0));
    transform_meshes(&mut meshes, &flatten);
    assert_eq!(meshes[0].polygons.len(), 2);
}

#[test]
fn transform_polylines_moves_points() {
    let mut polylines = vec![create_polyline(vec![
        Point3::origin(),
        Point3::new(1.0, 0.0, 0.0),
    ])];
    let translation = Matrix4::new_translation(&Vector3::new(0.0, 2.0, 0.0));
    transform_polylines(&mut polylines, &translation);
    assert_eq!(polylines[0].points[0], Point3::new(0.0, 2.0, 0.0));
    assert_eq!(polylines[0].points[1], Point3::new(1.0, 2.0, 0.0));
}

#[test]
fn packed_color_layout_and_clamping() {
    let red = Style::new(StyleKind::SurfaceFront, [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(red.packed_color(), 0xFF00_00FF);

    let overdriven = Style::new(StyleKind::SurfaceFront, [2.0, -1.0, 0.5, 1.5]);
    // r clamps to 255, g to 0, b scales to 127, a clamps to 255.
    assert_eq!(overdriven.packed_color(), 0xFF7F_00FF);
}

#[test]
fn meshes_take_the_first_surface_style() {
    let mut meshes = vec![cube_mesh(), cube_mesh()];
    meshes[1].color = 0x0102_0304;

    let styles = [
        Style::new(StyleKind::Curve, [1.0, 1.0, 1.0, 1.0]),
        Style::new(StyleKind::SurfaceBack, [0.0, 0.0, 1.0, 1.0]),
        Style::new(StyleKind::SurfaceFront, [1.0, 0.0, 0.0, 1.0]),
    ];
    apply_mesh_styles(&mut meshes, &styles);

    // The curve style is skipped; the first surface style colors the
    // unstyled mesh and the already-colored one is left alone.
    assert_eq!(meshes[0].color, 0xFFFF_0000);
    assert_eq!(meshes[1].color, 0x0102_0304);
}

#[test]
fn polylines_take_only_curve_styles() {
    let mut polylines = vec![create_polyline(vec![
        Point3::origin(),
        Point3::new(1.0, 0.0, 0.0),
    ])];

    apply_polyline_styles(
        &mut polylines,
        &[Style::new(StyleKind::SurfaceFront, [1.0, 0.0, 0.0, 1.0])],
    );
    assert_eq!(polylines[0].color, 0);

    apply_polyline_styles(
        &mut polylines,
        &[Style::new(StyleKind::Curve, [0.0, 1.0, 0.0, 1.0])],
    );
    assert_eq!(polylines[0].color, 0xFF00_FF00);
}

#[test]
fn union_folds_both_lists_into_one_mesh() {
    let mut left = cube_mesh();
    left.color = 0xFF12_3456;
    let result = compute_union(vec![left], vec![offset_cube_mesh()]);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].color, 0xFF12_3456);
    assert!(approx_eq(volume(&result[0].polygons), 1.5, VOLUME_EPS));
}

#[test]
fn union_with_an_empty_left_list_returns_the_right_list() {
    let right = vec![cube_mesh(), offset_cube_mesh()];
    let result = compute_union(vec![Mesh::default()], right.clone());
    assert_eq!(result, right);
}

#[test]
fn union_color_comes_from_the_first_non_empty_left_mesh() {
    let mut colored = cube_mesh();
    colored.color = 0xFFAB_CDEF;
    let result = compute_union(vec![Mesh::default(), colored], vec![offset_cube_mesh()]);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].color, 0xFFAB_CDEF);
}

#[test]
fn intersection_keeps_surviving_left_meshes() {
    let mut near = cube_mesh();
    near.color = 7;
    let far = create_mesh(cuboid(
        Point3::new(30.0, 0.0, 0.0),
        Point3::new(31.0, 1.0, 1.0),
    ));

    let result = compute_intersection(vec![near, far], vec![offset_cube_mesh()]);

    // The distant mesh intersects nothing and is dropped.
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].color, 7);
    assert!(approx_eq(volume(&result[0].polygons), 0.5, VOLUME_EPS));
}

#[test]
fn intersection_with_an_empty_operand_is_empty() {
    assert!(compute_intersection(vec![cube_mesh()], Vec::new()).is_empty());
    assert!(compute_intersection(Vec::new(), vec![cube_mesh()]).is_empty());
}

#[test]
fn intersection_accumulates_the_right_list() {
    // Two right slabs together cover the whole cube.
    let lower = create_mesh(cuboid(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.5),
    ));
    let upper = create_mesh(cuboid(
        Point3::new(0.0, 0.0, 0.5),
        Point3::new(1.0, 1.0, 1.0),
    ));
    let result = compute_intersection(vec![cube_mesh()], vec![lower, upper]);
    assert_eq!(result.len(), 1);
    assert!(approx_eq(volume(&result[0].polygons), 1.0, VOLUME_EPS));
}

#[test]
fn difference_subtracts_every_right_mesh() {
    let lower = create_mesh(cuboid(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.25),
    ));
    let upper = create_mesh(cuboid(
        Point3::new(0.0, 0.0, 0.75),
        Point3::new(1.0, 1.0, 1.0),
    ));

    let mut left = cube_mesh();
    left.color = 42;
    let result = compute_difference(vec![left], vec![lower, upper]);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].color, 42);
    assert!(approx_eq(volume(&result[0].polygons), 0.5, VOLUME_EPS));
}

#[test]
fn difference_with_an_empty_right_list_is_the_left_list() {
    let left = vec![cube_mesh()];
    let result = compute_difference(left.clone(), Vec::new());
    assert_eq!(result, left);
}

#[test]
fn difference_drops_fully_carved_meshes() {
    let cover = create_mesh(cuboid(
        Point3::new(-1.0, -1.0, -1.0),
        Point3::new(2.0, 2.0, 2.0),
    ));
    let result = compute_difference(vec![cube_mesh()], vec![cover]);
    assert!(result.is_empty());
}

#[test]
fn degenerate_operands_are_isolated() {
    // A right mesh with a two-vertex polygon fails validation; the
    // batch must skip it and still apply the valid operand.
    let broken = create_mesh(vec![bimcsg::csg::Polygon::new(vec![
        Point3::origin(),
        Point3::new(1.0, 0.0, 0.0),
    ])]);

    let result = compute_difference(vec![cube_mesh()], vec![broken, offset_cube_mesh()]);
    assert_eq!(result.len(), 1);
    assert!(approx_eq(volume(&result[0].polygons), 0.5, VOLUME_EPS));
}

#[test]
fn normalization_keeps_far_from_origin_operands_stable() {
    let offset = Vector3::new(1.0e6, -2.0e6, 3.0e6);
    let a = create_mesh(cuboid(
        Point3::from(offset),
        Point3::from(offset + Vector3::new(1.0, 1.0, 1.0)),
    ));
    let b = create_mesh(cuboid(
        Point3::from(offset + Vector3::new(0.5, 0.0, 0.0)),
        Point3::from(offset + Vector3::new(1.5, 1.0, 1.0)),
    ));

    let result = compute_difference(vec![a], vec![b]);
    assert_eq!(result.len(), 1);
    assert!(approx_eq(volume(&result[0].polygons), 0.5, 1e-3));
}
