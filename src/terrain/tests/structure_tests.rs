use crate::shapes::Collider;
use crate::terrain::{StructureRecord, Terrain};
use approx::assert_relative_eq;

fn terrain_20x20() -> Terrain {
    Terrain::new(20.0, 20.0, 1.0, 10.0).unwrap()
}

#[test]
fn ramp_interpolates_between_its_endpoint_heights() {
    let mut terrain = terrain_20x20();
    terrain.add_ramp(-5.0, 0.0, 5.0, 0.0, 4.0, 0.0, 5.0);

    // centerline: exact height at both ends, halfway in the middle
    assert_relative_eq!(terrain.field.sample(-5.0, 0.0), 0.0, epsilon = 1e-5);
    assert_relative_eq!(terrain.field.sample(5.0, 0.0), 5.0, epsilon = 1e-5);
    assert_relative_eq!(terrain.field.sample(0.0, 0.0), 2.5, epsilon = 1e-5);
}

#[test]
fn ramp_fades_quadratically_toward_its_edges() {
    let mut terrain = terrain_20x20();
    terrain.add_ramp(-5.0, 0.0, 5.0, 0.0, 4.0, 0.0, 5.0);

    // one world unit off the centerline at the midpoint:
    // weight = 1 - (1/2)^2, blending flat 0 toward 2.5
    assert_relative_eq!(terrain.field.sample(0.0, 1.0), 2.5 * 0.75, epsilon = 1e-5);
    // beyond the half-width nothing moves
    assert_relative_eq!(terrain.field.sample(0.0, 3.0), 0.0);
}

#[test]
fn ramp_has_no_end_caps() {
    let mut terrain = terrain_20x20();
    terrain.add_ramp(-5.0, 0.0, 5.0, 0.0, 4.0, 2.0, 5.0);

    // cells past the segment ends project to t outside [0, 1]
    assert_relative_eq!(terrain.field.sample(-7.0, 0.0), 0.0);
    assert_relative_eq!(terrain.field.sample(7.0, 0.0), 0.0);
}

#[test]
fn ramp_appends_a_provenance_record() {
    let mut terrain = terrain_20x20();
    terrain.add_ramp(-5.0, 0.0, 5.0, 1.0, 4.0, 0.0, 5.0);

    assert_eq!(
        terrain.structures(),
        &[StructureRecord::Ramp {
            start: [-5.0, 0.0, 0.0],
            end: [5.0, 5.0, 1.0],
            width: 4.0,
        }]
    );
}

#[test]
fn degenerate_ramp_is_a_no_op() {
    let mut terrain = terrain_20x20();
    let heights_before = terrain.field.heights().to_vec();

    terrain.add_ramp(1.0, 1.0, 1.0, 1.0, 4.0, 0.0, 5.0);
    terrain.add_ramp(-5.0, 0.0, 5.0, 0.0, 0.0, 0.0, 5.0);

    assert_eq!(terrain.field.heights(), heights_before.as_slice());
    assert!(terrain.structures().is_empty(), "no record for a no-op");
}

#[test]
fn ramp_entirely_off_grid_is_a_no_op() {
    let mut terrain = terrain_20x20();
    terrain.add_ramp(100.0, 100.0, 110.0, 100.0, 4.0, 0.0, 5.0);
    assert!(terrain.field.heights().iter().all(|&h| h == 0.0));
    assert!(terrain.structures().is_empty());
}

#[test]
fn ramp_respects_the_height_invariant() {
    let mut terrain = terrain_20x20();
    terrain.add_ramp(-5.0, 0.0, 5.0, 0.0, 4.0, -20.0, 50.0);
    for &h in terrain.field.heights() {
        assert!((0.0..=10.0).contains(&h), "height {h} escaped the range");
    }
}

#[test]
fn platform_raises_its_interior_to_height() {
    let mut terrain = terrain_20x20();
    terrain.add_platform(0.0, 0.0, 10.0, 10.0, 5.0);

    // well inside the fade band the platform is flat at its height
    assert_relative_eq!(terrain.field.sample(0.0, 0.0), 5.0);
    assert_relative_eq!(terrain.field.sample(2.0, -2.0), 5.0);
    // the rim itself fades to nothing
    assert_relative_eq!(terrain.field.sample(5.0, 0.0), 0.0);
    // outside stays flat
    assert_relative_eq!(terrain.field.sample(7.0, 0.0), 0.0);
}

#[test]
fn platform_never_lowers_terrain() {
    let mut terrain = terrain_20x20();
    for grid_z in 0..terrain.field.grid_length() {
        for grid_x in 0..terrain.field.grid_width() {
            terrain.field.set(grid_x, grid_z, 8.0);
        }
    }
    let before = terrain.field.heights().to_vec();

    terrain.add_platform(0.0, 0.0, 10.0, 10.0, 2.0);

    for (after, before) in terrain.field.heights().iter().zip(&before) {
        assert!(after >= before, "platform lowered {before} to {after}");
    }
}

#[test]
fn platform_clamps_to_the_height_scale() {
    let mut terrain = terrain_20x20();
    terrain.add_platform(0.0, 0.0, 10.0, 10.0, 999.0);
    for &h in terrain.field.heights() {
        assert!(h <= terrain.field.height_scale());
    }
    assert_relative_eq!(
        terrain.field.sample(0.0, 0.0),
        terrain.field.height_scale()
    );
}

#[test]
fn platform_appends_a_provenance_record() {
    let mut terrain = terrain_20x20();
    terrain.add_platform(1.0, -2.0, 6.0, 4.0, 3.0);

    assert_eq!(
        terrain.structures(),
        &[StructureRecord::Platform {
            center: [1.0, 3.0, -2.0],
            width: 6.0,
            length: 4.0,
        }]
    );
}

#[test]
fn degenerate_platform_is_a_no_op() {
    let mut terrain = terrain_20x20();
    terrain.add_platform(0.0, 0.0, 0.0, 10.0, 5.0);
    terrain.add_platform(0.0, 0.0, 10.0, -1.0, 5.0);
    assert!(terrain.field.heights().iter().all(|&h| h == 0.0));
    assert!(terrain.structures().is_empty());
}

#[test]
fn records_accumulate_in_order() {
    let mut terrain = terrain_20x20();
    terrain.add_platform(0.0, 0.0, 4.0, 4.0, 3.0);
    terrain.add_ramp(-5.0, 0.0, 5.0, 0.0, 2.0, 0.0, 3.0);
    terrain.add_platform(5.0, 5.0, 2.0, 2.0, 6.0);

    let kinds: Vec<&str> = terrain
        .structures()
        .iter()
        .map(|s| match s {
            StructureRecord::Platform { .. } => "platform",
            StructureRecord::Ramp { .. } => "ramp",
        })
        .collect();
    assert_eq!(kinds, ["platform", "ramp", "platform"]);
}

#[test]
fn terrain_collider_wraps_the_full_surface_mesh() {
    let terrain = terrain_20x20();
    let Collider::Mesh {
        convex,
        vertices,
        triangles,
    } = terrain.generate_collider()
    else {
        panic!("terrain should produce a mesh collider");
    };
    assert!(!convex);
    assert_eq!(vertices.len(), 21 * 21);
    assert_eq!(triangles.len(), 2 * 20 * 20);
}
