use crate::terrain::{HeightField, NoiseGenerator};
use test_case::test_case;

fn filled(seed: u32) -> HeightField {
    let mut field = HeightField::new(20.0, 20.0, 1.0, 10.0).unwrap();
    NoiseGenerator::new(seed).fill(&mut field);
    field
}

#[test]
fn fill_is_deterministic_per_seed() {
    assert_eq!(filled(42).heights(), filled(42).heights());
}

#[test_case(0, 1)]
#[test_case(42, 43)]
#[test_case(7, 1234)]
fn different_seeds_differ(a: u32, b: u32) {
    assert_ne!(filled(a).heights(), filled(b).heights());
}

#[test]
fn fill_stays_inside_the_height_range() {
    let field = filled(42);
    for &h in field.heights() {
        assert!(
            (0.0..=field.height_scale()).contains(&h),
            "generated height {h} escaped the range"
        );
    }
}

#[test]
fn fill_produces_relief() {
    let field = filled(42);
    let first = field.heights()[0];
    assert!(
        field.heights().iter().any(|&h| (h - first).abs() > 0.01),
        "a noise fill should not be flat"
    );
}
