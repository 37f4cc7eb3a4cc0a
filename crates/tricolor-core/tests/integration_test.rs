#[allow(dead_code)]
mod common;

use ndarray::s;
use tricolor_core::align::align_channels;
use tricolor_core::align::flat::align_flat;
use tricolor_core::align::metric::SimilarityMetric;
use tricolor_core::composite::compose;
use tricolor_core::frame::Displacement;
use tricolor_core::pipeline::config::{AlignmentMethod, FlatConfig};

use common::{build_plate, noise_pattern, offset_channels};

fn flat_window(window_radius: i32) -> FlatConfig {
    FlatConfig {
        window_radius,
        metric: SimilarityMetric::EuclideanDistance,
    }
}

#[test]
fn test_plate_to_composite() {
    let pattern = noise_pattern(20, 20, 42);
    let channels = offset_channels(&pattern, Displacement::new(2, -1), Displacement::new(-3, 4));
    let plate = build_plate(&channels, 2);
    assert_eq!(plate.height(), 62);

    let split = plate.split().unwrap();
    assert_eq!(split, channels);

    let alignment = align_flat(&split, &flat_window(10)).unwrap();
    assert_eq!(alignment.green, Displacement::new(-2, 1));
    assert_eq!(alignment.red, Displacement::new(3, -4));

    let composite = compose(&split, &alignment).unwrap();
    assert_eq!(composite.blue.dim(), (15, 15));

    let expected = pattern.slice(s![3..18, 1..16]);
    assert_eq!(composite.blue.data, expected);
    assert_eq!(composite.green.data, expected);
    assert_eq!(composite.red.data, expected);

    let rgb = composite.to_rgb_array().unwrap();
    assert_eq!(rgb.dim(), (15, 15, 3));
    assert_eq!(rgb[[0, 0, 0]], pattern[[3, 1]]);
    assert_eq!(rgb[[14, 14, 2]], pattern[[17, 15]]);
}

#[test]
fn test_dispatcher_selects_flat() {
    let pattern = noise_pattern(30, 24, 9);
    let channels = offset_channels(&pattern, Displacement::new(-1, 3), Displacement::new(4, 0));

    let method = AlignmentMethod::Flat(flat_window(6));
    let alignment = align_channels(&channels, &method).unwrap();
    assert_eq!(alignment.green, Displacement::new(1, -3));
    assert_eq!(alignment.red, Displacement::new(-4, 0));
}

#[test]
fn test_composite_of_aligned_channels_keeps_full_size() {
    let pattern = noise_pattern(18, 21, 5);
    let channels = offset_channels(&pattern, Displacement::ZERO, Displacement::ZERO);

    let alignment = align_flat(&channels, &flat_window(4)).unwrap();
    let composite = compose(&channels, &alignment).unwrap();
    assert_eq!(composite, channels);
}
