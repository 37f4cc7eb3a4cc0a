#[allow(dead_code)]
mod common;

use ndarray::{array, s};

use tricolor_core::align::shift::{roll, shift_and_crop, OverlapWindow};
use tricolor_core::error::TricolorError;
use tricolor_core::frame::{AlignmentResult, Channel, Displacement};

use common::{identical_channels, noise_pattern};

#[test]
fn test_roll_moves_content_down_and_right() {
    let channel = Channel::new(array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let rolled = roll(&channel, Displacement::new(1, 1));
    assert_eq!(rolled.data, array![[6.0f32, 4.0, 5.0], [3.0, 1.0, 2.0]]);
}

#[test]
fn test_roll_negative_and_wrapping_shifts() {
    let channel = Channel::new(array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let left = roll(&channel, Displacement::new(0, -1));
    assert_eq!(left.data, array![[2.0f32, 3.0, 1.0], [5.0, 6.0, 4.0]]);

    // Whole multiples of the extent are no-ops.
    let full = roll(&channel, Displacement::new(4, -6));
    assert_eq!(full.data, channel.data);
}

#[test]
fn test_roll_is_inverted_by_negated_shift() {
    let channel = Channel::new(noise_pattern(13, 17, 3));
    let shift = Displacement::new(-5, 9);
    let back = roll(&roll(&channel, shift), -shift);
    assert_eq!(back, channel);
}

#[test]
fn test_overlap_window_bounds() {
    let alignment = AlignmentResult::new(Displacement::new(-2, 1), Displacement::new(3, -4));
    let window = OverlapWindow::from_alignment(&alignment, 20, 20).unwrap();
    assert_eq!(
        window,
        OverlapWindow {
            top: 3,
            bottom: 18,
            left: 1,
            right: 16,
        }
    );
    assert_eq!(window.height(), 15);
    assert_eq!(window.width(), 15);
}

#[test]
fn test_overlap_window_for_zero_shift_is_full_frame() {
    let window = OverlapWindow::from_alignment(&AlignmentResult::default(), 7, 9).unwrap();
    assert_eq!((window.height(), window.width()), (7, 9));
}

#[test]
fn test_overlap_is_positive_for_shifts_smaller_than_the_frame() {
    let (h, w) = (12usize, 9usize);
    for gy in [-5, 0, 5] {
        for ry in [-6, 2, 6] {
            for gx in [-4, 1, 4] {
                for rx in [-4, 0, 3] {
                    let alignment =
                        AlignmentResult::new(Displacement::new(gy, gx), Displacement::new(ry, rx));
                    let window = OverlapWindow::from_alignment(&alignment, h, w).unwrap();
                    assert!(window.height() > 0 && window.width() > 0, "{alignment:?}");
                }
            }
        }
    }
}

#[test]
fn test_overlap_can_be_empty_for_opposing_shifts() {
    let alignment = AlignmentResult::new(Displacement::new(6, 0), Displacement::new(-6, 0));
    let err = OverlapWindow::from_alignment(&alignment, 12, 12).unwrap_err();
    assert!(matches!(
        err,
        TricolorError::EmptyOverlap {
            height: 12,
            width: 12
        }
    ));
}

#[test]
fn test_shift_and_crop_gives_matching_shapes() {
    let channels = identical_channels(&noise_pattern(30, 25, 8));
    let alignment = AlignmentResult::new(Displacement::new(4, -3), Displacement::new(-2, 6));
    let cropped = shift_and_crop(&channels, &alignment).unwrap();

    // rows 4..28, columns 6..22
    for channel in [&cropped.red, &cropped.green, &cropped.blue] {
        assert_eq!(channel.dim(), (24, 16));
    }
    assert_eq!(cropped.blue.data, channels.blue.data.slice(s![4..28, 6..22]));
}
