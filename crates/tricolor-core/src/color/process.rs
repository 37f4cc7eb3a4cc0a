use ndarray::{Array2, Zip};

use crate::frame::{Channel, ColorFrame};

/// Apply a processing function to each channel of a color frame independently.
pub fn process_color<F>(color: &ColorFrame, mut process_fn: F) -> ColorFrame
where
    F: FnMut(&Channel) -> Channel,
{
    ColorFrame {
        red: process_fn(&color.red),
        green: process_fn(&color.green),
        blue: process_fn(&color.blue),
    }
}

/// Apply a function to every `[r, g, b]` pixel of a color frame.
///
/// All three planes must share one shape.
pub fn map_pixels<F>(color: &ColorFrame, pixel_fn: F) -> ColorFrame
where
    F: Fn([f32; 3]) -> [f32; 3],
{
    let dim = color.blue.dim();
    let mut red = Array2::<f32>::zeros(dim);
    let mut green = Array2::<f32>::zeros(dim);
    let mut blue = Array2::<f32>::zeros(dim);

    Zip::from(&mut red)
        .and(&mut green)
        .and(&mut blue)
        .and(&color.red.data)
        .and(&color.green.data)
        .and(&color.blue.data)
        .for_each(|r_out, g_out, b_out, &r, &g, &b| {
            let [r2, g2, b2] = pixel_fn([r, g, b]);
            *r_out = r2;
            *g_out = g2;
            *b_out = b2;
        });

    ColorFrame {
        red: Channel::new(red),
        green: Channel::new(green),
        blue: Channel::new(blue),
    }
}
