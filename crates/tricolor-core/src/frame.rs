use std::fmt;
use std::ops::{Add, Neg};
use std::path::PathBuf;

use ndarray::{s, Array2, Array3, Axis};

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{Result, TricolorError};

/// A single color plane of a plate.
/// Pixel values are f32 in [0.0, 1.0].
#[derive(Clone, Debug, PartialEq)]
pub struct Channel {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
}

impl Channel {
    pub fn new(data: Array2<f32>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// `(height, width)`
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }
}

/// Color image composed of separate channel planes.
///
/// Before compositing the planes are the raw B, G, R exposures of a plate;
/// afterwards they are registered and share one shape.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorFrame {
    pub red: Channel,
    pub green: Channel,
    pub blue: Channel,
}

impl ColorFrame {
    pub fn width(&self) -> usize {
        self.blue.width()
    }

    pub fn height(&self) -> usize {
        self.blue.height()
    }

    /// Fails with `ShapeMismatch` unless all three planes share the blue
    /// plane's shape.
    pub fn ensure_same_shape(&self) -> Result<()> {
        let (h, w) = self.blue.dim();
        for channel in [&self.green, &self.red] {
            let (ch, cw) = channel.dim();
            if (ch, cw) != (h, w) {
                return Err(TricolorError::ShapeMismatch {
                    expected_height: h,
                    expected_width: w,
                    height: ch,
                    width: cw,
                });
            }
        }
        Ok(())
    }

    /// Stack the planes into an `(height, width, 3)` array in R-G-B order.
    pub fn to_rgb_array(&self) -> Result<Array3<f32>> {
        self.ensure_same_shape()?;
        let (h, w) = self.blue.dim();
        let mut rgb = Array3::<f32>::zeros((h, w, COLOR_CHANNEL_COUNT));
        for (plane, channel) in [&self.red, &self.green, &self.blue].into_iter().enumerate() {
            rgb.index_axis_mut(Axis(2), plane).assign(&channel.data);
        }
        Ok(rgb)
    }
}

/// Integer circular translation. Positive `dy` moves content down,
/// positive `dx` moves it right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Displacement {
    pub dy: i32,
    pub dx: i32,
}

impl Displacement {
    pub const ZERO: Displacement = Displacement { dy: 0, dx: 0 };

    pub fn new(dy: i32, dx: i32) -> Self {
        Self { dy, dx }
    }

    /// Manhattan length, used to break exact score ties.
    pub fn magnitude(&self) -> u32 {
        self.dy.unsigned_abs() + self.dx.unsigned_abs()
    }

    pub fn scaled(&self, factor: i32) -> Self {
        Self {
            dy: self.dy * factor,
            dx: self.dx * factor,
        }
    }
}

impl Add for Displacement {
    type Output = Displacement;

    fn add(self, rhs: Displacement) -> Displacement {
        Displacement {
            dy: self.dy + rhs.dy,
            dx: self.dx + rhs.dx,
        }
    }
}

impl Neg for Displacement {
    type Output = Displacement;

    fn neg(self) -> Displacement {
        Displacement {
            dy: -self.dy,
            dx: -self.dx,
        }
    }
}

impl fmt::Display for Displacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dy, self.dx)
    }
}

/// Displacements of the green and red planes relative to blue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlignmentResult {
    pub green: Displacement,
    pub red: Displacement,
}

impl AlignmentResult {
    pub fn new(green: Displacement, red: Displacement) -> Self {
        Self { green, red }
    }

    pub fn scaled(&self, factor: i32) -> Self {
        Self {
            green: self.green.scaled(factor),
            red: self.red.scaled(factor),
        }
    }
}

impl Add for AlignmentResult {
    type Output = AlignmentResult;

    fn add(self, rhs: AlignmentResult) -> AlignmentResult {
        AlignmentResult {
            green: self.green + rhs.green,
            red: self.red + rhs.red,
        }
    }
}

/// A scanned plate: three exposures stacked vertically (B on top, then G, then R).
#[derive(Clone, Debug)]
pub struct Plate {
    /// Pixel data, shape = (height, width)
    pub data: Array2<f32>,
    /// Original bit depth before conversion (8 or 16)
    pub original_bit_depth: u8,
    pub source: Option<PathBuf>,
}

impl Plate {
    pub fn new(data: Array2<f32>, bit_depth: u8) -> Self {
        Self {
            data,
            original_bit_depth: bit_depth,
            source: None,
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Height of each channel; remainder rows at the bottom are dropped.
    pub fn channel_height(&self) -> usize {
        self.height() / COLOR_CHANNEL_COUNT
    }

    /// Split the plate into its B, G, R exposures.
    pub fn split(&self) -> Result<ColorFrame> {
        let h = self.channel_height();
        if h == 0 {
            return Err(TricolorError::PlateTooSmall {
                rows: self.height(),
            });
        }

        let band = |index: usize| {
            Channel::new(self.data.slice(s![index * h..(index + 1) * h, ..]).to_owned())
        };

        Ok(ColorFrame {
            blue: band(0),
            green: band(1),
            red: band(2),
        })
    }
}
