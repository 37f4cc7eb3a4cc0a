pub mod border_crop;
pub mod gaussian_blur;
pub mod histogram;
pub mod resize;
