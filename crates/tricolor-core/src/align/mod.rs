mod dispatcher;
pub mod flat;
pub mod metric;
pub mod pyramid;
pub mod search;
pub mod shift;

pub use dispatcher::align_channels;
pub use flat::align_flat;
pub use pyramid::align_pyramid;
pub use search::{find_best_shift, SearchWindow};
pub use shift::{roll, shift_and_crop};
