mod flagship;
pub mod model;

pub use flagship::*;
pub use model::*;
