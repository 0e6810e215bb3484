pub mod analysis;
pub mod crop;
pub mod recommendation;
pub mod soil_sample;

pub use analysis::*;
pub use crop::*;
pub use recommendation::*;
pub use soil_sample::*;
