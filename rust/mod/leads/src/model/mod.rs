mod lead;
mod location;

pub use lead::*;
pub use location::*;
