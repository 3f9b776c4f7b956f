pub mod initialize;
pub mod withdraw;

pub use initialize::*;
pub use withdraw::*;
