pub mod encoding;
pub mod errors;
pub mod grid;
pub mod numeric;
pub mod sequence;
