//! Individual value generators used to assemble a record.

pub mod numeric;
pub mod text;
pub mod timestamp;
pub mod token;
pub mod uuid;
