//! Implements the persistence codec for material parameters

mod archive;
pub use crate::codec::archive::*;
