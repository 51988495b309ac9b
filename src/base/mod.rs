//! Implements the base structures: tensors, constants, and parameters

mod constants;
mod parameters;
mod sample_params;
mod voigt_tensor;
pub use crate::base::constants::*;
pub use crate::base::parameters::*;
pub use crate::base::sample_params::*;
pub use crate::base::voigt_tensor::*;
