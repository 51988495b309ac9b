//! Conmat implements constitutive models for continuum materials
//!
//! The crate provides a symmetric second-order tensor in Voigt notation with its invariants,
//! the isotropic Hookean material, and elastoplastic materials (von Mises and Drucker-Prager,
//! the latter optionally fitted to the Mohr-Coulomb surface) with a return-mapping interface.
//! The materials are stateless: the caller owns the strain history (see [material::LocalState]).
//!
//! # Example
//!
//! ```
//! use conmat::prelude::*;
//! use conmat::StrError;
//!
//! fn main() -> Result<(), StrError> {
//!     let param = SampleParams::param_steel();
//!     let model = PlasticModel::new(&param)?;
//!     let mut state = LocalState::new();
//!     let delta = VoigtTensor::new(0.0, 0.0, 0.0, 1e-3, 0.0, 0.0);
//!     for _ in 0..5 {
//!         state.update(model.actual.as_ref(), &delta);
//!     }
//!     assert!(state.loading);
//!     assert!(model.actual.yield_function(&state.stress) < 1e-6);
//!     Ok(())
//! }
//! ```

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod codec;
pub mod material;
pub mod prelude;
