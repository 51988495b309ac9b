//! Makes available common structures needed to use the material models
//!
//! You may write `use conmat::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{ParamPlasticity, ParamSolid, SampleParams, VoigtTensor};
pub use crate::codec::{peek_kind, Archive, MaterialKind};
pub use crate::material::{
    DruckerPragerPlastic, ElasticMaterial, ElastoplasticTrait, LocalState, PlasticModel, VonMisesPlastic,
};
