//! Implements material models

mod drucker_prager;
mod elastic_material;
mod elastoplastic_trait;
mod local_state;
mod plastic_model;
mod von_mises;
pub use crate::material::drucker_prager::*;
pub use crate::material::elastic_material::*;
pub use crate::material::elastoplastic_trait::*;
pub use crate::material::local_state::*;
pub use crate::material::plastic_model::*;
pub use crate::material::von_mises::*;
