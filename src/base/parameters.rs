use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds parameters for the plastic behavior of a solid
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub enum ParamPlasticity {
    /// No plasticity (Hookean material only)
    Elastic,

    /// von Mises plasticity model
    VonMises {
        /// Equivalent stress at the onset of plastic flow
        ///
        /// ```text
        /// f = σeq - elastic_yield
        /// ```
        elastic_yield: f64,

        /// Equivalent stress at fracture (caller-level check)
        plastic_yield: f64,

        /// Plastic flow rate multiplier (1.0 renders an instantaneous projection)
        flow_rate: f64,
    },

    /// Drucker-Prager plasticity model
    DruckerPrager {
        /// Cohesion-like term of the yield function
        ///
        /// ```text
        /// f = α I1 + √J2 - elastic_yield
        /// ```
        elastic_yield: f64,

        /// Internal friction coefficient α
        alpha: f64,

        /// Dilatancy coefficient (equal to α renders associated flow)
        dilatancy: f64,

        /// Inverse speed of the exponential hardening (zero disables hardening)
        hardening_speed: f64,

        /// Asymptotic value of the yield term under accumulated plastic strain
        hardening_limit: f64,

        /// Plastic flow rate multiplier
        flow_rate: f64,
    },

    /// Drucker-Prager plasticity model fitted to the Mohr-Coulomb surface
    MohrCoulomb {
        /// Friction angle φ in radians
        phi: f64,

        /// Cohesion c
        cohesion: f64,

        /// Use the inscribed cone (otherwise circumscribed)
        inner_approx: bool,

        /// Dilatancy coefficient
        dilatancy: f64,

        /// Inverse speed of the exponential hardening (zero disables hardening)
        hardening_speed: f64,

        /// Asymptotic value of the yield term; defaults to the fitted yield term
        #[serde(default)]
        hardening_limit: Option<f64>,

        /// Plastic flow rate multiplier
        flow_rate: f64,
    },
}

/// Holds parameters for solids
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ParamSolid {
    /// Density
    pub density: f64,

    /// Young's modulus
    pub young: f64,

    /// Poisson's coefficient
    pub poisson: f64,

    /// Plasticity parameters
    pub plasticity: ParamPlasticity,
}

impl ParamSolid {
    /// Reads a JSON file containing the parameters
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(input);
        let param = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(param)
    }

    /// Writes a JSON file with the parameters
    ///
    /// Creates the parent directory if it does not exist.
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer_pretty(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }

    /// Parses the parameters from a JSON string
    pub fn from_json(json: &str) -> Result<Self, StrError> {
        serde_json::from_str(json).map_err(|_| "cannot parse JSON string")
    }

    /// Returns a JSON string with the parameters
    pub fn to_json(&self) -> Result<String, StrError> {
        serde_json::to_string_pretty(&self).map_err(|_| "cannot serialize parameters")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
