use crate::base::{real, VoigtTensor};
use crate::codec::{get_field, put_field, Archive, MaterialKind};
use crate::StrError;
use bytes::{Buf, BufMut};
use nalgebra::RealField;

/// Implements an isotropic Hookean material
///
/// Young's modulus E and Poisson's coefficient ν are the authoritative pair. The shear
/// modulus G and Lamé's first parameter λ are derived quantities:
///
/// ```text
/// G = E / (2 (1 + ν))
/// λ = E ν / ((1 + ν) (1 - 2 ν))
/// ```
///
/// Setting G directly back-solves ν from G and E. The setters reject degenerate values
/// (ν = 0.5, ν = -1, E ≤ 0, G ≤ 0) and leave the material unchanged on error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElasticMaterial<T: RealField + Copy = f64> {
    /// Density
    density: T,

    /// Young's modulus E
    young: T,

    /// Poisson's coefficient ν
    poisson: T,

    /// Shear modulus G
    shear: T,

    /// Lamé's first parameter λ
    lame: T,
}

impl<T: RealField + Copy> ElasticMaterial<T> {
    /// Allocates a new instance
    pub fn new(young: T, poisson: T, density: T) -> Result<Self, StrError> {
        check_young(young)?;
        check_poisson(poisson)?;
        check_density(density)?;
        Ok(ElasticMaterial {
            density,
            young,
            poisson,
            shear: calc_shear(young, poisson),
            lame: calc_lame(young, poisson),
        })
    }

    /// Sets the density
    pub fn set_density(&mut self, density: T) -> Result<(), StrError> {
        check_density(density)?;
        self.density = density;
        Ok(())
    }

    /// Sets Young's modulus E (also updates G and λ)
    pub fn set_young(&mut self, young: T) -> Result<(), StrError> {
        check_young(young)?;
        self.young = young;
        self.shear = calc_shear(self.young, self.poisson);
        self.lame = calc_lame(self.young, self.poisson);
        Ok(())
    }

    /// Sets Poisson's coefficient ν (also updates G and λ)
    ///
    /// Most materials have 0 < ν < 0.5; e.g., steel 0.27-0.30, aluminium 0.33, rubber 0.49.
    pub fn set_poisson(&mut self, poisson: T) -> Result<(), StrError> {
        check_poisson(poisson)?;
        self.poisson = poisson;
        self.shear = calc_shear(self.young, self.poisson);
        self.lame = calc_lame(self.young, self.poisson);
        Ok(())
    }

    /// Sets the shear modulus G (also updates ν and λ, keeping E fixed)
    ///
    /// ```text
    /// ν = E / (2 G) - 1
    /// ```
    ///
    /// Thus G must be greater than E/3 to keep ν below 0.5.
    pub fn set_shear(&mut self, shear: T) -> Result<(), StrError> {
        if !(shear > T::zero()) || !shear.is_finite() {
            return Err("shear modulus must be > 0");
        }
        let poisson = self.young / (real::<T>(2.0) * shear) - T::one();
        if check_poisson(poisson).is_err() {
            return Err("shear modulus must be > young/3");
        }
        self.shear = shear;
        self.poisson = poisson;
        self.lame = calc_lame(self.young, self.poisson);
        Ok(())
    }

    /// Returns the density
    pub fn density(&self) -> T {
        self.density
    }

    /// Returns Young's modulus E
    pub fn young(&self) -> T {
        self.young
    }

    /// Returns Poisson's coefficient ν
    pub fn poisson(&self) -> T {
        self.poisson
    }

    /// Returns the shear modulus G (Lamé's second parameter)
    pub fn shear(&self) -> T {
        self.shear
    }

    /// Returns Lamé's first parameter λ
    pub fn lame_lambda(&self) -> T {
        self.lame
    }

    /// Returns the bulk modulus K = E / (3 (1 - 2ν))
    pub fn bulk_modulus(&self) -> T {
        self.young / (real::<T>(3.0) * (T::one() - real::<T>(2.0) * self.poisson))
    }

    /// Returns the P-wave modulus M = E (1 - ν) / ((1 + ν) (1 - 2ν))
    ///
    /// The P-wave speed is √(M/ρ).
    pub fn wave_modulus(&self) -> T {
        let one = T::one();
        let nu = self.poisson;
        self.young * (one - nu) / ((one + nu) * (one - real::<T>(2.0) * nu))
    }

    /// Computes the elastic stress from the elastic strain
    ///
    /// ```text
    /// σ = λ tr(ε) I + 2 G ε
    /// ```
    pub fn compute_elastic_stress(&self, strain: &VoigtTensor<T>) -> VoigtTensor<T> {
        let two_g = real::<T>(2.0) * self.shear;
        let l_tr = self.lame * strain.volumetric_part();
        VoigtTensor::new(
            l_tr + two_g * strain.xx(),
            l_tr + two_g * strain.yy(),
            l_tr + two_g * strain.zz(),
            two_g * strain.xy(),
            two_g * strain.xz(),
            two_g * strain.yz(),
        )
    }

    /// Computes the elastic strain from the elastic stress
    ///
    /// ```text
    /// εxx = (σxx - ν σyy - ν σzz) / E   (and cyclic)
    /// εxy = σxy / (2 G)                  (and for xz, yz)
    /// ```
    pub fn compute_elastic_strain(&self, stress: &VoigtTensor<T>) -> VoigtTensor<T> {
        let inv_e = T::one() / self.young;
        let inv_2g = real::<T>(0.5) / self.shear;
        let nu = self.poisson;
        let (sxx, syy, szz) = (stress.xx(), stress.yy(), stress.zz());
        VoigtTensor::new(
            inv_e * (sxx - nu * syy - nu * szz),
            inv_e * (syy - nu * sxx - nu * szz),
            inv_e * (szz - nu * sxx - nu * syy),
            inv_2g * stress.xy(),
            inv_2g * stress.xz(),
            inv_2g * stress.yz(),
        )
    }
}

impl<T: RealField + Copy> Default for ElasticMaterial<T> {
    /// Returns a rubber-like material with E = 1e7, ν = 0.4, and density = 1000
    fn default() -> Self {
        let young = real::<T>(1e7);
        let poisson = real::<T>(0.4);
        ElasticMaterial {
            density: real::<T>(1000.0),
            young,
            poisson,
            shear: calc_shear(young, poisson),
            lame: calc_lame(young, poisson),
        }
    }
}

impl Archive for ElasticMaterial<f64> {
    const KIND: MaterialKind = MaterialKind::Elastic;

    fn write_fields<B: BufMut>(&self, buf: &mut B) {
        put_field(buf, self.density);
        put_field(buf, self.young);
        put_field(buf, self.poisson);
        put_field(buf, self.shear);
        put_field(buf, self.lame);
    }

    fn read_fields<B: Buf>(buf: &mut B) -> Result<Self, StrError> {
        let density = get_field(buf)?;
        let young = get_field(buf)?;
        let poisson = get_field(buf)?;
        let shear = get_field(buf)?;
        let lame = get_field(buf)?;
        check_density(density)?;
        check_young(young)?;
        check_poisson(poisson)?;
        if !(shear > 0.0) || !shear.is_finite() {
            return Err("shear modulus must be > 0");
        }
        if !lame.is_finite() {
            return Err("lame parameter must be finite");
        }
        if !nearly_equal(shear, calc_shear(young, poisson)) {
            return Err("shear modulus is inconsistent with young and poisson");
        }
        if !nearly_equal(lame, calc_lame(young, poisson)) {
            return Err("lame parameter is inconsistent with young and poisson");
        }
        Ok(ElasticMaterial {
            density,
            young,
            poisson,
            shear,
            lame,
        })
    }
}

/// Compares a stored derived constant with its recomputed value
fn nearly_equal(stored: f64, computed: f64) -> bool {
    (stored - computed).abs() <= 1e-12 * computed.abs()
}

/// Calculates the shear modulus G from E and ν
fn calc_shear<T: RealField + Copy>(young: T, poisson: T) -> T {
    young / (real::<T>(2.0) * (T::one() + poisson))
}

/// Calculates Lamé's first parameter λ from E and ν
fn calc_lame<T: RealField + Copy>(young: T, poisson: T) -> T {
    let one = T::one();
    poisson * young / ((one + poisson) * (one - real::<T>(2.0) * poisson))
}

fn check_density<T: RealField + Copy>(density: T) -> Result<(), StrError> {
    if !(density > T::zero()) || !density.is_finite() {
        return Err("density must be > 0");
    }
    Ok(())
}

fn check_young<T: RealField + Copy>(young: T) -> Result<(), StrError> {
    if !(young > T::zero()) || !young.is_finite() {
        return Err("young modulus must be > 0");
    }
    Ok(())
}

fn check_poisson<T: RealField + Copy>(poisson: T) -> Result<(), StrError> {
    if !(poisson > -T::one() && poisson < real::<T>(0.5)) {
        return Err("poisson must be in (-1, 0.5)");
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
