use super::real;
use nalgebra::{Matrix3, RealField, Vector6};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Implements a symmetric second-order tensor (stress or strain) in Voigt notation
///
/// The six components are stored in the following order:
///
/// ```text
/// [XX, YY, ZZ, XY, XZ, YZ]
/// ```
///
/// The shear entries are the tensor components themselves (not the engineering shear
/// strains γ = 2ε). The lower triangle of the corresponding 3×3 matrix is implied by symmetry.
///
/// All invariants are computed on demand from the six components; nothing else is stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoigtTensor<T: RealField + Copy = f64> {
    vec: Vector6<T>,
}

impl<T: RealField + Copy> VoigtTensor<T> {
    /// Allocates a new instance from its six components
    pub fn new(xx: T, yy: T, zz: T, xy: T, xz: T, yz: T) -> Self {
        VoigtTensor {
            vec: Vector6::new(xx, yy, zz, xy, xz, yz),
        }
    }

    /// Allocates a tensor with all components equal to zero
    pub fn zero() -> Self {
        VoigtTensor { vec: Vector6::zeros() }
    }

    /// Allocates the second-order identity tensor
    pub fn identity() -> Self {
        let (o, l) = (T::zero(), T::one());
        VoigtTensor::new(l, l, l, o, o, o)
    }

    /// Allocates a new instance from a 3×3 matrix
    ///
    /// Only the diagonal and the upper triangle are read.
    pub fn from_matrix(matrix: &Matrix3<T>) -> Self {
        let mut tensor = VoigtTensor::zero();
        tensor.set_from_matrix(matrix);
        tensor
    }

    /// Sets this tensor from a 3×3 matrix (diagonal and upper triangle)
    pub fn set_from_matrix(&mut self, matrix: &Matrix3<T>) {
        self.vec[0] = matrix[(0, 0)];
        self.vec[1] = matrix[(1, 1)];
        self.vec[2] = matrix[(2, 2)];
        self.vec[3] = matrix[(0, 1)];
        self.vec[4] = matrix[(0, 2)];
        self.vec[5] = matrix[(1, 2)];
    }

    /// Returns the symmetric 3×3 matrix corresponding to this tensor
    pub fn to_matrix(&self) -> Matrix3<T> {
        let (xx, yy, zz) = (self.xx(), self.yy(), self.zz());
        let (xy, xz, yz) = (self.xy(), self.xz(), self.yz());
        #[rustfmt::skip]
        let matrix = Matrix3::new(
            xx, xy, xz,
            xy, yy, yz,
            xz, yz, zz,
        );
        matrix
    }

    /// Returns an access to the underlying vector of components
    pub fn vector(&self) -> &Vector6<T> {
        &self.vec
    }

    /// Returns a mutable access to the underlying vector of components
    pub fn vector_mut(&mut self) -> &mut Vector6<T> {
        &mut self.vec
    }

    /// Returns the xx component
    #[inline]
    pub fn xx(&self) -> T {
        self.vec[0]
    }

    /// Returns the yy component
    #[inline]
    pub fn yy(&self) -> T {
        self.vec[1]
    }

    /// Returns the zz component
    #[inline]
    pub fn zz(&self) -> T {
        self.vec[2]
    }

    /// Returns the xy component
    #[inline]
    pub fn xy(&self) -> T {
        self.vec[3]
    }

    /// Returns the xz component
    #[inline]
    pub fn xz(&self) -> T {
        self.vec[4]
    }

    /// Returns the yz component
    #[inline]
    pub fn yz(&self) -> T {
        self.vec[5]
    }

    /// Sets the xx component
    #[inline]
    pub fn set_xx(&mut self, value: T) {
        self.vec[0] = value;
    }

    /// Sets the yy component
    #[inline]
    pub fn set_yy(&mut self, value: T) {
        self.vec[1] = value;
    }

    /// Sets the zz component
    #[inline]
    pub fn set_zz(&mut self, value: T) {
        self.vec[2] = value;
    }

    /// Sets the xy component
    #[inline]
    pub fn set_xy(&mut self, value: T) {
        self.vec[3] = value;
    }

    /// Sets the xz component
    #[inline]
    pub fn set_xz(&mut self, value: T) {
        self.vec[4] = value;
    }

    /// Sets the yz component
    #[inline]
    pub fn set_yz(&mut self, value: T) {
        self.vec[5] = value;
    }

    /// Returns the volumetric part (the trace)
    ///
    /// ```text
    /// V = Txx + Tyy + Tzz
    /// ```
    pub fn volumetric_part(&self) -> T {
        self.xx() + self.yy() + self.zz()
    }

    /// Returns the deviatoric part
    ///
    /// ```text
    /// dev(T) = T - (V/3) I
    /// ```
    pub fn deviatoric_part(&self) -> Self {
        let mut dev = VoigtTensor::zero();
        self.deviatoric_part_into(&mut dev);
        dev
    }

    /// Writes the deviatoric part into a caller-owned tensor
    pub fn deviatoric_part_into(&self, dev: &mut VoigtTensor<T>) {
        let mean = self.volumetric_part() / real::<T>(3.0);
        dev.vec.copy_from(&self.vec);
        dev.vec[0] -= mean;
        dev.vec[1] -= mean;
        dev.vec[2] -= mean;
    }

    /// Returns the first invariant I1 (the trace)
    pub fn invariant_i1(&self) -> T {
        self.xx() + self.yy() + self.zz()
    }

    /// Returns the second invariant I2
    pub fn invariant_i2(&self) -> T {
        let (xx, yy, zz) = (self.xx(), self.yy(), self.zz());
        let (xy, xz, yz) = (self.xy(), self.xz(), self.yz());
        xx * yy + yy * zz + xx * zz - xy * xy - yz * yz - xz * xz
    }

    /// Returns the third invariant I3 (the determinant)
    pub fn invariant_i3(&self) -> T {
        let (xx, yy, zz) = (self.xx(), self.yy(), self.zz());
        let (xy, xz, yz) = (self.xy(), self.xz(), self.yz());
        xx * yy * zz + real::<T>(2.0) * xy * yz * xz - xy * xy * zz - yz * yz * xx - xz * xz * yy
    }

    /// Returns the first invariant of the deviatoric part (always zero)
    pub fn invariant_j1(&self) -> T {
        T::zero()
    }

    /// Returns the second invariant of the deviatoric part
    ///
    /// ```text
    /// J2 = I1²/3 - I2 = ½ (sxx² + syy² + szz²) + Txy² + Txz² + Tyz²
    /// ```
    ///
    /// The sum of squares is used, thus the result is never negative.
    pub fn invariant_j2(&self) -> T {
        let mean = self.volumetric_part() / real::<T>(3.0);
        let (sxx, syy, szz) = (self.xx() - mean, self.yy() - mean, self.zz() - mean);
        let (xy, xz, yz) = (self.xy(), self.xz(), self.yz());
        real::<T>(0.5) * (sxx * sxx + syy * syy + szz * szz) + xy * xy + xz * xz + yz * yz
    }

    /// Returns the third invariant of the deviatoric part
    pub fn invariant_j3(&self) -> T {
        let i1 = self.invariant_i1();
        let i2 = self.invariant_i2();
        i1 * i1 * i1 * real::<T>(2.0 / 27.0) - i1 * i2 / real::<T>(3.0) + self.invariant_i3()
    }

    /// Returns the von Mises equivalent value
    ///
    /// ```text
    /// √(½[(Txx-Tyy)² + (Tyy-Tzz)² + (Tzz-Txx)²] + 3(Txy² + Txz² + Tyz²))
    /// ```
    pub fn equivalent_von_mises(&self) -> T {
        let (xx, yy, zz) = (self.xx(), self.yy(), self.zz());
        let (xy, xz, yz) = (self.xy(), self.xz(), self.yz());
        let (a, b, c) = (xx - yy, yy - zz, zz - xx);
        let normal = real::<T>(0.5) * (a * a + b * b + c * c);
        let shear = real::<T>(3.0) * (xy * xy + xz * xz + yz * yz);
        (normal + shear).sqrt()
    }

    /// Returns the double contraction with another symmetric tensor
    ///
    /// ```text
    /// A : B = Σᵢⱼ Aᵢⱼ Bᵢⱼ
    /// ```
    pub fn ddot(&self, other: &VoigtTensor<T>) -> T {
        let a = &self.vec;
        let b = &other.vec;
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + real::<T>(2.0) * (a[3] * b[3] + a[4] * b[4] + a[5] * b[5])
    }
}

impl<T: RealField + Copy> Default for VoigtTensor<T> {
    fn default() -> Self {
        VoigtTensor::zero()
    }
}

impl<T: RealField + Copy> From<Matrix3<T>> for VoigtTensor<T> {
    fn from(matrix: Matrix3<T>) -> Self {
        VoigtTensor::from_matrix(&matrix)
    }
}

impl<T: RealField + Copy> Add for VoigtTensor<T> {
    type Output = VoigtTensor<T>;
    fn add(self, rhs: Self) -> Self::Output {
        VoigtTensor { vec: self.vec + rhs.vec }
    }
}

impl<T: RealField + Copy> Sub for VoigtTensor<T> {
    type Output = VoigtTensor<T>;
    fn sub(self, rhs: Self) -> Self::Output {
        VoigtTensor { vec: self.vec - rhs.vec }
    }
}

impl<T: RealField + Copy> Neg for VoigtTensor<T> {
    type Output = VoigtTensor<T>;
    fn neg(self) -> Self::Output {
        VoigtTensor { vec: -self.vec }
    }
}

impl<T: RealField + Copy> Mul<T> for VoigtTensor<T> {
    type Output = VoigtTensor<T>;
    fn mul(self, rhs: T) -> Self::Output {
        VoigtTensor { vec: self.vec * rhs }
    }
}

impl<T: RealField + Copy> AddAssign for VoigtTensor<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.vec += rhs.vec;
    }
}

impl<T: RealField + Copy> SubAssign for VoigtTensor<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.vec -= rhs.vec;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
