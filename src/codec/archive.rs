//! Versioned binary archive for material parameters
//!
//! Every archive starts with a fixed 2-byte header followed by the scalar fields
//! of the material as little-endian f64 values:
//!
//! ```text
//! Byte 0: Archive version (ARCHIVE_VERSION)
//! Byte 1: Material kind (see MaterialKind)
//! Then, in this order (parent fields first):
//!     elastic:        density, E, v, G, l
//!     von Mises:      [elastic], elastic_yield, plastic_yield, flow_rate
//!     Drucker-Prager: [elastic], elastic_yield, alpha, dilatancy,
//!                     hardening_speed, hardening_limit, flow_rate
//! ```

use crate::StrError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Archive header size in bytes
pub const ARCHIVE_HEADER_SIZE: usize = 2;

/// Current archive version
pub const ARCHIVE_VERSION: u8 = 1;

/// Identifies the material stored in an archive
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum MaterialKind {
    /// Isotropic Hookean material
    Elastic = 1,

    /// von Mises elastoplastic material
    VonMises = 2,

    /// Drucker-Prager elastoplastic material
    DruckerPrager = 3,
}

impl MaterialKind {
    /// Returns the kind corresponding to a header byte, if any
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            1 => Some(MaterialKind::Elastic),
            2 => Some(MaterialKind::VonMises),
            3 => Some(MaterialKind::DruckerPrager),
            _ => None,
        }
    }

    /// Returns the header byte of this kind
    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// Defines the serialization of material parameters into a versioned binary archive
pub trait Archive: Sized {
    /// Holds the kind tag written to the header
    const KIND: MaterialKind;

    /// Writes the scalar fields (parent fields first)
    fn write_fields<B: BufMut>(&self, buf: &mut B);

    /// Reads the scalar fields in the same order as written and validates them
    fn read_fields<B: Buf>(buf: &mut B) -> Result<Self, StrError>;

    /// Serializes the material, including the header
    fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(ARCHIVE_HEADER_SIZE + 16 * 8);
        buf.put_u8(ARCHIVE_VERSION);
        buf.put_u8(Self::KIND.to_byte());
        self.write_fields(&mut buf);
        buf.freeze()
    }

    /// Deserializes the material, checking the header and the total length
    fn decode(data: &[u8]) -> Result<Self, StrError> {
        let mut buf = data;
        let kind = read_header(&mut buf)?;
        if kind != Self::KIND {
            return Err("archive holds a different material kind");
        }
        let material = Self::read_fields(&mut buf)?;
        if buf.has_remaining() {
            return Err("archive has trailing bytes");
        }
        Ok(material)
    }
}

/// Returns the kind of material stored in an archive without decoding it
pub fn peek_kind(data: &[u8]) -> Result<MaterialKind, StrError> {
    let mut buf = data;
    read_header(&mut buf)
}

/// Reads and checks the header, returning the stored kind
fn read_header<B: Buf>(buf: &mut B) -> Result<MaterialKind, StrError> {
    if buf.remaining() < ARCHIVE_HEADER_SIZE {
        return Err("archive is too short for the header");
    }
    let version = buf.get_u8();
    if version != ARCHIVE_VERSION {
        return Err("archive version is not supported");
    }
    MaterialKind::from_byte(buf.get_u8()).ok_or("archive has an unknown material kind")
}

/// Writes a scalar field
#[inline]
pub(crate) fn put_field<B: BufMut>(buf: &mut B, value: f64) {
    buf.put_f64_le(value);
}

/// Reads a scalar field
#[inline]
pub(crate) fn get_field<B: Buf>(buf: &mut B) -> Result<f64, StrError> {
    if buf.remaining() < 8 {
        return Err("archive is too short for the material fields");
    }
    Ok(buf.get_f64_le())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{get_field, peek_kind, put_field, MaterialKind, ARCHIVE_VERSION};
    use bytes::BytesMut;

    #[test]
    fn material_kind_works() {
        for kind in [MaterialKind::Elastic, MaterialKind::VonMises, MaterialKind::DruckerPrager] {
            assert_eq!(MaterialKind::from_byte(kind.to_byte()), Some(kind));
        }
        assert_eq!(MaterialKind::from_byte(0), None);
        assert_eq!(MaterialKind::from_byte(4), None);
    }

    #[test]
    fn peek_kind_captures_errors() {
        assert_eq!(peek_kind(&[]).err(), Some("archive is too short for the header"));
        assert_eq!(peek_kind(&[ARCHIVE_VERSION]).err(), Some("archive is too short for the header"));
        assert_eq!(peek_kind(&[0, 1]).err(), Some("archive version is not supported"));
        assert_eq!(
            peek_kind(&[ARCHIVE_VERSION, 9]).err(),
            Some("archive has an unknown material kind")
        );
        assert_eq!(peek_kind(&[ARCHIVE_VERSION, 2]), Ok(MaterialKind::VonMises));
    }

    #[test]
    fn fields_are_little_endian_and_bit_exact() {
        let mut buf = BytesMut::new();
        put_field(&mut buf, 0.1);
        put_field(&mut buf, -0.0);
        assert_eq!(&buf[0..8], &0.1f64.to_le_bytes());
        let mut data = &buf[..];
        assert_eq!(get_field(&mut data).unwrap().to_bits(), 0.1f64.to_bits());
        assert_eq!(get_field(&mut data).unwrap().to_bits(), (-0.0f64).to_bits());
        assert_eq!(
            get_field(&mut data).err(),
            Some("archive is too short for the material fields")
        );
    }
}
