use num::ToPrimitive;

use crate::{
    codetables::{REPR_TEMPLATE_SIMPLE_PACKING, SUPPORTED_BIT_WIDTH},
    error::*,
    helpers::{GribInt, read_as},
};

const SECT5_TEMPLATE_5_0_MIN_SIZE: usize = 15;

/// Structural part of Section 5, read for every record group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReprDefinition {
    pub num_points_encoded: u32,
    pub template_num: u16,
    payload: Box<[u8]>,
}

impl ReprDefinition {
    /// Reads the body of Section 5. Only simple packing is accepted.
    pub fn from_payload(payload: Box<[u8]>) -> Result<Self, MsmError> {
        let size = payload.len();
        if size < SECT5_TEMPLATE_5_0_MIN_SIZE {
            return Err(SectionSequenceError::SectionSizeTooSmall { num: 5, size }.into());
        }

        let buf = &payload;
        let num_points_encoded = read_as!(u32, buf, 0);
        let template_num = read_as!(u16, buf, 4);
        if template_num != REPR_TEMPLATE_SIMPLE_PACKING {
            return Err(UnsupportedProductError::DataRepresentationTemplate(template_num).into());
        }

        Ok(Self {
            num_points_encoded,
            template_num,
            payload,
        })
    }

    /// Returns the simple packing parameters of the template.
    pub fn simple_packing_param(&self) -> Result<SimplePackingParam, MsmError> {
        SimplePackingParam::from_buf(&self.payload[6..])
    }
}

/// Parameters of the simple packing decode formula
/// `Y = (R + X * 2^E) / 10^D`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplePackingParam {
    /// Reference value (R)
    pub ref_val: f32,
    /// Binary scale factor (E)
    pub exp: i16,
    /// Decimal scale factor (D)
    pub dig: i16,
    /// Number of bits used for each packed value
    pub nbit: u8,
}

impl SimplePackingParam {
    pub(crate) fn from_buf(buf: &[u8]) -> Result<Self, MsmError> {
        let ref_val = read_as!(f32, buf, 0);
        let exp = read_as!(u16, buf, 4).as_grib_int();
        let dig = read_as!(u16, buf, 6).as_grib_int();
        let nbit = read_as!(u8, buf, 8);

        if nbit != SUPPORTED_BIT_WIDTH {
            return Err(UnsupportedProductError::BitWidth(nbit).into());
        }

        Ok(Self {
            ref_val,
            exp,
            dig,
            nbit,
        })
    }

    /// Applies the decode formula to a packed value.
    pub fn decode<N: ToPrimitive>(&self, encoded: N) -> Option<f64> {
        let encoded = encoded.to_f64()?;
        let diff = encoded * 2_f64.powi(self.exp.into());
        let dig_factor = 10_f64.powi(self.dig.into());
        Some((f64::from(self.ref_val) + diff) / dig_factor)
    }
}
