use crate::{codetables::BITMAP_NONE, error::*};

mod param;
mod simple;
mod stream;

pub use param::{ReprDefinition, SimplePackingParam};
pub use simple::decode_sample;
pub use stream::read_bits;

/// Checks the body of Section 6.
///
/// MSM files never carry a bitmap, so the indicator must say that none
/// applies.
pub fn check_bitmap(buf: &[u8]) -> Result<(), MsmError> {
    let indicator = *buf.first().ok_or(SectionSequenceError::SectionSizeTooSmall {
        num: 6,
        size: buf.len(),
    })?;
    if indicator != BITMAP_NONE {
        return Err(UnsupportedProductError::Bitmap(indicator).into());
    }
    Ok(())
}
