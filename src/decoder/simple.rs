use super::{param::SimplePackingParam, stream::read_bits};
use crate::error::*;

/// Decodes the single sample at `index` from the body of Section 7 packed
/// with simple packing.
///
/// Only the bits of the requested sample are read; sample `k` starts at bit
/// `k * nbit` of the packed data.
pub fn decode_sample(
    param: &SimplePackingParam,
    data: &[u8],
    index: usize,
) -> Result<f64, MsmError> {
    let nbit = usize::from(param.nbit);
    let bit_offset = index
        .checked_mul(nbit)
        .ok_or(SectionSequenceError::SampleOutOfRange(index))?;
    read_bits(data, bit_offset, nbit)
        .and_then(|encoded| param.decode(encoded))
        .ok_or_else(|| SectionSequenceError::SampleOutOfRange(index).into())
}
