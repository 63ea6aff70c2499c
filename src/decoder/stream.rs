/// Reads the `width`-bit unsigned integer starting at bit `bit_offset` of a
/// most-significant-bit-first bitstream.
///
/// Returns `None` if the value does not lie entirely within `data` or if
/// `width` is not in `1..=32`.
///
/// Examples
///
/// ```
/// let data = [0b1010_1100, 0b0101_0011];
/// assert_eq!(grib_msm::read_bits(&data, 0, 12), Some(0b1010_1100_0101));
/// assert_eq!(grib_msm::read_bits(&data, 4, 12), Some(0b1100_0101_0011));
/// assert_eq!(grib_msm::read_bits(&data, 5, 12), None);
/// ```
pub fn read_bits(data: &[u8], bit_offset: usize, width: usize) -> Option<u32> {
    if width == 0 || width > 32 {
        return None;
    }
    let end_bit = bit_offset.checked_add(width)?;
    if end_bit > data.len().checked_mul(8)? {
        return None;
    }

    let (start, end) = (bit_offset / 8, end_bit.div_ceil(8));
    let val = data[start..end]
        .iter()
        .fold(0_u64, |acc, byte| (acc << 8) | u64::from(*byte));
    let trailing = end * 8 - end_bit;
    let mask = (1_u64 << width) - 1;
    Some(((val >> trailing) & mask) as u32)
}
