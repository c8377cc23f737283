/// 1-based inclusive GTF coordinate.
pub type PosType = u32;
/// Numeric chromosome, always greater than zero once loaded.
pub type ChromType = u32;
