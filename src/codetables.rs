use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Code Table 3.2 value for a spherical earth with radius 6,371,229.0 m
pub const EARTH_SHAPE_SPHERE_6371: u8 = 6;

/// Generating process identifier of the JMA Meso-Scale Model
pub const GENERATING_PROCESS_MSM: u8 = 31;

/// Product definition template 4.0: analysis or forecast at a horizontal
/// level or in a horizontal layer at a point in time
pub const PROD_DEF_TEMPLATE_ANALYSIS_OR_FORECAST: u16 = 0;

/// Data representation template 5.0: grid point data - simple packing
pub const REPR_TEMPLATE_SIMPLE_PACKING: u16 = 0;

/// Bit width used by every packed field in MSM files
pub const SUPPORTED_BIT_WIDTH: u8 = 12;

/// Code Table 6.0 value meaning that no bitmap applies
pub const BITMAP_NONE: u8 = 255;

/// Code Table 4.1: parameter categories of discipline 0 (meteorological
/// products)
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Table4_1 {
    Temperature = 0,
    Moisture,
    Momentum,
    Mass,
    ShortWaveRadiation,
    LongWaveRadiation,
    Cloud,
    ThermodynamicStabilityIndices,
}

impl Table4_1 {
    /// Returns `true` for the categories holding the quantities of a wind
    /// profile.
    pub fn is_profile_category(&self) -> bool {
        matches!(self, Self::Momentum | Self::Mass)
    }
}
