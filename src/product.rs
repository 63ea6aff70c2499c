use crate::{
    codetables::{GENERATING_PROCESS_MSM, PROD_DEF_TEMPLATE_ANALYSIS_OR_FORECAST, Table4_1},
    error::*,
    helpers::{GribInt, read_as},
};

const SECT4_TEMPLATE_4_0_MIN_SIZE: usize = 23;

/// Physical quantity a decoded value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// Geopotential height (gpm)
    Height,
    /// Pressure, in kilopascals once accumulated
    Pressure,
    /// u-component of wind (m/s)
    UWind,
    /// v-component of wind (m/s)
    VWind,
}

impl ParameterKind {
    /// Identifies the quantity from the parameter category and number of
    /// discipline 0.
    pub fn from_parameter(category: u8, number: u8) -> Option<Self> {
        match (Table4_1::try_from(category).ok()?, number) {
            (Table4_1::Momentum, 2) => Some(Self::UWind),
            (Table4_1::Momentum, 3) => Some(Self::VWind),
            (Table4_1::Mass, 1) => Some(Self::Pressure),
            (Table4_1::Mass, 5) => Some(Self::Height),
            _ => None,
        }
    }

    /// Converts a decoded value into the unit the profile is built with.
    ///
    /// Pressure is encoded in pascals and profiled in kilopascals, the unit
    /// of the standard level column.
    pub fn to_profile_unit(&self, value: f64) -> f64 {
        match self {
            Self::Pressure => value / 1_000_f64,
            _ => value,
        }
    }
}

/// Fixed surface of a product (Code Table 4.5 type, scale factor and scaled
/// value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedSurface {
    pub surface_type: u8,
    pub scale_factor: i8,
    pub scaled_value: u32,
}

impl FixedSurface {
    /// Returns the value of the surface with the scale factor applied.
    pub fn value(&self) -> f64 {
        f64::from(self.scaled_value) * 10_f64.powi(-i32::from(self.scale_factor))
    }
}

/// Product definition of one record group (Section 4, template 4.0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDescriptor {
    pub template_num: u16,
    pub parameter_category: u8,
    pub parameter_number: u8,
    pub generating_process: u8,
    /// Indicator of unit of time range (Code Table 4.4)
    pub time_unit: u8,
    /// Forecast lead time in hours
    pub forecast_time: u32,
    pub first_surface: FixedSurface,
}

impl ProductDescriptor {
    /// Reads the product definition from the body of Section 4.
    ///
    /// Every record group of an MSM file must come from the MSM generating
    /// process, whether or not it is selected later.
    pub fn from_payload(buf: &[u8]) -> Result<Self, MsmError> {
        let size = buf.len();
        if size < SECT4_TEMPLATE_4_0_MIN_SIZE {
            return Err(SectionSequenceError::SectionSizeTooSmall { num: 4, size }.into());
        }

        let generating_process = buf[7];
        if generating_process != GENERATING_PROCESS_MSM {
            return Err(UnsupportedProductError::GeneratingProcess(generating_process).into());
        }

        Ok(Self {
            template_num: read_as!(u16, buf, 2),
            parameter_category: buf[4],
            parameter_number: buf[5],
            generating_process,
            time_unit: buf[12],
            forecast_time: read_as!(u32, buf, 13),
            first_surface: FixedSurface {
                surface_type: buf[17],
                scale_factor: buf[18].as_grib_int(),
                scaled_value: read_as!(u32, buf, 19),
            },
        })
    }

    /// Returns `true` if the record group holds a quantity of a wind profile
    /// at the requested lead time.
    pub fn is_selected(&self, lead_hours: u32) -> bool {
        self.template_num == PROD_DEF_TEMPLATE_ANALYSIS_OR_FORECAST
            && self.forecast_time == lead_hours
            && Table4_1::try_from(self.parameter_category)
                .map(|category| category.is_profile_category())
                .unwrap_or(false)
    }

    /// Returns the quantity of the record group, if it is one a profile is
    /// built from.
    pub fn parameter_kind(&self) -> Option<ParameterKind> {
        ParameterKind::from_parameter(self.parameter_category, self.parameter_number)
    }
}
