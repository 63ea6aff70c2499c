#![allow(dead_code)]

use std::io::{self, Write};

use tempfile::NamedTempFile;

/// One record group (Sections 4 to 7) of a synthetic MSM file.
#[derive(Clone)]
pub(crate) struct Record {
    pub(crate) template_num: u16,
    pub(crate) category: u8,
    pub(crate) number: u8,
    pub(crate) generating_process: u8,
    pub(crate) forecast_time: u32,
    pub(crate) level: u32,
    pub(crate) repr_template_num: u16,
    pub(crate) ref_val: f32,
    /// Binary scale factor, sign-magnitude encoded
    pub(crate) exp: u16,
    /// Decimal scale factor, sign-magnitude encoded
    pub(crate) dig: u16,
    pub(crate) nbit: u8,
    pub(crate) bitmap_indicator: u8,
    pub(crate) samples: Vec<u32>,
    /// Section numbers written for Sections 4 to 7
    pub(crate) section_nums: [u8; 4],
}

impl Record {
    pub(crate) fn new(category: u8, number: u8, forecast_time: u32, samples: Vec<u32>) -> Self {
        Self {
            template_num: 0,
            category,
            number,
            generating_process: 31,
            forecast_time,
            level: 0,
            repr_template_num: 0,
            ref_val: 0.0,
            exp: 0,
            dig: 0,
            nbit: 12,
            bitmap_indicator: 255,
            samples,
            section_nums: [4, 5, 6, 7],
        }
    }

    pub(crate) fn height(forecast_time: u32, samples: Vec<u32>) -> Self {
        Self::new(3, 5, forecast_time, samples)
    }

    pub(crate) fn pressure(forecast_time: u32, samples: Vec<u32>) -> Self {
        Self::new(3, 1, forecast_time, samples)
    }

    pub(crate) fn u_wind(forecast_time: u32, samples: Vec<u32>) -> Self {
        Self::new(2, 2, forecast_time, samples)
    }

    pub(crate) fn v_wind(forecast_time: u32, samples: Vec<u32>) -> Self {
        Self::new(2, 3, forecast_time, samples)
    }

    pub(crate) fn with_scaling(mut self, ref_val: f32, exp: u16, dig: u16) -> Self {
        self.ref_val = ref_val;
        self.exp = exp;
        self.dig = dig;
        self
    }

    pub(crate) fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    fn write_to(&self, buf: &mut Vec<u8>) {
        let mut sect4 = vec![0; 29];
        sect4[2..4].copy_from_slice(&self.template_num.to_be_bytes());
        sect4[4] = self.category;
        sect4[5] = self.number;
        sect4[6] = 2;
        sect4[7] = self.generating_process;
        sect4[12] = 1;
        sect4[13..17].copy_from_slice(&self.forecast_time.to_be_bytes());
        sect4[17] = if self.level == 0 { 1 } else { 100 };
        sect4[19..23].copy_from_slice(&self.level.to_be_bytes());
        sect4[23] = 255;
        write_section(buf, self.section_nums[0], &sect4);

        let mut sect5 = vec![0; 16];
        sect5[0..4].copy_from_slice(&(self.samples.len() as u32).to_be_bytes());
        sect5[4..6].copy_from_slice(&self.repr_template_num.to_be_bytes());
        sect5[6..10].copy_from_slice(&self.ref_val.to_be_bytes());
        sect5[10..12].copy_from_slice(&self.exp.to_be_bytes());
        sect5[12..14].copy_from_slice(&self.dig.to_be_bytes());
        sect5[14] = self.nbit;
        write_section(buf, self.section_nums[1], &sect5);

        write_section(buf, self.section_nums[2], &[self.bitmap_indicator]);

        let sect7 = pack(&self.samples, usize::from(self.nbit));
        write_section(buf, self.section_nums[3], &sect7);
    }
}

/// Builder of synthetic MSM GRIB2 files on a regular lat/lon grid scanned
/// west to east and north to south.
#[derive(Clone)]
pub(crate) struct MsmFileBuilder {
    pub(crate) magic: [u8; 4],
    pub(crate) edition: u8,
    pub(crate) prod_status: u8,
    /// Year, month, day, hour, minute and second of the reference time
    pub(crate) ref_time: (u16, u8, u8, u8, u8, u8),
    pub(crate) local_use: Option<Vec<u8>>,
    pub(crate) ni: u32,
    pub(crate) nj: u32,
    pub(crate) num_points: Option<u32>,
    pub(crate) first_point: (u32, u32),
    pub(crate) increments: (u32, u32),
    pub(crate) earth_shape: u8,
    pub(crate) scanning_mode: u8,
    pub(crate) records: Vec<Record>,
    pub(crate) end_marker: [u8; 4],
}

impl MsmFileBuilder {
    /// A grid of `ni` x `nj` points starting at 36N 135E with 0.0625 degree
    /// longitude and 0.05 degree latitude increments.
    pub(crate) fn new(ni: u32, nj: u32) -> Self {
        Self {
            magic: *b"GRIB",
            edition: 2,
            prod_status: 0,
            ref_time: (2016, 8, 22, 3, 0, 0),
            local_use: None,
            ni,
            nj,
            num_points: None,
            first_point: (36_000_000, 135_000_000),
            increments: (62_500, 50_000),
            earth_shape: 6,
            scanning_mode: 0,
            records: Vec::new(),
            end_marker: *b"7777",
        }
    }

    pub(crate) fn record(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    pub(crate) fn num_points(&self) -> usize {
        (self.ni * self.nj) as usize
    }

    /// Returns samples that are all zero except `value` at `index`.
    pub(crate) fn samples_with(&self, index: usize, value: u32) -> Vec<u32> {
        let mut samples = vec![0; self.num_points()];
        samples[index] = value;
        samples
    }

    /// Latitude and longitude in degrees of the grid point at `index`.
    pub(crate) fn point_of(&self, index: usize) -> (f64, f64) {
        let (i, j) = (index as u32 % self.ni, index as u32 / self.ni);
        let (la1, lo1) = self.first_point;
        let (di, dj) = self.increments;
        let lat = f64::from(la1 - dj * j) / 1_000_000_f64;
        let lon = f64::from(lo1 + di * i) / 1_000_000_f64;
        (lat, lon)
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut body = Vec::new();

        let mut sect1 = vec![0; 16];
        sect1[0..2].copy_from_slice(&34_u16.to_be_bytes());
        sect1[4] = 5;
        sect1[5] = 1;
        sect1[6] = 1;
        let (year, month, day, hour, minute, second) = self.ref_time;
        sect1[7..9].copy_from_slice(&year.to_be_bytes());
        sect1[9] = month;
        sect1[10] = day;
        sect1[11] = hour;
        sect1[12] = minute;
        sect1[13] = second;
        sect1[14] = self.prod_status;
        sect1[15] = 1;
        write_section(&mut body, 1, &sect1);

        if let Some(local_use) = &self.local_use {
            write_section(&mut body, 2, local_use);
        }

        let (la1, lo1) = self.first_point;
        let (di, dj) = self.increments;
        let la2 = la1 - dj * (self.nj - 1);
        let lo2 = lo1 + di * (self.ni - 1);
        let num_points = self.num_points.unwrap_or(self.ni * self.nj);
        let mut sect3 = vec![0; 67];
        sect3[1..5].copy_from_slice(&num_points.to_be_bytes());
        sect3[9] = self.earth_shape;
        sect3[25..29].copy_from_slice(&self.ni.to_be_bytes());
        sect3[29..33].copy_from_slice(&self.nj.to_be_bytes());
        sect3[41..45].copy_from_slice(&la1.to_be_bytes());
        sect3[45..49].copy_from_slice(&lo1.to_be_bytes());
        sect3[49] = 0x30;
        sect3[50..54].copy_from_slice(&la2.to_be_bytes());
        sect3[54..58].copy_from_slice(&lo2.to_be_bytes());
        sect3[58..62].copy_from_slice(&di.to_be_bytes());
        sect3[62..66].copy_from_slice(&dj.to_be_bytes());
        sect3[66] = self.scanning_mode;
        write_section(&mut body, 3, &sect3);

        for record in &self.records {
            record.write_to(&mut body);
        }

        let total_length = (16 + body.len() + 4) as u64;
        let mut buf = Vec::with_capacity(total_length as usize);
        buf.extend_from_slice(&self.magic);
        buf.extend_from_slice(&[0, 0, 0, self.edition]);
        buf.extend_from_slice(&total_length.to_be_bytes());
        buf.extend_from_slice(&body);
        buf.extend_from_slice(&self.end_marker);
        buf
    }

    pub(crate) fn build_to_tempfile(&self) -> Result<NamedTempFile, io::Error> {
        write_to_tempfile(&self.build())
    }
}

pub(crate) fn write_to_tempfile(buf: &[u8]) -> Result<NamedTempFile, io::Error> {
    let mut out = NamedTempFile::new()?;
    out.write_all(buf)?;
    out.flush()?;
    Ok(out)
}

fn write_section(buf: &mut Vec<u8>, num: u8, body: &[u8]) {
    let size = (body.len() + 5) as u32;
    buf.extend_from_slice(&size.to_be_bytes());
    buf.push(num);
    buf.extend_from_slice(body);
}

/// Packs samples most significant bit first without padding between them.
pub(crate) fn pack(samples: &[u32], nbit: usize) -> Vec<u8> {
    let mut buf = vec![0_u8; (samples.len() * nbit).div_ceil(8)];
    for (k, sample) in samples.iter().enumerate() {
        for b in 0..nbit {
            if (sample >> (nbit - 1 - b)) & 1 == 1 {
                let pos = k * nbit + b;
                buf[pos / 8] |= 0x80 >> (pos % 8);
            }
        }
    }
    buf
}
