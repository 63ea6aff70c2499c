use std::io::{Read, Seek, SeekFrom};

use log::trace;

use crate::{datatypes::Indicator, error::*};

pub(crate) const SECT0_IS_MAGIC: &[u8] = b"GRIB";
pub(crate) const SECT0_IS_MAGIC_SIZE: usize = SECT0_IS_MAGIC.len();
pub(crate) const SECT0_IS_SIZE: usize = 16;
pub(crate) const SECT_HEADER_SIZE: usize = 5;
pub(crate) const SECT8_ES_MAGIC: &[u8] = b"7777";
pub(crate) const SECT8_ES_SIZE: usize = SECT8_ES_MAGIC.len();

/// Location and size of a length-prefixed section (Sections 1-7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    /// Section number
    pub num: u8,
    /// Offset of the section from the beginning of the file
    pub offset: usize,
    /// Section size including the 5-octet header
    pub size: usize,
}

impl SectionHeader {
    pub fn payload_size(&self) -> usize {
        self.size - SECT_HEADER_SIZE
    }
}

/// Sequential, validating reader of GRIB2 sections.
///
/// The reader only moves forward. Every section size is checked against the
/// total length declared in Section 0, so that a broken length never makes
/// the reader run past the message.
pub struct SectionReader<R> {
    reader: R,
    offset: usize,
    total_length: usize,
}

impl<R> SectionReader<R> {
    pub fn new(r: R) -> Self {
        Self {
            reader: r,
            offset: 0,
            total_length: 0,
        }
    }

    /// Returns the number of bytes left before the end of the message as
    /// declared in Section 0.
    pub fn rest_size(&self) -> usize {
        self.total_length.saturating_sub(self.offset)
    }
}

impl<R: Read + Seek> SectionReader<R> {
    /// Reads Section 0 and remembers the total length of the message.
    pub fn read_indicator(&mut self) -> Result<Indicator, MsmError> {
        let mut buf = [0; SECT0_IS_SIZE];
        self.reader.read_exact(&mut buf[..])?;

        if &buf[0..SECT0_IS_MAGIC_SIZE] != SECT0_IS_MAGIC {
            return Err(FormatError::NotGRIB.into());
        }
        let indicator = Indicator::from_slice(&buf)?;

        self.offset = SECT0_IS_SIZE;
        self.total_length = usize::try_from(indicator.total_length).unwrap_or(usize::MAX);
        trace!(
            "section 0: discipline {}, total length {}",
            indicator.discipline, indicator.total_length
        );
        Ok(indicator)
    }

    /// Reads the common 5-octet header of Sections 1-7.
    ///
    /// The declared size must cover at least the header itself and must fit
    /// in the rest of the message.
    pub fn read_header(&mut self) -> Result<SectionHeader, MsmError> {
        let rest_size = self.rest_size();
        if rest_size < SECT_HEADER_SIZE {
            return Err(SectionSequenceError::SectionTooLong {
                declared: SECT_HEADER_SIZE,
                remaining: rest_size,
            }
            .into());
        }

        let mut buf = [0; SECT_HEADER_SIZE];
        self.reader.read_exact(&mut buf[..])?;
        let size = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
        let num = buf[4];

        if size < SECT_HEADER_SIZE {
            return Err(SectionSequenceError::SectionSizeTooSmall { num, size }.into());
        }
        if size > rest_size {
            return Err(SectionSequenceError::SectionTooLong {
                declared: size,
                remaining: rest_size,
            }
            .into());
        }

        let header = SectionHeader {
            num,
            offset: self.offset,
            size,
        };
        self.offset += SECT_HEADER_SIZE;
        trace!("section {num}: offset {}, size {size}", header.offset);
        Ok(header)
    }

    /// Reads a section header and checks that it is the expected section.
    pub fn read_header_of(&mut self, expected: u8) -> Result<SectionHeader, MsmError> {
        let header = self.read_header()?;
        expect_section(&header, expected)?;
        Ok(header)
    }

    /// Reads the body of the section following its header.
    pub fn read_payload(&mut self, header: &SectionHeader) -> Result<Box<[u8]>, MsmError> {
        let mut buf = vec![0; header.payload_size()];
        self.reader.read_exact(&mut buf[..])?;
        self.offset += buf.len();
        Ok(buf.into_boxed_slice())
    }

    /// Moves past the body of the section following its header without
    /// reading it.
    pub fn skip_payload(&mut self, header: &SectionHeader) -> Result<(), MsmError> {
        let size = header.payload_size();
        self.reader.seek(SeekFrom::Current(size as i64))?;
        self.offset += size;
        Ok(())
    }

    /// Reads Section 8, which must be exactly the rest of the message.
    pub fn read_end(&mut self) -> Result<(), MsmError> {
        if self.rest_size() != SECT8_ES_SIZE {
            return Err(FormatError::EndSectionMismatch.into());
        }

        let mut buf = [0; SECT8_ES_SIZE];
        self.reader.read_exact(&mut buf[..])?;
        if buf[..] != SECT8_ES_MAGIC[..] {
            return Err(FormatError::EndSectionMismatch.into());
        }

        self.offset += SECT8_ES_SIZE;
        trace!("section 8: offset {}", self.offset - SECT8_ES_SIZE);
        Ok(())
    }
}

pub(crate) fn expect_section(header: &SectionHeader, expected: u8) -> Result<(), MsmError> {
    if header.num != expected {
        return Err(SectionSequenceError::UnexpectedSection {
            expected,
            found: header.num,
            offset: header.offset,
        }
        .into());
    }
    Ok(())
}
