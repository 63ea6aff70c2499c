use std::{
    fs::File,
    io::{BufReader, BufWriter, Cursor, Read, Write},
    path::Path,
};

use grib_msm::FileSummary;

/// Reads the summary of a file, or of the standard input if `path` is `-`.
pub(crate) fn summary<P>(path: P) -> anyhow::Result<FileSummary>
where
    P: AsRef<Path>,
{
    let summary = if is_dash(&path) {
        let mut buf = Vec::with_capacity(4096);
        std::io::stdin().read_to_end(&mut buf)?;
        grib_msm::read_summary(Cursor::new(buf))?
    } else {
        let f = File::open(&path)?;
        grib_msm::read_summary(BufReader::new(f))?
    };
    Ok(summary)
}

pub(crate) enum WriteStream {
    File(BufWriter<File>),
    Stdout(std::io::Stdout),
}

impl WriteStream {
    pub(crate) fn new<P>(out_path: P) -> std::io::Result<Self>
    where
        P: AsRef<Path>,
    {
        let stream = if is_dash(&out_path) {
            Self::Stdout(std::io::stdout())
        } else {
            let f = File::create(out_path)?;
            let f = BufWriter::new(f);
            Self::File(f)
        };
        Ok(stream)
    }
}

impl Write for WriteStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::File(file) => file.write(buf),
            Self::Stdout(stdout) => stdout.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::File(file) => file.flush(),
            Self::Stdout(stdout) => stdout.flush(),
        }
    }
}

pub(crate) fn is_dash<P: AsRef<Path>>(path: P) -> bool {
    matches!(path.as_ref().to_str(), Some("-"))
}
