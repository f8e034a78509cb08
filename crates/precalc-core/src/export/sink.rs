use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{OutputRow, format_csv_header, format_csv_row};
use crate::error::{Error, Result};
use crate::mods::GameMod;

/// Default output buffer size (32 MiB).
pub const DEFAULT_BUFFER_SIZE: usize = 32 * 1024 * 1024;

/// Append-only destination for output rows.
pub trait RowSink {
    /// Append one row.
    fn write_row(&mut self, row: &OutputRow) -> Result<()>;

    /// Push buffered rows to the underlying storage.
    fn flush(&mut self) -> Result<()>;
}

impl RowSink for Vec<OutputRow> {
    fn write_row(&mut self, row: &OutputRow) -> Result<()> {
        self.push(row.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// CSV writer. The header is written on construction.
pub struct CsvSink<W: Write> {
    writer: W,
    rows_written: usize,
}

impl CsvSink<BufWriter<File>> {
    /// Create (or truncate) the CSV file at `path`.
    pub fn create<P: AsRef<Path>>(
        path: P,
        tracked: &[GameMod],
        buffer_size: usize,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::OutputCreateFailed {
            path: path.to_path_buf(),
            source,
        })?;

        Self::new(BufWriter::with_capacity(buffer_size, file), tracked)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(mut writer: W, tracked: &[GameMod]) -> Result<Self> {
        writeln!(writer, "{}", format_csv_header(tracked))?;

        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn write_row(&mut self, row: &OutputRow) -> Result<()> {
        writeln!(self.writer, "{}", format_csv_row(row))?;
        self.rows_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::read_rows;
    use crate::mods::ModCombination;
    use crate::ruleset::{OsuStandard, RulesetProvider};
    use crate::scoring::Calculation;
    use std::fs;
    use tempfile::TempDir;

    fn sample_rows() -> Vec<OutputRow> {
        let tracked = OsuStandard.tracked();
        let combos = [
            ModCombination::from_mods([GameMod::HardRock]),
            ModCombination::from_mods([GameMod::DoubleTime]),
            ModCombination::from_mods([GameMod::HardRock, GameMod::DoubleTime]),
            ModCombination::new(),
        ];

        combos
            .iter()
            .enumerate()
            .map(|(i, mods)| {
                let calc = Calculation {
                    stars: 4.0 + i as f64 * 0.123456789,
                    pp: 150.0 + i as f64 * 33.3,
                    max_combo: 500,
                };
                OutputRow::build(1000 + i as i32, &calc, mods, &tracked)
            })
            .collect()
    }

    #[test]
    fn test_header_written_on_new() {
        let sink = CsvSink::new(Vec::new(), &OsuStandard.tracked()).unwrap();
        let bytes = sink.into_inner().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "BeatmapId,HR,EZ,FL,DT,HT,HD,LazerSR,LazerPP\n"
        );
    }

    #[test]
    fn test_write_rows() {
        let mut sink = CsvSink::new(Vec::new(), &OsuStandard.tracked()).unwrap();
        for row in sample_rows() {
            sink.write_row(&row).unwrap();
        }
        assert_eq!(sink.rows_written(), 4);

        let content = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("1000,True,False,False,False,False,False,"));
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_round_trip_through_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");
        let rows = sample_rows();

        let mut sink = CsvSink::create(&path, &OsuStandard.tracked(), 1024).unwrap();
        for row in &rows {
            sink.write_row(row).unwrap();
        }
        sink.flush().unwrap();
        drop(sink);

        let content = fs::read(&path).unwrap();
        let read_back = read_rows(content.as_slice()).unwrap();
        assert_eq!(read_back, rows);
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("out.csv");

        let result = CsvSink::create(&path, &OsuStandard.tracked(), 1024);
        assert!(matches!(result, Err(Error::OutputCreateFailed { .. })));
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<OutputRow> = Vec::new();
        for row in sample_rows() {
            sink.write_row(&row).unwrap();
        }
        RowSink::flush(&mut sink).unwrap();
        assert_eq!(sink, sample_rows());
    }
}
