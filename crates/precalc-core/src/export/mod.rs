//! CSV output rows and the sinks they are written to.

mod sink;

pub use sink::{CsvSink, DEFAULT_BUFFER_SIZE, RowSink};

use std::io::BufRead;

use crate::error::{Error, Result};
use crate::mods::{GameMod, ModCombination};
use crate::scoring::Calculation;

const ID_COLUMN: &str = "BeatmapId";
const STARS_COLUMN: &str = "LazerSR";
const PP_COLUMN: &str = "LazerPP";

/// One CSV record: a beatmap calculated with one mod combination.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub beatmap_id: i32,
    /// Presence of each tracked mod, in column order.
    pub flags: Vec<(GameMod, bool)>,
    pub stars: f64,
    pub pp: f64,
}

impl OutputRow {
    /// Project a calculation onto the tracked columns.
    ///
    /// Mods in `mods` that are not in `tracked` have no column and are not
    /// reflected in the row.
    pub fn build(
        beatmap_id: i32,
        calc: &Calculation,
        mods: &ModCombination,
        tracked: &[GameMod],
    ) -> Self {
        Self {
            beatmap_id,
            flags: tracked.iter().map(|&m| (m, mods.contains(m))).collect(),
            stars: calc.stars,
            pp: calc.pp,
        }
    }

    /// Whether `m` is set, or `None` if it has no column.
    pub fn flag(&self, m: GameMod) -> Option<bool> {
        self.flags
            .iter()
            .find(|(tracked, _)| *tracked == m)
            .map(|&(_, set)| set)
    }
}

/// Generate the CSV header for the given tracked mods
pub fn format_csv_header(tracked: &[GameMod]) -> String {
    let mut columns = vec![ID_COLUMN];
    columns.extend(tracked.iter().map(GameMod::acronym));
    columns.extend([STARS_COLUMN, PP_COLUMN]);
    columns.join(",")
}

/// Generate a CSV row
pub fn format_csv_row(row: &OutputRow) -> String {
    let mut values = Vec::with_capacity(row.flags.len() + 3);
    values.push(row.beatmap_id.to_string());
    values.extend(
        row.flags
            .iter()
            .map(|&(_, set)| format_bool(set).to_string()),
    );
    values.push(row.stars.to_string());
    values.push(row.pp.to_string());
    values.join(",")
}

fn format_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parse the tracked mods out of a CSV header line
pub fn parse_csv_header(line: &str) -> Result<Vec<GameMod>> {
    let columns: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    let malformed = |message: String| Error::MalformedRow { line: 1, message };

    let [first, middle @ .., stars, pp] = columns.as_slice() else {
        return Err(malformed(format!(
            "expected at least 3 columns, got {}",
            columns.len()
        )));
    };

    if *first != ID_COLUMN || *stars != STARS_COLUMN || *pp != PP_COLUMN {
        return Err(malformed(format!("unexpected header {:?}", line.trim())));
    }

    middle
        .iter()
        .map(|code| GameMod::parse(code).map_err(|e| malformed(e.to_string())))
        .collect()
}

/// Read rows back from CSV written by [`CsvSink`].
pub fn read_rows<R: BufRead>(reader: R) -> Result<Vec<OutputRow>> {
    let mut lines = reader.lines();

    let Some(header) = lines.next() else {
        return Err(Error::MalformedRow {
            line: 1,
            message: "missing header".to_string(),
        });
    };
    let tracked = parse_csv_header(&header?)?;

    let mut rows = Vec::new();

    for (idx, line) in lines.enumerate() {
        let line = line?;
        let line_no = idx + 2;
        if line.trim().is_empty() {
            continue;
        }

        let malformed = |message: String| Error::MalformedRow {
            line: line_no,
            message,
        };

        let values: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        if values.len() != tracked.len() + 3 {
            return Err(malformed(format!(
                "expected {} fields, got {}",
                tracked.len() + 3,
                values.len()
            )));
        }

        let beatmap_id = values[0]
            .parse()
            .map_err(|_| malformed(format!("invalid beatmap id {:?}", values[0])))?;

        let flags = tracked
            .iter()
            .zip(&values[1..=tracked.len()])
            .map(|(&m, value)| {
                parse_bool(value)
                    .map(|set| (m, set))
                    .ok_or_else(|| malformed(format!("invalid flag {:?} for {}", value, m)))
            })
            .collect::<Result<Vec<_>>>()?;

        let stars_value = values[tracked.len() + 1];
        let pp_value = values[tracked.len() + 2];

        let stars = stars_value
            .parse()
            .map_err(|_| malformed(format!("invalid star rating {:?}", stars_value)))?;
        let pp = pp_value
            .parse()
            .map_err(|_| malformed(format!("invalid pp {:?}", pp_value)))?;

        rows.push(OutputRow {
            beatmap_id,
            flags,
            stars,
            pp,
        });
    }

    Ok(rows)
}
