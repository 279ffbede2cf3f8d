use std::fs;
use std::path::Path;
use std::str::SplitAsciiWhitespace;

use nalgebra::Point3;
use tracing::info;

use crate::error::{Error, Result};
use crate::model::{BodyInfo, BodyKind};

/// The body table shipped with the crate.
pub const BUILTIN_TABLE: &str = include_str!("../solar-bodies.txt");

/// One row of a body table, with its satellite target still given by name.
#[derive(Debug, Clone)]
pub struct BodyRecord {
    pub info: BodyInfo,
    /// `None` means the body orbits the world origin.
    pub parent: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BodyTable {
    pub records: Vec<BodyRecord>,
}

impl BodyTable {
    pub fn builtin() -> Result<Self> {
        parse_table(BUILTIN_TABLE)
    }
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<BodyTable> {
    let path = path.as_ref();
    let table = parse_table(&fs::read_to_string(path)?)?;
    info!(
        path = %path.display(),
        bodies = table.records.len(),
        "loaded body table"
    );
    Ok(table)
}

/// Parses a whitespace-separated table. The first non-comment line is a
/// header and is skipped; `#` starts a comment.
pub fn parse_table(text: &str) -> Result<BodyTable> {
    let mut records = vec![];

    let rows = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.split('#').next().unwrap_or("").trim()))
        .filter(|(_, line)| !line.is_empty())
        .skip(1);

    for (line, row) in rows {
        records.push(parse_row(row).map_err(|message| Error::Parse { line, message })?);
    }

    if records.is_empty() {
        return Err(Error::EmptyTable);
    }
    Ok(BodyTable { records })
}

struct Fields<'a> {
    inner: SplitAsciiWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn next_string(&mut self, what: &str) -> std::result::Result<&'a str, String> {
        self.inner
            .next()
            .ok_or_else(|| format!("missing {} column", what))
    }

    fn next_f64(&mut self, what: &str) -> std::result::Result<f64, String> {
        let s = self.next_string(what)?;
        s.parse::<f64>()
            .map_err(|_| format!("{} `{}` is not a number", what, s))
    }
}

fn parse_row(row: &str) -> std::result::Result<BodyRecord, String> {
    let mut fields = Fields {
        inner: row.split_ascii_whitespace(),
    };

    let name = fields.next_string("name")?.to_owned();
    let kind = parse_kind(fields.next_string("kind")?)?;
    let color = parse_color(fields.next_string("color")?)?;
    let parent = match fields.next_string("parent")? {
        "-" => None,
        parent => Some(parent.to_owned()),
    };

    let info = BodyInfo {
        name,
        kind,
        color,
        orbital_rate: fields.next_f64("orbital_rate")?,
        rotational_rate: fields.next_f64("rotational_rate")?,
        orbital_distance: fields.next_f64("distance")?,
        axial_tilt: fields.next_f64("tilt")?,
        scale: fields.next_f64("scale")?,
    };

    if let Some(extra) = fields.inner.next() {
        return Err(format!("unexpected trailing column `{}`", extra));
    }

    Ok(BodyRecord { info, parent })
}

fn parse_kind(s: &str) -> std::result::Result<BodyKind, String> {
    match s {
        "star" => Ok(BodyKind::Star),
        "planet" => Ok(BodyKind::Planet),
        "moon" => Ok(BodyKind::Moon),
        _ => Err(format!("unknown body kind `{}`", s)),
    }
}

fn parse_color(s: &str) -> std::result::Result<Point3<f32>, String> {
    if s.len() != 6 || !s.is_ascii() {
        return Err(format!("color `{}` is not rrggbb hex", s));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16).map_err(|_| format!("color `{}` is not rrggbb hex", s))
    };
    let r = channel(0..2)?;
    let g = channel(2..4)?;
    let b = channel(4..6)?;

    Ok(Point3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0))
}
