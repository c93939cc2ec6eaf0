use crate::core::io::traits::StructureFile;
use crate::core::models::points::PointSet;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct XyzMetadata {
    pub comment: String,
    /// One element symbol (or other label) per point.
    pub labels: Vec<String>,
}

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Header declares {declared} atoms but {found} were read")]
    AtomCount { declared: usize, found: usize },
    #[error("{labels} labels given for {points} points")]
    LabelCount { labels: usize, points: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum XyzParseErrorKind {
    #[error("Missing atom count header")]
    MissingHeader,
    #[error("Invalid atom count '{0}'")]
    InvalidCount(String),
    #[error("Expected 'label x y z', found {0} field(s)")]
    TooFewFields(usize),
    #[error("Invalid coordinate '{0}'")]
    InvalidFloat(String),
}

/// The plain XYZ format: an atom count, a free-form comment line, then one
/// `label x y z` line per atom. Only the first frame is read.
pub struct XyzFile;

impl StructureFile for XyzFile {
    type Metadata = XyzMetadata;
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<(PointSet, Self::Metadata), Self::Error> {
        let mut lines = reader.lines().enumerate();

        let declared = loop {
            let Some((idx, line)) = lines.next() else {
                return Err(XyzError::Parse {
                    line: 1,
                    kind: XyzParseErrorKind::MissingHeader,
                });
            };
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            break trimmed.parse::<usize>().map_err(|_| XyzError::Parse {
                line: idx + 1,
                kind: XyzParseErrorKind::InvalidCount(trimmed.to_string()),
            })?;
        };

        let comment = match lines.next() {
            Some((_, line)) => line?.trim_end().to_string(),
            None => String::new(),
        };

        // The header is untrusted; grow with the lines actually read.
        let mut points = Vec::new();
        let mut labels = Vec::new();
        for (idx, line) in lines.take(declared) {
            let line = line?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                return Err(XyzError::Parse {
                    line: idx + 1,
                    kind: XyzParseErrorKind::TooFewFields(fields.len()),
                });
            }
            let mut coords = [0.0; 3];
            for (slot, field) in coords.iter_mut().zip(&fields[1..4]) {
                *slot = field.parse().map_err(|_| XyzError::Parse {
                    line: idx + 1,
                    kind: XyzParseErrorKind::InvalidFloat(field.to_string()),
                })?;
            }
            labels.push(fields[0].to_string());
            points.push(Point3::from(coords));
        }

        if points.len() != declared {
            return Err(XyzError::AtomCount {
                declared,
                found: points.len(),
            });
        }

        Ok((PointSet::new(points), XyzMetadata { comment, labels }))
    }

    fn write_to(
        points: &PointSet,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        if metadata.labels.len() != points.len() {
            return Err(XyzError::LabelCount {
                labels: metadata.labels.len(),
                points: points.len(),
            });
        }
        writeln!(writer, "{}", points.len())?;
        writeln!(writer, "{}", metadata.comment)?;
        for (label, p) in metadata.labels.iter().zip(points.iter()) {
            writeln!(writer, "{:<4} {:>16.10} {:>16.10} {:>16.10}", label, p.x, p.y, p.z)?;
        }
        Ok(())
    }
}
