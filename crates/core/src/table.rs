//! Geometry tables: one CSV record per `GeometryRow`, no header.
//!
//! `path name, stroke index, in-x, in-y, anchor-x, anchor-y, out-x, out-y`

use crate::error::TableError;
use ora_types::{GeometryRow, TRIPLET_LEN};
use std::io::{Read, Write};

const FIELDS: usize = 2 + TRIPLET_LEN;

pub fn write_geometry_table<W: Write>(rows: &[GeometryRow], writer: W) -> Result<(), TableError> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    let mut record = Vec::with_capacity(FIELDS);
    for row in rows {
        record.clear();
        record.push(row.path.clone());
        record.push(row.stroke.to_string());
        record.extend(row.points.iter().map(f64::to_string));
        csv.write_record(&record)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn read_geometry_table<R: Read>(reader: R) -> Result<Vec<GeometryRow>, TableError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv.records().enumerate() {
        let record = record?;
        let malformed = |message: String| TableError::Malformed {
            row: index + 1,
            message,
        };

        if record.len() != FIELDS {
            return Err(malformed(format!(
                "expected {} fields, found {}",
                FIELDS,
                record.len()
            )));
        }

        let stroke = record[1]
            .parse::<usize>()
            .map_err(|e| malformed(format!("stroke index '{}': {}", &record[1], e)))?;
        let mut points = [0.0; TRIPLET_LEN];
        for (slot, field) in points.iter_mut().zip(record.iter().skip(2)) {
            *slot = field
                .parse::<f64>()
                .map_err(|e| malformed(format!("coordinate '{}': {}", field, e)))?;
        }

        rows.push(GeometryRow {
            path: record[0].to_string(),
            stroke,
            points,
        });
    }
    Ok(rows)
}
