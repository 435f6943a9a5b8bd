use cloud::{Point, PointCloud};
use glam::Vec3;

use crate::header::{PlyHeader, ScalarType};
use crate::{PlyFormat, PlySourceError, Result};

/// Where a needed property sits within a vertex record: its column in
/// ASCII rows and its byte offset in binary records.
#[derive(Debug, Clone, Copy)]
struct Field {
    column: usize,
    offset: usize,
    kind: ScalarType,
}

#[derive(Debug, Clone, Copy)]
struct VertexLayout {
    x: Field,
    y: Field,
    z: Field,
    red: Field,
    green: Field,
    blue: Field,
}

impl VertexLayout {
    fn resolve(header: &PlyHeader) -> Result<Self> {
        let find = |name: &'static str| -> Result<Field> {
            header
                .properties
                .iter()
                .enumerate()
                .find(|(_, property)| property.name == name)
                .map(|(column, property)| Field {
                    column,
                    offset: property.offset,
                    kind: property.kind,
                })
                .ok_or(PlySourceError::MissingProperty(name))
        };
        let channel = |name: &'static str| -> Result<Field> {
            let field = find(name)?;
            if field.kind != ScalarType::U8 {
                return Err(PlySourceError::Unsupported(format!(
                    "color property '{name}' is not uchar"
                )));
            }
            Ok(field)
        };

        Ok(Self {
            x: find("x")?,
            y: find("y")?,
            z: find("z")?,
            red: channel("red")?,
            green: channel("green")?,
            blue: channel("blue")?,
        })
    }
}

/// Decodes a whole PLY file into an ordered point cloud. Vertex records
/// keep their file order; properties other than position and color are
/// skipped.
pub fn decode(data: &[u8]) -> Result<PointCloud> {
    let header = PlyHeader::parse(data)?;
    let layout = VertexLayout::resolve(&header)?;
    let body = &data[header.body_offset..];

    match header.format {
        PlyFormat::Ascii => decode_ascii(body, &header, &layout),
        PlyFormat::BinaryLittleEndian => decode_binary(body, &header, &layout),
    }
}

fn decode_ascii(body: &[u8], header: &PlyHeader, layout: &VertexLayout) -> Result<PointCloud> {
    let text = std::str::from_utf8(body)
        .map_err(|_| PlySourceError::Vertex("ASCII vertex data is not valid UTF-8".into()))?;

    let mut points = PointCloud::with_capacity(header.vertex_count);
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    for row in 0..header.vertex_count {
        let line = lines.next().ok_or_else(|| {
            PlySourceError::Vertex(format!(
                "expected {} vertices, data ends after {row}",
                header.vertex_count
            ))
        })?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < header.properties.len() {
            return Err(PlySourceError::Vertex(format!(
                "vertex {row} has {} fields, expected {}",
                fields.len(),
                header.properties.len()
            )));
        }

        let coord = |field: Field| -> Result<f32> {
            fields[field.column].parse::<f32>().map_err(|_| {
                PlySourceError::Vertex(format!(
                    "vertex {row}: bad coordinate '{}'",
                    fields[field.column]
                ))
            })
        };
        let channel = |field: Field| -> Result<u8> {
            fields[field.column].parse::<u8>().map_err(|_| {
                PlySourceError::Vertex(format!(
                    "vertex {row}: bad color value '{}'",
                    fields[field.column]
                ))
            })
        };

        points.push(Point::new(
            Vec3::new(coord(layout.x)?, coord(layout.y)?, coord(layout.z)?),
            [
                channel(layout.red)?,
                channel(layout.green)?,
                channel(layout.blue)?,
            ],
        ));
    }

    Ok(points)
}

fn decode_binary(body: &[u8], header: &PlyHeader, layout: &VertexLayout) -> Result<PointCloud> {
    let needed = header
        .vertex_count
        .checked_mul(header.record_size)
        .ok_or_else(|| PlySourceError::Vertex("vertex count overflows".into()))?;
    if body.len() < needed {
        return Err(PlySourceError::Truncated {
            needed,
            got: body.len(),
        });
    }

    let coord = |record: &[u8], field: Field| -> f32 {
        let o = field.offset;
        match field.kind {
            ScalarType::F32 => {
                f32::from_le_bytes([record[o], record[o + 1], record[o + 2], record[o + 3]])
            }
            ScalarType::F64 => f64::from_le_bytes([
                record[o],
                record[o + 1],
                record[o + 2],
                record[o + 3],
                record[o + 4],
                record[o + 5],
                record[o + 6],
                record[o + 7],
            ]) as f32,
            ScalarType::U8 => f32::from(record[o]),
        }
    };

    let mut points = PointCloud::with_capacity(header.vertex_count);
    for record in body[..needed].chunks_exact(header.record_size) {
        points.push(Point::new(
            Vec3::new(
                coord(record, layout.x),
                coord(record, layout.y),
                coord(record, layout.z),
            ),
            [
                record[layout.red.offset],
                record[layout.green.offset],
                record[layout.blue.offset],
            ],
        ));
    }

    Ok(points)
}
