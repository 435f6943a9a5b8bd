use crate::{PlySourceError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlyFormat {
    Ascii,
    BinaryLittleEndian,
}

/// Scalar property type declared in the header. Doubles are narrowed to
/// f32 on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScalarType {
    F32,
    F64,
    U8,
}

impl ScalarType {
    pub(crate) fn byte_size(self) -> usize {
        match self {
            ScalarType::F32 => 4,
            ScalarType::F64 => 8,
            ScalarType::U8 => 1,
        }
    }

    fn parse(name: &str) -> Result<Self> {
        match name {
            "float" | "float32" => Ok(ScalarType::F32),
            "double" | "float64" => Ok(ScalarType::F64),
            "uchar" | "uint8" => Ok(ScalarType::U8),
            other => Err(PlySourceError::Unsupported(format!(
                "property type '{other}'"
            ))),
        }
    }
}

/// One vertex property in declaration order.
#[derive(Debug, Clone)]
pub(crate) struct Property {
    pub name: String,
    pub kind: ScalarType,
    /// Byte offset within one binary vertex record.
    pub offset: usize,
}

/// Parsed PLY header. Only the vertex element is described; trailing
/// elements (faces, edges) are left in the body and never read.
#[derive(Debug, Clone)]
pub struct PlyHeader {
    pub format: PlyFormat,
    pub vertex_count: usize,
    pub(crate) properties: Vec<Property>,
    /// Binary stride of one vertex record.
    pub(crate) record_size: usize,
    /// Byte offset of the first vertex record.
    pub(crate) body_offset: usize,
}

impl PlyHeader {
    pub fn parse(data: &[u8]) -> Result<Self> {
        let (header_text, body_offset) = split_header(data)?;

        let mut lines = header_text.lines().map(str::trim);
        if lines.next() != Some("ply") {
            return Err(PlySourceError::BadMagic);
        }

        let mut format = None;
        let mut vertex_count = None;
        let mut seen_element = false;
        let mut in_vertex_element = false;
        let mut properties: Vec<Property> = Vec::new();
        let mut record_size = 0usize;

        for line in lines {
            let mut parts = line.split_whitespace();
            match parts.next() {
                None | Some("comment") | Some("obj_info") => {}
                Some("format") => match parts.next() {
                    Some("ascii") => format = Some(PlyFormat::Ascii),
                    Some("binary_little_endian") => format = Some(PlyFormat::BinaryLittleEndian),
                    Some(other) => {
                        return Err(PlySourceError::Unsupported(format!("format '{other}'")));
                    }
                    None => {
                        return Err(PlySourceError::Header(
                            "format line names no format".into(),
                        ));
                    }
                },
                Some("element") => {
                    let name = parts.next().ok_or_else(|| {
                        PlySourceError::Header("element line names no element".into())
                    })?;
                    if name == "vertex" {
                        if seen_element {
                            return Err(PlySourceError::Unsupported(
                                "vertex element is not the first element".into(),
                            ));
                        }
                        let count = parts.next().ok_or_else(|| {
                            PlySourceError::Header("vertex element has no count".into())
                        })?;
                        vertex_count = Some(count.parse::<usize>().map_err(|_| {
                            PlySourceError::Header(format!("bad vertex count '{count}'"))
                        })?);
                        in_vertex_element = true;
                    } else {
                        in_vertex_element = false;
                    }
                    seen_element = true;
                }
                Some("property") if in_vertex_element => {
                    let kind = parts.next().ok_or_else(|| {
                        PlySourceError::Header("property line names no type".into())
                    })?;
                    if kind == "list" {
                        return Err(PlySourceError::Unsupported(
                            "list property on the vertex element".into(),
                        ));
                    }
                    let kind = ScalarType::parse(kind)?;
                    let name = parts.next().ok_or_else(|| {
                        PlySourceError::Header("property line names no property".into())
                    })?;
                    properties.push(Property {
                        name: name.to_string(),
                        kind,
                        offset: record_size,
                    });
                    record_size += kind.byte_size();
                }
                // Properties of trailing elements are irrelevant here.
                Some("property") => {}
                Some(other) => {
                    return Err(PlySourceError::Header(format!(
                        "unrecognized header line '{other}'"
                    )));
                }
            }
        }

        let format =
            format.ok_or_else(|| PlySourceError::Header("missing format line".into()))?;
        let vertex_count = vertex_count
            .ok_or_else(|| PlySourceError::Header("missing vertex element".into()))?;

        Ok(Self {
            format,
            vertex_count,
            properties,
            record_size,
            body_offset,
        })
    }
}

/// Splits the raw file at the `end_header` line, tolerating CRLF line
/// endings. Only a whole line counts; comments may mention `end_header`
/// without ending the header.
fn split_header(data: &[u8]) -> Result<(&str, usize)> {
    let mut line_start = 0;
    for line in data.split_inclusive(|&byte| byte == b'\n') {
        let line_end = line_start + line.len();
        let terminated = line.strip_suffix(b"\n");
        if terminated.map(<[u8]>::trim_ascii) == Some(b"end_header".as_slice()) {
            let header_text = std::str::from_utf8(&data[..line_start])
                .map_err(|_| PlySourceError::Header("header is not valid UTF-8".into()))?;
            return Ok((header_text, line_end));
        }
        line_start = line_end;
    }

    Err(PlySourceError::Header("missing end_header".into()))
}
