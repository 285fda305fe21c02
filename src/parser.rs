use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use log::debug;

use crate::diagnostics::{self, Diagnostic, Diagnostics};
use crate::error::{ObjError, Result};
use crate::geometry::{FaceCorner, ObjProperties, RawGeometry};

/// Everything read from one Wavefront source.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedObj {
    pub geometry: RawGeometry,
    pub properties: ObjProperties,
    pub diagnostics: Diagnostics,
}

/// The line currently being parsed, used to report errors.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    number: usize,
    text: &'a str,
}

impl Line<'_> {
    fn malformed_attribute(&self) -> ObjError {
        ObjError::MalformedAttribute {
            line: self.number,
            text: self.text.to_owned(),
        }
    }

    fn malformed_face(&self, corner: &str) -> ObjError {
        ObjError::MalformedFaceReference {
            line: self.number,
            reason: format!("invalid corner \"{}\" in \"{}\"", corner, self.text),
        }
    }
}

// parses wavefront obj (https://en.wikipedia.org/wiki/Wavefront_.obj_file)
// only the geometry statements are interpreted, the first malformed one aborts
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParsedObj> {
    let path = path.as_ref();
    let io_failure = |source| ObjError::IoFailure {
        path: path.to_owned(),
        source,
    };

    let file = fs::File::open(path).map_err(io_failure)?;
    log::info!("Loading mesh: {}", path.display());

    parse_lines(io::BufReader::new(file).lines()).map_err(|err| match err {
        ObjError::Read(source) => io_failure(source),
        err => err,
    })
}

pub fn parse_reader<R: BufRead>(reader: R) -> Result<ParsedObj> {
    parse_lines(reader.lines())
}

pub fn parse_str(source: &str) -> Result<ParsedObj> {
    parse_reader(source.as_bytes())
}

fn parse_lines<I>(lines: I) -> Result<ParsedObj>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut parsed = ParsedObj::default();

    for (idx, line) in lines.enumerate() {
        let line = line?;
        // byte order mark in front of the first statement
        let line = match idx {
            0 => line.trim_start_matches('\u{feff}'),
            _ => line.as_str(),
        };
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        debug!("Parsing: \"{}\"", text);

        let (token, value) = text
            .split_once(char::is_whitespace)
            .map(|(token, value)| (token, value.trim()))
            .unwrap_or((text, ""));
        let line = Line {
            number: idx + 1,
            text,
        };
        parse_token(token, value, line, &mut parsed)?;
    }

    diagnostics::log_summary(&parsed);
    Ok(parsed)
}

fn parse_token(token: &str, value: &str, line: Line, parsed: &mut ParsedObj) -> Result<()> {
    let geometry = &mut parsed.geometry;

    match token {
        // vertex
        "v" => geometry
            .positions
            .extend_from_slice(&parse_numbers::<3>(value, line)?),
        // vertex normals
        "vn" => geometry
            .normals
            .extend_from_slice(&parse_numbers::<3>(value, line)?),
        // texture coordinates, a third (w) component is dropped
        "vt" => geometry
            .texcoords
            .extend_from_slice(&parse_numbers::<2>(value, line)?),
        "f" => {
            let corners = parse_face(value, line, geometry)?;
            geometry.push_face(line.number, &corners);
        }
        // smoothing groups
        "s" => parsed.properties.smoothing_group = optional_value(value),
        // material
        "mtllib" => parsed.properties.material_library = optional_value(value),
        "usemtl" => parsed.properties.material = optional_value(value),
        // group (not modelled)
        "g" => debug!("Ignoring group \"{}\"", value),
        _ => parsed.diagnostics.push(Diagnostic::UnrecognizedLine {
            line: line.number,
            text: line.text.to_owned(),
        }),
    };

    Ok(())
}

fn optional_value(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.into())
    }
}

// parses the first N numbers separated by whitespace, anything after them is ignored
fn parse_numbers<const N: usize>(value: &str, line: Line) -> Result<[f32; N]> {
    let mut ret = [0.0; N];
    let mut numbers = value.split_whitespace();

    for slot in ret.iter_mut() {
        *slot = numbers
            .next()
            .and_then(|x| x.parse().ok())
            .ok_or_else(|| line.malformed_attribute())?;
    }

    Ok(ret)
}

// parses face corners separated by whitespace, which are themselves separated by slashes
fn parse_face(value: &str, line: Line, geometry: &RawGeometry) -> Result<Vec<FaceCorner>> {
    let counts = [
        geometry.position_count(),
        geometry.texcoord_count(),
        geometry.normal_count(),
    ];

    value
        .split_whitespace()
        .map(|x| parse_face_corner(x, counts).ok_or_else(|| line.malformed_face(x)))
        .collect()
}

fn parse_face_corner(value: &str, counts: [usize; 3]) -> Option<FaceCorner> {
    let triplet = parse_triplet(value)?;

    Some(FaceCorner {
        position: resolve_index(triplet[0], counts[0])?,
        texcoord: resolve_index(triplet[1], counts[1])?,
        normal: resolve_index(triplet[2], counts[2])?,
    })
}

// parse a triplet separated by slashes, empty or missing fields are absent
fn parse_triplet(value: &str) -> Option<[Option<i64>; 3]> {
    let mut ret = [None; 3];
    let mut fields = value.split('/');

    for slot in ret.iter_mut() {
        *slot = match fields.next() {
            None | Some("") => None,
            Some(field) => Some(field.parse().ok()?),
        };
    }

    // more than three fields
    if fields.next().is_some() {
        return None;
    }

    Some(ret)
}

/// Turns a raw index into the stored 1-based form, `0` standing for absent.
///
/// Negative indices count back from the last element defined so far.
fn resolve_index(index: Option<i64>, defined: usize) -> Option<u32> {
    match index {
        None => Some(0),
        Some(0) => None,
        Some(index) if index > 0 => u32::try_from(index).ok(),
        Some(index) => {
            let resolved = defined as i64 + index + 1;
            if resolved >= 1 {
                u32::try_from(resolved).ok()
            } else {
                None
            }
        }
    }
}
