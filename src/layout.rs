use std::collections::HashMap;

use log::{debug, warn};
use meshload_format::{LayoutStyle, OutputGeometry};

use crate::error::{Attribute, ObjError, Result};
use crate::geometry::{FaceCorner, RawGeometry};

/// Resolves face corners into flat vertex buffers.
///
/// Array style writes one vertex per corner. Single-index style welds corners with the same
/// `(position, texcoord, normal)` triple into one slot, slots being handed out in order of first
/// appearance.
#[derive(Debug)]
pub struct LayoutBuilder<'a> {
    raw: &'a RawGeometry,
    output: OutputGeometry,
    slots: HashMap<FaceCorner, u32>,
}

impl<'a> LayoutBuilder<'a> {
    pub const DEFAULT_POSITION: [f32; 3] = [0.0, 0.0, 0.0];
    pub const DEFAULT_TEXCOORD: [f32; 2] = [0.0, 0.0];
    /// Placeholder facing +Z, not a computed surface normal.
    pub const DEFAULT_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

    pub fn new(raw: &'a RawGeometry, style: LayoutStyle) -> Self {
        Self {
            raw,
            output: OutputGeometry::new(style),
            slots: HashMap::new(),
        }
    }

    pub fn build(mut self) -> Result<OutputGeometry> {
        check_triangles(self.raw)?;

        let raw = self.raw;
        for triangle in &raw.faces {
            for &corner in raw.face_corners_of(triangle) {
                self.push_corner(corner)?;
            }
        }

        debug!(
            "Built {:?} layout: {} vertices from {} corners",
            self.output.style,
            self.output.vertex_count(),
            raw.corner_count()
        );
        Ok(self.output)
    }

    fn push_corner(&mut self, corner: FaceCorner) -> Result<()> {
        match self.output.style {
            LayoutStyle::Array => self.push_vertex(corner),
            LayoutStyle::SingleIndex => {
                let slot = match self.slots.get(&corner) {
                    Some(&slot) => slot,
                    None => {
                        let slot = self.slots.len() as u32;
                        self.push_vertex(corner)?;
                        self.slots.insert(corner, slot);
                        slot
                    }
                };
                self.output.indices.get_or_insert_with(Vec::new).push(slot);
                Ok(())
            }
        }
    }

    fn push_vertex(&mut self, corner: FaceCorner) -> Result<()> {
        let raw = self.raw;

        let position = lookup::<3>(&raw.positions, corner.position, Attribute::Position)?
            .unwrap_or(Self::DEFAULT_POSITION);

        // missing tables fall back to the defaults even if the corner names an index
        let texcoord = if raw.texcoords.is_empty() {
            None
        } else {
            lookup::<2>(&raw.texcoords, corner.texcoord, Attribute::Texcoord)?
        }
        .unwrap_or(Self::DEFAULT_TEXCOORD);

        let normal = if raw.normals.is_empty() {
            None
        } else {
            lookup::<3>(&raw.normals, corner.normal, Attribute::Normal)?
        }
        .unwrap_or(Self::DEFAULT_NORMAL);

        self.output.vertices.extend_from_slice(&position);
        self.output.texcoords.extend_from_slice(&texcoord);
        self.output.normals.extend_from_slice(&normal);
        Ok(())
    }
}

fn check_triangles(raw: &RawGeometry) -> Result<()> {
    if let Some(face) = raw.faces.iter().find(|face| face.len != 3) {
        return Err(ObjError::MalformedFaceReference {
            line: face.line,
            reason: format!("face has {} corners, expected 3", face.len),
        });
    }

    Ok(())
}

/// Reads the `N` floats of a 1-based `index`, `None` if the index is absent.
fn lookup<const N: usize>(
    table: &[f32],
    index: u32,
    attribute: Attribute,
) -> Result<Option<[f32; N]>> {
    if index == 0 {
        return Ok(None);
    }

    let start = (index as usize - 1) * N;
    table
        .get(start..start + N)
        .and_then(|values| <[f32; N]>::try_from(values).ok())
        .map(Some)
        .ok_or(ObjError::IndexOutOfRange {
            attribute,
            index,
            count: table.len() / N,
        })
}

impl RawGeometry {
    /// One vertex per face corner; draw as a non-indexed triangle list.
    pub fn to_array_style(&self) -> Result<OutputGeometry> {
        self.to_style(LayoutStyle::Array)
    }

    /// Unique corners once, referenced by an index list.
    pub fn to_single_index_style(&self) -> Result<OutputGeometry> {
        self.to_style(LayoutStyle::SingleIndex)
    }

    pub fn to_style(&self, style: LayoutStyle) -> Result<OutputGeometry> {
        LayoutBuilder::new(self, style).build()
    }

    /// Splits every face into a fan of triangles around its first corner.
    ///
    /// Faces with less than three corners are dropped.
    pub fn triangulated(&self) -> RawGeometry {
        let mut triangulated = RawGeometry {
            positions: self.positions.clone(),
            normals: self.normals.clone(),
            texcoords: self.texcoords.clone(),
            ..Default::default()
        };

        for face in &self.faces {
            let corners = self.face_corners_of(face);
            if corners.len() < 3 {
                warn!(
                    "Line {}: dropping face with {} corners",
                    face.line,
                    corners.len()
                );
                continue;
            }

            // triangulate polygons for convex shapes
            for i in 2..corners.len() {
                debug!(
                    "Create triangle between {:?}, {:?}, {:?}",
                    corners[0],
                    corners[i - 1],
                    corners[i]
                );
                triangulated.push_face(face.line, &[corners[0], corners[i - 1], corners[i]]);
            }
        }

        triangulated
    }
}
