use std::ops::Range;

/// One vertex reference of a face statement.
///
/// Indices are 1-based as in the file; `0` marks an absent attribute.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceCorner {
    pub position: u32,
    pub texcoord: u32,
    pub normal: u32,
}

impl FaceCorner {
    pub const fn new(position: u32, texcoord: u32, normal: u32) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }
}

impl From<(u32, u32, u32)> for FaceCorner {
    fn from((position, texcoord, normal): (u32, u32, u32)) -> Self {
        Self::new(position, texcoord, normal)
    }
}

/// Span of `face_corners` written by a single `f` statement.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub line: usize,
    pub start: usize,
    pub len: usize,
}

impl Face {
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// Attribute tables and face corners exactly as read from the file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawGeometry {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub texcoords: Vec<f32>,
    pub face_corners: Vec<FaceCorner>,
    pub faces: Vec<Face>,
}

impl RawGeometry {
    pub fn position_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn normal_count(&self) -> usize {
        self.normals.len() / 3
    }

    pub fn texcoord_count(&self) -> usize {
        self.texcoords.len() / 2
    }

    pub fn corner_count(&self) -> usize {
        self.face_corners.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub(crate) fn push_face(&mut self, line: usize, corners: &[FaceCorner]) {
        self.faces.push(Face {
            line,
            start: self.face_corners.len(),
            len: corners.len(),
        });
        self.face_corners.extend_from_slice(corners);
    }

    pub fn face_corners_of(&self, face: &Face) -> &[FaceCorner] {
        &self.face_corners[face.range()]
    }
}

/// Statements that are kept but have no effect on the geometry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ObjProperties {
    /// `s`
    pub smoothing_group: Option<String>,
    /// `mtllib`
    pub material_library: Option<String>,
    /// `usemtl`
    pub material: Option<String>,
}
