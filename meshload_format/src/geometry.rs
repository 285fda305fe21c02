use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;

/// How the vertex data of an [`OutputGeometry`] is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStyle {
    /// One vertex per face corner, drawn as a non-indexed triangle list.
    Array,
    /// Unique corners stored once and referenced through `indices`.
    SingleIndex,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        LayoutStyle::SingleIndex
    }
}

/// Flat attribute buffers ready to be handed to a buffer upload layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputGeometry {
    pub style: LayoutStyle,
    /// xyz per vertex
    pub vertices: Vec<f32>,
    /// uv per vertex
    pub texcoords: Vec<f32>,
    /// xyz per vertex
    pub normals: Vec<f32>,
    /// only present for [`LayoutStyle::SingleIndex`]
    pub indices: Option<Vec<u32>>,
}

impl OutputGeometry {
    pub fn new(style: LayoutStyle) -> Self {
        Self {
            style,
            indices: match style {
                LayoutStyle::Array => None,
                LayoutStyle::SingleIndex => Some(Vec::new()),
            },
            ..Default::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of indices a draw call consumes; equals the vertex count for array style.
    pub fn index_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len(),
            None => self.vertex_count(),
        }
    }

    /// The explicit index list, or the identity list `0..N` for array style.
    pub fn index_list(&self) -> Cow<'_, [u32]> {
        match &self.indices {
            Some(indices) => Cow::Borrowed(indices.as_slice()),
            None => Cow::Owned((0..self.vertex_count() as u32).collect()),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize::<OutputGeometry>(bytes)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        OutputGeometry::from_bytes(&data)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self)?)
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::FormatError;

    fn triangle(style: LayoutStyle) -> OutputGeometry {
        let mut geometry = OutputGeometry::new(style);
        geometry.vertices = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        geometry.texcoords = vec![0.0; 6];
        geometry.normals = [0.0, 0.0, 1.0].repeat(3);
        if let Some(indices) = geometry.indices.as_mut() {
            indices.extend_from_slice(&[0, 1, 2]);
        }
        geometry
    }

    #[test]
    fn test_array_style_has_identity_indices() {
        let geometry = triangle(LayoutStyle::Array);

        assert_eq!(geometry.indices, None);
        assert_eq!(geometry.vertex_count(), 3);
        assert_eq!(geometry.index_count(), 3);
        assert_eq!(geometry.index_list().as_ref(), &[0, 1, 2]);
    }

    #[test]
    fn test_single_index_uses_explicit_indices() {
        let mut geometry = triangle(LayoutStyle::SingleIndex);
        geometry.indices = Some(vec![2, 1, 0, 0]);

        assert_eq!(geometry.index_count(), 4);
        assert_eq!(geometry.index_list().as_ref(), &[2, 1, 0, 0]);
    }

    #[test]
    fn test_bytes() -> Result<()> {
        let geometry = triangle(LayoutStyle::SingleIndex);
        let bytes = geometry.to_bytes()?;

        assert_eq!(OutputGeometry::from_bytes(&bytes)?, geometry);
        Ok(())
    }

    #[test]
    fn test_truncated_bytes() -> Result<()> {
        let bytes = triangle(LayoutStyle::Array).to_bytes()?;

        assert!(matches!(
            OutputGeometry::from_bytes(&bytes[..bytes.len() / 2]),
            Err(FormatError::Codec(_))
        ));
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let err = OutputGeometry::from_file(Path::new("does/not/exist.vlm")).unwrap_err();

        assert!(matches!(err, FormatError::File(_)));
        assert!(err
            .to_string()
            .starts_with("Could not access vertex layout file"));
    }
}
