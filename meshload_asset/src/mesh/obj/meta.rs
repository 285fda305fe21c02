use anyhow::Result;
use meshload_format::LayoutStyle;
use serde::Deserialize;
use std::path::Path;

/// Per-asset conversion settings, read from a TOML file next to the mesh.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct ObjMeta {
    pub(crate) style: LayoutStyle,
    /// fan-triangulate faces with more than three corners instead of rejecting them
    pub(crate) triangulate: bool,
}

impl ObjMeta {
    pub(crate) fn parse(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_toml(&data)
    }

    pub(crate) fn from_toml(data: &str) -> Result<Self> {
        let meta: Self = toml::from_str(data)?;
        Ok(meta)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() -> Result<()> {
        assert_eq!(ObjMeta::from_toml("")?, ObjMeta::default());
        assert_eq!(ObjMeta::default().style, LayoutStyle::SingleIndex);
        Ok(())
    }

    #[test]
    fn test_from_toml() -> Result<()> {
        assert_eq!(
            ObjMeta::from_toml("style = \"array\"\ntriangulate = true\n")?,
            ObjMeta {
                style: LayoutStyle::Array,
                triangulate: true,
            }
        );
        assert_eq!(
            ObjMeta::from_toml("style = \"single-index\"")?.style,
            LayoutStyle::SingleIndex
        );
        assert!(ObjMeta::from_toml("style = \"strips\"").is_err());
        Ok(())
    }
}
