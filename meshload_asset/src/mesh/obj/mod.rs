mod meta;

use anyhow::{Context, Result};
use log::info;
use meshload_format::OutputGeometry;
use std::path::{Path, PathBuf};

use crate::utils;

use self::meta::ObjMeta;

pub(crate) const OUTPUT_EXTENSION: &str = "vlm";

fn parse(path: &Path, meta: ObjMeta) -> Result<OutputGeometry> {
    let parsed = meshload::parse_file(path)?;

    let geometry = if meta.triangulate {
        parsed.geometry.triangulated()
    } else {
        parsed.geometry
    };

    geometry
        .to_style(meta.style)
        .with_context(|| format!("Could not lay out mesh: {}", path.display()))
}

fn serialize(mesh: &OutputGeometry) -> Result<Vec<u8>> {
    mesh.to_bytes().context("Could not serialize OutputGeometry")
}

fn save(path: &Path, output_dir: &Path, data: &[u8]) -> Result<PathBuf> {
    let file_name = utils::file_name(path)?;
    let target = utils::combine_path(output_dir, file_name, OUTPUT_EXTENSION);
    utils::write_file(&target, data)?;
    Ok(target)
}

/// Parse meta from file called `file.toml` or alternatively from folder scoped meta file named `obj.toml` or else use default meta
fn parse_meta(path: &Path) -> Result<ObjMeta> {
    let dir = path
        .parent()
        .with_context(|| format!("Path terminates in root or prefix: {}", path.display()))?;
    let meta_file = utils::file_name(path)?;

    let candidates = [
        utils::combine_path(dir, meta_file, "toml"),
        utils::combine_path(dir, "obj", "toml"),
    ];
    for candidate in &candidates {
        if candidate.is_file() {
            return ObjMeta::parse(candidate)
                .with_context(|| format!("Invalid meta file: {}", candidate.display()));
        }
    }

    Ok(ObjMeta::default())
}

pub(crate) fn process(path: &Path, output_dir: &Path) -> Result<()> {
    info!("Processing Wavefront `.obj`-file: `{}`", path.display());
    let meta = parse_meta(path)?;
    let mesh = parse(path, meta)?;
    let target = save(path, output_dir, &serialize(&mesh)?)?;
    info!(
        "Wrote {:?} layout with {} vertices and {} indices to `{}`",
        mesh.style,
        mesh.vertex_count(),
        mesh.index_count(),
        target.display()
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use meshload_format::LayoutStyle;
    use std::fs;

    const QUAD: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";

    fn scratch_dir(name: &str) -> Result<PathBuf> {
        let dir = std::env::temp_dir()
            .join("meshload_asset_test")
            .join(format!("{}_{}", name, std::process::id()));
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    #[test]
    fn test_process_with_meta() -> Result<()> {
        let dir = scratch_dir("meta")?;
        fs::write(dir.join("quad.obj"), QUAD)?;
        fs::write(dir.join("quad.toml"), "style = \"array\"\ntriangulate = true\n")?;

        process(&dir.join("quad.obj"), &dir)?;

        let mesh = OutputGeometry::from_file(&dir.join("quad.vlm"))?;
        assert_eq!(mesh.style, LayoutStyle::Array);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices, None);

        fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[test]
    fn test_folder_meta() -> Result<()> {
        let dir = scratch_dir("folder_meta")?;
        fs::write(dir.join("quad.obj"), QUAD)?;
        fs::write(dir.join("obj.toml"), "triangulate = true\n")?;

        process(&dir.join("quad.obj"), &dir)?;

        let mesh = OutputGeometry::from_file(&dir.join("quad.vlm"))?;
        assert_eq!(mesh.style, LayoutStyle::SingleIndex);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices, Some(vec![0, 1, 2, 0, 2, 3]));

        fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[test]
    fn test_quad_without_triangulation_fails() -> Result<()> {
        let dir = scratch_dir("no_meta")?;
        fs::write(dir.join("quad.obj"), QUAD)?;

        assert!(process(&dir.join("quad.obj"), &dir).is_err());
        assert!(!dir.join("quad.vlm").exists());

        fs::remove_dir_all(&dir)?;
        Ok(())
    }
}
