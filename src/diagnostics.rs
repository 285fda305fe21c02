use std::fmt;

use log::{debug, info, log_enabled, warn, Level};

use crate::parser::ParsedObj;

/// Something in the source that was skipped without failing the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnrecognizedLine { line: usize, text: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnrecognizedLine { line, text } => {
                write!(f, "Line {}: skipping unknown statement \"{}\"", line, text)
            }
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Reports attribute counts and the first few values of a freshly parsed mesh.
pub fn log_summary(parsed: &ParsedObj) {
    let geometry = &parsed.geometry;

    info!(
        "Loaded mesh: {} positions, {} normals, {} texcoords, {} faces ({} corners)",
        geometry.position_count(),
        geometry.normal_count(),
        geometry.texcoord_count(),
        geometry.face_count(),
        geometry.corner_count()
    );
    if !parsed.diagnostics.is_empty() {
        info!("Skipped {} unknown statements", parsed.diagnostics.len());
    }

    // the samples are only worth formatting when someone listens
    if !log_enabled!(Level::Debug) {
        return;
    }

    debug!("First positions: {:?}", prefix(&geometry.positions, 9));
    debug!("First corners: {:?}", prefix(&geometry.face_corners, 3));
    debug!("First normals: {:?}", prefix(&geometry.normals, 9));
    debug!("First texcoords: {:?}", prefix(&geometry.texcoords, 6));
}

fn prefix<T>(values: &[T], len: usize) -> &[T] {
    &values[..values.len().min(len)]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::UnrecognizedLine {
            line: 4,
            text: "o cube".into(),
        };

        assert_eq!(
            diagnostic.to_string(),
            "Line 4: skipping unknown statement \"o cube\""
        );
    }

    #[test]
    fn test_log_summary() -> crate::Result<()> {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init();

        let parsed = crate::parse_str("v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1 2 3 1\nl 1 2\n")?;
        log_summary(&parsed);

        assert_eq!(parsed.diagnostics.len(), 1);
        Ok(())
    }

    #[test]
    fn test_prefix() {
        assert_eq!(prefix(&[1, 2, 3], 2), &[1, 2]);
        assert_eq!(prefix(&[1, 2, 3], 9), &[1, 2, 3]);
    }
}
