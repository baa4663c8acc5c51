//! Scoped on-disk staging of a rendered artifact.
//!
//! The file exists only for the duration of one read-and-display and is
//! removed when the scope drops, including on presenter errors and panics.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::errors::RenderError;
use crate::logging::{log, obj, v_str, Domain, Level};
use crate::visual::{Artifact, EmbedHints};

pub struct ScopedArtifact {
    file: NamedTempFile,
    kind: &'static str,
}

impl ScopedArtifact {
    pub fn stage(artifact: &Artifact) -> Result<Self, RenderError> {
        let mut file = tempfile::Builder::new()
            .prefix("portfolio-")
            .suffix(".html")
            .tempfile()?;
        file.write_all(artifact.html.as_bytes())?;
        file.flush()?;
        let kind = artifact.kind.as_str();
        log(
            Level::Debug,
            Domain::Artifact,
            "staged",
            obj(&[
                ("kind", v_str(kind)),
                ("path", v_str(&file.path().display().to_string())),
            ]),
        );
        Ok(Self { file, kind })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn read(&self) -> Result<String, RenderError> {
        Ok(fs::read_to_string(self.path())?)
    }
}

impl Drop for ScopedArtifact {
    fn drop(&mut self) {
        // NamedTempFile unlinks itself right after this.
        log(
            Level::Debug,
            Domain::Artifact,
            "released",
            obj(&[
                ("kind", v_str(self.kind)),
                ("path", v_str(&self.file.path().display().to_string())),
            ]),
        );
    }
}

/// What the presenter gets while the artifact is staged.
#[derive(Debug, Clone, Copy)]
pub struct Staged<'a> {
    pub html: &'a str,
    pub path: &'a Path,
    pub embed: EmbedHints,
}

/// Stage `artifact`, read it back and hand the document to `sink`.
/// The staged file is gone when this returns, whatever the outcome.
pub fn present<T, E, F>(artifact: &Artifact, sink: F) -> Result<T, E>
where
    F: FnOnce(Staged<'_>) -> Result<T, E>,
    E: From<RenderError>,
{
    let scoped = ScopedArtifact::stage(artifact)?;
    let html = scoped.read()?;
    sink(Staged {
        html: &html,
        path: scoped.path(),
        embed: artifact.embed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::ArtifactKind;
    use std::io;
    use std::path::PathBuf;

    fn sample() -> Artifact {
        Artifact {
            kind: ArtifactKind::Graph,
            title: "t".to_string(),
            html: "<html>graph</html>".to_string(),
            embed: EmbedHints::default(),
        }
    }

    #[test]
    fn test_present_reads_and_cleans_up() {
        let mut staged_path = PathBuf::new();
        let out: Result<usize, RenderError> = present(&sample(), |staged| {
            assert!(staged.path.exists());
            assert_eq!(staged.embed.height_px, 600);
            staged_path = staged.path.to_path_buf();
            Ok(staged.html.len())
        });
        assert_eq!(out.unwrap(), "<html>graph</html>".len());
        assert!(!staged_path.exists());
    }

    #[test]
    fn test_present_cleans_up_on_sink_error() {
        let mut staged_path = PathBuf::new();
        let out: Result<(), RenderError> = present(&sample(), |staged| {
            staged_path = staged.path.to_path_buf();
            Err(RenderError::Io(io::Error::new(io::ErrorKind::Other, "display failed")))
        });
        assert!(out.is_err());
        assert!(!staged_path.as_os_str().is_empty());
        assert!(!staged_path.exists());
    }

    #[test]
    fn test_drop_removes_file() {
        let scoped = ScopedArtifact::stage(&sample()).unwrap();
        let path = scoped.path().to_path_buf();
        assert_eq!(scoped.read().unwrap(), "<html>graph</html>");
        drop(scoped);
        assert!(!path.exists());
    }
}
