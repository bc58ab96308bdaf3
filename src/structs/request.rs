use std::path::{Path, PathBuf};

/// One invocation of the renderer: where the diagram comes from and where
/// the image ends up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionRequest {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl ConversionRequest {
    /// The target keeps the full source name and gains a `.png` suffix
    /// ("diagram.puml" becomes "diagram.puml.png"), next to the source.
    pub fn new(source: PathBuf) -> Self {
        let mut target = source.clone().into_os_string();
        target.push(".png");

        Self {
            source,
            target: PathBuf::from(target),
        }
    }

    /// Directory the renderer writes into.
    pub fn output_dir(&self) -> &Path {
        self.source
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    }

    pub fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_appends_png_suffix() {
        let request = ConversionRequest::new(PathBuf::from("/tmp/diagram.puml"));
        assert_eq!(request.target, PathBuf::from("/tmp/diagram.puml.png"));
        assert_eq!(request.output_dir(), Path::new("/tmp"));
    }

    #[test]
    fn target_keeps_original_extension() {
        let request = ConversionRequest::new(PathBuf::from("/home/user/uml/state.puml"));
        assert_eq!(
            request.target,
            PathBuf::from("/home/user/uml/state.puml.png")
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let first = ConversionRequest::new(PathBuf::from("/tmp/diagram.puml"));
        let second = ConversionRequest::new(PathBuf::from("/tmp/diagram.puml"));
        assert_eq!(first, second);
    }

    #[test]
    fn bare_file_name_outputs_to_current_dir() {
        let request = ConversionRequest::new(PathBuf::from("diagram.puml"));
        assert_eq!(request.target, PathBuf::from("diagram.puml.png"));
        assert_eq!(request.output_dir(), Path::new("."));
    }

    #[test]
    fn file_name_strips_directories() {
        let request = ConversionRequest::new(PathBuf::from("/tmp/nested/diagram.puml"));
        assert_eq!(request.file_name(), "diagram.puml");
    }
}
