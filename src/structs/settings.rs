#[derive(Clone)]
pub struct Settings {
    /// Command name or full path of the PlantUML executable.
    pub renderer_path: String,
    /// Upper bound on a single renderer run, in seconds.
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            renderer_path: "plantuml".to_string(),
            timeout_secs: 60,
        }
    }
}
