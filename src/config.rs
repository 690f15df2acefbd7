use std::path::PathBuf;

pub const DEFAULT_INPUT_FILE: &str = "CS210_Project_Three_Input_File.txt";
pub const DEFAULT_EXPORT_FILE: &str = "frequency.dat";
pub const DEFAULT_MARKER: char = '*';

pub const ENV_INPUT_FILE: &str = "GROCER_INPUT";
pub const ENV_EXPORT_FILE: &str = "GROCER_OUTPUT";

/// File locations and rendering options handed to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub input_path: PathBuf,
    pub export_path: PathBuf,
    pub marker: char,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            export_path: PathBuf::from(DEFAULT_EXPORT_FILE),
            marker: DEFAULT_MARKER,
        }
    }
}

impl TrackerConfig {
    pub fn new(input_path: impl Into<PathBuf>, export_path: impl Into<PathBuf>, marker: char) -> Self {
        Self {
            input_path: input_path.into(),
            export_path: export_path.into(),
            marker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = TrackerConfig::default();
        assert_eq!(config.input_path, PathBuf::from("CS210_Project_Three_Input_File.txt"));
        assert_eq!(config.export_path, PathBuf::from("frequency.dat"));
        assert_eq!(config.marker, '*');
    }

    #[test]
    fn test_custom_config() {
        let config = TrackerConfig::new("items.txt", "out/counts.dat", '#');
        assert_eq!(config.input_path, PathBuf::from("items.txt"));
        assert_eq!(config.export_path, PathBuf::from("out/counts.dat"));
        assert_eq!(config.marker, '#');
    }
}
