use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub dataset_path: PathBuf,
    pub max_file_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            dataset_path: PathBuf::from("data/step_counts.csv"),
            max_file_size: 5 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let dataset_path = std::env::var("DATASET_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.dataset_path);

        let max_file_size = std::env::var("MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .map(|mb| mb * 1024 * 1024)
            .unwrap_or(defaults.max_file_size);

        Self {
            port,
            dataset_path,
            max_file_size,
        }
    }
}
