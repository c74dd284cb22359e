use std::env;
use std::path::PathBuf;

/// Default cutout manifest for classification runs.
pub const MANIFEST_FILE: &str = "cutoutlist.dat";
/// Default cutout manifest for training runs.
pub const TRAINING_MANIFEST_FILE: &str = "trainlist.dat";
/// Default append-only result log.
pub const RESULTS_FILE: &str = "results.dat";
/// Default training truth table.
pub const TRUTH_FILE: &str = "truth.dat";

/// Returns the directory the default data files are resolved against.
///
/// The `GALMORPH_DATA` environment variable overrides it; otherwise data files
/// live in the working directory, next to where the annotator runs the tool.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = env::var("GALMORPH_DATA") {
        return PathBuf::from(dir);
    }
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_honors_environment_override() {
        env::set_var("GALMORPH_DATA", "/tmp/galmorph-data");
        assert_eq!(data_dir(), PathBuf::from("/tmp/galmorph-data"));
        env::remove_var("GALMORPH_DATA");

        assert_eq!(data_dir(), PathBuf::from("."));
    }
}
