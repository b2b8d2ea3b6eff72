//! Stage file naming and discovery

use std::io;
use std::path::{Path, PathBuf};

/// Suffix of raw fetch outputs
pub const WEATHER_SUFFIX: &str = "_weather.json";

/// Suffix of per-city analysis outputs
pub const ANALYSIS_SUFFIX: &str = "_analysis.json";

/// Raw forecast path for one city
pub fn weather_path(data_dir: &Path, city: &str) -> PathBuf {
    data_dir.join(format!("{city}{WEATHER_SUFFIX}"))
}

/// Analysis output path derived from a raw forecast path
pub fn analysis_path(results_dir: &Path, weather_file: &Path) -> Option<PathBuf> {
    let name = weather_file.file_name()?.to_str()?;
    let stem = name.strip_suffix(WEATHER_SUFFIX)?;
    Some(results_dir.join(format!("{stem}{ANALYSIS_SUFFIX}")))
}

/// Aggregation map key: the file name up to the first underscore
pub fn city_key(file: &Path) -> Option<&str> {
    let name = file.file_name()?.to_str()?;
    name.split('_').next()
}

/// Files under `dir` ending in `suffix`, in sorted name order. A
/// missing directory yields an empty set, matching an empty upstream
/// stage.
pub fn discover(dir: &Path, suffix: &str) -> io::Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if path.is_file() && name.ends_with(suffix) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_path() {
        let path = weather_path(Path::new("./data"), "MOSCOW");
        assert_eq!(path, Path::new("./data/MOSCOW_weather.json"));
    }

    #[test]
    fn test_analysis_path_rewrites_dir_and_suffix() {
        let input = Path::new("./data/MOSCOW_weather.json");
        let output = analysis_path(Path::new("./results"), input).unwrap();
        assert_eq!(output, Path::new("./results/MOSCOW_analysis.json"));
    }

    #[test]
    fn test_analysis_path_rejects_other_names() {
        assert_eq!(
            analysis_path(Path::new("./results"), Path::new("./data/notes.json")),
            None
        );
    }

    #[test]
    fn test_city_key_takes_prefix_before_first_underscore() {
        assert_eq!(city_key(Path::new("results/ROMA_analysis.json")), Some("ROMA"));
        assert_eq!(
            city_key(Path::new("results/NEW_YORK_analysis.json")),
            Some("NEW")
        );
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b_weather.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a_weather.json"), "{}").unwrap();
        std::fs::write(dir.path().join("c_analysis.json"), "{}").unwrap();
        std::fs::write(dir.path().join("readme.txt"), "").unwrap();

        let files = discover(dir.path(), WEATHER_SUFFIX).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a_weather.json", "b_weather.json"]);
    }

    #[test]
    fn test_discover_missing_dir_is_empty() {
        let files = discover(Path::new("./no-such-dir"), WEATHER_SUFFIX).unwrap();
        assert!(files.is_empty());
    }
}
