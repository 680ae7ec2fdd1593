// Runtime settings come from environment variables; there are no CLI flags.
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_DATASET: &str = "electricity.csv";
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub output_dir: PathBuf,
    pub preview_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            output_dir: PathBuf::from("."),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(p) = lookup("ELECTRICITY_CSV").filter(|s| !s.trim().is_empty()) {
            cfg.dataset_path = PathBuf::from(p.trim());
        }
        if let Some(d) = lookup("DASHBOARD_OUT_DIR").filter(|s| !s.trim().is_empty()) {
            cfg.output_dir = PathBuf::from(d.trim());
        }
        if let Some(n) = lookup("DASHBOARD_PREVIEW_ROWS") {
            match n.trim().parse::<usize>() {
                Ok(v) if v > 0 => cfg.preview_rows = v,
                _ => warn!(value = %n, "invalid DASHBOARD_PREVIEW_ROWS, using {}", DEFAULT_PREVIEW_ROWS),
            }
        }
        cfg
    }

    pub fn output_path(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("ELECTRICITY_CSV", "data/lebanon.csv"),
            ("DASHBOARD_OUT_DIR", "out"),
            ("DASHBOARD_PREVIEW_ROWS", "25"),
        ]));
        assert_eq!(cfg.dataset_path, PathBuf::from("data/lebanon.csv"));
        assert_eq!(cfg.output_path("pie.svg"), PathBuf::from("out/pie.svg"));
        assert_eq!(cfg.preview_rows, 25);
    }

    #[test]
    fn bad_preview_rows_fall_back() {
        let cfg = AppConfig::from_lookup(lookup(&[("DASHBOARD_PREVIEW_ROWS", "lots")]));
        assert_eq!(cfg.preview_rows, DEFAULT_PREVIEW_ROWS);
        let cfg = AppConfig::from_lookup(lookup(&[("DASHBOARD_PREVIEW_ROWS", "0")]));
        assert_eq!(cfg.preview_rows, DEFAULT_PREVIEW_ROWS);
    }
}
