//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::PricecastError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_all_sections() {
        let content = r#"
[data]
dir = /var/lib/pricecast

[prediction]
symbol = TSLA
model = Random Forest

[indicators]
ma_long = 50

[random_forest]
n_trees = 250
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("data", "dir"),
            Some("/var/lib/pricecast".to_string())
        );
        assert_eq!(
            adapter.get_string("prediction", "model"),
            Some("Random Forest".to_string())
        );
        assert_eq!(adapter.get_int("indicators", "ma_long", 21).unwrap(), 50);
        assert_eq!(adapter.get_int("random_forest", "n_trees", 100).unwrap(), 250);
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[prediction]\nsymbol = TSLA\n").unwrap();
        assert_eq!(adapter.get_string("prediction", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_default_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[indicators]\nma_short = 9\n").unwrap();
        assert_eq!(adapter.get_int("indicators", "ma_short", 7).unwrap(), 9);
        assert_eq!(adapter.get_int("indicators", "rsi_period", 14).unwrap(), 14);
    }

    #[test]
    fn get_int_rejects_non_numeric_value() {
        let adapter =
            FileConfigAdapter::from_string("[indicators]\nma_long = fifty\n").unwrap();
        let err = adapter.get_int("indicators", "ma_long", 21).unwrap_err();
        assert!(matches!(
            err,
            PricecastError::ConfigInvalid { section, key, .. }
                if section == "indicators" && key == "ma_long"
        ));
    }

    #[test]
    fn get_int_trims_whitespace() {
        let adapter =
            FileConfigAdapter::from_string("[random_forest]\nseed =   17   \n").unwrap();
        assert_eq!(adapter.get_int("random_forest", "seed", 42).unwrap(), 17);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[output]\npredictions_path = out/tsla.csv\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("output", "predictions_path"),
            Some("out/tsla.csv".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        assert!(FileConfigAdapter::from_file("/nonexistent/path/pricecast.ini").is_err());
    }
}
