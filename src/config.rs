use std::path::PathBuf;

use clap::Parser;

/// File the dashboard looks for in the working directory when none is given.
pub const DEFAULT_DATA_FILE: &str = "Employee data.csv";

#[derive(Parser, Debug, Clone)]
#[command(name = "employee-dashboard")]
#[command(about = "Interactive employee data analysis dashboard")]
#[command(version)]
pub struct Config {
    /// Dataset to load at startup (.csv, .tsv, .json or .parquet)
    pub file: Option<PathBuf>,

    /// Number of bins in the age histogram
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    pub bins: u16,
}

impl Config {
    /// The file to open at startup: the explicit argument, otherwise the
    /// default file if it exists.
    pub fn startup_file(&self) -> Option<PathBuf> {
        self.file.clone().or_else(|| {
            let default = PathBuf::from(DEFAULT_DATA_FILE);
            default.is_file().then_some(default)
        })
    }

    pub fn histogram_bins(&self) -> usize {
        usize::from(self.bins)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file: None,
            bins: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_file_and_bins() {
        let config =
            Config::try_parse_from(["employee-dashboard", "staff.csv", "--bins", "25"]).unwrap();
        assert_eq!(config.file, Some(PathBuf::from("staff.csv")));
        assert_eq!(config.histogram_bins(), 25);
        assert_eq!(config.startup_file(), Some(PathBuf::from("staff.csv")));
    }

    #[test]
    fn defaults_to_ten_bins() {
        let config = Config::try_parse_from(["employee-dashboard"]).unwrap();
        assert_eq!(config.histogram_bins(), 10);
        assert!(config.file.is_none());
    }

    #[test]
    fn zero_bins_is_rejected() {
        assert!(Config::try_parse_from(["employee-dashboard", "--bins", "0"]).is_err());
    }
}
