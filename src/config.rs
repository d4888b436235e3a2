//! Mechanism for loading the run configuration from input files

use crate::Result;

use eyre::{ensure, eyre, WrapErr};

use std::{fs::File, io::Read, path::Path, str::FromStr, str::SplitWhitespace};

/// Configuration of a single-process run
#[derive(Debug, PartialEq, Eq)]
pub struct SerialConfig {
    /// Number of samples drawn by the only trial
    pub sample_count: usize,
}
//
impl SerialConfig {
    /// Load the configuration from a file, check it, and print it out
    pub fn load(file_name: &Path) -> Result<Self> {
        let config = Self::parse(&read_config_file(file_name)?)?;
        config.print();
        Ok(config)
    }

    /// Decode and check the contents of a configuration file
    pub fn parse(config_str: &str) -> Result<Self> {
        let mut items = ConfigItems::new(config_str);
        let config = SerialConfig {
            sample_count: items.next_item("sample_count")?.parse::<usize>()?,
        };

        // A sensible trial must draw at least one sample
        ensure!(config.sample_count > 0, "Please draw at least one sample");

        Ok(config)
    }

    /// Display the configuration
    pub fn print(&self) {
        println!("Using {} samples", self.sample_count);
    }
}

/// Configuration of a multi-worker run
#[derive(Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Number of samples drawn by each trial
    pub sample_count: usize,

    /// Number of trials requested across all workers
    pub total_trials: usize,
}
//
impl ParallelConfig {
    /// Load the configuration from a file, check it, and print it out
    pub fn load(file_name: &Path) -> Result<Self> {
        let config = Self::parse(&read_config_file(file_name)?)?;
        config.print();
        Ok(config)
    }

    /// Decode and check the contents of a configuration file
    pub fn parse(config_str: &str) -> Result<Self> {
        let mut items = ConfigItems::new(config_str);
        let config = ParallelConfig {
            sample_count: items.next_item("sample_count")?.parse::<usize>()?,
            total_trials: items.next_item("total_trials")?.parse::<usize>()?,
        };

        ensure!(config.sample_count > 0, "Please draw at least one sample per trial");
        ensure!(config.total_trials > 0, "Please run at least one trial");

        Ok(config)
    }

    /// Display the configuration
    pub fn print(&self) {
        println!("Using {} samples per trial", self.sample_count);
        println!("Requested {} trials", self.total_trials);
    }
}

/// Read out a configuration file or die trying
fn read_config_file(file_name: &Path) -> Result<String> {
    let mut config_file = File::open(file_name)
        .wrap_err_with(|| format!("Unable to open input file {}", file_name.display()))?;
    let mut buffer = String::new();
    config_file
        .read_to_string(&mut buffer)
        .wrap_err_with(|| format!("Unable to read input file {}", file_name.display()))?;
    Ok(buffer)
}

/// Sequence of whitespace-separated values from a configuration file
struct ConfigItems<'data> {
    iter: SplitWhitespace<'data>,
}
//
impl<'data> ConfigItems<'data> {
    /// Prepare to iterate over the values of a configuration file
    fn new(config_str: &'data str) -> Self {
        Self {
            iter: config_str.split_whitespace(),
        }
    }

    /// Fetch the next configuration item, tagging it with the name of the
    /// configuration field which it is supposed to fill to ease error
    /// reporting, and handling unexpected end-of-file too.
    fn next_item(&mut self, name: &'static str) -> Result<ConfigItem<'data>> {
        self.iter
            .next()
            .map(|data| ConfigItem::new(name, data))
            .ok_or_else(|| eyre!("Missing configuration of {}", name))
    }
}

/// A value from the configuration file, tagged with the struct field which it
/// is supposed to map for error reporting purposes.
struct ConfigItem<'data> {
    name: &'static str,
    data: &'data str,
}
//
impl<'data> ConfigItem<'data> {
    /// Build a config item from a struct field tag and raw iterator data
    fn new(name: &'static str, data: &'data str) -> Self {
        Self { name, data }
    }

    /// Parse this data using Rust's standard parsing logic
    fn parse<T: FromStr>(self) -> Result<T>
    where
        <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
    {
        self.data
            .parse::<T>()
            .wrap_err_with(|| format!("Could not parse configuration of {}", self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_input() {
        let config = SerialConfig::parse("10000\n").unwrap();
        assert_eq!(config.sample_count, 10_000);
    }

    #[test]
    fn parallel_input_accepts_any_whitespace() {
        for input in ["1000 10", "1000\n10\n", "  1000\t\n 10  "] {
            let config = ParallelConfig::parse(input).unwrap();
            assert_eq!(
                config,
                ParallelConfig {
                    sample_count: 1000,
                    total_trials: 10
                }
            );
        }
    }

    #[test]
    fn missing_value_names_the_field() {
        let err = ParallelConfig::parse("1000").unwrap_err();
        assert_eq!(err.to_string(), "Missing configuration of total_trials");

        let err = SerialConfig::parse("   \n").unwrap_err();
        assert_eq!(err.to_string(), "Missing configuration of sample_count");
    }

    #[test]
    fn malformed_value_names_the_field() {
        let err = ParallelConfig::parse("1000 ten").unwrap_err();
        assert_eq!(err.to_string(), "Could not parse configuration of total_trials");

        // Negative counts make no sense
        assert!(SerialConfig::parse("-5").is_err());
    }

    #[test]
    fn zero_counts_are_rejected() {
        assert!(SerialConfig::parse("0").is_err());
        assert!(ParallelConfig::parse("0 10").is_err());
        assert!(ParallelConfig::parse("10 0").is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let path = std::env::temp_dir().join("mcquad-config-that-does-not-exist");
        let err = SerialConfig::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("Unable to open input file"));
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("mcquad-config-{}", std::process::id()));
        std::fs::write(&path, "250 12\n").unwrap();
        let config = ParallelConfig::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.unwrap().total_trials, 12);
    }
}
