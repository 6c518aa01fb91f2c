use std::path::PathBuf;

pub const DEFAULT_DATASET: &str = "ibm_emp_att_dataset.csv";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

pub const DATASET_VAR: &str = "ATTRITION_DATASET";
pub const ADDR_VAR: &str = "ATTRITION_ADDR";

/// Startup settings of the dashboard server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub dataset_path: PathBuf,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            bind_addr: DEFAULT_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Resolve settings from positional arguments (dataset path, then bind
    /// address), falling back to the environment and then the defaults.
    ///
    /// `args` excludes the program name. `env` looks up a variable by name.
    pub fn resolve<I, F>(args: I, env: F) -> Self
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut args = args.into_iter();
        let dataset_path = args
            .next()
            .or_else(|| env(DATASET_VAR))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET));
        let bind_addr = args
            .next()
            .or_else(|| env(ADDR_VAR))
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());

        Config {
            dataset_path,
            bind_addr,
        }
    }

    /// Settings for the running process
    pub fn from_env() -> Self {
        Self::resolve(std::env::args().skip(1), |key| std::env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_args_or_env() {
        assert_eq!(Config::resolve(Vec::new(), no_env), Config::default());
    }

    #[test]
    fn args_win_over_env() {
        let env = |key: &str| match key {
            DATASET_VAR => Some("env.csv".to_string()),
            ADDR_VAR => Some("0.0.0.0:9000".to_string()),
            _ => None,
        };
        let config = Config::resolve(vec!["data/hr.csv".to_string()], env);
        assert_eq!(config.dataset_path, PathBuf::from("data/hr.csv"));
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
    }

    #[test]
    fn both_positional_args() {
        let config = Config::resolve(vec!["a.csv".to_string(), "127.0.0.1:8050".to_string()], no_env);
        assert_eq!(config.bind_addr, "127.0.0.1:8050");
    }
}
