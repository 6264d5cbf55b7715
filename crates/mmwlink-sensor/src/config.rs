use std::path::Path;

use mmwlink_serial::ControlPort;

use crate::error::{Result, SessionError};

/// A parsed sensor configuration script.
///
/// Scripts are the text files shipped with the sensor tooling: one CLI
/// command per line, `%` starting a comment line. Parsing strips comments
/// and blank lines and preserves command order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorConfig {
    commands: Vec<String>,
}

impl SensorConfig {
    /// Parse a script from text.
    pub fn parse(text: &str) -> Self {
        let commands = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty() && !line.starts_with('%'))
            .map(str::to_string)
            .collect();
        Self { commands }
    }

    /// Load and parse a script file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::Script {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Send every command over the control port, stopping at the first
    /// failure.
    pub fn apply(&self, control: &mut ControlPort) -> Result<()> {
        control.run_script(self.commands())?;
        Ok(())
    }

    /// The commands in script order.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_and_blank_lines() {
        let script = "\
% Sensor front-end configuration
sensorStop
flushCfg

% Profile
profileCfg 0 60 567 7 57.14 0 0 70 1 256 5209 0 0 30
sensorStart
";
        let config = SensorConfig::parse(script);
        assert_eq!(
            config.commands().collect::<Vec<_>>(),
            [
                "sensorStop",
                "flushCfg",
                "profileCfg 0 60 567 7 57.14 0 0 70 1 256 5209 0 0 30",
                "sensorStart",
            ]
        );
    }

    #[test]
    fn handles_crlf_line_endings() {
        let config = SensorConfig::parse("sensorStop\r\nsensorStart\r\n");
        assert_eq!(
            config.commands().collect::<Vec<_>>(),
            ["sensorStop", "sensorStart"]
        );
    }

    #[test]
    fn empty_script_parses_empty() {
        let config = SensorConfig::parse("% nothing but comments\n\n");
        assert!(config.is_empty());
        assert_eq!(config.len(), 0);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = SensorConfig::load("/nonexistent/profile.cfg").unwrap_err();
        match err {
            SessionError::Script { path, .. } => {
                assert_eq!(path.to_str(), Some("/nonexistent/profile.cfg"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
