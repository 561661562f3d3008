// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, ValueHint, arg};
use icsnorm_core::{CalendarEventRecord, Config as CoreConfig, import_calendar};
use tokio::{fs, io::AsyncReadExt};

use crate::arg::{CommonArgs, OutputFormat};
use crate::config::Config;
use crate::record_formatter::RecordFormatter;

const STDIN: &str = "-";

#[derive(Debug, Clone)]
pub struct CmdImport {
    /// Path of the document, `-` for stdin.
    pub input: String,
    pub output_format: Option<OutputFormat>,
    pub no_validate: bool,
}

impl CmdImport {
    pub const NAME: &str = "import";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Import the events of an iCalendar document")
            .arg(
                arg!(input: <FILE> "Path to the .ics file, `-` to read from stdin")
                    .value_hint(ValueHint::FilePath),
            )
            .arg(CommonArgs::output_format())
            .arg(arg!(--"no-validate" "Emit records without checking their shape"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let input = match matches.get_one::<String>("input") {
            Some(input) => input.clone(),
            _ => unreachable!(),
        };

        Self {
            input,
            output_format: CommonArgs::get_output_format(matches),
            no_validate: matches.get_flag("no-validate"),
        }
    }

    pub async fn run(self, core_config: CoreConfig, config: Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "importing calendar...");
        let text = self.read_input().await?;
        let records = self.import(&text, core_config)?;

        let format = self.output_format.unwrap_or(config.output_format);
        let out = RecordFormatter::new(format).format(&records)?;
        println!("{}", out.trim_end());
        Ok(())
    }

    fn import(
        &self,
        text: &str,
        mut core_config: CoreConfig,
    ) -> Result<Vec<CalendarEventRecord>, Box<dyn Error>> {
        if self.no_validate {
            core_config.validate = false;
        }
        Ok(import_calendar(text, &core_config)?)
    }

    async fn read_input(&self) -> Result<String, Box<dyn Error>> {
        if self.input == STDIN {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            return Ok(text);
        }

        fs::read_to_string(&self.input)
            .await
            .map_err(|e| format!("Failed to read {}: {}", self.input, e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALENDAR: &str = "\
BEGIN:VCALENDAR\r
BEGIN:VEVENT\r
UID:a\r
DTSTART:20250101T090000Z\r
END:VEVENT\r
END:VCALENDAR\r
";

    #[test]
    fn parses_arguments() {
        let cmd = Command::new("test").subcommand(CmdImport::command());
        let matches = cmd
            .try_get_matches_from(["test", "import", "cal.ics", "--output-format", "table"])
            .unwrap();
        let sub_matches = matches.subcommand_matches(CmdImport::NAME).unwrap();
        let parsed = CmdImport::from(sub_matches);
        assert_eq!(parsed.input, "cal.ics");
        assert_eq!(parsed.output_format, Some(OutputFormat::Table));
        assert!(!parsed.no_validate);
    }

    #[test]
    fn requires_input() {
        let cmd = Command::new("test").subcommand(CmdImport::command());
        assert!(cmd.try_get_matches_from(["test", "import"]).is_err());
    }

    #[test]
    fn no_validate_overrides_config() {
        let cmd = CmdImport {
            input: STDIN.to_string(),
            output_format: None,
            no_validate: true,
        };

        // an all-day event ending before it starts only survives without validation
        let text = CALENDAR.replace(
            "DTSTART:20250101T090000Z",
            "DTSTART;VALUE=DATE:20250105\r\nDTEND;VALUE=DATE:20250101",
        );
        assert_eq!(cmd.import(&text, CoreConfig::default()).unwrap().len(), 1);

        let cmd = CmdImport {
            no_validate: false,
            ..cmd
        };
        assert!(cmd.import(&text, CoreConfig::default()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn reads_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cal.ics");
        std::fs::write(&path, CALENDAR).unwrap();

        let cmd = CmdImport {
            input: path.to_string_lossy().into_owned(),
            output_format: None,
            no_validate: false,
        };
        assert_eq!(cmd.read_input().await.unwrap(), CALENDAR);

        let missing = CmdImport {
            input: dir.path().join("missing.ics").to_string_lossy().into_owned(),
            ..cmd
        };
        assert!(missing.read_input().await.is_err());
    }
}
