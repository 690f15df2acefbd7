use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use tracing::{debug, error};

use crate::config::TrackerConfig;
use crate::tracker::{is_valid_item_name, FrequencyTracker, Lookup};

const BANNER: &str = "======= Corner Grocer Item Tracker =======";
const INVALID_ITEM: &str = "Invalid input. Only alphabetic characters are allowed.";
const INVALID_CHOICE: &str = "Invalid input. Please enter a number between 1 and 5.";
const GOODBYE: &str = "Exiting program. Goodbye!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    LookUp,
    ListAll,
    Histogram,
    Save,
    Exit,
}

impl MenuChoice {
    /// Accepts exactly `1` through `5`, ignoring surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::LookUp),
            "2" => Some(Self::ListAll),
            "3" => Some(Self::Histogram),
            "4" => Some(Self::Save),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub fn report_lookup<W: Write>(out: &mut W, tracker: &FrequencyTracker, query: &str) -> io::Result<()> {
    if !is_valid_item_name(query) {
        return writeln!(out, "{}", INVALID_ITEM);
    }

    match tracker.lookup(query) {
        Lookup::Found { name, count } => writeln!(out, "{} was purchased {} time(s).", name, count),
        Lookup::NotFound(input) => writeln!(out, "{} was not found in the records.", input),
        Lookup::InvalidQuery => writeln!(out, "{}", INVALID_ITEM),
    }
}

pub fn report_frequencies<W: Write>(out: &mut W, tracker: &FrequencyTracker) -> io::Result<()> {
    writeln!(out, "\n{}", "Item Frequencies:".bold())?;
    for (name, count) in tracker.frequencies() {
        writeln!(out, "{} : {}", name, count)?;
    }
    Ok(())
}

pub fn report_histogram<W: Write>(out: &mut W, tracker: &FrequencyTracker, marker: char) -> io::Result<()> {
    writeln!(out, "\n{}", "Item Purchase Histogram:".bold())?;
    for row in tracker.histogram() {
        writeln!(out, "{} : {}", row.name, row.bar(marker))?;
    }
    Ok(())
}

/// Exports the counts and tells the user how it went. Returns whether the file was written.
pub fn report_save<W: Write>(out: &mut W, tracker: &FrequencyTracker, path: &Path) -> io::Result<bool> {
    match tracker.save(path) {
        Ok(()) => {
            writeln!(out, "Data successfully saved to {}", path.display())?;
            Ok(true)
        }
        Err(e) => {
            error!("❌ Export failed: {}", e);
            writeln!(out, "Error: Could not open {} for writing.", path.display())?;
            Ok(false)
        }
    }
}

/// Lists pairs read back from an export file.
pub fn report_saved<W: Write>(out: &mut W, path: &Path, pairs: &[(String, usize)]) -> io::Result<()> {
    writeln!(out, "\n{}", format!("Saved Frequencies ({}):", path.display()).bold())?;
    for (name, count) in pairs {
        writeln!(out, "{} : {}", name, count)?;
    }
    Ok(())
}

/// The interactive menu loop.
pub struct Shell<'a, R, W> {
    tracker: &'a FrequencyTracker,
    config: &'a TrackerConfig,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(tracker: &'a FrequencyTracker, config: &'a TrackerConfig, input: R, output: W) -> Self {
        Self {
            tracker,
            config,
            input,
            output,
        }
    }

    /// Runs until the user picks Exit or the input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;

            let Some(choice) = self.read_line()? else {
                debug!("input closed, leaving menu");
                break;
            };

            match MenuChoice::parse(&choice) {
                Some(MenuChoice::Exit) => break,
                Some(choice) => {
                    if !self.execute(choice)? {
                        debug!("input closed mid-command, leaving menu");
                        break;
                    }
                }
                None => writeln!(self.output, "{}", INVALID_CHOICE)?,
            }
        }

        writeln!(self.output, "{}", GOODBYE)?;
        self.output.flush()
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{}", BANNER.green().bold())?;
        writeln!(self.output, "1. Look up frequency of a specific item")?;
        writeln!(self.output, "2. Display all item frequencies")?;
        writeln!(self.output, "3. Display item histogram")?;
        writeln!(self.output, "4. Save data to {}", self.config.export_path.display())?;
        writeln!(self.output, "5. Exit program")?;
        write!(self.output, "Enter your choice (1-5): ")?;
        self.output.flush()
    }

    /// Returns `false` when the menu should stop, e.g. the input ended at a prompt.
    fn execute(&mut self, choice: MenuChoice) -> io::Result<bool> {
        debug!("menu choice {:?}", choice);
        match choice {
            MenuChoice::LookUp => {
                write!(self.output, "Enter the item name: ")?;
                self.output.flush()?;
                let Some(query) = self.read_line()? else {
                    writeln!(self.output)?;
                    return Ok(false);
                };
                report_lookup(&mut self.output, self.tracker, &query)?;
            }
            MenuChoice::ListAll => report_frequencies(&mut self.output, self.tracker)?,
            MenuChoice::Histogram => report_histogram(&mut self.output, self.tracker, self.config.marker)?,
            MenuChoice::Save => {
                report_save(&mut self.output, self.tracker, &self.config.export_path)?;
            }
            MenuChoice::Exit => return Ok(false),
        }
        Ok(true)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tracker() -> FrequencyTracker {
        FrequencyTracker::from_tokens(["Apple", "banana", "APPLE", "Banana", "banana"])
    }

    fn run_session(tracker: &FrequencyTracker, config: &TrackerConfig, script: &str) -> String {
        let mut output = Vec::new();
        Shell::new(tracker, config, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_menu_choice_parsing() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::LookUp));
        assert_eq!(MenuChoice::parse(" 4\n"), Some(MenuChoice::Save));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("6"), None);
        assert_eq!(MenuChoice::parse("12"), None);
        assert_eq!(MenuChoice::parse("exit"), None);
    }

    #[test]
    fn test_lookup_messages() {
        let tracker = tracker();
        let mut out = Vec::new();
        report_lookup(&mut out, &tracker, "BANANA\n").unwrap();
        report_lookup(&mut out, &tracker, "  Cherry ").unwrap();
        report_lookup(&mut out, &tracker, "apple1").unwrap();
        report_lookup(&mut out, &tracker, "ba na").unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "banana was purchased 3 time(s).",
                "Cherry was not found in the records.",
                INVALID_ITEM,
                INVALID_ITEM,
            ]
        );
    }

    #[test]
    fn test_frequency_and_histogram_listing() {
        let tracker = tracker();
        let mut out = Vec::new();
        report_frequencies(&mut out, &tracker).unwrap();
        report_histogram(&mut out, &tracker, '*').unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Item Frequencies:"));
        assert!(text.contains("Apple : 2\nbanana : 3\n"));
        assert!(text.contains("Item Purchase Histogram:"));
        assert!(text.contains("Apple : **\nbanana : ***\n"));
    }

    #[test]
    fn test_session_runs_commands_and_exits() {
        let tracker = tracker();
        let config = TrackerConfig::default();
        let text = run_session(&tracker, &config, "1\napple\n2\n3\n7\n5\n");

        assert!(text.contains("Apple was purchased 2 time(s)."));
        assert!(text.contains("banana : 3"));
        assert!(text.contains("banana : ***"));
        assert!(text.contains(INVALID_CHOICE));
        assert!(text.trim_end().ends_with(GOODBYE));
        assert_eq!(text.matches("Enter your choice (1-5): ").count(), 5);
    }

    #[test]
    fn test_session_ends_on_closed_input() {
        let tracker = tracker();
        let config = TrackerConfig::default();
        let text = run_session(&tracker, &config, "2\n");
        assert!(text.contains("Apple : 2"));
        assert!(text.trim_end().ends_with(GOODBYE));
    }

    #[test]
    fn test_session_stops_when_input_ends_at_item_prompt() {
        let tracker = tracker();
        let config = TrackerConfig::default();
        let text = run_session(&tracker, &config, "1\n");

        assert_eq!(text.matches(BANNER).count(), 1);
        assert_eq!(text.matches("Enter your choice (1-5): ").count(), 1);
        assert!(text.contains("Enter the item name: "));
        assert!(!text.contains("was not found"));
        assert!(text.trim_end().ends_with(GOODBYE));
    }

    #[test]
    fn test_session_uses_configured_marker_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let export = dir.path().join("counts.dat");
        let tracker = tracker();
        let config = TrackerConfig::new("unused.txt", &export, '#');

        let text = run_session(&tracker, &config, "3\n4\n5\n");
        assert!(text.contains(&format!("4. Save data to {}", export.display())));
        assert!(text.contains("banana : ###"));
        assert!(text.contains(&format!("Data successfully saved to {}", export.display())));
        assert_eq!(std::fs::read_to_string(&export).unwrap(), "Apple 2\nbanana 3\n");
    }

    #[test]
    fn test_save_failure_keeps_menu_running() {
        let dir = tempfile::tempdir().unwrap();
        let export = dir.path().join("no_such_dir").join("frequency.dat");
        let tracker = tracker();
        let config = TrackerConfig::new("unused.txt", &export, '*');

        let text = run_session(&tracker, &config, "4\n1\nbanana\n5\n");
        assert!(text.contains(&format!("Error: Could not open {} for writing.", export.display())));
        assert!(text.contains("banana was purchased 3 time(s)."));
        assert!(text.trim_end().ends_with(GOODBYE));
    }
}
