//! Interactive text menu.
//!
//! The loop reads choices line by line from any `BufRead` and writes to any
//! `Write`, so it runs the same against a terminal or a test buffer. End of
//! input leaves the menu as if "Exit" had been chosen.

use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

use crate::bases::{list_datasets, remove_dataset, render_listing};
use crate::classify::Category;
use crate::render::ConsoleSink;
use crate::search::search;
use crate::settings::Settings;

const TITLE_WIDTH: usize = 60;

enum MainChoice {
    Search(Category),
    Manage,
    Exit,
}

/// The interactive menu bound to an input and an output.
pub struct Menu<'a, R: BufRead, W: Write> {
    input: R,
    out: W,
    settings: &'a Settings,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(input: R, out: W, settings: &'a Settings) -> Self {
        Self {
            input,
            out,
            settings,
        }
    }

    /// Runs the main menu until the operator exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.draw_box("DATASET LOOKUP TOOL")?;
            writeln!(self.out, "\nMain menu:\n")?;
            for (key, label) in [
                ("1", "Search by phone number"),
                ("2", "Search by email"),
                ("3", "Search by username"),
                ("4", "Manage datasets"),
                ("5", "Exit"),
            ] {
                self.option(key, label)?;
            }

            let Some(choice) = self.prompt("\n> Choose an action: ")? else {
                return Ok(());
            };
            let choice = match choice.as_str() {
                "1" => MainChoice::Search(Category::Phone),
                "2" => MainChoice::Search(Category::Email),
                "3" => MainChoice::Search(Category::Username),
                "4" => MainChoice::Manage,
                "5" => MainChoice::Exit,
                _ => {
                    self.invalid_choice()?;
                    continue;
                }
            };

            match choice {
                MainChoice::Search(category) => {
                    if !self.search(category)? {
                        return Ok(());
                    }
                }
                MainChoice::Manage => {
                    if !self.manage()? {
                        return Ok(());
                    }
                }
                MainChoice::Exit => {
                    let text = self.paint_success("Shutting down...");
                    writeln!(self.out, "\n{text}")?;
                    return Ok(());
                }
            }
        }
    }

    /// Returns `false` when input ended.
    fn search(&mut self, category: Category) -> Result<bool> {
        let label = match category {
            Category::Phone => "phone number",
            Category::Email => "email",
            Category::Username => "username",
        };
        let Some(query) = self.prompt(&format!("\nEnter {label}: "))? else {
            return Ok(false);
        };
        if query.is_empty() {
            return Ok(true);
        }

        let mut sink = ConsoleSink::new(&mut self.out, self.settings.renderer());
        let found = search(&query, category, &self.settings.search_options(), &mut sink);
        sink.finish()?;

        if !found {
            let text = self.paint_warning("No matches found.");
            writeln!(self.out, "\n{text}")?;
        }
        self.pause()
    }

    /// Returns `false` when input ended.
    fn manage(&mut self) -> Result<bool> {
        loop {
            self.draw_box("DATASET MANAGEMENT")?;
            writeln!(self.out, "\nManagement menu:\n")?;
            for (key, label) in [
                ("1", "List datasets"),
                ("2", "Show dataset folder"),
                ("3", "Remove a dataset"),
                ("4", "Back"),
            ] {
                self.option(key, label)?;
            }

            let Some(choice) = self.prompt("\n> Choose an action: ")? else {
                return Ok(false);
            };
            let keep_going = match choice.as_str() {
                "1" => {
                    self.list()?;
                    self.pause()?
                }
                "2" => {
                    writeln!(
                        self.out,
                        "\nDataset folder: {}",
                        self.settings.bases_dir.display()
                    )?;
                    self.pause()?
                }
                "3" => {
                    self.remove()?;
                    self.pause()?
                }
                "4" => return Ok(true),
                _ => {
                    self.invalid_choice()?;
                    true
                }
            };
            if !keep_going {
                return Ok(false);
            }
        }
    }

    /// Prints the listing and returns how many datasets it showed.
    fn list(&mut self) -> Result<usize> {
        let datasets =
            match list_datasets(&self.settings.bases_dir, &self.settings.discover_options()) {
                Ok(datasets) => datasets,
                Err(err) => {
                    self.error(&err)?;
                    return Ok(0);
                }
            };
        if datasets.is_empty() {
            let text = self.paint_warning("No datasets available!");
            writeln!(self.out, "\n{text}")?;
        } else {
            let listing = render_listing(&datasets, &self.settings.renderer());
            write!(self.out, "{listing}")?;
        }
        Ok(datasets.len())
    }

    fn remove(&mut self) -> Result<()> {
        let count = self.list()?;
        if count == 0 {
            return Ok(());
        }
        let Some(answer) = self.prompt("\n> Dataset number: ")? else {
            return Ok(());
        };
        let Some(number) = answer
            .parse::<usize>()
            .ok()
            .filter(|number| (1..=count).contains(number))
        else {
            return self.invalid_choice();
        };

        match remove_dataset(
            &self.settings.bases_dir,
            &self.settings.discover_options(),
            number,
        ) {
            Ok(info) => {
                let text = self.paint_success(&format!("Dataset {} removed.", info.name));
                writeln!(self.out, "\n{text}")?;
            }
            Err(err) => self.error(&err)?,
        }
        Ok(())
    }

    /// Reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Returns `false` when input ended.
    fn pause(&mut self) -> Result<bool> {
        Ok(self.prompt("\nPress Enter to continue...")?.is_some())
    }

    /// Reports a failed operation without leaving the menu.
    fn error(&mut self, err: &anyhow::Error) -> Result<()> {
        let text = format!("Error: {err:#}");
        let text = if self.settings.color {
            text.red().to_string()
        } else {
            text
        };
        writeln!(self.out, "\n{text}")?;
        Ok(())
    }

    fn invalid_choice(&mut self) -> Result<()> {
        let text = if self.settings.color {
            "Invalid choice!".red().to_string()
        } else {
            "Invalid choice!".to_string()
        };
        writeln!(self.out, "\n{text}")?;
        Ok(())
    }

    fn option(&mut self, key: &str, label: &str) -> Result<()> {
        if self.settings.color {
            writeln!(self.out, " {} {label}", format!("[{key}]").cyan())?;
        } else {
            writeln!(self.out, " [{key}] {label}")?;
        }
        Ok(())
    }

    fn draw_box(&mut self, text: &str) -> Result<()> {
        let inner = TITLE_WIDTH - 2;
        let lines = [
            format!("╔{}╗", "═".repeat(inner)),
            format!("║ {text:^width$} ║", width = TITLE_WIDTH - 4),
            format!("╚{}╝", "═".repeat(inner)),
        ];
        writeln!(self.out)?;
        for line in lines {
            if self.settings.color {
                writeln!(self.out, "{}", line.magenta().bold())?;
            } else {
                writeln!(self.out, "{line}")?;
            }
        }
        Ok(())
    }

    fn paint_warning(&self, text: &str) -> String {
        if self.settings.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_success(&self, text: &str) -> String {
        if self.settings.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }
}
