//! Headless mode for the roster manager.
//!
//! A numbered menu on stdin/stdout for scripted use and terminals without
//! raw-mode support. Result lines carry a bracketed tag:
//! - `[INFO]`, `[LOOT]` and `[LEVEL UP]` for command results
//! - `[WARN]` for input that defaulted to 0
//! - `[ERROR]` for rejected commands and storage failures
//! - `[SAVED]` after a successful save
//!
//! Leaving the menu saves only when something changed since the last save.

use std::io::{self, BufRead, Write};

use party_core::input::{parse_amount, parse_purse};
use party_core::{Denomination, LoadOutcome, PartySession, Response, SessionError};

use crate::notices::{notices_for, Notice, NoticeKind};

/// Run the headless menu until the user exits or input ends.
pub fn run_headless(session: &mut PartySession, outcome: &LoadOutcome) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    HeadlessShell::new(session, stdin.lock(), stdout.lock()).run(outcome)
}

/// The menu loop over any line reader and writer.
pub struct HeadlessShell<'a, R, W> {
    session: &'a mut PartySession,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> HeadlessShell<'a, R, W> {
    pub fn new(session: &'a mut PartySession, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    pub fn run(&mut self, outcome: &LoadOutcome) -> io::Result<()> {
        writeln!(self.output, "=== Party Manager (headless) ===")?;
        let location = self.session.store_description();
        match outcome {
            LoadOutcome::Loaded { members } => {
                writeln!(self.output, "[INFO] Loaded {members} members from {location}")?
            }
            LoadOutcome::Fresh => writeln!(self.output, "[INFO] Starting a new party at {location}")?,
            LoadOutcome::Failed(e) => {
                writeln!(self.output, "[ERROR] Could not load {location}: {e}")?;
                writeln!(self.output, "[WARN] Starting with an empty party")?;
                writeln!(
                    self.output,
                    "[WARN] The unreadable file is kept aside on the next save"
                )?;
            }
        }

        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Choice")? else {
                break;
            };

            match choice.trim() {
                "1" => write!(self.output, "{}", self.session.party())?,
                "2" => {
                    if !self.add_member()? {
                        break;
                    }
                }
                "3" => {
                    if !self.distribute_coins()? {
                        break;
                    }
                }
                "4" => {
                    if !self.distribute_experience()? {
                        break;
                    }
                }
                "5" => {
                    if !self.toggle_member()? {
                        break;
                    }
                }
                "6" | "q" | "quit" | "exit" => break,
                other => writeln!(self.output, "[ERROR] Unknown choice: {other}")?,
            }
        }

        self.save_on_exit()?;
        writeln!(self.output, "Goodbye!")?;
        self.output.flush()
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "1. View party")?;
        writeln!(self.output, "2. Add member")?;
        writeln!(self.output, "3. Distribute coins")?;
        writeln!(self.output, "4. Distribute experience")?;
        writeln!(self.output, "5. Activate/deactivate member")?;
        writeln!(self.output, "6. Save & exit")
    }

    /// Read one line after a prompt. `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt_amount(&mut self, label: &str) -> io::Result<Option<u32>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };
        let parsed = parse_amount(&raw);
        if let Some(warning) = parsed.warning {
            writeln!(self.output, "[WARN] {warning}")?;
        }
        Ok(Some(parsed.value))
    }

    /// Prompt for the five denominations in canonical order.
    fn prompt_purse(&mut self) -> io::Result<Option<[String; 5]>> {
        let mut raw: [String; 5] = Default::default();
        for (slot, denomination) in raw.iter_mut().zip(Denomination::ALL) {
            let Some(line) = self.prompt(denomination.name())? else {
                return Ok(None);
            };
            *slot = line;
        }
        Ok(Some(raw))
    }

    // Each command returns `false` when input ran out mid-prompt.

    fn add_member(&mut self) -> io::Result<bool> {
        let Some(name) = self.prompt("Name")? else {
            return Ok(false);
        };
        let Some(experience) = self.prompt_amount("Experience")? else {
            return Ok(false);
        };
        let Some(raw) = self.prompt_purse()? else {
            return Ok(false);
        };

        let coins = self.parse_coins(&raw)?;
        let result = self.session.add_member(&name, experience, coins);
        self.report(result)?;
        Ok(true)
    }

    fn distribute_coins(&mut self) -> io::Result<bool> {
        let Some(raw) = self.prompt_purse()? else {
            return Ok(false);
        };

        let coins = self.parse_coins(&raw)?;
        let result = self.session.distribute_coins(&coins);
        self.report(result)?;
        Ok(true)
    }

    fn distribute_experience(&mut self) -> io::Result<bool> {
        let Some(amount) = self.prompt_amount("Experience")? else {
            return Ok(false);
        };

        let result = self.session.distribute_experience(amount);
        self.report(result)?;
        Ok(true)
    }

    fn toggle_member(&mut self) -> io::Result<bool> {
        write!(self.output, "{}", self.session.party())?;
        let Some(name) = self.prompt("Member to move")? else {
            return Ok(false);
        };

        let result = self.session.toggle_member(name.trim());
        self.report(result)?;
        Ok(true)
    }

    fn parse_coins(&mut self, raw: &[String; 5]) -> io::Result<party_core::Purse> {
        let fields: [&str; 5] = [&raw[0], &raw[1], &raw[2], &raw[3], &raw[4]];
        let (purse, warnings) = parse_purse(&fields);
        for warning in warnings {
            writeln!(self.output, "[WARN] {warning}")?;
        }
        Ok(purse)
    }

    fn report(&mut self, result: Result<Response, SessionError>) -> io::Result<()> {
        match result {
            Ok(response) => {
                for notice in notices_for(&response) {
                    self.print_notice(&notice)?;
                }
                Ok(())
            }
            Err(e) => writeln!(self.output, "[ERROR] {e}"),
        }
    }

    fn print_notice(&mut self, notice: &Notice) -> io::Result<()> {
        let tag = match notice.kind {
            NoticeKind::Info => "[INFO]",
            NoticeKind::Loot => "[LOOT]",
            NoticeKind::LevelUp => "[LEVEL UP]",
            NoticeKind::Warning => "[WARN]",
            NoticeKind::Error => "[ERROR]",
        };
        writeln!(self.output, "{tag} {}", notice.content)
    }

    fn save_on_exit(&mut self) -> io::Result<()> {
        match self.session.save_if_dirty() {
            Ok(false) => writeln!(self.output, "[INFO] No unsaved changes"),
            Ok(true) => writeln!(
                self.output,
                "[SAVED] Party saved to {}",
                self.session.store_description()
            ),
            Err(e) => writeln!(self.output, "[ERROR] Save failed: {e}"),
        }
    }
}
