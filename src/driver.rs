use crate::logger::Logger;
use crate::report::ReportGenerator;
use std::io::{BufRead, Write};
use tracing::warn;

pub const PROMPT: &str = "hwbchat> [r/q]: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    AwaitingCommand,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Quit,
    Unknown(char),
}

impl Command {
    // Input is bytes, not text: a first byte that is not valid UTF-8 still
    // yields a command, decoded as U+FFFD.
    pub fn parse(input: &[u8]) -> Option<Self> {
        let head = &input[..input.len().min(4)];
        let c = String::from_utf8_lossy(head).chars().next()?;
        Some(match c {
            'r' | 'R' => Command::Refresh,
            'q' | 'Q' => Command::Quit,
            other => Command::Unknown(other),
        })
    }
}

pub struct Driver<R, W> {
    input: R,
    prompt: W,
    state: DriverState,
    reports_generated: usize,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    pub fn new(input: R, prompt: W) -> Self {
        Self {
            input,
            prompt,
            state: DriverState::AwaitingCommand,
            reports_generated: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn reports_generated(&self) -> usize {
        self.reports_generated
    }

    pub fn run(&mut self, log: &mut Logger, report: &ReportGenerator) {
        while self.state() == DriverState::AwaitingCommand {
            self.step(log, report);
        }
    }

    pub fn step(&mut self, log: &mut Logger, report: &ReportGenerator) -> DriverState {
        if self.state == DriverState::Terminated {
            return self.state;
        }

        log.line("Menu: (r)efresh report, (q)uit");
        self.show_prompt();

        let Some(command) = self.read_command() else {
            self.state = DriverState::Terminated;
            return self.state;
        };

        match command {
            Command::Quit => {
                log.line("User requested quit.");
                self.state = DriverState::Terminated;
            }
            Command::Refresh => {
                log.line("User requested refresh report.");
                report.generate(log);
                self.reports_generated += 1;
            }
            Command::Unknown(c) => log.line(format_args!("Unknown command: {c}")),
        }
        self.state
    }

    fn show_prompt(&mut self) {
        let shown = self
            .prompt
            .write_all(PROMPT.as_bytes())
            .and_then(|()| self.prompt.flush());
        if let Err(err) = shown {
            warn!(error = %err, "failed to write prompt");
        }
    }

    // One command per line: the first character is taken and the rest of the
    // line is skipped without being buffered. `None` means end of input.
    fn read_command(&mut self) -> Option<Command> {
        let (command, bare_newline) = match self.input.fill_buf() {
            Ok(buf) => (Command::parse(buf)?, buf[0] == b'\n'),
            Err(err) => {
                warn!(error = %err, "failed to read command, treating as end of input");
                return None;
            }
        };
        self.input.consume(1);
        if !bare_newline {
            if let Err(err) = self.input.skip_until(b'\n') {
                warn!(error = %err, "failed to discard rest of command line");
            }
        }
        Some(command)
    }
}
