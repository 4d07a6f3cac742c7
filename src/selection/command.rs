use crate::selection::presets::{find_preset, Preset};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref INDEX_TOKEN: Regex = Regex::new(r"^(\d+)$").unwrap();
    static ref RANGE_TOKEN: Regex = Regex::new(r"^(\d+)\s*-\s*(\d+)$").unwrap();
}

/// One resolved piece of a numeric command, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Index(usize),
    Range(usize, usize),
}

impl Selector {
    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        match *self {
            Selector::Index(n) => n..=n,
            Selector::Range(start, end) => start..=end,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Toggle {
        selectors: Vec<Selector>,
        malformed: Vec<String>,
    },
    All,
    None,
    Preset(String),
    Done,
    Quit,
    Invalid(String),
}

impl Command {
    /// Parses one line of operator input. Matching is case-insensitive and
    /// preset keys ignore embedded spaces.
    pub fn parse(input: &str, presets: &[Preset]) -> Self {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "" | "done" => return Command::Done,
            "q" | "quit" => return Command::Quit,
            "all" => return Command::All,
            "none" => return Command::None,
            _ => {}
        }

        let compact: String = normalized.chars().filter(|c| !c.is_whitespace()).collect();
        if let Some(preset) = find_preset(presets, &compact) {
            return Command::Preset(preset.key.to_string());
        }

        let mut selectors = Vec::new();
        let mut malformed = Vec::new();

        for token in normalized.split(',').map(str::trim) {
            if token.is_empty() {
                continue;
            }

            match parse_selector(token) {
                Some(selector) => selectors.push(selector),
                None => malformed.push(token.to_string()),
            }
        }

        if selectors.is_empty() {
            return Command::Invalid(input.trim().to_string());
        }

        Command::Toggle {
            selectors,
            malformed,
        }
    }
}

fn parse_selector(token: &str) -> Option<Selector> {
    if let Some(caps) = INDEX_TOKEN.captures(token) {
        return caps[1].parse().ok().map(Selector::Index);
    }

    let caps = RANGE_TOKEN.captures(token)?;
    let start: usize = caps[1].parse().ok()?;
    let end: usize = caps[2].parse().ok()?;

    if start > end {
        return None;
    }

    Some(Selector::Range(start, end))
}
