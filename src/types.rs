use serde::{Deserialize, Serialize};

/// Global poll phase, broadcast to every connected page via `/state`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Collect,
    Results,
}

/// The two fixed options of the binary vote.
///
/// The wire strings (`a_favor` / `en_contra`) are the public contract with the
/// pages; anything else fails deserialization and the vote is dropped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    AFavor,
    EnContra,
}

/// Per-choice vote counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tally {
    pub a_favor: u32,
    pub en_contra: u32,
}

impl Tally {
    pub fn record(&mut self, choice: Choice) {
        match choice {
            Choice::AFavor => self.a_favor += 1,
            Choice::EnContra => self.en_contra += 1,
        }
    }
}
