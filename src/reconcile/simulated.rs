//! In-memory board for tests and dry runs
//!
//! Rows swap when a relocation succeeds. Each relocation technique has a
//! scripted behaviour so the reconciler can be exercised against boards that
//! ignore, reject or stall on some techniques.

use super::board::{Board, BoardError, BoardRow, FillOutcome, RowRef, Technique};
use crate::core::Word;
use async_trait::async_trait;
use std::str::FromStr;
use std::time::Duration;

/// How a simulated technique responds to a relocation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechniqueBehavior {
    /// Swaps the rows and reports success
    Succeed,
    /// Does nothing and reports failure
    Fail,
    /// Fails this many times, then succeeds
    FailTimes(usize),
    /// Reports success without touching the board
    Ignore,
    /// Never answers within any reasonable timeout
    Stall(Duration),
}

impl FromStr for TechniqueBehavior {
    type Err = String;

    /// Parse `succeed`, `fail`, `ignore`, `fail-times:N` or `stall:MS`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (name, arg) = lower
            .split_once(':')
            .map_or((lower.as_str(), None), |(name, arg)| (name, Some(arg)));
        let number = |arg: Option<&str>| {
            arg.and_then(|n| n.parse::<u64>().ok())
                .ok_or_else(|| format!("'{s}' needs a numeric argument"))
        };

        match name {
            "succeed" => Ok(Self::Succeed),
            "fail" => Ok(Self::Fail),
            "ignore" => Ok(Self::Ignore),
            "fail-times" => Ok(Self::FailTimes(number(arg)? as usize)),
            "stall" => Ok(Self::Stall(Duration::from_millis(number(arg)?))),
            _ => Err(format!("unknown technique behaviour '{s}'")),
        }
    }
}

/// One simulated row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimRow {
    pub word: String,
    pub clue: Option<String>,
    pub locked: bool,
}

impl SimRow {
    #[must_use]
    pub fn filled(word: &Word) -> Self {
        Self {
            word: word.text().to_string(),
            clue: None,
            locked: false,
        }
    }

    #[must_use]
    pub fn locked(word: &Word) -> Self {
        Self {
            locked: true,
            ..Self::filled(word)
        }
    }

    #[must_use]
    pub fn blank(clue: impl Into<String>) -> Self {
        Self {
            word: String::new(),
            clue: Some(clue.into()),
            locked: false,
        }
    }
}

/// Scripted in-memory [`Board`]
#[derive(Debug, Clone)]
pub struct SimulatedBoard {
    rows: Vec<SimRow>,
    techniques: Vec<TechniqueBehavior>,
    failures_seen: Vec<usize>,
    active: Option<usize>,
    relocations: usize,
    reads: usize,
}

impl SimulatedBoard {
    /// Board with the given rows and one always-succeeding technique
    #[must_use]
    pub fn new(rows: Vec<SimRow>) -> Self {
        Self {
            rows,
            techniques: vec![TechniqueBehavior::Succeed],
            failures_seen: vec![0],
            active: None,
            relocations: 0,
            reads: 0,
        }
    }

    /// Unlocked, filled rows showing `words` in order
    #[must_use]
    pub fn from_words(words: &[Word]) -> Self {
        Self::new(words.iter().map(SimRow::filled).collect())
    }

    /// Replace the technique list, in priority order
    #[must_use]
    pub fn with_techniques(mut self, techniques: Vec<TechniqueBehavior>) -> Self {
        self.failures_seen = vec![0; techniques.len()];
        self.techniques = techniques;
        self
    }

    /// Lock the first and last rows, as the endpoints are on the real board
    #[must_use]
    pub fn with_locked_ends(mut self) -> Self {
        if let Some(first) = self.rows.first_mut() {
            first.locked = true;
        }
        if let Some(last) = self.rows.last_mut() {
            last.locked = true;
        }
        self
    }

    #[must_use]
    pub fn words(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.word.clone()).collect()
    }

    /// Relocations that actually changed the board
    #[must_use]
    pub const fn relocations(&self) -> usize {
        self.relocations
    }

    /// Arrangement reads served so far
    #[must_use]
    pub const fn reads(&self) -> usize {
        self.reads
    }

    fn row_mut(&mut self, row: RowRef) -> Result<&mut SimRow, BoardError> {
        self.rows.get_mut(row.0).ok_or(BoardError::NoSuchRow(row))
    }

    fn swap(&mut self, source: RowRef, dest: RowRef) -> Result<(), BoardError> {
        for row in [source, dest] {
            if self.row_mut(row)?.locked {
                return Err(BoardError::Locked(row));
            }
        }
        self.rows.swap(source.0, dest.0);
        self.relocations += 1;
        Ok(())
    }
}

#[async_trait]
impl Board for SimulatedBoard {
    async fn read_arrangement(&mut self) -> Result<Vec<BoardRow>, BoardError> {
        self.reads += 1;
        Ok(self
            .rows
            .iter()
            .enumerate()
            .map(|(position, row)| BoardRow::new(row.word.clone(), row.locked, position))
            .collect())
    }

    async fn read_active_clue(&mut self, row: RowRef) -> Result<Option<String>, BoardError> {
        if self.active != Some(row.0) {
            return Ok(None);
        }
        Ok(self.row_mut(row)?.clue.clone())
    }

    async fn attempt_relocate(
        &mut self,
        source: RowRef,
        dest: RowRef,
        technique: Technique,
    ) -> Result<bool, BoardError> {
        let behavior = *self
            .techniques
            .get(technique.0)
            .ok_or(BoardError::UnsupportedTechnique(technique))?;

        match behavior {
            TechniqueBehavior::Succeed => self.swap(source, dest).map(|()| true),
            TechniqueBehavior::Fail => Ok(false),
            TechniqueBehavior::FailTimes(times) => {
                if self.failures_seen[technique.0] < times {
                    self.failures_seen[technique.0] += 1;
                    Ok(false)
                } else {
                    self.swap(source, dest).map(|()| true)
                }
            }
            TechniqueBehavior::Ignore => Ok(true),
            TechniqueBehavior::Stall(delay) => {
                tokio::time::sleep(delay).await;
                Ok(false)
            }
        }
    }

    async fn fill_row(&mut self, row: RowRef, word: &Word) -> Result<FillOutcome, BoardError> {
        let target = self.row_mut(row)?;
        if target.locked {
            return Err(BoardError::Locked(row));
        }
        target.word = word.text().to_string();
        Ok(FillOutcome {
            ok: true,
            letters_applied: word.len(),
        })
    }

    async fn activate_row(&mut self, row: RowRef) -> Result<(), BoardError> {
        self.row_mut(row)?;
        self.active = Some(row.0);
        Ok(())
    }

    fn technique_count(&self) -> usize {
        self.techniques.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::words_from_slice;

    #[test]
    fn technique_behaviour_parsing() {
        assert_eq!("succeed".parse(), Ok(TechniqueBehavior::Succeed));
        assert_eq!(" Fail ".parse(), Ok(TechniqueBehavior::Fail));
        assert_eq!("fail-times:3".parse(), Ok(TechniqueBehavior::FailTimes(3)));
        assert_eq!(
            "stall:250".parse(),
            Ok(TechniqueBehavior::Stall(Duration::from_millis(250)))
        );
        assert!("stall".parse::<TechniqueBehavior>().is_err());
        assert!("teleport".parse::<TechniqueBehavior>().is_err());
    }

    #[tokio::test]
    async fn locked_rows_refuse_relocation() {
        let words = words_from_slice(&["cog", "dog", "con"]);
        let mut board = SimulatedBoard::from_words(&words).with_locked_ends();

        let result = board
            .attempt_relocate(RowRef(0), RowRef(1), Technique(0))
            .await;
        assert_eq!(result, Err(BoardError::Locked(RowRef(0))));
        assert_eq!(board.relocations(), 0);
        assert_eq!(board.words(), vec!["COG", "DOG", "CON"]);
    }

    #[tokio::test]
    async fn clue_only_visible_on_active_row() {
        let mut board = SimulatedBoard::new(vec![SimRow::blank("Feline"), SimRow::blank("Canine")]);

        assert_eq!(board.read_active_clue(RowRef(1)).await, Ok(None));
        board.activate_row(RowRef(1)).await.unwrap();
        assert_eq!(
            board.read_active_clue(RowRef(1)).await,
            Ok(Some("Canine".to_string()))
        );
        assert_eq!(board.read_active_clue(RowRef(0)).await, Ok(None));
    }
}
