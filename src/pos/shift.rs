//! Shift-close cash counting.
//!
//! Amounts are integer minor currency units throughout.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShiftError {
    #[error("denomination {0} is not in the configured set")]
    UnknownDenomination(i64),
    #[error("count entry `{0}` must look like VALUE=COUNT")]
    Malformed(String),
    #[error("counted total overflows")]
    Overflow,
}

/// One `VALUE=COUNT` entry as typed by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountEntry {
    pub value: i64,
    pub count: u32,
}

impl FromStr for CountEntry {
    type Err = ShiftError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let malformed = || ShiftError::Malformed(raw.to_string());
        let (value, count) = raw.split_once('=').ok_or_else(malformed)?;
        Ok(Self {
            value: value.trim().parse().map_err(|_| malformed())?,
            count: count.trim().parse().map_err(|_| malformed())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftLine {
    pub value: i64,
    pub count: u32,
    pub subtotal: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftSummary {
    pub lines: Vec<ShiftLine>,
    pub counted: i64,
    pub expected: i64,
    /// `counted - expected`; negative means the drawer is short.
    pub variance: i64,
}

impl ShiftSummary {
    pub fn is_balanced(&self) -> bool {
        self.variance == 0
    }
}

/// Per-denomination counts for a fixed denomination set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftCount {
    counts: BTreeMap<i64, u32>,
}

impl ShiftCount {
    pub fn new(denominations: &[i64]) -> Self {
        Self {
            counts: denominations.iter().map(|value| (*value, 0)).collect(),
        }
    }

    /// Build from operator entries; repeated values add up.
    pub fn from_entries<I, S>(denominations: &[i64], entries: I) -> Result<Self, ShiftError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut count = Self::new(denominations);
        for raw in entries {
            let entry: CountEntry = raw.as_ref().parse()?;
            count.add(entry.value, entry.count)?;
        }
        Ok(count)
    }

    pub fn set(&mut self, value: i64, count: u32) -> Result<(), ShiftError> {
        let slot = self
            .counts
            .get_mut(&value)
            .ok_or(ShiftError::UnknownDenomination(value))?;
        *slot = count;
        Ok(())
    }

    pub fn add(&mut self, value: i64, count: u32) -> Result<(), ShiftError> {
        let slot = self
            .counts
            .get_mut(&value)
            .ok_or(ShiftError::UnknownDenomination(value))?;
        *slot = slot.checked_add(count).ok_or(ShiftError::Overflow)?;
        Ok(())
    }

    pub fn count(&self, value: i64) -> Option<u32> {
        self.counts.get(&value).copied()
    }

    /// Largest denomination first.
    pub fn lines(&self) -> Result<Vec<ShiftLine>, ShiftError> {
        self.counts
            .iter()
            .rev()
            .map(|(value, count)| {
                let subtotal = value
                    .checked_mul(i64::from(*count))
                    .ok_or(ShiftError::Overflow)?;
                Ok(ShiftLine {
                    value: *value,
                    count: *count,
                    subtotal,
                })
            })
            .collect()
    }

    pub fn total(&self) -> Result<i64, ShiftError> {
        self.lines()?
            .iter()
            .try_fold(0i64, |sum, line| sum.checked_add(line.subtotal))
            .ok_or(ShiftError::Overflow)
    }

    pub fn close(&self, expected: i64) -> Result<ShiftSummary, ShiftError> {
        let lines = self.lines()?;
        let counted = lines
            .iter()
            .try_fold(0i64, |sum, line| sum.checked_add(line.subtotal))
            .ok_or(ShiftError::Overflow)?;
        let variance = counted.checked_sub(expected).ok_or(ShiftError::Overflow)?;
        Ok(ShiftSummary {
            lines,
            counted,
            expected,
            variance,
        })
    }
}
