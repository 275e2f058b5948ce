//! Two-person daily accountability ledger.
//!
//! Completions are bucketed into three fixed day periods per person. The
//! person set is closed: anything outside the two names is rejected
//! before it can touch stored state.

mod client;
mod store;

pub use client::{AccountabilityClient, CompleteResponse};
pub use store::LedgerStore;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// One of the two tracked people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Person {
    Andre,
    Felipe,
}

impl Person {
    pub const ALL: [Person; 2] = [Person::Andre, Person::Felipe];

    pub fn name(&self) -> &'static str {
        match self {
            Person::Andre => "Andre",
            Person::Felipe => "Felipe",
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Person {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "andre" => Ok(Person::Andre),
            "felipe" => Ok(Person::Felipe),
            _ => Err(LedgerError::UnknownPerson(s.to_string())),
        }
    }
}

/// Fixed day-period buckets. Thresholds follow the client's local-hour
/// split: before 11 is morning, before 17 is midday, the rest is evening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    Morning,
    Midday,
    Evening,
}

impl DayPeriod {
    pub fn from_hour(hour: u32) -> Self {
        if hour < 11 {
            DayPeriod::Morning
        } else if hour < 17 {
            DayPeriod::Midday
        } else {
            DayPeriod::Evening
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "morning",
            DayPeriod::Midday => "midday",
            DayPeriod::Evening => "evening",
        }
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayPeriod {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(DayPeriod::Morning),
            "midday" => Ok(DayPeriod::Midday),
            "evening" => Ok(DayPeriod::Evening),
            _ => Err(LedgerError::UnknownPeriod(s.to_string())),
        }
    }
}

/// One person's three completion flags for the current day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDay {
    #[serde(default)]
    pub morning: bool,
    #[serde(default)]
    pub midday: bool,
    #[serde(default)]
    pub evening: bool,
}

impl PersonDay {
    pub fn get(&self, period: DayPeriod) -> bool {
        match period {
            DayPeriod::Morning => self.morning,
            DayPeriod::Midday => self.midday,
            DayPeriod::Evening => self.evening,
        }
    }

    pub fn set(&mut self, period: DayPeriod) {
        match period {
            DayPeriod::Morning => self.morning = true,
            DayPeriod::Midday => self.midday = true,
            DayPeriod::Evening => self.evening = true,
        }
    }
}

/// The full 2x3 completion table, serialized under the two fixed names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(rename = "Andre", default)]
    pub andre: PersonDay,
    #[serde(rename = "Felipe", default)]
    pub felipe: PersonDay,
}

impl Ledger {
    pub fn person(&self, person: Person) -> &PersonDay {
        match person {
            Person::Andre => &self.andre,
            Person::Felipe => &self.felipe,
        }
    }

    pub fn person_mut(&mut self, person: Person) -> &mut PersonDay {
        match person {
            Person::Andre => &mut self.andre,
            Person::Felipe => &mut self.felipe,
        }
    }

    /// Mark one person's period complete.
    pub fn record(&mut self, person: Person, period: DayPeriod) {
        self.person_mut(person).set(period);
    }

    /// Back to all-false, as the external daily reset does.
    pub fn reset(&mut self) {
        *self = Ledger::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_parse_is_case_insensitive() {
        assert_eq!("Andre".parse::<Person>().unwrap(), Person::Andre);
        assert_eq!("felipe".parse::<Person>().unwrap(), Person::Felipe);
    }

    #[test]
    fn unknown_person_is_rejected() {
        assert!("Carol".parse::<Person>().is_err());
        assert!("".parse::<Person>().is_err());
    }

    #[test]
    fn period_thresholds() {
        assert_eq!(DayPeriod::from_hour(0), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(10), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(11), DayPeriod::Midday);
        assert_eq!(DayPeriod::from_hour(16), DayPeriod::Midday);
        assert_eq!(DayPeriod::from_hour(17), DayPeriod::Evening);
        assert_eq!(DayPeriod::from_hour(23), DayPeriod::Evening);
    }

    #[test]
    fn record_touches_only_one_cell() {
        let mut ledger = Ledger::default();
        ledger.record(Person::Andre, DayPeriod::Morning);
        assert!(ledger.andre.morning);
        assert!(!ledger.andre.midday);
        assert!(!ledger.felipe.morning);
    }

    #[test]
    fn ledger_serializes_under_fixed_names() {
        let mut ledger = Ledger::default();
        ledger.record(Person::Felipe, DayPeriod::Evening);
        let json = serde_json::to_value(ledger).unwrap();
        assert_eq!(json["Felipe"]["evening"], true);
        assert_eq!(json["Andre"]["morning"], false);
    }
}
