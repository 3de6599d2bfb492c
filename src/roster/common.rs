use serde::{Serialize, Serializer};
use std::fmt;

/// [AddressCode] is the six digit administrative division code that opens
/// every identity number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddressCode(String);

impl AddressCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddressCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// [Gender] as encoded by the parity of the seventeenth digit.
///
/// Variant order is the sort order: female sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Odd digits are male, even digits female.
    pub fn from_digit(digit: u8) -> Self {
        if digit % 2 == 1 {
            Self::Male
        } else {
            Self::Female
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Female => "女",
            Self::Male => "男",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Gender {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parity() {
        for digit in 0..10u8 {
            let expected = if digit % 2 == 1 {
                Gender::Male
            } else {
                Gender::Female
            };
            assert_eq!(Gender::from_digit(digit), expected, "digit {digit}");
        }
    }

    #[test]
    fn test_female_sorts_first() {
        let mut genders = vec![Gender::Male, Gender::Female, Gender::Male];
        genders.sort();
        assert_eq!(genders, vec![Gender::Female, Gender::Male, Gender::Male]);
        // same order as comparing the labels themselves
        assert!(Gender::Female.label() < Gender::Male.label());
    }
}
