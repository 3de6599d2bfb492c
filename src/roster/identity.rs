use chrono::{Datelike, NaiveDate};
use std::fmt;

use super::{
    common::{AddressCode, Gender},
    locations::LocationMap,
};
use crate::error::DecodeError;

/// [IdNumber] is a shape-checked 18 character resident identity number.
///
/// The first 17 characters are ASCII digits and the last one is a digit or
/// an upper case `X`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdNumber(String);

impl IdNumber {
    pub const LENGTH: usize = 18;

    const CHECKSUM_WEIGHTS: [u32; 17] = [7, 9, 10, 5, 8, 4, 2, 1, 6, 3, 7, 9, 10, 5, 8, 4, 2];
    const CHECKSUM_CHARS: [char; 11] = ['1', '0', 'X', '9', '8', '7', '6', '5', '4', '3', '2'];

    pub fn parse(raw: &str) -> Result<Self, DecodeError> {
        use DecodeError::*;
        let raw = raw.trim();
        let len = raw.chars().count();
        if len != Self::LENGTH {
            return Err(InvalidLength(len));
        }
        let mut normalized = String::with_capacity(Self::LENGTH);
        for (position, found) in raw.chars().enumerate() {
            let ch = match found {
                '0'..='9' => found,
                'x' | 'X' if position == Self::LENGTH - 1 => 'X',
                _ => return Err(InvalidCharacter { position, found }),
            };
            normalized.push(ch);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn address_code(&self) -> AddressCode {
        AddressCode::new(&self.0[..6])
    }

    pub fn birth_date(&self) -> Result<NaiveDate, DecodeError> {
        let raw = &self.0[6..14];
        // all digits, so these slices always parse
        let year = self.number(6..10);
        let month = self.number(10..12);
        let day = self.number(12..14);
        // chrono accepts year 0, the Gregorian calendar starts at 1
        if year == 0 {
            return Err(DecodeError::InvalidBirthDate(raw.to_string()));
        }
        NaiveDate::from_ymd_opt(year as i32, month, day)
            .ok_or_else(|| DecodeError::InvalidBirthDate(raw.to_string()))
    }

    pub fn gender(&self) -> Gender {
        Gender::from_digit(self.digit(16))
    }

    /// ISO 7064 MOD 11-2 check over the first 17 digits.
    pub fn checksum_is_valid(&self) -> bool {
        let sum: u32 = Self::CHECKSUM_WEIGHTS
            .iter()
            .enumerate()
            .map(|(i, weight)| u32::from(self.digit(i)) * weight)
            .sum();
        let expected = Self::CHECKSUM_CHARS[(sum % 11) as usize];
        self.0.ends_with(expected)
    }

    fn digit(&self, index: usize) -> u8 {
        self.0.as_bytes()[index] - b'0'
    }

    fn number(&self, range: std::ops::Range<usize>) -> u32 {
        range.fold(0, |acc, i| acc * 10 + u32::from(self.digit(i)))
    }
}

impl fmt::Display for IdNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whole years between `birth` and `as_of`.
pub fn age_on(birth: NaiveDate, as_of: NaiveDate) -> Result<u32, DecodeError> {
    if birth > as_of {
        return Err(DecodeError::BornInFuture { birth, as_of });
    }
    let had_birthday = (as_of.month(), as_of.day()) >= (birth.month(), birth.day());
    let years = (as_of.year() - birth.year()) as u32;
    Ok(if had_birthday { years } else { years - 1 })
}

/// [Decoded] holds everything derived from a single [IdNumber].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub birth_date: NaiveDate,
    pub age: u32,
    pub gender: Gender,
    pub city: String,
}

pub fn decode(
    id_number: &IdNumber,
    locations: &LocationMap,
    as_of: NaiveDate,
) -> Result<Decoded, DecodeError> {
    let birth_date = id_number.birth_date()?;
    let age = age_on(birth_date, as_of)?;
    Ok(Decoded {
        birth_date,
        age,
        gender: id_number.gender(),
        city: locations.city(&id_number.address_code()).to_string(),
    })
}
