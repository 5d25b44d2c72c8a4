//! Core customer domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, member_tier::MemberTier};

/// A validated, non-empty customer name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CustomerName(String);

impl CustomerName {
    /// Create a customer name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCustomerName] if `name` is
    /// an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCustomerName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a customer name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CustomerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CustomerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer's member number.
///
/// The browser forms only ever submit a tier from 1 to 4, but the value is
/// persisted as text and the API does not validate it; the only constraint
/// is uniqueness, which the store enforces. JSON clients may send the value
/// as either a string or a number, so deserialization accepts both and
/// normalizes to text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Hash)]
pub struct MemberNumber(String);

impl MemberNumber {
    /// Create a member number from its text form.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The membership tier this member number maps to.
    pub fn tier(&self) -> MemberTier {
        MemberTier::from_member_number(&self.0)
    }
}

impl AsRef<str> for MemberNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for MemberNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for MemberNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum TextOrNumber {
            Text(String),
            Integer(i64),
            Float(f64),
        }

        let value = match TextOrNumber::deserialize(deserializer)? {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Integer(number) => number.to_string(),
            TextOrNumber::Float(number) => number.to_string(),
        };

        Ok(MemberNumber(value))
    }
}

/// Database identifier for a customer.
pub type CustomerId = i64;

/// A customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: CustomerName,
    pub date_of_birth: Date,
    pub member_number: MemberNumber,
    pub interests: Option<String>,
}

/// The fields for a customer that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: CustomerName,
    pub date_of_birth: Date,
    pub member_number: MemberNumber,
    pub interests: Option<String>,
}

/// The new field values for an update.
///
/// Fields that are `None` were not present in the request body and keep
/// their stored value. The id is never part of the update set.
#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub date_of_birth: Option<Date>,
    pub member_number: Option<MemberNumber>,
    pub interests: Option<String>,
}

/// The customer's age in whole years on `today`.
///
/// The year difference is decremented by one when today's month and day
/// precede the birthday's month and day.
pub fn age_in_years(date_of_birth: Date, today: Date) -> i32 {
    let mut age = today.year() - date_of_birth.year();

    if (today.month() as u8, today.day()) < (date_of_birth.month() as u8, date_of_birth.day()) {
        age -= 1;
    }

    age
}



#[cfg(test)]
mod age_tests {
    use time::macros::date;

    use super::age_in_years;

    #[test]
    fn counts_whole_years_after_the_birthday() {
        let age = age_in_years(date!(1990 - 05 - 01), date!(2026 - 08 - 05));

        assert_eq!(age, 36);
    }

    #[test]
    fn decrements_before_the_birthday() {
        let age = age_in_years(date!(1990 - 05 - 01), date!(2026 - 04 - 30));

        assert_eq!(age, 35);
    }

    #[test]
    fn birthday_today_counts_the_new_year() {
        let age = age_in_years(date!(1990 - 05 - 01), date!(2026 - 05 - 01));

        assert_eq!(age, 36);
    }

    #[test]
    fn same_month_earlier_day_decrements() {
        let age = age_in_years(date!(1990 - 05 - 15), date!(2026 - 05 - 14));

        assert_eq!(age, 35);
    }
}
