use std::{fmt, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

/// Why a city name was rejected. `Display` is the inline message shown next to the input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityError {
    #[error("City is required")]
    Required,

    #[error("Incorrect city name format (use letters and dashes or spaces)")]
    Format,
}

/// A city name that passed validation and is safe to put into a query suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    /// Validate raw user input. The input is not trimmed: surrounding
    /// whitespace is a format error, like any other stray separator.
    pub fn parse(input: &str) -> Result<Self, CityError> {
        static CITY_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                r#"(?x)
                ^
                [A-Za-zŻŹĆŃŁŚĄĘÓżźćńłśąęó]+
                (?:
                    (?: -(?:\s-)*\s? | \s(?:-\s)*-? )   # alternating single dashes and spaces
                    [A-Za-zŻŹĆŃŁŚĄĘÓżźćńłśąęó]+
                )*
                $
            "#,
            )
            .unwrap()
        });

        if input.is_empty() {
            return Err(CityError::Required);
        }
        if !CITY_RE.is_match(input) {
            return Err(CityError::Format);
        }

        Ok(Self(input.to_string()))
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
