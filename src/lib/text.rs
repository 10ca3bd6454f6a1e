// src/lib/text.rs

// dependencies
use regex::Regex;
use std::fmt::Display;
use thiserror::Error;

// enum type to represent errors related to the text helpers
#[derive(Debug, Error)]
pub enum TextError {
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Joins the display form of every item with `glue` between neighbours.
pub fn join<I>(glue: &str, items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(glue);
        }
        out.push_str(&item.to_string());
    }
    out
}

pub fn concat<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    join("", items)
}

/// Joins arguments of mixed types: `join!(", "; 1, "two", 3.5)`.
#[macro_export]
macro_rules! join {
    ($glue:expr; $($arg:expr),+ $(,)?) => {
        $crate::text::join(
            $glue,
            [$(&$arg as &dyn ::std::fmt::Display),+],
        )
    };
}

pub fn quote(text: &str, mark: &str) -> String {
    format!("{mark}{text}{mark}")
}

// split on `delimiter`; a trailing empty token is dropped
pub fn explode(delimiter: char, text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = text.split(delimiter).map(str::to_string).collect();
    if tokens.last().is_some_and(String::is_empty) {
        tokens.pop();
    }
    tokens
}

/// Searches `text` for the first match of `pattern`.
///
/// On a match the vector holds the whole match followed by every capture
/// group, with groups that did not participate as empty strings.
pub fn reg_match(pattern: &str, text: &str) -> Result<Option<Vec<String>>, TextError> {
    let re = Regex::new(pattern)?;
    Ok(re.captures(text).map(|caps| {
        caps.iter()
            .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
            .collect()
    }))
}
