// Boundary helpers shared by request bodies of several domains.

use serde::{Deserialize, Deserializer};

/// Course duration as clients send it: `4` or `"4"` are the same thing.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

fn to_weeks(value: NumberOrText) -> Result<i32, String> {
    let number = match value {
        NumberOrText::Number(n) => n,
        NumberOrText::Text(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("'{}' is not a number of weeks", text))?,
    };
    i32::try_from(number)
        .ok()
        .filter(|weeks| *weeks > 0)
        .ok_or_else(|| format!("{} is not a positive number of weeks", number))
}

/// `#[serde(deserialize_with)]` helper for required week counts.
pub fn deserialize_weeks<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    to_weeks(NumberOrText::deserialize(deserializer)?).map_err(serde::de::Error::custom)
}

/// Same as [`deserialize_weeks`] for optional fields (pair with `#[serde(default)]`).
pub fn deserialize_optional_weeks<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrText>::deserialize(deserializer)?
        .map(to_weeks)
        .transpose()
        .map_err(serde::de::Error::custom)
}
