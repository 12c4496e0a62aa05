//! Transforms applicable to any value shape.

use crate::pipeline::Pipeline;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

impl<T: Send + 'static> Pipeline<T> {
    /// Replaces the value with its display rendering.
    #[must_use]
    pub fn stringify(self) -> Pipeline<String>
    where
        T: Display,
    {
        self.pipe(|value| value.to_string())
    }

    /// Serializes the value to a JSON string.
    #[must_use]
    pub fn to_json(self) -> Pipeline<String>
    where
        T: Serialize,
    {
        self.pipe_try(|value| serde_json::to_string(&value))
    }
}

impl Pipeline<String> {
    /// Parses the string into `B`; a parse failure enters the error state.
    #[must_use]
    pub fn parse<B>(self) -> Pipeline<B>
    where
        B: FromStr + Send + 'static,
        B::Err: std::error::Error + Send + Sync + 'static,
    {
        self.pipe_try(|s| s.parse::<B>())
    }

    /// Deserializes the JSON string into `B`; a deserialization failure
    /// enters the error state.
    #[must_use]
    pub fn from_json<B>(self) -> Pipeline<B>
    where
        B: DeserializeOwned + Send + 'static,
    {
        self.pipe_try(|s| serde_json::from_str::<B>(&s))
    }
}

#[cfg(test)]
mod tests {
    use crate::pipeline::gluify;
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_stringify_uses_display() {
        let result = gluify(|| 42_i32).stringify().run();
        assert_eq!(result.unwrap(), "42");
    }

    #[test]
    fn test_parse_success_and_failure() {
        let result = gluify(|| "17".to_string()).parse::<i32>().run();
        assert_eq!(result.unwrap(), 17);

        let result = gluify(|| "not a number".to_string())
            .parse::<i32>()
            .or(0)
            .run();
        assert_eq!(result.unwrap(), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let json = gluify(|| Point { x: 1, y: 2 }).to_json().run().unwrap();
        let point = gluify(move || json.clone()).from_json::<Point>().run();
        assert_eq!(point.unwrap(), Point { x: 1, y: 2 });
    }

    #[test]
    fn test_from_json_failure_enters_the_error_state() {
        let result = gluify(|| "{ not json".to_string())
            .from_json::<Point>()
            .catch(|_| Point { x: 0, y: 0 })
            .run();
        assert_eq!(result.unwrap(), Point { x: 0, y: 0 });
    }
}
