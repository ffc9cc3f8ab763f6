//! Property-based test generators using proptest.
//!
//! Values borrow their data, so strategies produce an owned [`Input`] and
//! tests borrow a [`Value`] from it.

use bytes::Bytes;
use proptest::prelude::*;
use sqlbuf_core::Value;

/// An owned test input.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Null.
    Null,
    /// Text, viewed in place.
    Text(String),
    /// A byte sequence, viewed in place.
    Bytes(Vec<u8>),
    /// A segmented buffer.
    Chunks(Vec<Bytes>),
    /// An integer, stringified on extraction.
    Int(i64),
    /// A float, stringified on extraction.
    Float(f64),
}

impl Input {
    /// Borrows a value from this input.
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Input::Null => Value::Null,
            Input::Text(s) => Value::from(s.as_str()),
            Input::Bytes(b) => Value::from(b.as_slice()),
            Input::Chunks(c) => Value::Chunks(c.clone()),
            Input::Int(n) => Value::from(*n),
            Input::Float(f) => Value::from(*f),
        }
    }

    /// The bytes extraction must yield, or `None` if it must fail.
    pub fn expected_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Input::Null => None,
            Input::Text(s) => Some(s.as_bytes().to_vec()),
            Input::Bytes(b) => Some(b.clone()),
            Input::Chunks(c) => Some(c.concat()),
            Input::Int(n) => Some(n.to_string().into_bytes()),
            Input::Float(f) => Some(f.to_string().into_bytes()),
        }
    }

    /// Whether the view must alias the input.
    pub fn expects_zero_copy(&self) -> bool {
        match self {
            Input::Text(_) | Input::Bytes(_) => true,
            Input::Chunks(c) => c.len() <= 1,
            Input::Null | Input::Int(_) | Input::Float(_) => false,
        }
    }
}

/// Strategy for generating arbitrary text.
pub fn text_strategy() -> impl Strategy<Value = String> {
    any::<String>()
}

/// Strategy for generating text rich in quotes, backslashes and control
/// characters.
pub fn sql_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::char::range('a', 'z'),
            1 => Just('\''),
            1 => Just('\\'),
            1 => Just('"'),
            1 => Just(' '),
            1 => prop::sample::select(vec!['\n', '\r', '\t', '\x08', '\x0c', '\x0b']),
            1 => Just('é'),
        ],
        0..48,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for generating byte sequences.
pub fn bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512)
}

/// Strategy for generating segmented buffers.
pub fn chunks_strategy() -> impl Strategy<Value = Vec<Bytes>> {
    prop::collection::vec(
        prop::collection::vec(any::<u8>(), 0..64).prop_map(Bytes::from),
        0..5,
    )
}

/// Strategy for generating identifiers, plain or needing quotes.
pub fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_\"][a-zA-Z0-9_ \"$]{0,30}").expect("Invalid regex")
}

/// Strategy for generating any input.
pub fn input_strategy() -> impl Strategy<Value = Input> {
    prop_oneof![
        1 => Just(Input::Null),
        4 => text_strategy().prop_map(Input::Text),
        3 => bytes_strategy().prop_map(Input::Bytes),
        2 => chunks_strategy().prop_map(Input::Chunks),
        2 => any::<i64>().prop_map(Input::Int),
        1 => any::<f64>().prop_map(Input::Float),
    ]
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn sql_text_has_no_nul(s in sql_text_strategy()) {
            prop_assert!(!s.contains('\0'));
        }

        #[test]
        fn identifier_is_not_empty(name in identifier_strategy()) {
            prop_assert!(!name.is_empty());
        }

        #[test]
        fn value_matches_input(input in input_strategy()) {
            let value = input.as_value();
            prop_assert_eq!(value.is_null(), input == Input::Null);
            prop_assert_eq!(value.is_null(), input.expected_bytes().is_none());
        }
    }

    #[test]
    fn zero_copy_expectations() {
        assert!(Input::Text(String::new()).expects_zero_copy());
        assert!(Input::Chunks(vec![Bytes::from_static(b"a")]).expects_zero_copy());
        assert!(!Input::Chunks(vec![Bytes::new(), Bytes::new()]).expects_zero_copy());
        assert!(!Input::Int(1).expects_zero_copy());
    }
}
