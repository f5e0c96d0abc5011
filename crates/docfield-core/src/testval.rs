//! Minimal host element model shared by the unit tests.

use crate::{try_dispatch, Codec, CodecError, Element, Shape};

#[derive(Debug, Clone, PartialEq)]
pub enum TestValue {
    Str(String),
    Int(i64),
    Null,
    Undefined,
}

impl Element for TestValue {
    fn type_name(&self) -> &'static str {
        match self {
            TestValue::Str(_) => "string",
            TestValue::Int(_) => "int",
            TestValue::Null => "null",
            TestValue::Undefined => "undefined",
        }
    }

    fn null() -> Self {
        TestValue::Null
    }

    fn is_null(&self) -> bool {
        matches!(self, TestValue::Null)
    }

    fn is_absent(&self) -> bool {
        matches!(self, TestValue::Null | TestValue::Undefined)
    }
}

impl Shape<TestValue> for String {
    const EXPECTED: &'static str = "string";

    fn extract(element: &TestValue) -> Option<Self> {
        match element {
            TestValue::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl Shape<TestValue> for i64 {
    const EXPECTED: &'static str = "int";

    fn extract(element: &TestValue) -> Option<Self> {
        match element {
            TestValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

pub struct StrCodec;

impl Codec for StrCodec {
    type Item = String;
    type Elem = TestValue;

    fn encode(&self, value: &TestValue) -> Result<TestValue, CodecError> {
        try_dispatch(value, |s: String| Ok(TestValue::Str(s)))
    }

    fn decode(&self, value: &TestValue) -> Result<String, CodecError> {
        try_dispatch(value, |s: String| Ok(s))
    }
}

pub struct IntCodec;

impl Codec for IntCodec {
    type Item = i64;
    type Elem = TestValue;

    fn encode(&self, value: &TestValue) -> Result<TestValue, CodecError> {
        try_dispatch(value, |i: i64| Ok(TestValue::Int(i)))
    }

    fn decode(&self, value: &TestValue) -> Result<i64, CodecError> {
        try_dispatch(value, |i: i64| Ok(i))
    }
}
