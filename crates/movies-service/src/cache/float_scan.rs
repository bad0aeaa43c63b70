//! Detection of NaN and infinite floats inside serializable values.
//!
//! JSON has no spelling for them and `serde_json` writes them as `null`,
//! which would make `Some(NaN)` and `None` render to the same key.

use serde::ser::{self, Serialize};
use std::fmt::{self, Display};

/// Returns true when `value` holds a NaN or infinite float anywhere inside it.
///
/// Values that fail to serialize for other reasons report false; the JSON
/// rendering surfaces those errors itself.
pub(crate) fn contains_non_finite<T: Serialize + ?Sized>(value: &T) -> bool {
    matches!(value.serialize(FloatScan), Err(ScanError::NonFinite))
}

#[derive(Debug)]
enum ScanError {
    NonFinite,
    Custom(String),
}

impl Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => f.write_str("non-finite float"),
            Self::Custom(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ScanError {}

impl ser::Error for ScanError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

struct FloatScan;

fn check(value: f64) -> Result<(), ScanError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ScanError::NonFinite)
    }
}

macro_rules! accept {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method(self, _value: $ty) -> Result<(), ScanError> {
                Ok(())
            }
        )*
    };
}

impl ser::Serializer for FloatScan {
    type Ok = ();
    type Error = ScanError;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    accept!(
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_i128(i128),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_u128(u128),
        serialize_char(char),
        serialize_str(&str),
        serialize_bytes(&[u8]),
        serialize_unit_struct(&'static str),
    );

    fn serialize_f32(self, value: f32) -> Result<(), ScanError> {
        check(f64::from(value))
    }

    fn serialize_f64(self, value: f64) -> Result<(), ScanError> {
        check(value)
    }

    fn serialize_none(self) -> Result<(), ScanError> {
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), ScanError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), ScanError> {
        Ok(())
    }

    fn serialize_unit_variant(self, _name: &'static str, _index: u32, _variant: &'static str) -> Result<(), ScanError> {
        Ok(())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(self, _name: &'static str, value: &T) -> Result<(), ScanError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<(), ScanError> {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self, ScanError> {
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self, ScanError> {
        Ok(self)
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self, ScanError> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, ScanError> {
        Ok(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self, ScanError> {
        Ok(self)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self, ScanError> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, ScanError> {
        Ok(self)
    }
}

impl ser::SerializeSeq for FloatScan {
    type Ok = ();
    type Error = ScanError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ScanError> {
        value.serialize(FloatScan)
    }

    fn end(self) -> Result<(), ScanError> {
        Ok(())
    }
}

impl ser::SerializeTuple for FloatScan {
    type Ok = ();
    type Error = ScanError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ScanError> {
        value.serialize(FloatScan)
    }

    fn end(self) -> Result<(), ScanError> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for FloatScan {
    type Ok = ();
    type Error = ScanError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ScanError> {
        value.serialize(FloatScan)
    }

    fn end(self) -> Result<(), ScanError> {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for FloatScan {
    type Ok = ();
    type Error = ScanError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ScanError> {
        value.serialize(FloatScan)
    }

    fn end(self) -> Result<(), ScanError> {
        Ok(())
    }
}

impl ser::SerializeMap for FloatScan {
    type Ok = ();
    type Error = ScanError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), ScanError> {
        key.serialize(FloatScan)
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ScanError> {
        value.serialize(FloatScan)
    }

    fn end(self) -> Result<(), ScanError> {
        Ok(())
    }
}

impl ser::SerializeStruct for FloatScan {
    type Ok = ();
    type Error = ScanError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _key: &'static str, value: &T) -> Result<(), ScanError> {
        value.serialize(FloatScan)
    }

    fn end(self) -> Result<(), ScanError> {
        Ok(())
    }
}

impl ser::SerializeStructVariant for FloatScan {
    type Ok = ();
    type Error = ScanError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _key: &'static str, value: &T) -> Result<(), ScanError> {
        value.serialize(FloatScan)
    }

    fn end(self) -> Result<(), ScanError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(serde::Serialize)]
    struct Bounds {
        min: Option<f64>,
        max: Option<f64>,
    }

    #[derive(serde::Serialize)]
    enum Shape {
        Scaled(f32),
        Span { from: f64, to: f64 },
    }

    #[test]
    fn test_finite_values_pass() {
        assert!(!contains_non_finite(&5.0));
        assert!(!contains_non_finite(&None::<f64>));
        assert!(!contains_non_finite("NaN"));
        assert!(!contains_non_finite(&Bounds { min: Some(1.0), max: None }));
        assert!(!contains_non_finite(&vec![vec![1.5, 2.5], vec![]]));
    }

    #[test]
    fn test_top_level_non_finite() {
        assert!(contains_non_finite(&f64::NAN));
        assert!(contains_non_finite(&f64::INFINITY));
        assert!(contains_non_finite(&f32::NEG_INFINITY));
        assert!(contains_non_finite(&Some(f64::NAN)));
    }

    #[test]
    fn test_nested_non_finite() {
        assert!(contains_non_finite(&Bounds {
            min: None,
            max: Some(f64::INFINITY),
        }));
        assert!(contains_non_finite(&vec![(1, 2.0), (3, f64::NAN)]));
        assert!(contains_non_finite(&BTreeMap::from([("rating", f64::NAN)])));
        assert!(contains_non_finite(&Shape::Scaled(f32::NAN)));
        assert!(contains_non_finite(&Shape::Span {
            from: 0.0,
            to: f64::INFINITY,
        }));
        assert!(!contains_non_finite(&Shape::Span { from: 0.0, to: 1.0 }));
    }
}
