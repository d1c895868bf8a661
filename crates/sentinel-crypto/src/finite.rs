//! Rejects NaN and infinities before a value is turned into JSON.
//!
//! `serde_json::to_value` maps non-finite floats to `null` without
//! reporting anything, so the input is walked once with a serializer that
//! produces no output and fails on the first non-finite float.

use serde::ser::{self, Serialize};

use crate::canonical::EncodingError;

impl ser::Error for EncodingError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        EncodingError::Unrepresentable(msg.to_string())
    }
}

/// Fail with [`EncodingError::NonFiniteNumber`] if `value` contains NaN or
/// an infinity anywhere.
pub fn ensure_finite<T: Serialize + ?Sized>(value: &T) -> Result<(), EncodingError> {
    value.serialize(FiniteCheck)
}

#[derive(Clone, Copy)]
struct FiniteCheck;

fn check_float(v: f64) -> Result<(), EncodingError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(EncodingError::NonFiniteNumber)
    }
}

impl ser::Serializer for FiniteCheck {
    type Ok = ();
    type Error = EncodingError;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, _: bool) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_i8(self, _: i8) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_i16(self, _: i16) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_i32(self, _: i32) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_i64(self, _: i64) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_i128(self, _: i128) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_u8(self, _: u8) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_u16(self, _: u16) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_u32(self, _: u32) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_u64(self, _: u64) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_u128(self, _: u128) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_f32(self, v: f32) -> Result<(), EncodingError> {
        check_float(f64::from(v))
    }
    fn serialize_f64(self, v: f64) -> Result<(), EncodingError> {
        check_float(v)
    }
    fn serialize_char(self, _: char) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_str(self, _: &str) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_bytes(self, _: &[u8]) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_none(self) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), EncodingError> {
        value.serialize(self)
    }
    fn serialize_unit(self) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_unit_struct(self, _: &'static str) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
    ) -> Result<(), EncodingError> {
        Ok(())
    }
    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<(), EncodingError> {
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        value: &T,
    ) -> Result<(), EncodingError> {
        value.serialize(self)
    }
    fn serialize_seq(self, _: Option<usize>) -> Result<Self, EncodingError> {
        Ok(self)
    }
    fn serialize_tuple(self, _: usize) -> Result<Self, EncodingError> {
        Ok(self)
    }
    fn serialize_tuple_struct(self, _: &'static str, _: usize) -> Result<Self, EncodingError> {
        Ok(self)
    }
    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self, EncodingError> {
        Ok(self)
    }
    fn serialize_map(self, _: Option<usize>) -> Result<Self, EncodingError> {
        Ok(self)
    }
    fn serialize_struct(self, _: &'static str, _: usize) -> Result<Self, EncodingError> {
        Ok(self)
    }
    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self, EncodingError> {
        Ok(self)
    }
}

impl ser::SerializeSeq for FiniteCheck {
    type Ok = ();
    type Error = EncodingError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodingError> {
        value.serialize(*self)
    }
    fn end(self) -> Result<(), EncodingError> {
        Ok(())
    }
}

impl ser::SerializeTuple for FiniteCheck {
    type Ok = ();
    type Error = EncodingError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodingError> {
        value.serialize(*self)
    }
    fn end(self) -> Result<(), EncodingError> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for FiniteCheck {
    type Ok = ();
    type Error = EncodingError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodingError> {
        value.serialize(*self)
    }
    fn end(self) -> Result<(), EncodingError> {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for FiniteCheck {
    type Ok = ();
    type Error = EncodingError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodingError> {
        value.serialize(*self)
    }
    fn end(self) -> Result<(), EncodingError> {
        Ok(())
    }
}

impl ser::SerializeMap for FiniteCheck {
    type Ok = ();
    type Error = EncodingError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), EncodingError> {
        key.serialize(*self)
    }
    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodingError> {
        value.serialize(*self)
    }
    fn end(self) -> Result<(), EncodingError> {
        Ok(())
    }
}

impl ser::SerializeStruct for FiniteCheck {
    type Ok = ();
    type Error = EncodingError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _: &'static str,
        value: &T,
    ) -> Result<(), EncodingError> {
        value.serialize(*self)
    }
    fn end(self) -> Result<(), EncodingError> {
        Ok(())
    }
}

impl ser::SerializeStructVariant for FiniteCheck {
    type Ok = ();
    type Error = EncodingError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _: &'static str,
        value: &T,
    ) -> Result<(), EncodingError> {
        value.serialize(*self)
    }
    fn end(self) -> Result<(), EncodingError> {
        Ok(())
    }
}
