//! Value model used by generated converters

use crate::error::ConversionError;
use serde::{Deserialize, Serialize};

/// A self-describing value that generated converters read and write.
///
/// Records produced by `#[derive(Convert)]` are [`Value::Tuple`]s holding
/// the representing fields in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Empty,
    Boolean(bool),
    Integer08(i8),
    Integer16(i16),
    Integer32(i32),
    Integer64(i64),
    Natural08(u8),
    Natural16(u16),
    Natural32(u32),
    Natural64(u64),
    Decimal32(f32),
    Decimal64(f64),
    String(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
}

impl Value {
    /// Short lowercase name of the variant, used in mismatch errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::Boolean(_) => "boolean",
            Value::Integer08(_) => "integer08",
            Value::Integer16(_) => "integer16",
            Value::Integer32(_) => "integer32",
            Value::Integer64(_) => "integer64",
            Value::Natural08(_) => "natural08",
            Value::Natural16(_) => "natural16",
            Value::Natural32(_) => "natural32",
            Value::Natural64(_) => "natural64",
            Value::Decimal32(_) => "decimal32",
            Value::Decimal64(_) => "decimal64",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
        }
    }

    /// Open a tuple with exactly `arity` fields for reading.
    pub fn into_record(
        self,
        type_name: &'static str,
        arity: usize,
    ) -> Result<RecordReader, ConversionError> {
        match self {
            Value::Tuple(fields) if fields.len() == arity => Ok(RecordReader {
                type_name,
                fields: fields.into_iter(),
            }),
            Value::Tuple(fields) => Err(ConversionError::WrongArity {
                type_name,
                expected: arity,
                found: fields.len(),
            }),
            other => Err(ConversionError::TypeMismatch {
                expected: "tuple",
                found: other.kind_name(),
            }),
        }
    }
}

/// Sequential reader over the fields of a record
#[derive(Debug)]
pub struct RecordReader {
    type_name: &'static str,
    fields: std::vec::IntoIter<Value>,
}

impl RecordReader {
    /// Recover the next field.
    pub fn next<T: Convertible>(&mut self, field: &'static str) -> Result<T, ConversionError> {
        let value = self.fields.next().ok_or(ConversionError::MissingField {
            type_name: self.type_name,
            field,
        })?;
        T::from_value(value)
    }

    /// Number of fields not yet read
    pub fn remaining(&self) -> usize {
        self.fields.len()
    }
}

/// Types that can be turned into a [`Value`] and recovered from one.
pub trait Convertible: Sized {
    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Result<Self, ConversionError>;
}

macro_rules! impl_convertible {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Convertible for $ty {
                #[allow(clippy::clone_on_copy)]
                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }

                fn from_value(value: Value) -> Result<Self, ConversionError> {
                    match value {
                        Value::$variant(inner) => Ok(inner),
                        other => Err(ConversionError::TypeMismatch {
                            expected: Value::$variant(Default::default()).kind_name(),
                            found: other.kind_name(),
                        }),
                    }
                }
            }
        )*
    };
}

impl_convertible!(
    bool => Boolean,
    i8 => Integer08,
    i16 => Integer16,
    i32 => Integer32,
    i64 => Integer64,
    u8 => Natural08,
    u16 => Natural16,
    u32 => Natural32,
    u64 => Natural64,
    f32 => Decimal32,
    f64 => Decimal64,
    String => String,
);

impl Convertible for usize {
    fn to_value(&self) -> Value {
        Value::Natural64(*self as u64)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        let natural = u64::from_value(value)?;
        usize::try_from(natural).map_err(|e| ConversionError::OutOfRange(e.to_string()))
    }
}

impl Convertible for isize {
    fn to_value(&self) -> Value {
        Value::Integer64(*self as i64)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        let integer = i64::from_value(value)?;
        isize::try_from(integer).map_err(|e| ConversionError::OutOfRange(e.to_string()))
    }
}

impl Convertible for char {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        let text = String::from_value(value)?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ConversionError::OutOfRange(format!(
                "expected a single character, found {text:?}"
            ))),
        }
    }
}

impl<T: Convertible> Convertible for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Convertible::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(ConversionError::TypeMismatch {
                expected: "list",
                found: other.kind_name(),
            }),
        }
    }
}

impl<T: Convertible> Convertible for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Empty,
        }
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Empty => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Convertible> Convertible for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        T::from_value(value).map(Box::new)
    }
}

impl Convertible for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        Ok(value)
    }
}
