use std::{
    collections::{BTreeMap, HashMap},
    rc::Rc,
    sync::Arc,
};

use indexmap::IndexMap;

use crate::value::{Number, Value};

/// Conversion out of the document tree.
///
/// Casts are strict: a string never converts to a number, a float never
/// narrows to an integer. The one widening allowed is int → float.
/// Container impls are all-or-nothing; the lossy element filter applies
/// only to mappable collections, which the mapper handles itself.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

/// Conversion into the document tree. Total: every impl produces a value.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Option<Self> {
        let wide = f64::from_value(value)?;
        if wide > f32::MAX as f64 || wide < f32::MIN as f64 {
            return None;
        }
        Some(wide as f32)
    }
}

macro_rules! impl_signed_int {
    ($ty:ty) => {
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Option<Self> {
                let wide = i64::from_value(value)?;
                if wide < <$ty>::MIN as i64 || wide > <$ty>::MAX as i64 {
                    return None;
                }
                Some(wide as $ty)
            }
        }
    };
}

macro_rules! impl_unsigned_int {
    ($ty:ty) => {
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Option<Self> {
                let wide = i64::from_value(value)?;
                if wide < 0 || wide > <$ty>::MAX as i64 {
                    return None;
                }
                Some(wide as $ty)
            }
        }
    };
}

impl_signed_int!(i8);
impl_signed_int!(i16);
impl_signed_int!(i32);
impl_signed_int!(isize);

impl_unsigned_int!(u8);
impl_unsigned_int!(u16);
impl_unsigned_int!(u32);

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        value
            .as_sequence()?
            .iter()
            .map(T::from_value)
            .collect::<Option<Vec<T>>>()
    }
}

impl<T: FromValue> FromValue for HashMap<String, T> {
    fn from_value(value: &Value) -> Option<Self> {
        let entries = value.as_mapping()?;
        let mut converted = HashMap::with_capacity(entries.len());
        for (key, item) in entries {
            converted.insert(key.clone(), T::from_value(item)?);
        }
        Some(converted)
    }
}

impl<T: FromValue> FromValue for BTreeMap<String, T> {
    fn from_value(value: &Value) -> Option<Self> {
        let entries = value.as_mapping()?;
        let mut converted = BTreeMap::new();
        for (key, item) in entries {
            converted.insert(key.clone(), T::from_value(item)?);
        }
        Some(converted)
    }
}

impl<T: FromValue> FromValue for Box<T> {
    fn from_value(value: &Value) -> Option<Self> {
        T::from_value(value).map(Box::new)
    }
}

impl<T: FromValue> FromValue for Arc<T> {
    fn from_value(value: &Value) -> Option<Self> {
        T::from_value(value).map(Arc::new)
    }
}

impl<T: FromValue> FromValue for Rc<T> {
    fn from_value(value: &Value) -> Option<Self> {
        T::from_value(value).map(Rc::new)
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for i64 {
    fn to_value(&self) -> Value {
        Value::Number(Number::Int(*self))
    }
}

macro_rules! impl_int_to_value {
    ($ty:ty) => {
        impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::Number(Number::Int(*self as i64))
            }
        }
    };
}

impl_int_to_value!(i8);
impl_int_to_value!(i16);
impl_int_to_value!(i32);
impl_int_to_value!(isize);

impl_int_to_value!(u8);
impl_int_to_value!(u16);
impl_int_to_value!(u32);

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Number(Number::Float(*self as f64))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Number(Number::Float(*self))
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(|item| item.to_value()).collect())
    }
}

impl<T: ToValue> ToValue for HashMap<String, T> {
    fn to_value(&self) -> Value {
        let mut entries: IndexMap<String, Value> = IndexMap::with_capacity(self.len());
        for (key, item) in self {
            entries.insert(key.clone(), item.to_value());
        }
        Value::Mapping(entries)
    }
}

impl<T: ToValue> ToValue for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        let mut entries: IndexMap<String, Value> = IndexMap::with_capacity(self.len());
        for (key, item) in self {
            entries.insert(key.clone(), item.to_value());
        }
        Value::Mapping(entries)
    }
}

impl<T: ToValue> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Arc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Rc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casts_are_strict() {
        assert_eq!(i64::from_value(&Value::from("5")), None);
        assert_eq!(String::from_value(&Value::from(5i64)), None);
        assert_eq!(bool::from_value(&Value::from(0i64)), None);
        assert_eq!(i64::from_value(&Value::from(1.0)), None);
    }

    #[test]
    fn int_widens_to_float() {
        assert_eq!(f64::from_value(&Value::from(3i64)), Some(3.0));
        assert_eq!(f32::from_value(&Value::from(3i64)), Some(3.0));
    }

    #[test]
    fn narrow_ints_are_range_checked() {
        assert_eq!(i8::from_value(&Value::from(127i64)), Some(127));
        assert_eq!(i8::from_value(&Value::from(128i64)), None);
        assert_eq!(u8::from_value(&Value::from(-1i64)), None);
        assert_eq!(u32::from_value(&Value::from(4_294_967_295i64)), Some(u32::MAX));
        assert_eq!(u32::from_value(&Value::from(4_294_967_296i64)), None);
    }

    #[test]
    fn option_treats_null_as_absent() {
        assert_eq!(Option::<i64>::from_value(&Value::Null), Some(None));
        assert_eq!(Option::<i64>::from_value(&Value::from(2i64)), Some(Some(2)));
        assert_eq!(Option::<i64>::from_value(&Value::from("2")), None);
    }

    #[test]
    fn containers_convert_all_or_nothing() {
        let mixed = Value::Sequence(vec![Value::from(1i64), Value::from("two")]);
        assert_eq!(Vec::<i64>::from_value(&mixed), None);

        let clean = Value::Sequence(vec![Value::from(1i64), Value::from(2i64)]);
        assert_eq!(Vec::<i64>::from_value(&clean), Some(vec![1, 2]));

        let mut entries = IndexMap::new();
        entries.insert("a".to_string(), Value::from(1i64));
        entries.insert("b".to_string(), Value::from("x"));
        assert_eq!(HashMap::<String, i64>::from_value(&Value::Mapping(entries)), None);
    }

    #[test]
    fn round_trips_through_to_value() {
        assert_eq!(i64::from_value(&42i64.to_value()), Some(42));
        assert_eq!(String::from_value(&"hi".to_value()), Some("hi".to_string()));
        let items = vec![1i64, 2, 3];
        assert_eq!(Vec::<i64>::from_value(&items.to_value()), Some(items));
    }
}
