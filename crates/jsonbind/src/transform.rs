use std::marker::PhantomData;

use crate::convert::{FromValue, ToValue};
use crate::value::Value;

/// A pluggable converter for a domain type without a natural document
/// representation.
///
/// Both directions return `None` for unrecognized input instead of
/// failing loudly; a transform may be lossy in one direction. A shared
/// reference is passed per binding, so implementations stay stateless.
pub trait Transform {
    type Domain;

    fn decode(&self, value: &Value) -> Option<Self::Domain>;
    fn encode(&self, value: &Self::Domain) -> Option<Value>;
}

/// Domain types representable by an underlying raw value, typically
/// C-like enums carried as a string or integer.
pub trait RawRepr: Sized {
    type Repr: FromValue + ToValue;

    /// `None` when the raw value has no matching case.
    fn from_repr(repr: Self::Repr) -> Option<Self>;
    fn repr(&self) -> Self::Repr;
}

/// The implicit transform behind the `enum_*` bindings: raw value in the
/// document, typed case in the domain.
pub struct ReprTransform<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> ReprTransform<T> {
    pub fn new() -> Self {
        ReprTransform {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for ReprTransform<T> {
    fn default() -> Self {
        ReprTransform::new()
    }
}

impl<T: RawRepr> Transform for ReprTransform<T> {
    type Domain = T;

    fn decode(&self, value: &Value) -> Option<T> {
        T::Repr::from_value(value).and_then(T::from_repr)
    }

    fn encode(&self, value: &T) -> Option<Value> {
        Some(value.repr().to_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Light {
        Red,
        Green,
    }

    impl RawRepr for Light {
        type Repr = String;

        fn from_repr(repr: String) -> Option<Self> {
            match repr.as_str() {
                "red" => Some(Light::Red),
                "green" => Some(Light::Green),
                _ => None,
            }
        }

        fn repr(&self) -> String {
            match self {
                Light::Red => "red".to_string(),
                Light::Green => "green".to_string(),
            }
        }
    }

    #[test]
    fn repr_transform_decodes_known_cases() {
        let transform = ReprTransform::<Light>::new();
        assert_eq!(transform.decode(&Value::from("green")), Some(Light::Green));
        assert_eq!(transform.decode(&Value::from("blue")), None);
        assert_eq!(transform.decode(&Value::from(1i64)), None);
    }

    #[test]
    fn repr_transform_encodes_raw_value() {
        let transform = ReprTransform::<Light>::new();
        assert_eq!(transform.encode(&Light::Red), Some(Value::from("red")));
    }
}
