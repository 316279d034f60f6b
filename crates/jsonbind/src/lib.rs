//! jsonbind - declarative bidirectional JSON field binding
//!
//! One binding routine per domain type drives both directions: decoding
//! assigns document values into fields, encoding writes fields back into
//! a document, and the two can never fall out of step because they are
//! the same declaration. Absent or malformed input never raises; fields
//! keep their prior values and unusable collection elements are dropped.
//!
//! ```
//! use jsonbind::{Map, Mappable};
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct User {
//!     name: String,
//!     age: Option<i64>,
//! }
//!
//! impl Mappable for User {
//!     fn from_map(_: &Map<'_>) -> Option<Self> {
//!         Some(User::default())
//!     }
//!
//!     fn mapping(&mut self, map: &mut Map<'_>) {
//!         map.at("name").field(&mut self.name);
//!         map.at("age").field_opt(&mut self.age);
//!     }
//! }
//!
//! let user: User = jsonbind::from_str(r#"{"name":"ada","age":36}"#)?;
//! assert_eq!(user.age, Some(36));
//!
//! let text = jsonbind::to_string(&user)?;
//! assert_eq!(text, r#"{"name":"ada","age":36}"#);
//! # Ok::<(), jsonbind::Error>(())
//! ```

mod bind;
pub mod convert;
mod decode;
mod encode;
pub mod map;
pub mod mapper;
mod outcome;
pub mod transform;
pub mod value;

use std::any;

pub use convert::{FromValue, ToValue};
pub use map::{Direction, KeyPath, Map};
pub use mapper::{Mappable, Mapper};
pub use transform::{RawRepr, ReprTransform, Transform};
pub use value::{Number, Value};

/// Failures at the JSON text boundary. Everything below it is
/// best-effort and silent by design.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("document syntax error: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("cannot decode {type_name} from document")]
    Undecodable { type_name: &'static str },
}

impl Error {
    pub(crate) fn undecodable<T>() -> Self {
        Error::Undecodable {
            type_name: any::type_name::<T>(),
        }
    }
}

/// Parses JSON text and decodes one object from it.
pub fn from_str<T: Mappable>(text: &str) -> Result<T, Error> {
    Mapper::new().from_str(text)
}

/// Parses JSON text and decodes an array of objects from it.
pub fn array_from_str<T: Mappable>(text: &str) -> Result<Vec<T>, Error> {
    Mapper::new().array_from_str(text)
}

/// Decodes one object from an already-parsed document value.
pub fn from_value<T: Mappable>(document: &Value) -> Option<T> {
    Mapper::new().decode(document)
}

/// Encodes one object into a document value.
pub fn to_value<T: Mappable + Clone>(value: &T) -> Value {
    Mapper::new().encode(value)
}

/// Encodes one object and serializes it to compact JSON text.
pub fn to_string<T: Mappable + Clone>(value: &T) -> Result<String, Error> {
    Mapper::new().to_string(value)
}

/// Encodes one object and serializes it to pretty-printed JSON text.
pub fn to_string_pretty<T: Mappable + Clone>(value: &T) -> Result<String, Error> {
    Mapper::new().to_string_pretty(value)
}
