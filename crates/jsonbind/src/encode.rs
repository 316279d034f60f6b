//! Encode-direction counterparts of the decode routines. Each produces
//! the document value to commit at the cursor, or `Skip`/`Filtered` for
//! the omit policies. Optional-field unwrapping happens in the
//! dispatcher, so every routine here sees a present field.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use indexmap::IndexMap;

use crate::convert::ToValue;
use crate::mapper::{Mappable, Mapper};
use crate::outcome::Outcome;
use crate::transform::Transform;
use crate::value::Value;

pub(crate) fn scalar<T: ToValue>(field: &T) -> Outcome<Value> {
    Outcome::Converted(field.to_value())
}

pub(crate) fn object<T: Mappable + Clone>(field: &T, emit_nulls: bool) -> Outcome<Value> {
    Outcome::Converted(mapper::<T>(emit_nulls).encode(field))
}

pub(crate) fn object_array<T: Mappable + Clone>(field: &[T], emit_nulls: bool) -> Outcome<Value> {
    Outcome::Converted(mapper::<T>(emit_nulls).encode_array(field))
}

pub(crate) fn object_array_2d<T: Mappable + Clone>(
    field: &[Vec<T>],
    emit_nulls: bool,
) -> Outcome<Value> {
    Outcome::Converted(mapper::<T>(emit_nulls).encode_array_2d(field))
}

pub(crate) fn object_map<T: Mappable + Clone>(
    field: &HashMap<String, T>,
    emit_nulls: bool,
) -> Outcome<Value> {
    Outcome::Converted(mapper::<T>(emit_nulls).encode_map(field))
}

pub(crate) fn object_map_of_arrays<T: Mappable + Clone>(
    field: &HashMap<String, Vec<T>>,
    emit_nulls: bool,
) -> Outcome<Value> {
    Outcome::Converted(mapper::<T>(emit_nulls).encode_map_of_arrays(field))
}

pub(crate) fn object_set<T: Mappable + Clone + Eq + Hash>(
    field: &HashSet<T>,
    emit_nulls: bool,
) -> Outcome<Value> {
    Outcome::Converted(mapper::<T>(emit_nulls).encode_set(field))
}

/// A failed scalar transform filters the key out entirely; it is not
/// absence, so emit-nulls does not apply.
pub(crate) fn transformed<T, Tr>(field: &T, transform: &Tr) -> Outcome<Value>
where
    Tr: Transform<Domain = T>,
{
    Outcome::from_present(transform.encode(field))
}

pub(crate) fn transformed_array<T, Tr>(field: &[T], transform: &Tr) -> Outcome<Value>
where
    Tr: Transform<Domain = T>,
{
    let mut encoded = Vec::with_capacity(field.len());
    for (index, item) in field.iter().enumerate() {
        match transform.encode(item) {
            Some(element) => encoded.push(element),
            None => log::debug!("transform array: dropping element {index} on encode"),
        }
    }
    Outcome::Converted(Value::Sequence(encoded))
}

pub(crate) fn transformed_map<T, Tr>(field: &HashMap<String, T>, transform: &Tr) -> Outcome<Value>
where
    Tr: Transform<Domain = T>,
{
    let mut encoded: IndexMap<String, Value> = IndexMap::with_capacity(field.len());
    for (key, item) in field {
        match transform.encode(item) {
            Some(element) => {
                encoded.insert(key.clone(), element);
            }
            None => log::debug!("transform map: dropping key {key:?} on encode"),
        }
    }
    Outcome::Converted(Value::Mapping(encoded))
}

fn mapper<T: Mappable>(emit_nulls: bool) -> Mapper<T> {
    Mapper::new().emit_nulls(emit_nulls)
}
