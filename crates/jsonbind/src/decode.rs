//! Decode-direction conversion routines, one per field shape. Every
//! routine turns "value currently under the cursor" into an [`Outcome`];
//! the dispatcher decides what an outcome does to the field.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::convert::FromValue;
use crate::mapper::{Mappable, Mapper};
use crate::outcome::Outcome;
use crate::transform::Transform;
use crate::value::Value;

pub(crate) fn scalar<T: FromValue>(source: Option<&Value>) -> Outcome<T> {
    match source {
        None => Outcome::Skip,
        Some(value) => Outcome::from_present(T::from_value(value)),
    }
}

pub(crate) fn object<T: Mappable>(source: Option<&Value>) -> Outcome<T> {
    match source {
        None => Outcome::Skip,
        Some(value) => Outcome::from_present(Mapper::new().decode(value)),
    }
}

pub(crate) fn object_array<T: Mappable>(source: Option<&Value>) -> Outcome<Vec<T>> {
    match source {
        None => Outcome::Skip,
        Some(value) => Outcome::from_present(Mapper::new().decode_array(value)),
    }
}

pub(crate) fn object_array_2d<T: Mappable>(source: Option<&Value>) -> Outcome<Vec<Vec<T>>> {
    match source {
        None => Outcome::Skip,
        Some(value) => Outcome::from_present(Mapper::new().decode_array_2d(value)),
    }
}

pub(crate) fn object_map<T: Mappable>(source: Option<&Value>) -> Outcome<HashMap<String, T>> {
    match source {
        None => Outcome::Skip,
        Some(value) => Outcome::from_present(Mapper::new().decode_map(value)),
    }
}

pub(crate) fn object_map_of_arrays<T: Mappable>(
    source: Option<&Value>,
) -> Outcome<HashMap<String, Vec<T>>> {
    match source {
        None => Outcome::Skip,
        Some(value) => Outcome::from_present(Mapper::new().decode_map_of_arrays(value)),
    }
}

pub(crate) fn object_set<T: Mappable + Eq + Hash>(source: Option<&Value>) -> Outcome<HashSet<T>> {
    match source {
        None => Outcome::Skip,
        Some(value) => Outcome::from_present(Mapper::new().decode_set(value)),
    }
}

pub(crate) fn transformed<T, Tr>(source: Option<&Value>, transform: &Tr) -> Outcome<T>
where
    Tr: Transform<Domain = T>,
{
    match source {
        None => Outcome::Skip,
        Some(value) => Outcome::from_present(transform.decode(value)),
    }
}

/// Element-wise transform decode with the lossy filter: failing elements
/// are dropped, survivors keep their order. An absent source skips, a
/// non-sequence source filters; both leave the field to the dispatcher's
/// unchanged/absent policy.
pub(crate) fn transformed_array<T, Tr>(source: Option<&Value>, transform: &Tr) -> Outcome<Vec<T>>
where
    Tr: Transform<Domain = T>,
{
    let Some(value) = source else {
        return Outcome::Skip;
    };
    let Some(items) = value.as_sequence() else {
        return Outcome::Filtered;
    };
    let mut decoded = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match transform.decode(item) {
            Some(element) => decoded.push(element),
            None => log::debug!(
                "transform array: dropping element {index} ({kind})",
                kind = item.kind()
            ),
        }
    }
    Outcome::Converted(decoded)
}

pub(crate) fn transformed_map<T, Tr>(
    source: Option<&Value>,
    transform: &Tr,
) -> Outcome<HashMap<String, T>>
where
    Tr: Transform<Domain = T>,
{
    let Some(value) = source else {
        return Outcome::Skip;
    };
    let Some(entries) = value.as_mapping() else {
        return Outcome::Filtered;
    };
    let mut decoded = HashMap::with_capacity(entries.len());
    for (key, item) in entries {
        match transform.decode(item) {
            Some(element) => {
                decoded.insert(key.clone(), element);
            }
            None => log::debug!(
                "transform map: dropping key {key:?} ({kind})",
                kind = item.kind()
            ),
        }
    }
    Outcome::Converted(decoded)
}
