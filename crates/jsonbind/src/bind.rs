//! The binding dispatcher: one method per field shape on [`Map`], each
//! serving both directions. Decode routes the value under the cursor
//! through the matching decode routine and applies the shape's
//! assignment policy; encode runs the matching encode routine and
//! commits the outcome at the cursor.
//!
//! Assignment policy, decode side:
//! - scalar shapes (plain, transform, enum): assign only on `Converted`,
//!   required and optional alike — absence never resets an optional
//!   scalar;
//! - required mappable shapes: assign only on `Converted`;
//! - optional mappable shapes: assign the whole `Option`, so absence or
//!   failure resets the field to `None`.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::convert::{FromValue, ToValue};
use crate::decode;
use crate::encode;
use crate::map::{Direction, Map};
use crate::mapper::Mappable;
use crate::outcome::Outcome;
use crate::transform::{RawRepr, ReprTransform, Transform};

impl<'doc> Map<'doc> {
    pub fn field<T: FromValue + ToValue>(&mut self, field: &mut T) {
        match self.direction() {
            Direction::Decode => {
                if let Outcome::Converted(value) = decode::scalar(self.current()) {
                    *field = value;
                }
            }
            Direction::Encode => {
                let outcome = encode::scalar(&*field);
                self.commit(outcome);
            }
        }
    }

    pub fn field_opt<T: FromValue + ToValue>(&mut self, field: &mut Option<T>) {
        match self.direction() {
            Direction::Decode => {
                if let Outcome::Converted(value) = decode::scalar(self.current()) {
                    *field = Some(value);
                }
            }
            Direction::Encode => {
                let outcome = match field.as_ref() {
                    Some(value) => encode::scalar(value),
                    None => Outcome::Skip,
                };
                self.commit(outcome);
            }
        }
    }

    pub fn field_with<T, Tr>(&mut self, field: &mut T, transform: &Tr)
    where
        Tr: Transform<Domain = T>,
    {
        match self.direction() {
            Direction::Decode => {
                if let Outcome::Converted(value) = decode::transformed(self.current(), transform) {
                    *field = value;
                }
            }
            Direction::Encode => {
                let outcome = encode::transformed(&*field, transform);
                self.commit(outcome);
            }
        }
    }

    pub fn field_with_opt<T, Tr>(&mut self, field: &mut Option<T>, transform: &Tr)
    where
        Tr: Transform<Domain = T>,
    {
        match self.direction() {
            Direction::Decode => {
                if let Outcome::Converted(value) = decode::transformed(self.current(), transform) {
                    *field = Some(value);
                }
            }
            Direction::Encode => {
                let outcome = match field.as_ref() {
                    Some(value) => encode::transformed(value, transform),
                    None => Outcome::Skip,
                };
                self.commit(outcome);
            }
        }
    }

    pub fn array_with<T, Tr>(&mut self, field: &mut Vec<T>, transform: &Tr)
    where
        Tr: Transform<Domain = T>,
    {
        match self.direction() {
            Direction::Decode => {
                if let Outcome::Converted(values) =
                    decode::transformed_array(self.current(), transform)
                {
                    *field = values;
                }
            }
            Direction::Encode => {
                let outcome = encode::transformed_array(field, transform);
                self.commit(outcome);
            }
        }
    }

    pub fn array_with_opt<T, Tr>(&mut self, field: &mut Option<Vec<T>>, transform: &Tr)
    where
        Tr: Transform<Domain = T>,
    {
        match self.direction() {
            Direction::Decode => {
                if let Outcome::Converted(values) =
                    decode::transformed_array(self.current(), transform)
                {
                    *field = Some(values);
                }
            }
            Direction::Encode => {
                let outcome = match field.as_ref() {
                    Some(values) => encode::transformed_array(values, transform),
                    None => Outcome::Skip,
                };
                self.commit(outcome);
            }
        }
    }

    pub fn map_with<T, Tr>(&mut self, field: &mut HashMap<String, T>, transform: &Tr)
    where
        Tr: Transform<Domain = T>,
    {
        match self.direction() {
            Direction::Decode => {
                if let Outcome::Converted(values) =
                    decode::transformed_map(self.current(), transform)
                {
                    *field = values;
                }
            }
            Direction::Encode => {
                let outcome = encode::transformed_map(field, transform);
                self.commit(outcome);
            }
        }
    }

    pub fn map_with_opt<T, Tr>(&mut self, field: &mut Option<HashMap<String, T>>, transform: &Tr)
    where
        Tr: Transform<Domain = T>,
    {
        match self.direction() {
            Direction::Decode => {
                if let Outcome::Converted(values) =
                    decode::transformed_map(self.current(), transform)
                {
                    *field = Some(values);
                }
            }
            Direction::Encode => {
                let outcome = match field.as_ref() {
                    Some(values) => encode::transformed_map(values, transform),
                    None => Outcome::Skip,
                };
                self.commit(outcome);
            }
        }
    }

    pub fn enum_value<T: RawRepr>(&mut self, field: &mut T) {
        self.field_with(field, &ReprTransform::<T>::new());
    }

    pub fn enum_value_opt<T: RawRepr>(&mut self, field: &mut Option<T>) {
        self.field_with_opt(field, &ReprTransform::<T>::new());
    }

    pub fn enum_array<T: RawRepr>(&mut self, field: &mut Vec<T>) {
        self.array_with(field, &ReprTransform::<T>::new());
    }

    pub fn enum_array_opt<T: RawRepr>(&mut self, field: &mut Option<Vec<T>>) {
        self.array_with_opt(field, &ReprTransform::<T>::new());
    }

    pub fn enum_map<T: RawRepr>(&mut self, field: &mut HashMap<String, T>) {
        self.map_with(field, &ReprTransform::<T>::new());
    }

    pub fn enum_map_opt<T: RawRepr>(&mut self, field: &mut Option<HashMap<String, T>>) {
        self.map_with_opt(field, &ReprTransform::<T>::new());
    }

    pub fn object<T: Mappable + Clone>(&mut self, field: &mut T) {
        match self.direction() {
            Direction::Decode => {
                if let Outcome::Converted(value) = decode::object(self.current()) {
                    *field = value;
                }
            }
            Direction::Encode => {
                let outcome = encode::object(&*field, self.emit_nulls());
                self.commit(outcome);
            }
        }
    }

    pub fn object_opt<T: Mappable + Clone>(&mut self, field: &mut Option<T>) {
        match self.direction() {
            Direction::Decode => {
                *field = decode::object(self.current()).converted();
            }
            Direction::Encode => {
                let outcome = match field.as_ref() {
                    Some(value) => encode::object(value, self.emit_nulls()),
                    None => Outcome::Skip,
                };
                self.commit(outcome);
            }
        }
    }

    pub fn object_array<T: Mappable + Clone>(&mut self, field: &mut Vec<T>) {
        match self.direction() {
            Direction::Decode => {
                if let Outcome::Converted(values) = decode::object_array(self.current()) {
                    *field = values;
                }
            }
            Direction::Encode => {
                let outcome = encode::object_array(field, self.emit_nulls());
                self.commit(outcome);
            }
        }
    }

    pub fn object_array_opt<T: Mappable + Clone>(&mut self, field: &mut Option<Vec<T>>) {
        match self.direction() {
            Direction::Decode => {
                *field = decode::object_array(self.current()).converted();
            }
            Direction::Encode => {
                let outcome = match field.as_ref() {
                    Some(values) => encode::object_array(values, self.emit_nulls()),
                    None => Outcome::Skip,
                };
                self.commit(outcome);
            }
        }
    }

    pub fn object_array_2d<T: Mappable + Clone>(&mut self, field: &mut Vec<Vec<T>>) {
        match self.direction() {
            Direction::Decode => {
                if let Outcome::Converted(values) = decode::object_array_2d(self.current()) {
                    *field = values;
                }
            }
            Direction::Encode => {
                let outcome = encode::object_array_2d(field, self.emit_nulls());
                self.commit(outcome);
            }
        }
    }

    pub fn object_array_2d_opt<T: Mappable + Clone>(&mut self, field: &mut Option<Vec<Vec<T>>>) {
        match self.direction() {
            Direction::Decode => {
                *field = decode::object_array_2d(self.current()).converted();
            }
            Direction::Encode => {
                let outcome = match field.as_ref() {
                    Some(values) => encode::object_array_2d(values, self.emit_nulls()),
                    None => Outcome::Skip,
                };
                self.commit(outcome);
            }
        }
    }

    pub fn object_map<T: Mappable + Clone>(&mut self, field: &mut HashMap<String, T>) {
        match self.direction() {
            Direction::Decode => {
                if let Outcome::Converted(values) = decode::object_map(self.current()) {
                    *field = values;
                }
            }
            Direction::Encode => {
                let outcome = encode::object_map(field, self.emit_nulls());
                self.commit(outcome);
            }
        }
    }

    pub fn object_map_opt<T: Mappable + Clone>(&mut self, field: &mut Option<HashMap<String, T>>) {
        match self.direction() {
            Direction::Decode => {
                *field = decode::object_map(self.current()).converted();
            }
            Direction::Encode => {
                let outcome = match field.as_ref() {
                    Some(values) => encode::object_map(values, self.emit_nulls()),
                    None => Outcome::Skip,
                };
                self.commit(outcome);
            }
        }
    }

    pub fn object_map_of_arrays<T: Mappable + Clone>(
        &mut self,
        field: &mut HashMap<String, Vec<T>>,
    ) {
        match self.direction() {
            Direction::Decode => {
                if let Outcome::Converted(values) = decode::object_map_of_arrays(self.current()) {
                    *field = values;
                }
            }
            Direction::Encode => {
                let outcome = encode::object_map_of_arrays(field, self.emit_nulls());
                self.commit(outcome);
            }
        }
    }

    pub fn object_map_of_arrays_opt<T: Mappable + Clone>(
        &mut self,
        field: &mut Option<HashMap<String, Vec<T>>>,
    ) {
        match self.direction() {
            Direction::Decode => {
                *field = decode::object_map_of_arrays(self.current()).converted();
            }
            Direction::Encode => {
                let outcome = match field.as_ref() {
                    Some(values) => encode::object_map_of_arrays(values, self.emit_nulls()),
                    None => Outcome::Skip,
                };
                self.commit(outcome);
            }
        }
    }

    pub fn object_set<T: Mappable + Clone + Eq + Hash>(&mut self, field: &mut HashSet<T>) {
        match self.direction() {
            Direction::Decode => {
                if let Outcome::Converted(values) = decode::object_set(self.current()) {
                    *field = values;
                }
            }
            Direction::Encode => {
                let outcome = encode::object_set(field, self.emit_nulls());
                self.commit(outcome);
            }
        }
    }

    pub fn object_set_opt<T: Mappable + Clone + Eq + Hash>(
        &mut self,
        field: &mut Option<HashSet<T>>,
    ) {
        match self.direction() {
            Direction::Decode => {
                *field = decode::object_set(self.current()).converted();
            }
            Direction::Encode => {
                let outcome = match field.as_ref() {
                    Some(values) => encode::object_set(values, self.emit_nulls()),
                    None => Outcome::Skip,
                };
                self.commit(outcome);
            }
        }
    }
}
