//! The object mapper: runs a domain type's binding routine in one
//! direction and hands every nested mappable field back through itself.

use std::any;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::marker::PhantomData;

use crate::map::Map;
use crate::value::Value;
use crate::Error;

/// A domain type that participates in field binding.
///
/// `from_map` is the decode constructor; it may read values off the
/// context to reject documents that cannot become a valid instance.
/// `mapping` declares the fields once and is run in both directions.
pub trait Mappable: Sized {
    fn from_map(map: &Map<'_>) -> Option<Self>;
    fn mapping(&mut self, map: &mut Map<'_>);
}

/// Converts values of one mappable type, in either direction.
///
/// Stateless apart from the emit-nulls flag; cheap to construct per
/// call, which is what the engine does for nested fields.
pub struct Mapper<T> {
    emit_nulls: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for Mapper<T> {
    fn default() -> Self {
        Mapper::new()
    }
}

impl<T> Mapper<T> {
    pub fn new() -> Self {
        Mapper {
            emit_nulls: false,
            _marker: PhantomData,
        }
    }

    /// When set, absent optional fields encode as explicit nulls. The
    /// flag is inherited by every nested encode under this mapper.
    pub fn emit_nulls(mut self, emit: bool) -> Self {
        self.emit_nulls = emit;
        self
    }
}

impl<T: Mappable> Mapper<T> {
    /// Decodes one object from a mapping value. `None` when the source
    /// is not a mapping or the type's constructor rejects it; never an
    /// error.
    pub fn decode(&self, source: &Value) -> Option<T> {
        if !matches!(source, Value::Mapping(_)) {
            log::debug!(
                "decode {name}: source is {kind}, not a mapping",
                name = any::type_name::<T>(),
                kind = source.kind()
            );
            return None;
        }
        let mut map = Map::reading(source);
        let Some(mut object) = T::from_map(&map) else {
            log::debug!(
                "decode {name}: constructor rejected document",
                name = any::type_name::<T>()
            );
            return None;
        };
        object.mapping(&mut map);
        Some(object)
    }

    /// Runs the binding routine over an existing instance. Fields without
    /// usable input keep their prior values; `from_map` is not consulted.
    pub fn decode_into(&self, target: &mut T, source: &Value) {
        if !matches!(source, Value::Mapping(_)) {
            log::debug!(
                "decode into {name}: source is {kind}, not a mapping",
                name = any::type_name::<T>(),
                kind = source.kind()
            );
            return;
        }
        let mut map = Map::reading(source);
        target.mapping(&mut map);
    }

    /// Decodes a sequence element-wise. Elements that fail to decode are
    /// dropped; the survivors keep their order. `None` only when the
    /// source is not a sequence.
    pub fn decode_array(&self, source: &Value) -> Option<Vec<T>> {
        let items = source.as_sequence()?;
        let mut decoded = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.decode(item) {
                Some(object) => decoded.push(object),
                None => log::debug!(
                    "decode array {name}: dropping element {index} ({kind})",
                    name = any::type_name::<T>(),
                    kind = item.kind()
                ),
            }
        }
        Some(decoded)
    }

    /// Rows that are not sequences are dropped like failing elements.
    pub fn decode_array_2d(&self, source: &Value) -> Option<Vec<Vec<T>>> {
        let rows = source.as_sequence()?;
        let mut decoded = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            match self.decode_array(row) {
                Some(objects) => decoded.push(objects),
                None => log::debug!(
                    "decode 2d array {name}: dropping row {index} ({kind})",
                    name = any::type_name::<T>(),
                    kind = row.kind()
                ),
            }
        }
        Some(decoded)
    }

    /// Keys whose values fail to decode are dropped from the result.
    pub fn decode_map(&self, source: &Value) -> Option<HashMap<String, T>> {
        let entries = source.as_mapping()?;
        let mut decoded = HashMap::with_capacity(entries.len());
        for (key, item) in entries {
            match self.decode(item) {
                Some(object) => {
                    decoded.insert(key.clone(), object);
                }
                None => log::debug!(
                    "decode map {name}: dropping key {key:?} ({kind})",
                    name = any::type_name::<T>(),
                    kind = item.kind()
                ),
            }
        }
        Some(decoded)
    }

    pub fn decode_map_of_arrays(&self, source: &Value) -> Option<HashMap<String, Vec<T>>> {
        let entries = source.as_mapping()?;
        let mut decoded = HashMap::with_capacity(entries.len());
        for (key, item) in entries {
            match self.decode_array(item) {
                Some(objects) => {
                    decoded.insert(key.clone(), objects);
                }
                None => log::debug!(
                    "decode map of arrays {name}: dropping key {key:?} ({kind})",
                    name = any::type_name::<T>(),
                    kind = item.kind()
                ),
            }
        }
        Some(decoded)
    }

    /// Decodes as an array, then folds into a set; domain-equal
    /// duplicates collapse silently.
    pub fn decode_set(&self, source: &Value) -> Option<HashSet<T>>
    where
        T: Eq + Hash,
    {
        self.decode_array(source)
            .map(|objects| objects.into_iter().collect())
    }

    /// Parses JSON text, then decodes. The only fallible surface: syntax
    /// errors and an undecodable top level come back as [`Error`].
    pub fn from_str(&self, text: &str) -> Result<T, Error> {
        let document: Value = serde_json::from_str(text)?;
        self.decode(&document).ok_or_else(Error::undecodable::<T>)
    }

    pub fn array_from_str(&self, text: &str) -> Result<Vec<T>, Error> {
        let document: Value = serde_json::from_str(text)?;
        self.decode_array(&document)
            .ok_or_else(Error::undecodable::<Vec<T>>)
    }

    /// Encodes one object into a mapping value. The binding routine
    /// needs `&mut`, so it runs on a scratch clone.
    pub fn encode(&self, value: &T) -> Value
    where
        T: Clone,
    {
        let mut scratch = value.clone();
        let mut map = Map::writing(self.emit_nulls);
        scratch.mapping(&mut map);
        map.into_value()
    }

    pub fn encode_array(&self, values: &[T]) -> Value
    where
        T: Clone,
    {
        Value::Sequence(values.iter().map(|item| self.encode(item)).collect())
    }

    pub fn encode_array_2d(&self, values: &[Vec<T>]) -> Value
    where
        T: Clone,
    {
        Value::Sequence(values.iter().map(|row| self.encode_array(row)).collect())
    }

    pub fn encode_map(&self, values: &HashMap<String, T>) -> Value
    where
        T: Clone,
    {
        Value::Mapping(
            values
                .iter()
                .map(|(key, item)| (key.clone(), self.encode(item)))
                .collect(),
        )
    }

    pub fn encode_map_of_arrays(&self, values: &HashMap<String, Vec<T>>) -> Value
    where
        T: Clone,
    {
        Value::Mapping(
            values
                .iter()
                .map(|(key, row)| (key.clone(), self.encode_array(row)))
                .collect(),
        )
    }

    /// Output order follows the set's iteration order.
    pub fn encode_set(&self, values: &HashSet<T>) -> Value
    where
        T: Clone + Eq + Hash,
    {
        Value::Sequence(values.iter().map(|item| self.encode(item)).collect())
    }

    pub fn to_string(&self, value: &T) -> Result<String, Error>
    where
        T: Clone,
    {
        Ok(serde_json::to_string(&self.encode(value))?)
    }

    pub fn to_string_pretty(&self, value: &T) -> Result<String, Error>
    where
        T: Clone,
    {
        Ok(serde_json::to_string_pretty(&self.encode(value))?)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
    struct Point {
        x: i64,
        y: i64,
    }

    impl Mappable for Point {
        fn from_map(_: &Map<'_>) -> Option<Self> {
            Some(Point::default())
        }

        fn mapping(&mut self, map: &mut Map<'_>) {
            map.at("x").field(&mut self.x);
            map.at("y").field(&mut self.y);
        }
    }

    fn doc(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn decode_rejects_non_mapping_sources() {
        let mapper = Mapper::<Point>::new();
        assert_eq!(mapper.decode(&doc("[1,2]")), None);
        assert_eq!(mapper.decode(&doc("3")), None);
        assert_eq!(
            mapper.decode(&doc(r#"{"x":1,"y":2}"#)),
            Some(Point { x: 1, y: 2 })
        );
    }

    #[test]
    fn decode_array_drops_failing_elements() {
        let mapper = Mapper::<Point>::new();
        let decoded = mapper
            .decode_array(&doc(r#"[{"x":1,"y":1},"bad",{"x":2,"y":2}]"#))
            .unwrap();
        assert_eq!(decoded, vec![Point { x: 1, y: 1 }, Point { x: 2, y: 2 }]);
        assert_eq!(mapper.decode_array(&doc(r#""not a sequence""#)), None);
    }

    #[test]
    fn decode_set_collapses_domain_equal_elements() {
        let mapper = Mapper::<Point>::new();
        let decoded = mapper
            .decode_set(&doc(r#"[{"x":1,"y":1},{"x":1,"y":1}]"#))
            .unwrap();
        assert_eq!(decoded.len(), 1);
    }

    #[test]
    fn from_str_reports_undecodable_top_level() {
        let mapper = Mapper::<Point>::new();
        assert!(matches!(
            mapper.from_str("[]"),
            Err(Error::Undecodable { .. })
        ));
        assert!(matches!(mapper.from_str("{"), Err(Error::Syntax(_))));
        assert_eq!(
            mapper.from_str(r#"{"x":5,"y":6}"#).unwrap(),
            Point { x: 5, y: 6 }
        );
    }

    #[test]
    fn encode_writes_fields_in_binding_order() {
        let mapper = Mapper::<Point>::new();
        let encoded = mapper.encode(&Point { x: 3, y: 4 });
        let keys: Vec<&String> = encoded.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, ["x", "y"]);
    }
}
