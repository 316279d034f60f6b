//! The binding context threaded through a mapping invocation: key-path
//! cursor, direction, and the document root being read or built.

use std::fmt;

use indexmap::IndexMap;

use crate::convert::FromValue;
use crate::outcome::Outcome;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Decode,
    Encode,
}

/// Path from the document root to one field, as string segments.
///
/// `From<&str>` splits on dots; `literal` keeps a dotted key verbatim.
/// On read, a segment may index into a sequence when it parses as a
/// number; on write, segments always address mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    pub(crate) fn root() -> Self {
        KeyPath {
            segments: Vec::new(),
        }
    }

    pub fn literal(key: impl Into<String>) -> Self {
        KeyPath {
            segments: vec![key.into()],
        }
    }

    pub(crate) fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        KeyPath {
            segments: path.split('.').map(str::to_string).collect(),
        }
    }
}

impl From<String> for KeyPath {
    fn from(path: String) -> Self {
        KeyPath::from(path.as_str())
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

#[derive(Debug)]
enum Root<'doc> {
    Read(&'doc Value),
    Write(Value),
}

/// One field binding's view of the conversion in progress.
///
/// A `Map` is created per mapper invocation and re-aimed at each field
/// with [`Map::at`]. On decode it resolves the value currently under the
/// cursor; on encode it collects committed values into the write root.
#[derive(Debug)]
pub struct Map<'doc> {
    direction: Direction,
    root: Root<'doc>,
    cursor: KeyPath,
    current: Option<&'doc Value>,
    emit_nulls: bool,
}

impl<'doc> Map<'doc> {
    pub(crate) fn reading(root: &'doc Value) -> Self {
        Map {
            direction: Direction::Decode,
            root: Root::Read(root),
            cursor: KeyPath::root(),
            current: Some(root),
            emit_nulls: false,
        }
    }

    pub(crate) fn writing(emit_nulls: bool) -> Self {
        Map {
            direction: Direction::Encode,
            root: Root::Write(Value::Mapping(IndexMap::new())),
            cursor: KeyPath::root(),
            current: None,
            emit_nulls,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn emit_nulls(&self) -> bool {
        self.emit_nulls
    }

    /// Re-aim the cursor at `path` and return the context for a binding
    /// call: `map.at("user.name").field(&mut self.name)`.
    pub fn at(&mut self, path: impl Into<KeyPath>) -> &mut Self {
        self.cursor = path.into();
        self.current = match self.root {
            Root::Read(root) => lookup(root, self.cursor.segments()),
            Root::Write(_) => None,
        };
        self
    }

    /// Value under the document root at `path`, independent of the
    /// cursor. Decode direction only; `None` while encoding.
    pub fn peek(&self, path: impl Into<KeyPath>) -> Option<&Value> {
        let path = path.into();
        match self.root {
            Root::Read(root) => lookup(root, path.segments()),
            Root::Write(_) => None,
        }
    }

    /// Typed read at `path`, for constructor-time validation.
    pub fn value<T: FromValue>(&self, path: impl Into<KeyPath>) -> Option<T> {
        self.peek(path).and_then(T::from_value)
    }

    pub(crate) fn current(&self) -> Option<&Value> {
        self.current
    }

    pub(crate) fn commit(&mut self, outcome: Outcome<Value>) {
        match outcome {
            Outcome::Converted(value) => self.write(value),
            Outcome::Skip => {
                if self.emit_nulls {
                    self.write(Value::Null);
                }
            }
            Outcome::Filtered => {}
        }
    }

    fn write(&mut self, value: Value) {
        let Root::Write(root) = &mut self.root else {
            return;
        };
        write_at(root, self.cursor.segments(), value);
    }

    pub(crate) fn into_value(self) -> Value {
        match self.root {
            Root::Write(root) => root,
            Root::Read(root) => root.clone(),
        }
    }
}

fn lookup<'doc>(root: &'doc Value, segments: &[String]) -> Option<&'doc Value> {
    let mut node = root;
    for segment in segments {
        node = match node {
            Value::Mapping(entries) => entries.get(segment.as_str())?,
            Value::Sequence(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(node)
}

/// Descends along `segments`, creating intermediate mappings as needed.
/// Sibling keys at each level are preserved; an intermediate that is not
/// a mapping is replaced, since two bindings disagreeing on a prefix's
/// shape cannot both be honored.
fn write_at(root: &mut Value, segments: &[String], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };
    let mut node = root;
    for segment in parents {
        let Value::Mapping(entries) = node else {
            return;
        };
        let slot = entries
            .entry(segment.clone())
            .or_insert_with(|| Value::Mapping(IndexMap::new()));
        if !matches!(slot, Value::Mapping(_)) {
            *slot = Value::Mapping(IndexMap::new());
        }
        node = slot;
    }
    let Value::Mapping(entries) = node else {
        return;
    };
    entries.insert(last.clone(), value);
}
