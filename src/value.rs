use crate::errors::BoxError;
use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::fmt;
use std::sync::Arc;

/// Deferred class value, evaluated once per occurrence during normalization
pub type Thunk = Arc<dyn Fn() -> std::result::Result<ClassValue, BoxError> + Send + Sync>;

/// Anything that can resolve to zero or more class-name tokens.
///
/// `ClassValue` is a recursive tree: lists and dictionaries nest arbitrarily,
/// and thunks defer building a subtree until normalization reaches them.
#[derive(Clone, Default)]
pub enum ClassValue {
    /// A class string, passed through as a single token
    Text(String),
    /// A condition; only meaningful as a dictionary value
    Flag(bool),
    /// Ordered sequence of nested values
    List(Vec<ClassValue>),
    /// Ordered key/value pairs
    Dictionary(ClassDictionary),
    /// Zero-argument callback producing a value
    Thunk(Thunk),
    /// Absent value
    #[default]
    Empty,
}

impl ClassValue {
    /// Wrap an infallible callback as a deferred value
    pub fn thunk<F, V>(f: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<ClassValue>,
    {
        ClassValue::Thunk(Arc::new(move || Ok(f().into())))
    }

    /// Wrap a fallible callback as a deferred value.
    ///
    /// An `Err` returned by the callback aborts the whole normalization.
    pub fn try_thunk<F, V, E>(f: F) -> Self
    where
        F: Fn() -> std::result::Result<V, E> + Send + Sync + 'static,
        V: Into<ClassValue>,
        E: Into<BoxError>,
    {
        ClassValue::Thunk(Arc::new(move || f().map(Into::into).map_err(Into::into)))
    }

    /// `Empty`, `Flag(false)` and the empty string are falsy; everything else is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            ClassValue::Empty | ClassValue::Flag(false) => false,
            ClassValue::Text(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// True only for `Flag(true)`
    pub fn is_true(&self) -> bool {
        matches!(self, ClassValue::Flag(true))
    }
}

impl fmt::Debug for ClassValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
            ClassValue::Flag(b) => f.debug_tuple("Flag").field(b).finish(),
            ClassValue::List(items) => f.debug_tuple("List").field(items).finish(),
            ClassValue::Dictionary(dict) => f.debug_tuple("Dictionary").field(dict).finish(),
            ClassValue::Thunk(_) => f.write_str("Thunk(..)"),
            ClassValue::Empty => f.write_str("Empty"),
        }
    }
}

impl From<&str> for ClassValue {
    fn from(value: &str) -> Self {
        ClassValue::Text(value.to_string())
    }
}

impl From<String> for ClassValue {
    fn from(value: String) -> Self {
        ClassValue::Text(value)
    }
}

impl From<&String> for ClassValue {
    fn from(value: &String) -> Self {
        ClassValue::Text(value.clone())
    }
}

impl From<bool> for ClassValue {
    fn from(value: bool) -> Self {
        ClassValue::Flag(value)
    }
}

impl From<()> for ClassValue {
    fn from(_: ()) -> Self {
        ClassValue::Empty
    }
}

impl<T: Into<ClassValue>> From<Option<T>> for ClassValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ClassValue::Empty, Into::into)
    }
}

impl<T: Into<ClassValue>> From<Vec<T>> for ClassValue {
    fn from(items: Vec<T>) -> Self {
        ClassValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ClassValue>, const N: usize> From<[T; N]> for ClassValue {
    fn from(items: [T; N]) -> Self {
        ClassValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<ClassDictionary> for ClassValue {
    fn from(dict: ClassDictionary) -> Self {
        ClassValue::Dictionary(dict)
    }
}

impl From<serde_json::Value> for ClassValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ClassValue::Empty,
            Value::Bool(b) => ClassValue::Flag(b),
            Value::String(s) => ClassValue::Text(s),
            Value::Array(items) => ClassValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => ClassValue::Dictionary(
                map.into_iter().map(|(k, v)| (k, ClassValue::from(v))).collect(),
            ),
            Value::Number(n) => {
                tracing::debug!(number = %n, "ignoring numeric class value");
                ClassValue::Empty
            }
        }
    }
}

impl<'de> Deserialize<'de> for ClassValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ClassValueVisitor)
    }
}

struct ClassValueVisitor;

impl ClassValueVisitor {
    fn unsupported<T: fmt::Display>(kind: &str, value: T) -> ClassValue {
        tracing::debug!(kind, %value, "ignoring unsupported class value");
        ClassValue::Empty
    }
}

impl<'de> Visitor<'de> for ClassValueVisitor {
    type Value = ClassValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a class string, boolean, null, sequence or map")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<ClassValue, E> {
        Ok(ClassValue::Flag(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<ClassValue, E> {
        Ok(ClassValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<ClassValue, E> {
        Ok(ClassValue::Text(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<ClassValue, E> {
        Ok(Self::unsupported("integer", v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<ClassValue, E> {
        Ok(Self::unsupported("integer", v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<ClassValue, E> {
        Ok(Self::unsupported("float", v))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<ClassValue, E> {
        Ok(ClassValue::Empty)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<ClassValue, E> {
        Ok(ClassValue::Empty)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<ClassValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        ClassValue::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<ClassValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<ClassValue>()? {
            items.push(item);
        }
        Ok(ClassValue::List(items))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<ClassValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut dict = ClassDictionary::new();
        while let Some((key, value)) = map.next_entry::<String, ClassValue>()? {
            dict.insert(key, value);
        }
        Ok(ClassValue::Dictionary(dict))
    }
}

/// Insertion-ordered mapping from key to class value.
///
/// Depending on the dictionary mode a key is either a class name emitted when
/// its value is `true`, or just a label for its value.
#[derive(Clone, Default)]
pub struct ClassDictionary(IndexMap<String, ClassValue>);

impl ClassDictionary {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ClassValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an entry. Re-inserting a key replaces its value but keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ClassValue>) -> Option<ClassValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ClassValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, ClassValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ClassDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<ClassValue>> FromIterator<(K, V)> for ClassDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for ClassDictionary {
    type Item = (String, ClassValue);
    type IntoIter = indexmap::map::IntoIter<String, ClassValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ClassDictionary {
    type Item = (&'a String, &'a ClassValue);
    type IntoIter = indexmap::map::Iter<'a, String, ClassValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for ClassDictionary {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match ClassValue::deserialize(deserializer)? {
            ClassValue::Dictionary(dict) => Ok(dict),
            other => Err(de::Error::custom(format!("expected a class dictionary, found {:?}", other))),
        }
    }
}
