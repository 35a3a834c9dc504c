use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyIndexMap = HashMap<DataKey, usize>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyIndexMap = BTreeMap<DataKey, usize>;

/// Identity of an item, used to keep mounted items and measured sizes attached to the right
/// record across reorders.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataKey {
    Int(i64),
    Str(Arc<str>),
    Bool(bool),
    /// Positional fallback for items with no extractable key.
    Index(usize),
}

impl fmt::Display for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Index(i) => write!(f, "#{i}"),
        }
    }
}

impl From<i64> for DataKey {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for DataKey {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<u32> for DataKey {
    fn from(v: u32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<bool> for DataKey {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for DataKey {
    fn from(v: &str) -> Self {
        Self::Str(Arc::from(v))
    }
}

impl From<String> for DataKey {
    fn from(v: String) -> Self {
        Self::Str(Arc::from(v))
    }
}

/// Key extraction hooks for list records.
///
/// Records implement `field_key` to expose named key fields (selected with
/// [`KeySelector::Field`]). Primitive values implement `primitive_key` and act as their own key.
/// Both default to `None`, in which case the record is keyed by its position.
pub trait DataItem {
    fn field_key(&self, field: &str) -> Option<DataKey> {
        let _ = field;
        None
    }

    fn primitive_key(&self) -> Option<DataKey> {
        None
    }
}

macro_rules! primitive_int_item {
    ($($t:ty),*) => {
        $(
            impl DataItem for $t {
                fn primitive_key(&self) -> Option<DataKey> {
                    i64::try_from(*self).ok().map(DataKey::Int)
                }
            }
        )*
    };
}

primitive_int_item!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl DataItem for bool {
    fn primitive_key(&self) -> Option<DataKey> {
        Some(DataKey::Bool(*self))
    }
}

impl DataItem for char {
    fn primitive_key(&self) -> Option<DataKey> {
        let mut buf = [0u8; 4];
        Some(DataKey::from(&*self.encode_utf8(&mut buf)))
    }
}

impl DataItem for String {
    fn primitive_key(&self) -> Option<DataKey> {
        Some(DataKey::from(self.as_str()))
    }
}

impl DataItem for &str {
    fn primitive_key(&self) -> Option<DataKey> {
        Some(DataKey::from(*self))
    }
}

impl DataItem for Arc<str> {
    fn primitive_key(&self) -> Option<DataKey> {
        Some(DataKey::Str(Arc::clone(self)))
    }
}

impl DataItem for DataKey {
    fn primitive_key(&self) -> Option<DataKey> {
        Some(self.clone())
    }
}

/// How a key is derived from a record.
pub enum KeySelector<T> {
    /// Look up a named field through [`DataItem::field_key`].
    Field(Arc<str>),
    /// Compute the key with a closure.
    Map(Arc<dyn Fn(&T) -> Option<DataKey> + Send + Sync>),
}

impl<T> KeySelector<T> {
    pub fn field(name: &str) -> Self {
        Self::Field(Arc::from(name))
    }

    pub fn map(f: impl Fn(&T) -> Option<DataKey> + Send + Sync + 'static) -> Self {
        Self::Map(Arc::new(f))
    }

    pub(crate) fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Field(a), Self::Field(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T: DataItem> KeySelector<T> {
    fn select(&self, item: &T) -> Option<DataKey> {
        match self {
            Self::Field(name) => item.field_key(name),
            Self::Map(f) => f(item),
        }
    }
}

impl<T> Clone for KeySelector<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Field(name) => Self::Field(Arc::clone(name)),
            Self::Map(f) => Self::Map(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for KeySelector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Map(_) => f.write_str("Map(..)"),
        }
    }
}

/// Derives the key of the record at `index`.
///
/// Order: the configured selector, then the record itself when it is a primitive, then the
/// position.
pub fn data_key_of<T: DataItem>(
    item: &T,
    selector: Option<&KeySelector<T>>,
    index: usize,
) -> DataKey {
    selector
        .and_then(|s| s.select(item))
        .or_else(|| item.primitive_key())
        .unwrap_or(DataKey::Index(index))
}

/// Derives the key of every record, in order. The result always has `data.len()` entries.
pub fn rebuild_unique_keys<T: DataItem>(
    data: &[T],
    selector: Option<&KeySelector<T>>,
) -> Vec<DataKey> {
    data.iter()
        .enumerate()
        .map(|(i, item)| data_key_of(item, selector, i))
        .collect()
}

/// The key sequence parallel to the data source, with a lookup for the first index of a key.
#[derive(Clone, Debug, Default)]
pub struct UniqueKeys {
    keys: Vec<DataKey>,
    first_index: KeyIndexMap,
}

impl UniqueKeys {
    pub fn rebuild<T: DataItem>(data: &[T], selector: Option<&KeySelector<T>>) -> Self {
        Self::from_keys(rebuild_unique_keys(data, selector))
    }

    pub fn from_keys(keys: Vec<DataKey>) -> Self {
        let mut first_index = KeyIndexMap::new();
        for (i, key) in keys.iter().enumerate() {
            // Duplicates resolve to their first position.
            first_index.entry(key.clone()).or_insert(i);
        }
        Self { keys, first_index }
    }

    pub fn as_slice(&self) -> &[DataKey] {
        &self.keys
    }

    pub fn to_vec(&self) -> Vec<DataKey> {
        self.keys.clone()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DataKey> {
        self.keys.get(index)
    }

    pub fn index_of(&self, key: &DataKey) -> Option<usize> {
        self.first_index.get(key).copied()
    }
}
