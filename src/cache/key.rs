//! Cache Key Helpers
//!
//! Builders for the conventional key shapes used by the catalog read path:
//! a route name followed by its query signature, or a single-resource key.
//! The cache itself only ever sees the resulting `String`.

use std::fmt::{self, Display};

/// Separator placed between key segments.
pub const SEGMENT_SEPARATOR: char = ':';

/// Separator placed between items of a list segment.
pub const LIST_SEPARATOR: char = ',';

const ESCAPE: char = '\\';

// == Cache Key ==
/// Incremental key builder.
///
/// ```
/// use catalog_cache::cache::CacheKey;
///
/// let key = CacheKey::new("components")
///     .segment(2)
///     .segment(20)
///     .optional(Some("model"))
///     .optional(None::<&str>)
///     .build();
/// assert_eq!(key, "components:2:20:model:");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    key: String,
}

impl CacheKey {
    /// Starts a key with its route (or namespace) segment.
    pub fn new(route: impl Display) -> Self {
        let mut key = String::new();
        push_escaped(&mut key, &route.to_string(), &[SEGMENT_SEPARATOR]);
        Self { key }
    }

    /// Key for a single resource, e.g. `component:<id>`.
    pub fn entity(kind: impl Display, id: impl Display) -> String {
        Self::new(kind).segment(id).build()
    }

    /// Appends one segment. Separators inside `value` are escaped, so a
    /// value can never spill into the next segment.
    pub fn segment(mut self, value: impl Display) -> Self {
        self.key.push(SEGMENT_SEPARATOR);
        push_escaped(&mut self.key, &value.to_string(), &[SEGMENT_SEPARATOR]);
        self
    }

    /// Appends an optional segment; `None` leaves the slot empty so the
    /// positions of later segments stay stable. `None` and `Some("")`
    /// render the same.
    pub fn optional<T: Display>(self, value: Option<T>) -> Self {
        match value {
            Some(value) => self.segment(value),
            None => self.segment(""),
        }
    }

    /// Appends a list segment joined with commas, e.g. a tag filter.
    /// Commas and colons inside items are escaped.
    pub fn list<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        self.key.push(SEGMENT_SEPARATOR);
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                self.key.push(LIST_SEPARATOR);
            }
            push_escaped(
                &mut self.key,
                &value.to_string(),
                &[SEGMENT_SEPARATOR, LIST_SEPARATOR],
            );
        }
        self
    }

    pub fn build(self) -> String {
        self.key
    }
}

/// Appends `raw`, prefixing the escape character and each of `reserved`
/// with a backslash.
fn push_escaped(out: &mut String, raw: &str, reserved: &[char]) {
    for c in raw.chars() {
        if c == ESCAPE || reserved.contains(&c) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.key
    }
}
