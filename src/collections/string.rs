//! UTF-8 string drawing storage from an allocator.

use core::fmt;
use core::ops::Deref;
use core::str::Utf8Error;

use crate::allocator::Allocator;
use crate::collections::{vector_in, Vector};

/// UTF-8 string over an allocator-backed byte vector.
pub struct String<'a> {
    vec: Vector<'a, u8>,
}

impl<'a> String<'a> {
    /// Creates an empty string drawing storage from `alloc`.
    pub fn new_in(alloc: &'a dyn Allocator) -> Self {
        Self {
            vec: vector_in(alloc),
        }
    }

    /// Creates a string holding a copy of `source`; accepts `&str`, string
    /// literals, and owned host strings alike.
    pub fn from_str_in(alloc: &'a dyn Allocator, source: impl AsRef<str>) -> Self {
        let mut string = Self::new_in(alloc);
        string.push_str(source.as_ref());
        string
    }

    /// Creates a string from raw bytes, validating them as UTF-8.
    pub fn from_utf8_in(alloc: &'a dyn Allocator, bytes: &[u8]) -> Result<Self, Utf8Error> {
        let source = core::str::from_utf8(bytes)?;
        Ok(Self::from_str_in(alloc, source))
    }

    /// String contents.
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: the vector only ever holds bytes pushed from &str values.
        unsafe { core::str::from_utf8_unchecked(&self.vec) }
    }

    /// Appends `suffix`.
    pub fn push_str(&mut self, suffix: &str) {
        self.vec.extend_from_slice(suffix.as_bytes());
    }

    /// Appends one character.
    pub fn push(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.push_str(ch.encode_utf8(&mut buf));
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.vec.len()
    }

    /// Whether the string is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
}

impl Deref for String<'_> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for String<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for String<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl PartialEq<str> for String<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for String<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq for String<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for String<'_> {}
