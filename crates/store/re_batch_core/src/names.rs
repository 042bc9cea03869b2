//! Interned names for archetypes, components and fields.
//!
//! Names are interned for the lifetime of the process: they are few, they are compared and
//! hashed constantly, and interning makes them `Copy`.

use std::sync::LazyLock;

use parking_lot::Mutex;

/// Seed used for every name hash. Changing it changes every [`crate::ComponentDescriptorHash`].
const NAME_HASH_SEED: u64 = 0x5eed_ba7c_0000_0001;

#[inline]
pub(crate) fn hash_str(s: &str) -> u64 {
    xxhash_rust::xxh64::xxh64(s.as_bytes(), NAME_HASH_SEED)
}

static STRING_INTERNER: LazyLock<Mutex<ahash::HashMap<&'static str, u64>>> =
    LazyLock::new(Default::default);

/// A string that is stored for the rest of the program, together with its precomputed hash.
///
/// Two [`InternedString`]s with the same content always point at the same memory.
#[derive(Clone, Copy)]
pub struct InternedString {
    hash: u64,
    string: &'static str,
}

impl InternedString {
    pub fn new(string: &str) -> Self {
        let mut interner = STRING_INTERNER.lock();
        if let Some((&string, &hash)) = interner.get_key_value(string) {
            return Self { hash, string };
        }

        let hash = hash_str(string);
        let string: &'static str = Box::leak(string.to_owned().into_boxed_str());
        interner.insert(string, hash);
        Self { hash, string }
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.string
    }

    /// Stable across runs and platforms.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }
}

impl PartialEq for InternedString {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.string, other.string)
    }
}

impl Eq for InternedString {}

impl PartialOrd for InternedString {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InternedString {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.string.cmp(other.string)
    }
}

impl std::hash::Hash for InternedString {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl std::fmt::Debug for InternedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self.string, f)
    }
}

impl std::fmt::Display for InternedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.string)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for InternedString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.string)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for InternedString {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let string = String::deserialize(deserializer)?;
        Ok(Self::new(&string))
    }
}

/// Declare a `Copy` newtype over [`InternedString`].
#[macro_export]
macro_rules! declare_interned_name {
    (
        $(#[$meta:meta])*
        $vis:vis struct $StructName:ident;
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(::serde::Deserialize, ::serde::Serialize))]
        $vis struct $StructName($crate::InternedString);

        impl $StructName {
            #[inline]
            pub fn new(string: &str) -> Self {
                Self($crate::InternedString::new(string))
            }

            #[inline]
            pub fn as_str(&self) -> &'static str {
                self.0.as_str()
            }

            /// Stable across runs and platforms.
            #[inline]
            pub fn hash(&self) -> u64 {
                self.0.hash()
            }
        }

        impl From<&str> for $StructName {
            #[inline]
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $StructName {
            #[inline]
            fn from(s: String) -> Self {
                Self::new(&s)
            }
        }

        impl AsRef<str> for $StructName {
            #[inline]
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl std::ops::Deref for $StructName {
            type Target = str;

            #[inline]
            fn deref(&self) -> &str {
                self.as_str()
            }
        }

        impl std::fmt::Debug for $StructName {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Debug::fmt(&self.0, f)
            }
        }

        impl std::fmt::Display for $StructName {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl $crate::external::nohash_hasher::IsEnabled for $StructName {}
    };
}

/// Strip the well-known namespace prefixes from a fully-qualified name.
///
/// `rerun.components.Position2D` becomes `Position2D`.
pub(crate) fn short_name(full_name: &str) -> &str {
    const PREFIXES: [&str; 4] = [
        "rerun.archetypes.",
        "rerun.components.",
        "rerun.datatypes.",
        "rerun.",
    ];

    PREFIXES
        .iter()
        .find_map(|prefix| full_name.strip_prefix(prefix))
        .unwrap_or(full_name)
}
