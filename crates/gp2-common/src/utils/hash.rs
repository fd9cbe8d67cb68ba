//! Fast-hashing map/set aliases, used for the small label/mark interning
//! tables that remain once the label-class index moves to fixed-size
//! arrays.

use std::collections::{HashMap, HashSet};

use ahash::RandomState;

/// A `HashMap` using `ahash` instead of the (DoS-resistant but slower)
/// default hasher. Appropriate here because keys are never attacker-chosen
/// in an embedded, single-threaded graph core.
pub type FxHashMap<K, V> = HashMap<K, V, RandomState>;

/// A `HashSet` using `ahash`.
pub type FxHashSet<T> = HashSet<T, RandomState>;
