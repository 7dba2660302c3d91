//! Role (field) identifiers shared by all list models.

use std::collections::BTreeMap;
use std::fmt::Debug;

/// A named, indexable attribute exposed per row.
///
/// Role ids are what the UI passes back when it reads a field, so they must
/// stay stable across releases.
pub trait Role: Copy + Eq + Debug + 'static {
    /// Every role of the model, in id order.
    const ALL: &'static [Self];

    fn id(self) -> i32;

    fn name(self) -> &'static str;

    fn from_id(id: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|role| role.id() == id)
    }
}

/// Builds the role id -> role name table for `R`.
pub fn role_names<R: Role>() -> BTreeMap<i32, &'static str> {
    R::ALL.iter().map(|role| (role.id(), role.name())).collect()
}

#[cfg(test)]
mod tests {
    use super::{role_names, Role};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Sample {
        First,
        Second,
    }

    impl Role for Sample {
        const ALL: &'static [Self] = &[Self::First, Self::Second];

        fn id(self) -> i32 {
            self as i32
        }

        fn name(self) -> &'static str {
            match self {
                Self::First => "First",
                Self::Second => "Second",
            }
        }
    }

    #[test]
    fn resolves_ids_and_names() {
        assert_eq!(Sample::from_id(1), Some(Sample::Second));
        assert_eq!(Sample::from_id(2), None);
        assert_eq!(Sample::from_id(-1), None);

        let names = role_names::<Sample>();
        assert_eq!(names.len(), 2);
        assert_eq!(names.get(&0), Some(&"First"));
        assert_eq!(names.get(&1), Some(&"Second"));
    }
}
