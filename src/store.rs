use std::fmt;

use indexmap::IndexMap;

/// Global variable scope of one evaluation, kept in first-assignment order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStore {
    values: IndexMap<String, i64>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    /// Inserts or overwrites. Overwriting keeps the original position.
    pub fn assign(&mut self, name: &str, value: i64) {
        match self.values.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(name.to_string(), value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl fmt::Display for VariableStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = VariableStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("x"), None);
        assert_eq!(store.to_string(), "{}");
    }

    #[test]
    fn test_overwrite_keeps_insertion_order() {
        let mut store = VariableStore::new();
        store.assign("y", 1);
        store.assign("x", 2);
        store.assign("y", 3);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("y"), Some(3));
        assert_eq!(store.to_string(), "{y: 3, x: 2}");
    }
}
