use serde::{Deserialize, Serialize};

use super::errors::ApprovalError;
use super::types::Permission;

/// Step-indexed permissions owned by a single actor.
///
/// Immutable once built; every actor carries its own copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionTable {
    steps: Vec<Permission>,
}

impl PermissionTable {
    pub fn new(steps: Vec<Permission>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Lenient lookup: steps past the end of the table carry no permission.
    pub fn get(&self, step: usize) -> Permission {
        self.steps.get(step).copied().unwrap_or_default()
    }

    /// Strict lookup: steps past the end of the table are a configuration error.
    pub fn permission_at(&self, step: usize) -> Result<Permission, ApprovalError> {
        self.steps
            .get(step)
            .copied()
            .ok_or(ApprovalError::StepOutOfRange {
                step,
                steps: self.steps.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.steps.iter().copied()
    }
}

impl From<Vec<Permission>> for PermissionTable {
    fn from(steps: Vec<Permission>) -> Self {
        Self::new(steps)
    }
}

impl FromIterator<Permission> for PermissionTable {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approval::types::Permission::*;

    #[test]
    fn test_lenient_and_strict_lookup() {
        let table = PermissionTable::from(vec![None, Vote]);

        assert_eq!(table.get(1), Vote);
        assert_eq!(table.get(5), None);
        assert_eq!(table.permission_at(0).unwrap(), None);
        assert_eq!(
            table.permission_at(2),
            Err(ApprovalError::StepOutOfRange { step: 2, steps: 2 })
        );
    }

    #[test]
    fn test_empty_table() {
        let table = PermissionTable::default();
        assert!(table.is_empty());
        assert_eq!(table.get(0), None);
        assert!(table.permission_at(0).is_err());
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let table: PermissionTable = [Vote, None, Force].into_iter().collect();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"["vote","none","force"]"#);

        let back: PermissionTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
