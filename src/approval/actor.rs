use std::sync::Arc;

use super::errors::ApprovalError;
use super::permissions::PermissionTable;
use super::traits::{Actor, ActorRef};
use super::types::Permission;

/// The concrete actor: a permission table and an active flag.
///
/// `name` is for logs and scenario files only. Two users with the same name and
/// permissions are still different voters.
#[derive(Debug, Clone)]
pub struct User {
    name: String,
    permissions: PermissionTable,
    active: bool,
}

impl User {
    pub fn new(name: impl Into<String>, permissions: impl Into<PermissionTable>) -> Self {
        Self {
            name: name.into(),
            permissions: permissions.into(),
            active: true,
        }
    }

    pub fn inactive(name: impl Into<String>, permissions: impl Into<PermissionTable>) -> Self {
        Self::new(name, permissions).with_active(false)
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn into_ref(self) -> ActorRef {
        Arc::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn permissions(&self) -> &PermissionTable {
        &self.permissions
    }
}

impl Actor for User {
    fn can_vote_on_step(&self, step: usize) -> Result<bool, ApprovalError> {
        Ok(self.permissions.permission_at(step)? == Permission::Vote)
    }

    fn can_force_step(&self, step: usize) -> Result<bool, ApprovalError> {
        Ok(self.permissions.permission_at(step)? == Permission::Force)
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
