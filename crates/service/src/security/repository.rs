use async_trait::async_trait;

use super::domain::{AclEntry, ObjectIdentity, Permission};
use crate::errors::ServiceError;

/// Repository abstraction for ACL storage.
#[async_trait]
pub trait AclRepository: Send + Sync {
    /// Store the grant; granting an existing entry again is a no-op.
    async fn grant(&self, entry: &AclEntry) -> Result<(), ServiceError>;
    async fn has_any(&self, object: &ObjectIdentity, principal: &str, permissions: &[Permission]) -> Result<bool, ServiceError>;
    /// Remove every entry on the object; returns how many were removed.
    async fn delete_for_object(&self, object: &ObjectIdentity) -> Result<u64, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAclRepository {
        entries: Mutex<Vec<AclEntry>>,
    }

    impl MockAclRepository {
        pub fn entries_for(&self, object: &ObjectIdentity) -> Vec<AclEntry> {
            let entries = self.entries.lock().unwrap();
            entries.iter().filter(|e| &e.object == object).cloned().collect()
        }
    }

    #[async_trait]
    impl AclRepository for MockAclRepository {
        async fn grant(&self, entry: &AclEntry) -> Result<(), ServiceError> {
            let mut entries = self.entries.lock().unwrap();
            if !entries.contains(entry) {
                entries.push(entry.clone());
            }
            Ok(())
        }

        async fn has_any(&self, object: &ObjectIdentity, principal: &str, permissions: &[Permission]) -> Result<bool, ServiceError> {
            let entries = self.entries.lock().unwrap();
            Ok(entries.iter().any(|e| &e.object == object && e.principal == principal && permissions.contains(&e.permission)))
        }

        async fn delete_for_object(&self, object: &ObjectIdentity) -> Result<u64, ServiceError> {
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|e| &e.object != object);
            Ok((before - entries.len()) as u64)
        }
    }
}
