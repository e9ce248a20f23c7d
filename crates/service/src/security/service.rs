use std::sync::Arc;

use tracing::{debug, warn};

use super::domain::{AclEntry, ObjectIdentity, Permission, Securable};
use super::repository::AclRepository;
use crate::errors::ServiceError;
use crate::identity::Identity;
use crate::user::domain::UserRef;

/// Grants permissions and answers guard checks over an [`AclRepository`].
pub struct SecurityService<A: AclRepository> {
    acl: Arc<A>,
}

impl<A: AclRepository> SecurityService<A> {
    pub fn new(acl: Arc<A>) -> Self { Self { acl } }

    /// Fails with `Forbidden` for anonymous callers.
    pub fn require_authenticated<'a>(&self, identity: &'a Identity) -> Result<&'a UserRef, ServiceError> {
        identity.user().ok_or_else(|| ServiceError::forbidden("authentication required"))
    }

    /// Fails with `Forbidden` unless the caller holds one of `permissions` on `object`.
    pub async fn require_any(&self, identity: &Identity, object: &ObjectIdentity, permissions: &[Permission]) -> Result<(), ServiceError> {
        let user = self.require_authenticated(identity)?;
        if self.acl.has_any(object, &user.username, permissions).await? {
            return Ok(());
        }
        warn!(username = %user.username, %object, ?permissions, "permission_denied");
        Err(ServiceError::forbidden(format!("no {:?} permission on {}", permissions, object)))
    }

    pub async fn grant_read_permission_to_current_user<E: Securable + ?Sized>(&self, identity: &Identity, entity: &E) -> Result<(), ServiceError> {
        let user = self.require_authenticated(identity)?;
        self.grant(entity.object_identity(), &user.username, Permission::Read).await
    }

    pub async fn grant_read_permission_to_user<E: Securable + ?Sized>(&self, entity: &E, username: &str) -> Result<(), ServiceError> {
        self.grant(entity.object_identity(), username, Permission::Read).await
    }

    pub async fn grant_admin_permission_to_current_user<E: Securable + ?Sized>(&self, identity: &Identity, entity: &E) -> Result<(), ServiceError> {
        let user = self.require_authenticated(identity)?;
        self.grant(entity.object_identity(), &user.username, Permission::Admin).await
    }

    pub async fn delete_from_acl<E: Securable + ?Sized>(&self, entity: &E) -> Result<(), ServiceError> {
        let object = entity.object_identity();
        let removed = self.acl.delete_for_object(&object).await?;
        debug!(%object, removed, "acl_cleared");
        Ok(())
    }

    async fn grant(&self, object: ObjectIdentity, username: &str, permission: Permission) -> Result<(), ServiceError> {
        self.acl.grant(&AclEntry { object, principal: username.to_string(), permission }).await?;
        debug!(%object, principal = %username, ?permission, "acl_granted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::repository::mock::MockAclRepository;
    use uuid::Uuid;

    struct Doc(Uuid);

    impl Securable for Doc {
        fn object_identity(&self) -> ObjectIdentity { ObjectIdentity::new("doc", self.0) }
    }

    fn alice() -> Identity {
        Identity::authenticated(UserRef { id: Uuid::new_v4(), username: "alice".into() })
    }

    #[tokio::test]
    async fn anonymous_cannot_be_granted_or_pass_guards() {
        let svc = SecurityService::new(Arc::new(MockAclRepository::default()));
        let doc = Doc(Uuid::new_v4());
        let anon = Identity::anonymous();

        assert!(matches!(svc.grant_read_permission_to_current_user(&anon, &doc).await, Err(ServiceError::Forbidden(_))));
        assert!(matches!(svc.require_any(&anon, &doc.object_identity(), &[Permission::Read]).await, Err(ServiceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn guard_accepts_any_listed_permission() {
        let svc = SecurityService::new(Arc::new(MockAclRepository::default()));
        let doc = Doc(Uuid::new_v4());
        let id = alice();

        svc.grant_admin_permission_to_current_user(&id, &doc).await.unwrap();
        svc.require_any(&id, &doc.object_identity(), &[Permission::Admin, Permission::Read]).await.unwrap();
        assert!(svc.require_any(&id, &doc.object_identity(), &[Permission::Read]).await.is_err());
    }

    #[tokio::test]
    async fn delete_from_acl_revokes_everyone() {
        let acl = Arc::new(MockAclRepository::default());
        let svc = SecurityService::new(acl.clone());
        let doc = Doc(Uuid::new_v4());
        let id = alice();

        svc.grant_read_permission_to_current_user(&id, &doc).await.unwrap();
        svc.grant_read_permission_to_user(&doc, "bob").await.unwrap();
        assert_eq!(acl.entries_for(&doc.object_identity()).len(), 2);

        svc.delete_from_acl(&doc).await.unwrap();
        assert!(acl.entries_for(&doc.object_identity()).is_empty());
    }
}
