use uuid::Uuid;

pub use models::acl_entry::AclPermission as Permission;

/// ACL key of a securable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectIdentity {
    pub object_type: &'static str,
    pub object_id: Uuid,
}

impl ObjectIdentity {
    pub fn new(object_type: &'static str, object_id: Uuid) -> Self { Self { object_type, object_id } }
}

impl std::fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.object_type, self.object_id)
    }
}

/// Entities that can carry ACL entries.
pub trait Securable {
    fn object_identity(&self) -> ObjectIdentity;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AclEntry {
    pub object: ObjectIdentity,
    pub principal: String,
    pub permission: Permission,
}
