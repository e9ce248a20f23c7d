//! Per-object access control: grants of read/admin permission to usernames
//! and the explicit guards the services call before acting.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::{AclEntry, ObjectIdentity, Permission, Securable};
pub use service::SecurityService;
