//! Private messaging between users: sending, drafts, folders and the
//! unread-count badge.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::{PrivateMessage, PrivateMessageStatus};
pub use service::PrivateMessageService;
