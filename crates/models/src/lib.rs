pub mod errors;
pub mod db;
pub mod user;
pub mod banner;
pub mod private_message;
pub mod acl_entry;

#[cfg(test)]
mod tests;
