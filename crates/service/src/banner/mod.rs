//! Position-keyed HTML banners.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::{Banner, BannerPosition};
pub use service::BannerService;
