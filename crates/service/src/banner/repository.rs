use async_trait::async_trait;

use super::domain::{Banner, BannerPosition};
use crate::errors::ServiceError;

#[async_trait]
pub trait BannerRepository: Send + Sync {
    /// Insert when the id is unknown, update otherwise.
    async fn save_or_update(&self, banner: &Banner) -> Result<(), ServiceError>;
    async fn get_by_position(&self, position: BannerPosition) -> Result<Option<Banner>, ServiceError>;
    async fn get_all(&self) -> Result<Vec<Banner>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockBannerRepository {
        banners: Mutex<Vec<Banner>>,
        saves: Mutex<Vec<Banner>>,
    }

    impl MockBannerRepository {
        /// Every banner passed to `save_or_update`, in call order.
        pub fn saved(&self) -> Vec<Banner> {
            self.saves.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BannerRepository for MockBannerRepository {
        async fn save_or_update(&self, banner: &Banner) -> Result<(), ServiceError> {
            self.saves.lock().unwrap().push(banner.clone());
            let mut banners = self.banners.lock().unwrap();
            match banners.iter_mut().find(|b| b.id == banner.id) {
                Some(existing) => *existing = banner.clone(),
                None => banners.push(banner.clone()),
            }
            Ok(())
        }

        async fn get_by_position(&self, position: BannerPosition) -> Result<Option<Banner>, ServiceError> {
            let banners = self.banners.lock().unwrap();
            Ok(banners.iter().find(|b| b.position == position).cloned())
        }

        async fn get_all(&self) -> Result<Vec<Banner>, ServiceError> {
            Ok(self.banners.lock().unwrap().clone())
        }
    }
}
