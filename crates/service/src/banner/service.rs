use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{Banner, BannerPosition};
use super::repository::BannerRepository;
use crate::errors::ServiceError;

pub struct BannerService<R: BannerRepository> {
    repo: Arc<R>,
}

impl<R: BannerRepository> BannerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Store `content` at `position`, overwriting whatever banner is there.
    ///
    /// # Examples
    /// ```
    /// use service::banner::{BannerService, BannerPosition, repository::{BannerRepository, mock::MockBannerRepository}};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockBannerRepository::default());
    /// let svc = BannerService::new(repo.clone());
    /// tokio_test::block_on(svc.upload_banner("<b>v1</b>", BannerPosition::Top)).unwrap();
    /// tokio_test::block_on(svc.upload_banner("<b>v2</b>", BannerPosition::Top)).unwrap();
    /// let all = tokio_test::block_on(repo.get_all()).unwrap();
    /// assert_eq!(all.len(), 1);
    /// assert_eq!(all[0].content, "<b>v2</b>");
    /// ```
    #[instrument(skip(self, content), fields(position = %position))]
    pub async fn upload_banner(&self, content: &str, position: BannerPosition) -> Result<(), ServiceError> {
        match self.repo.get_by_position(position).await? {
            Some(mut existing) => {
                existing.content = content.to_string();
                self.repo.save_or_update(&existing).await?;
                info!(banner_id = %existing.id, "banner_updated");
            }
            None => {
                let banner = Banner::new(position, content);
                self.repo.save_or_update(&banner).await?;
                info!(banner_id = %banner.id, "banner_created");
            }
        }
        Ok(())
    }

    /// All banners keyed by the canonical position name (`"TOP"`, `"BOTTOM"`).
    pub async fn get_all_banners(&self) -> Result<HashMap<String, Banner>, ServiceError> {
        let banners = self.repo.get_all().await?;
        Ok(banners.into_iter().map(|b| (b.position.to_string(), b)).collect())
    }
}
