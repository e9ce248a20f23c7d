use crate::{acl_entry, banner, private_message, user};
use crate::banner::BannerPosition;
use crate::private_message::PrivateMessageStatus;
use anyhow::Result;
use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn test_user_create_and_validation() -> Result<()> {
    let db = setup_test_db().await?;

    let alice = user::create(&db, "alice", "alice@example.com").await?;
    let found = user::Entity::find()
        .filter(user::Column::Username.eq("alice"))
        .one(&db)
        .await?;
    assert_eq!(found.map(|u| u.id), Some(alice.id));

    assert!(user::create(&db, "  ", "x@example.com").await.is_err());
    assert!(user::create(&db, "bob", "not-an-email").await.is_err());
    // username is unique
    assert!(user::create(&db, "alice", "other@example.com").await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_banner_position_is_unique() -> Result<()> {
    let db = setup_test_db().await?;

    let first = banner::ActiveModel {
        id: Set(Uuid::new_v4()),
        position: Set(BannerPosition::Top),
        content: Set("<b>top</b>".into()),
        updated_at: Set(Utc::now().into()),
    };
    first.insert(&db).await?;

    let duplicate = banner::ActiveModel {
        id: Set(Uuid::new_v4()),
        position: Set(BannerPosition::Top),
        content: Set("<i>again</i>".into()),
        updated_at: Set(Utc::now().into()),
    };
    assert!(duplicate.insert(&db).await.is_err());

    let stored = banner::Entity::find()
        .filter(banner::Column::Position.eq(BannerPosition::Top))
        .all(&db)
        .await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].content, "<b>top</b>");
    Ok(())
}

#[tokio::test]
async fn test_private_message_status_round_trips() -> Result<()> {
    let db = setup_test_db().await?;
    let from = user::create(&db, "sender", "s@example.com").await?;
    let to = user::create(&db, "recipient", "r@example.com").await?;

    let pm = private_message::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set("hello".into()),
        body: Set("body".into()),
        user_from_id: Set(from.id),
        user_to_id: Set(to.id),
        status: Set(PrivateMessageStatus::Draft),
        created_at: Set(Utc::now().into()),
    }
    .insert(&db)
    .await?;

    let loaded = private_message::Entity::find_by_id(pm.id).one(&db).await?.unwrap();
    assert_eq!(loaded.status, PrivateMessageStatus::Draft);
    assert_eq!(loaded.user_to_id, to.id);
    Ok(())
}

#[tokio::test]
async fn test_acl_entry_unique_grant() -> Result<()> {
    let db = setup_test_db().await?;
    let object_id = Uuid::new_v4();
    let entry = || acl_entry::ActiveModel {
        id: Set(Uuid::new_v4()),
        object_type: Set("private_message".into()),
        object_id: Set(object_id),
        principal: Set("alice".into()),
        permission: Set(acl_entry::AclPermission::Read),
        created_at: Set(Utc::now().into()),
    };
    entry().insert(&db).await?;
    assert!(entry().insert(&db).await.is_err());
    Ok(())
}

#[test]
fn banner_position_parses_canonical_names() {
    assert_eq!("TOP".parse::<BannerPosition>().unwrap(), BannerPosition::Top);
    assert_eq!("bottom".parse::<BannerPosition>().unwrap(), BannerPosition::Bottom);
    assert!("SIDEBAR".parse::<BannerPosition>().is_err());
    assert_eq!(BannerPosition::Bottom.to_string(), "BOTTOM");
}
