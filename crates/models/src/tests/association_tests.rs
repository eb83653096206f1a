use crate::tests::setup_test_db;
use crate::{auth_identity, user};
use crate::auth_identity::ProviderName;
use sea_orm::{EntityTrait, ModelTrait};
use anyhow::Result;
use uuid::Uuid;

/// Both directions of the association resolve without a hand-written join.
#[tokio::test]
async fn test_forward_and_inverse_traversal() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let owner = user::create(&db, &format!("assoc_{}@example.com", Uuid::new_v4()), "Assoc User").await?;
    let onsite = auth_identity::create(&db, owner.id, ProviderName::Onsite, &format!("u-{}", Uuid::new_v4())).await?;
    let google = auth_identity::create(&db, owner.id, ProviderName::Google, &format!("g-{}", Uuid::new_v4())).await?;

    // Forward: user -> identities
    let related = owner.find_related(auth_identity::Entity).all(&db).await?;
    assert_eq!(related.len(), 2);
    let via_helper = user::identities(&db, &owner).await?;
    assert_eq!(via_helper.len(), 2);

    // Inverse: identity -> owning user
    let resolved = google.find_related(user::Entity).one(&db).await?;
    assert_eq!(resolved.as_ref().map(|u| u.id), Some(owner.id));
    let via_owner_helper = auth_identity::find_owner(&db, &onsite).await?;
    assert_eq!(via_owner_helper.map(|u| u.id), Some(owner.id));

    // Cleanup
    user::delete(&db, owner.id).await?;
    Ok(())
}

/// Deleting a user removes its identity bindings via the FK cascade.
#[tokio::test]
async fn test_user_delete_cascades_to_identities() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let owner = user::create(&db, &format!("cascade_{}@example.com", Uuid::new_v4()), "Cascade User").await?;
    let binding = auth_identity::create(&db, owner.id, ProviderName::Twitter, &format!("t-{}", Uuid::new_v4())).await?;

    user::delete(&db, owner.id).await?;

    let gone = auth_identity::Entity::find_by_id(binding.id).one(&db).await?;
    assert!(gone.is_none());
    assert!(auth_identity::find_by_user(&db, owner.id).await?.is_empty());
    Ok(())
}
