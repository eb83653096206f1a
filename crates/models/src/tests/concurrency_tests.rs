use crate::tests::setup_test_db;
use crate::{auth_identity, user};
use crate::auth_identity::ProviderName;
use crate::errors::ModelError;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Barrier;
use uuid::Uuid;

/// Two concurrent creates for the same provider identity: exactly one wins,
/// the other hits the unique index.
#[tokio::test]
async fn test_concurrent_identical_creates_single_winner() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let a = user::create(&db, &format!("race_a_{}@example.com", Uuid::new_v4()), "Race A").await?;
    let b = user::create(&db, &format!("race_b_{}@example.com", Uuid::new_v4()), "Race B").await?;
    let identifier = format!("race-{}", Uuid::new_v4());

    let barrier = Arc::new(Barrier::new(2));
    let mut handles = vec![];
    for owner_id in [a.id, b.id] {
        let db = db.clone();
        let barrier = barrier.clone();
        let identifier = identifier.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            auth_identity::create(&db, owner_id, ProviderName::Google, &identifier).await
        }));
    }

    let mut wins = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await? {
            Ok(_) => wins += 1,
            Err(ModelError::Conflict(_)) => conflicts += 1,
            Err(e) => return Err(e.into()),
        }
    }
    assert_eq!(wins, 1);
    assert_eq!(conflicts, 1);

    user::delete(&db, a.id).await?;
    user::delete(&db, b.id).await?;
    Ok(())
}
