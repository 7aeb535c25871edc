//! Case-insensitive duplicate detection for category names.
//!
//! The check is advisory. Two requests may both pass it; the category store's unique-name
//! constraint then rejects the second write, and the executor reports the same conflict.

use crate::category_actor::CategoryError;
use crate::clients::CategoryClient;
use crate::model::CategoryId;
use store_actor::StoreClient;
use tracing::{debug, instrument};

/// An existing category already uses the submitted name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// The submitted name, not the stored one.
    pub name: String,
}

/// Looks for another category named `name`, ignoring case. On update pass the category's own id
/// as `exclude` so keeping the current name is not a conflict.
#[instrument(skip(categories))]
pub async fn check_duplicate(
    categories: &CategoryClient,
    name: &str,
    exclude: Option<CategoryId>,
) -> Result<Option<Conflict>, CategoryError> {
    let existing = categories.find_by_name(name, exclude).await?;
    if let Some(existing) = &existing {
        debug!(existing_id = %existing.id, existing_name = %existing.name, "Duplicate name");
    }
    Ok(existing.map(|_| Conflict {
        name: name.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use store_actor::mock::MockStore;
    use store_actor::StoreError;

    #[tokio::test]
    async fn test_conflict_carries_submitted_name() {
        let mut mock = MockStore::<Category>::new();
        mock.expect_find_by_name()
            .return_ok(Some(Category::new(CategoryId::generate(), "Drinks")));
        let client = CategoryClient::new(mock.client());

        let conflict = check_duplicate(&client, "drinks", None).await.unwrap();
        assert_eq!(
            conflict,
            Some(Conflict {
                name: "drinks".to_string()
            })
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_no_match_is_no_conflict() {
        let mut mock = MockStore::<Category>::new();
        mock.expect_find_by_name().return_ok(None);
        let client = CategoryClient::new(mock.client());

        let own_id = CategoryId::generate();
        assert_eq!(check_duplicate(&client, "Snacks", Some(own_id)).await, Ok(None));
    }

    #[tokio::test]
    async fn test_store_failure_is_an_error() {
        let mut mock = MockStore::<Category>::new();
        mock.expect_find_by_name().return_err(StoreError::Dropped);
        let client = CategoryClient::new(mock.client());

        assert!(matches!(
            check_duplicate(&client, "Snacks", None).await,
            Err(CategoryError::Store(_))
        ));
    }
}
