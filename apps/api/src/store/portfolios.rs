use std::collections::HashMap;

use async_trait::async_trait;
use tracing::warn;

use crate::models::Portfolio;
use crate::store::{PortfolioStore, StoreError};

/// Read-only portfolio set loaded once at startup.
#[derive(Debug, Default)]
pub struct InMemoryPortfolioStore {
    portfolios: HashMap<String, Portfolio>,
    /// Ids in load order, so `list` is stable.
    order: Vec<String>,
}

impl InMemoryPortfolioStore {
    pub fn new(portfolios: Vec<Portfolio>) -> Self {
        let mut store = Self::default();
        for portfolio in portfolios {
            if store.portfolios.contains_key(&portfolio.id) {
                warn!(portfolio_id = %portfolio.id, "Duplicate portfolio id, keeping the last entry");
            } else {
                store.order.push(portfolio.id.clone());
            }
            store.portfolios.insert(portfolio.id.clone(), portfolio);
        }
        store
    }

    /// Parses a JSON array of portfolios.
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        let portfolios: Vec<Portfolio> =
            serde_json::from_str(raw).map_err(|e| StoreError::InvalidData(e.to_string()))?;
        Ok(Self::new(portfolios))
    }
}

#[async_trait]
impl PortfolioStore for InMemoryPortfolioStore {
    async fn get(&self, id: &str) -> Result<Option<Portfolio>, StoreError> {
        Ok(self.portfolios.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Portfolio>, StoreError> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.portfolios.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_json_loads_and_finds_by_id() {
        let store = InMemoryPortfolioStore::from_json(
            r#"[{"id":"a","title":"A"},{"id":"b","title":"B"}]"#,
        )
        .unwrap();
        assert_eq!(store.list().await.unwrap().len(), 2);
        assert_eq!(store.get("b").await.unwrap().unwrap().title, "B");
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_ids_keep_last_in_first_position() {
        let store = InMemoryPortfolioStore::from_json(
            r#"[{"id":"a","title":"old"},{"id":"b"},{"id":"a","title":"new"}]"#,
        )
        .unwrap();
        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, "a");
        assert_eq!(listed[0].title, "new");
    }

    #[test]
    fn test_invalid_json_is_invalid_data() {
        let err = InMemoryPortfolioStore::from_json("{not json").unwrap_err();
        assert!(matches!(err, StoreError::InvalidData(_)));
        assert!(InMemoryPortfolioStore::from_json(r#"{"id":"a"}"#).is_err());
    }
}
