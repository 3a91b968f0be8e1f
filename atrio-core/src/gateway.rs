use crate::error::GatewayResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Query parameters accepted by every list endpoint.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl ListParams {
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_month(mut self, year: i32, month: u32) -> Self {
        self.year = Some(year);
        self.month = Some(month);
        self
    }

    /// Key/value pairs for the query string, skipping unset fields.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(month) = self.month {
            pairs.push(("month", month.to_string()));
        }
        if let Some(year) = self.year {
            pairs.push(("year", year.to_string()));
        }
        pairs
    }
}

/// Stateless request/response boundary to the back-office service.
///
/// One implementation per entity (`T` with create payload `C` and update
/// payload `U`). Controllers only ever talk to this trait, so tests can
/// substitute an in-memory fake.
#[async_trait]
pub trait ResourceGateway<T, C, U>: Send + Sync {
    async fn list(&self, params: &ListParams) -> GatewayResult<Vec<T>>;

    async fn get(&self, id: Uuid) -> GatewayResult<T>;

    async fn create(&self, payload: &C) -> GatewayResult<T>;

    async fn update(&self, id: Uuid, payload: &U) -> GatewayResult<T>;

    async fn remove(&self, id: Uuid) -> GatewayResult<()>;

    async fn set_status(&self, id: Uuid, status: &str) -> GatewayResult<T>;
}

// Pages can share one client behind an Arc
#[async_trait]
impl<T, C, U, G> ResourceGateway<T, C, U> for std::sync::Arc<G>
where
    G: ResourceGateway<T, C, U> + ?Sized,
    T: Send + Sync,
    C: Send + Sync,
    U: Send + Sync,
{
    async fn list(&self, params: &ListParams) -> GatewayResult<Vec<T>> {
        (**self).list(params).await
    }

    async fn get(&self, id: Uuid) -> GatewayResult<T> {
        (**self).get(id).await
    }

    async fn create(&self, payload: &C) -> GatewayResult<T> {
        (**self).create(payload).await
    }

    async fn update(&self, id: Uuid, payload: &U) -> GatewayResult<T> {
        (**self).update(id, payload).await
    }

    async fn remove(&self, id: Uuid) -> GatewayResult<()> {
        (**self).remove(id).await
    }

    async fn set_status(&self, id: Uuid, status: &str) -> GatewayResult<T> {
        (**self).set_status(id, status).await
    }
}
