use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the GDP table comes from. Read once per load.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn read_all(&self) -> Result<Vec<u8>>;

    /// Human readable location, used in logs.
    fn describe(&self) -> String;
}
