mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

use super::Db;
use crate::repo::RepoResult;

impl Db {
    /// Run embedded SQL migrations (idempotent).
    pub async fn init(&self) -> RepoResult<()> {
        let mut client = self.pool.get().await?;
        embedded::migrations::runner().run_async(&mut **client).await?;

        Ok(())
    }
}
