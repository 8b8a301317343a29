use crate::repo::RepoResult;
use deadpool_postgres::Pool;

#[derive(Clone, Debug)]
pub struct Db {
    pub(crate) pool: Pool,
}

impl Db {
    pub async fn get_client(&self) -> RepoResult<deadpool_postgres::Client> {
        Ok(self.pool.get().await?)
    }
}

mod pool;
mod migrations;
