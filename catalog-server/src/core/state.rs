//! Server State

use std::path::PathBuf;
use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::services::AssetStoreClient;

/// 服务器状态 - 持有所有共享服务的引用
///
/// 每个 HTTP 请求独立处理；进程内没有可变共享状态，
/// 所有持久数据都在数据库里，`clone` 只是浅拷贝句柄。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | assets | AssetStoreClient | 远程图床客户端 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 图床客户端
    pub assets: AssetStoreClient,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/catalog.db) 及其表结构
    /// 3. 图床客户端
    ///
    /// # Panics
    ///
    /// 工作目录或数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("catalog.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let assets = AssetStoreClient::new(
            &config.asset_store_url,
            config.asset_store_key.clone(),
            Duration::from_millis(config.asset_timeout_ms),
        );

        Self {
            config: config.clone(),
            db: db_service.db,
            assets,
        }
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }
}
