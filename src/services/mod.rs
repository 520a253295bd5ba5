pub mod api;
pub mod bootstrap;

// 重新导出常用类型
pub use api::{ApiClient, QaApi, SharedApi};
pub use bootstrap::{bootstrap, Document, StaticDocument};
