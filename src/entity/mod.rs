pub mod audit_logs;
pub mod products;
pub mod store_products;
pub mod stores;

pub use audit_logs::Entity as AuditLogs;
pub use products::Entity as Products;
pub use store_products::Entity as StoreProducts;
pub use stores::Entity as Stores;
