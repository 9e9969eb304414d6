pub mod cart_service;
pub mod product_service;
pub mod store_product_service;
pub mod store_service;
