use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{CartItemRequest, CartQuoteRequest},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        store_products::{CreateStoreProductRequest, StoreProductList, UpdateStoreProductRequest},
        stores::{CreateStoreRequest, StoreList, UpdateStoreRequest},
    },
    models::{Product, ProductWithListings, Store, StoreProduct, StoreProductDetail, StoreWithListings},
    quote::{CartQuote, QuoteLine},
    response::{ApiResponse, Meta},
    routes::{cart, health, products, store_products, stores},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Catalog API", description = "Stores, products, store listings and cart quotes"),
    paths(
        health::health_check,
        health::readiness_check,
        stores::list_stores,
        stores::get_store,
        stores::create_store,
        stores::update_store,
        stores::delete_store,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        store_products::list_store_products,
        store_products::get_store_product,
        store_products::create_store_product,
        store_products::update_store_product,
        store_products::delete_store_product,
        cart::quote
    ),
    components(
        schemas(
            Store,
            Product,
            StoreProduct,
            StoreWithListings,
            ProductWithListings,
            StoreProductDetail,
            CreateStoreRequest,
            UpdateStoreRequest,
            CreateProductRequest,
            UpdateProductRequest,
            CreateStoreProductRequest,
            UpdateStoreProductRequest,
            CartItemRequest,
            CartQuoteRequest,
            CartQuote,
            QuoteLine,
            StoreList,
            ProductList,
            StoreProductList,
            Meta,
            ApiResponse<Store>,
            ApiResponse<Product>,
            ApiResponse<StoreList>,
            ApiResponse<ProductList>,
            ApiResponse<StoreProductList>,
            ApiResponse<StoreProductDetail>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Stores", description = "Store management endpoints"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Store Products", description = "Store-specific listings with price and stock"),
        (name = "Cart", description = "Cart quote endpoint"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
