//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Product Finder API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Finder API",
        version = "0.1.0",
        description = "Semantic product search with AI-generated recommendations",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_search::SearchApiDoc),
        (path = "/api/products", api = crate::api::products::ImportApiDoc)
    ),
    tags(
        (name = "products", description = "Semantic product search and recommendations")
    )
)]
pub struct ApiDoc;
