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
        auth::{LoginRequest, SignupRequest, TokenResponse},
        products::{CreateProductRequest, ProductList},
        shops::{CreateShopRequest, ShopList, ShopWithProducts},
        tickets::TicketList,
        users::UserList,
    },
    models::{Cart, Product, PublicUser, Shop, Ticket, TicketKind},
    response::{ApiResponse, Meta},
    routes::{auth, carts, health, params, products, shops, tickets, users},
    workflow::CheckoutOutcome,
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
    paths(
        health::health_check,
        auth::login,
        users::signup,
        users::list_users,
        users::get_user,
        shops::list_shops,
        shops::get_shop,
        shops::create_shop,
        products::list_products,
        products::get_product,
        products::create_product,
        products::set_stock,
        carts::get_my_cart,
        carts::add_to_cart,
        carts::buy_cart,
        carts::clear_cart,
        tickets::list_my_tickets,
        tickets::get_ticket
    ),
    components(
        schemas(
            PublicUser,
            Shop,
            Product,
            Cart,
            Ticket,
            TicketKind,
            CheckoutOutcome,
            SignupRequest,
            LoginRequest,
            TokenResponse,
            CreateShopRequest,
            CreateProductRequest,
            UserList,
            ShopList,
            ShopWithProducts,
            ProductList,
            TicketList,
            health::HealthData,
            params::Pagination,
            params::ProductQuery,
            Meta,
            ApiResponse<Cart>,
            ApiResponse<CheckoutOutcome>,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Ticket>,
            ApiResponse<TicketList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "User accounts"),
        (name = "Token", description = "Access token issuance"),
        (name = "Shops", description = "Shop endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Carts", description = "Cart and checkout endpoints"),
        (name = "Tickets", description = "Purchase history"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
