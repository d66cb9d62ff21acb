use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Product, Shop};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateShopRequest {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ShopList {
    #[schema(value_type = Vec<Shop>)]
    pub items: Vec<Shop>,
}

/// A shop together with the products it still has in stock.
#[derive(Debug, Serialize, ToSchema)]
pub struct ShopWithProducts {
    #[serde(flatten)]
    pub shop: Shop,
    pub products: Vec<Product>,
}
