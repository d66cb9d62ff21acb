use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Account as stored; never serialized back to clients (see [`PublicUser`]).
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub lastname: String,
    pub password_hash: String,
    pub disabled: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub lastname: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            lastname: user.lastname,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Shop {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A catalogue entry. `price` is in minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub name: String,
    pub price: i64,
    pub stock: i32,
    pub description: Option<String>,
    pub collection: Option<String>,
    pub img: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The single open cart of a user. `products` keeps insertion order and
/// repeats an id once per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    pub products: Vec<Uuid>,
    pub total: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            products: Vec::new(),
            total: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn push(&mut self, product: &Product) {
        self.products.push(product.id);
        self.total += product.price;
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TicketKind {
    Sale,
    Purchase,
}

impl TicketKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketKind::Sale => "sale",
            TicketKind::Purchase => "purchase",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sale" => Some(TicketKind::Sale),
            "purchase" => Some(TicketKind::Purchase),
            _ => None,
        }
    }
}

/// Receipt of a completed checkout. `items` holds product snapshots taken at
/// purchase time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ticket {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: TicketKind,
    pub items: Vec<Product>,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    pub fn new(user_id: Uuid, kind: TicketKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            items: Vec::new(),
            price: 0,
            created_at: Utc::now(),
        }
    }
}
