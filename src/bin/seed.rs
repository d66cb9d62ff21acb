use shop_checkout_api::{
    config::AppConfig,
    db::{DbPool, create_pool, run_migrations},
    services::auth_service::hash_password,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let owner_id = ensure_user(&pool, "ironman", "Anthony", "Stark", "ilovemark40").await?;
    let buyer_id = ensure_user(&pool, "spidey", "Peter", "Parker", "withgreatpower").await?;
    let shop_id = ensure_shop(&pool, owner_id, "stark industries", "The shop of Tony Stark").await?;
    seed_products(&pool, shop_id).await?;

    println!("Seed completed. Owner ID: {owner_id}, Buyer ID: {buyer_id}, Shop ID: {shop_id}");
    Ok(())
}

async fn ensure_user(
    pool: &DbPool,
    username: &str,
    name: &str,
    lastname: &str,
    password: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, username, name, lastname, password_hash)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (username) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(name)
    .bind(lastname)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {username}");
    Ok(user_id)
}

async fn ensure_shop(
    pool: &DbPool,
    owner_id: Uuid,
    name: &str,
    description: &str,
) -> anyhow::Result<Uuid> {
    let (shop_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO shops (id, owner_id, name, description)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (name) DO UPDATE SET description = EXCLUDED.description
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await?;

    println!("Ensured shop {name}");
    Ok(shop_id)
}

async fn seed_products(pool: &DbPool, shop_id: Uuid) -> anyhow::Result<()> {
    let products = vec![
        ("Arc reactor", "A replica of the arc reactor", "Home & Deco", 2850, 4),
        ("Mark 42 helmet", "Wearable helmet replica", "Cosplay", 19900, 2),
        ("Stark mug", "Coffee for long nights in the lab", "Kitchen", 1200, 50),
        ("Infinity sticker pack", "Six stones, six stickers", "Stationery", 500, 0),
    ];

    for (name, description, collection, price, stock) in products {
        let exists: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM products WHERE shop_id = $1 AND name = $2")
                .bind(shop_id)
                .bind(name)
                .fetch_optional(pool)
                .await?;
        if exists.is_some() {
            continue;
        }

        sqlx::query(
            r#"
            INSERT INTO products (id, shop_id, name, price, stock, description, collection)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(shop_id)
        .bind(name)
        .bind(price as i64)
        .bind(stock as i32)
        .bind(description)
        .bind(collection)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
