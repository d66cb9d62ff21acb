use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    Statement, TransactionTrait,
};
use shop_checkout_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    entity::{
        Carts, Products, Tickets, carts,
        products::ActiveModel as ProductActive,
        shops::ActiveModel as ShopActive,
        tickets,
        users::ActiveModel as UserActive,
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::TicketKind,
    services::cart_service,
    state::AppState,
    store::PgStore,
    workflow::CheckoutWorkflow,
};
use uuid::Uuid;

// Integration flows share one database, so they run in sequence inside a single test.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn checkout_flows_against_postgres() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    second_cart_drops_the_last_unit(&state).await?;
    concurrent_buyer_waits_for_the_first_checkout(&state).await?;
    failed_checkout_rolls_back_every_write(&state).await?;

    Ok(())
}

// Two carts hold the last helmet; the first checkout buys it, the second drops it.
async fn second_cart_drops_the_last_unit(state: &AppState) -> anyhow::Result<()> {
    let tony = auth_user(create_user(state, "ironman").await?, "ironman");
    let peter = auth_user(create_user(state, "spidey").await?, "spidey");
    let shop_id = create_shop(state, tony.user_id, "stark industries").await?;
    let helmet = create_product(state, shop_id, "helmet", 19900, 1).await?;
    let mug = create_product(state, shop_id, "mug", 1200, 10).await?;

    cart_service::add_to_cart(state, &tony, shop_id, helmet).await?;
    cart_service::add_to_cart(state, &tony, shop_id, mug).await?;
    cart_service::add_to_cart(state, &peter, shop_id, helmet).await?;

    let first = cart_service::checkout(state, &tony).await?.data.expect("outcome");
    assert_eq!(first.ticket.kind, TicketKind::Sale);
    assert_eq!(first.ticket.price, 19900 + 1200);
    assert!(first.message.is_empty());

    // The last helmet is gone by the time the second cart is bought.
    let second = cart_service::checkout(state, &peter).await?.data.expect("outcome");
    assert!(second.ticket.items.is_empty());
    assert_eq!(second.ticket.price, 0);
    assert_eq!(second.message, "helmet deleted because it has no stock");
    assert_eq!(second.cart_total, 0);

    assert_eq!(stock_of(state, helmet).await?, 0);
    assert_eq!(stock_of(state, mug).await?, 9);
    assert_eq!(tickets_of(state, tony.user_id).await?, 1);
    assert_eq!(tickets_of(state, peter.user_id).await?, 1);
    assert!(cart_of(state, tony.user_id).await?.is_none());
    assert!(cart_of(state, peter.user_id).await?.is_none());

    // Nothing left to buy.
    let err = cart_service::checkout(state, &tony).await.unwrap_err();
    assert_eq!(err.to_string(), "Bad Request: You don't have any cart");

    Ok(())
}

// The second buyer blocks on the product row while the first checkout is
// uncommitted, then sees the committed stock and drops the item.
async fn concurrent_buyer_waits_for_the_first_checkout(state: &AppState) -> anyhow::Result<()> {
    let pepper = auth_user(create_user(state, "pepper").await?, "pepper");
    let happy = auth_user(create_user(state, "happy").await?, "happy");
    let shop_id = create_shop(state, pepper.user_id, "rescue armory").await?;
    let gauntlet = create_product(state, shop_id, "gauntlet", 50000, 1).await?;

    cart_service::add_to_cart(state, &pepper, shop_id, gauntlet).await?;
    cart_service::add_to_cart(state, &happy, shop_id, gauntlet).await?;

    let txn = state.orm.begin().await?;
    let first = {
        let store = PgStore::new(&txn);
        CheckoutWorkflow::new(&store, &store, &store)
            .checkout(pepper.user_id)
            .await?
    };
    assert_eq!(first.ticket.items.len(), 1);

    let second = tokio::spawn({
        let state = state.clone();
        let happy = happy.clone();
        async move { cart_service::checkout(&state, &happy).await }
    });
    wait_for_lock_waiter(state).await?;
    txn.commit().await?;

    let second = second.await??.data.expect("outcome");
    assert!(second.ticket.items.is_empty());
    assert_eq!(second.message, "gauntlet deleted because it has no stock");

    assert_eq!(stock_of(state, gauntlet).await?, 0);
    assert_eq!(tickets_of(state, pepper.user_id).await?, 1);
    assert_eq!(tickets_of(state, happy.user_id).await?, 1);
    assert!(cart_of(state, happy.user_id).await?.is_none());

    Ok(())
}

// A product deleted after it was carted fails the checkout on the second
// entry; the decrement of the first entry must not survive.
async fn failed_checkout_rolls_back_every_write(state: &AppState) -> anyhow::Result<()> {
    let rhodey = auth_user(create_user(state, "warmachine").await?, "warmachine");
    let shop_id = create_shop(state, rhodey.user_id, "hammer industries").await?;
    let mug = create_product(state, shop_id, "hammer mug", 900, 5).await?;
    let drone = create_product(state, shop_id, "drone", 30000, 3).await?;

    cart_service::add_to_cart(state, &rhodey, shop_id, mug).await?;
    cart_service::add_to_cart(state, &rhodey, shop_id, drone).await?;
    Products::delete_by_id(drone).exec(&state.orm).await?;

    let err = cart_service::checkout(state, &rhodey).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    assert_eq!(stock_of(state, mug).await?, 5);
    assert_eq!(tickets_of(state, rhodey.user_id).await?, 0);
    let cart = cart_of(state, rhodey.user_id).await?.expect("cart kept");
    assert_eq!(cart.products, serde_json::json!([mug, drone]));

    Ok(())
}

async fn wait_for_lock_waiter(state: &AppState) -> anyhow::Result<()> {
    let backend = state.orm.get_database_backend();
    for _ in 0..2000 {
        let row = state
            .orm
            .query_one(Statement::from_string(
                backend,
                "SELECT COUNT(*)::BIGINT AS waiting FROM pg_stat_activity \
                 WHERE wait_event_type = 'Lock' AND datname = current_database()",
            ))
            .await?;
        let waiting: i64 = match row {
            Some(row) => row.try_get("", "waiting")?,
            None => 0,
        };
        if waiting > 0 {
            return Ok(());
        }
        tokio::task::yield_now().await;
    }
    anyhow::bail!("second checkout never blocked on the product row")
}

async fn stock_of(state: &AppState, product_id: Uuid) -> anyhow::Result<i32> {
    let product = Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| anyhow::anyhow!("product {product_id} missing"))?;
    Ok(product.stock)
}

async fn tickets_of(state: &AppState, user_id: Uuid) -> anyhow::Result<u64> {
    let count = Tickets::find()
        .filter(tickets::Column::UserId.eq(user_id))
        .count(&state.orm)
        .await?;
    Ok(count)
}

async fn cart_of(state: &AppState, user_id: Uuid) -> anyhow::Result<Option<carts::Model>> {
    let cart = Carts::find()
        .filter(carts::Column::UserId.eq(user_id))
        .one(&state.orm)
        .await?;
    Ok(cart)
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool).await?;

    let state = AppState::new(
        pool,
        AppConfig {
            database_url: database_url.to_string(),
            host: "127.0.0.1".into(),
            port: 0,
            jwt_secret: "test-secret".into(),
            token_ttl_minutes: 60,
        },
    );

    // Clean tables between runs
    let backend = state.orm.get_database_backend();
    state
        .orm
        .execute(Statement::from_string(
            backend,
            "TRUNCATE TABLE audit_logs, tickets, carts, products, shops, users CASCADE",
        ))
        .await?;

    Ok(state)
}

fn auth_user(user_id: Uuid, username: &str) -> AuthUser {
    AuthUser {
        user_id,
        username: username.into(),
        is_superuser: false,
    }
}

async fn create_user(state: &AppState, username: &str) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        username: Set(username.into()),
        name: Set("Test".into()),
        lastname: Set("User".into()),
        password_hash: Set("dummy".into()),
        disabled: Set(false),
        is_superuser: Set(false),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(user.id)
}

async fn create_shop(state: &AppState, owner_id: Uuid, name: &str) -> anyhow::Result<Uuid> {
    let shop = ShopActive {
        id: Set(Uuid::new_v4()),
        owner_id: Set(owner_id),
        name: Set(name.into()),
        description: Set(None),
        icon: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(shop.id)
}

async fn create_product(
    state: &AppState,
    shop_id: Uuid,
    name: &str,
    price: i64,
    stock: i32,
) -> anyhow::Result<Uuid> {
    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        shop_id: Set(shop_id),
        name: Set(name.into()),
        price: Set(price),
        stock: Set(stock),
        description: Set(None),
        collection: Set(None),
        img: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(product.id)
}
