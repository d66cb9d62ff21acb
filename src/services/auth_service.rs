use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::auth::{Claims, LoginRequest, SignupRequest, TokenResponse},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    models::{PublicUser, User},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

pub fn issue_token(secret: &str, user: &User, ttl_minutes: i64) -> AppResult<String> {
    let expiration = Duration::try_minutes(ttl_minutes)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn decode_token(secret: &str, token: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Could not validate credentials".into()))
}

fn validate_signup(payload: &SignupRequest) -> AppResult<()> {
    let checks = [
        ("username", payload.username.chars().count(), 4, 15),
        ("name", payload.name.chars().count(), 3, 20),
        ("lastname", payload.lastname.chars().count(), 3, 20),
        ("password", payload.password.chars().count(), 8, 64),
    ];
    for (field, len, min, max) in checks {
        if len < min || len > max {
            return Err(AppError::BadRequest(format!(
                "{field} must be between {min} and {max} characters"
            )));
        }
    }
    Ok(())
}

pub async fn signup(state: &AppState, payload: SignupRequest) -> AppResult<ApiResponse<PublicUser>> {
    validate_signup(&payload)?;

    let password_hash = hash_password(&payload.password)?;
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        username: Set(payload.username),
        name: Set(payload.name),
        lastname: Set(payload.lastname),
        password_hash: Set(password_hash),
        disabled: Set(false),
        is_superuser: Set(false),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("Username is already taken".into())
        }
        _ => AppError::OrmError(err),
    })?;

    audit::record(
        &state.orm,
        Some(user.id),
        "user_signup",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "User created",
        PublicUser::from(user_from_entity(user)),
        None,
    ))
}

pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<TokenResponse>> {
    let LoginRequest { username, password } = payload;
    let user = Users::find()
        .filter(UserCol::Username.eq(username.as_str()))
        .one(&state.orm)
        .await?
        .map(user_from_entity);

    let user = match user {
        Some(u) if verify_password(&password, &u.password_hash) => u,
        _ => return Err(AppError::BadRequest("Incorrect username or password".into())),
    };

    if user.disabled {
        return Err(AppError::BadRequest("Inactive user".into()));
    }

    let access_token = issue_token(
        &state.config.jwt_secret,
        &user,
        state.config.token_ttl_minutes,
    )?;

    audit::record(
        &state.orm,
        Some(user.id),
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        TokenResponse {
            access_token,
            token_type: "bearer".into(),
        },
        Some(Meta::empty()),
    ))
}

pub fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        username: model.username,
        name: model.name,
        lastname: model.lastname,
        password_hash: model.password_hash,
        disabled: model.disabled,
        is_superuser: model.is_superuser,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
