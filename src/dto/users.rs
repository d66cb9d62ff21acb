use serde::Serialize;
use utoipa::ToSchema;

use crate::models::PublicUser;

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserList {
    #[schema(value_type = Vec<PublicUser>)]
    pub items: Vec<PublicUser>,
}
