use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Ticket;

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct TicketList {
    #[schema(value_type = Vec<Ticket>)]
    pub items: Vec<Ticket>,
}
