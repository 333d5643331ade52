use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::agencies::dtos::AgencyResponseDto;

/// Database model for agency
#[derive(Debug, Clone, FromRow)]
pub struct Agency {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Agency> for AgencyResponseDto {
    fn from(a: Agency) -> Self {
        Self {
            id: a.id,
            name: a.name,
            description: a.description,
            contact_email: a.contact_email,
            contact_phone: a.contact_phone,
            is_active: a.is_active,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}
