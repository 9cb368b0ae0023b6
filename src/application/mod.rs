//! Leave and medical certificate applications.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::prelude::*;
use crate::schema::{application, staff};
use crate::staff::StaffDb;

pub mod api;

/// Maximum number of rows returned by a listing.
pub const LIST_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationKind {
    Leave,
    Mc,
}

impl ApplicationKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ApplicationKind::Leave => "leave",
            ApplicationKind::Mc => "mc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "leave" => Some(ApplicationKind::Leave),
            "mc" => Some(ApplicationKind::Mc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Parses a review decision; `pending` is not a decision.
    pub fn parse_decision(value: &str) -> Option<Self> {
        match value {
            "approved" => Some(ApplicationStatus::Approved),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, PartialEq)]
#[diesel(belongs_to(StaffDb, foreign_key = staff_id))]
#[diesel(table_name = crate::schema::application)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ApplicationDb {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub kind: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub reason: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::application)]
pub struct ApplicationCreate {
    pub staff_id: Uuid,
    pub kind: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub reason: Option<String>,
}

impl ApplicationCreate {
    pub fn save(self, connection: &DbConnection) -> Result<ApplicationDb> {
        let conn = &mut connection.pool.get()?;
        Ok(diesel::insert_into(application::table)
            .values(&self)
            .returning(ApplicationDb::as_returning())
            .get_result(conn)?)
    }
}

impl ApplicationDb {
    /// Newest first, optionally only for one staff member, with the owner row.
    pub fn fetch_with_staff(
        staff_filter: Option<&Uuid>,
        connection: &DbConnection,
    ) -> Result<Vec<(Self, StaffDb)>> {
        let conn = &mut connection.pool.get()?;
        let mut query = application::table
            .inner_join(staff::table)
            .select((ApplicationDb::as_select(), StaffDb::as_select()))
            .order(application::created_at.desc())
            .limit(LIST_LIMIT)
            .into_boxed();
        if let Some(target) = staff_filter {
            query = query.filter(application::staff_id.eq(*target));
        }
        Ok(query.load(conn)?)
    }

    pub fn update_status(
        target: &Uuid,
        new_status: ApplicationStatus,
        connection: &DbConnection,
    ) -> Result<Self> {
        let conn = &mut connection.pool.get()?;
        Ok(diesel::update(application::table.filter(application::id.eq(target)))
            .set((
                application::status.eq(new_status.as_str()),
                application::updated_at.eq(Utc::now()),
            ))
            .returning(ApplicationDb::as_returning())
            .get_result(conn)?)
    }
}
