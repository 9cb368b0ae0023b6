//! Check-in and check-out records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::prelude::*;
use crate::schema::{attendance, staff};
use crate::staff::StaffDb;

pub mod api;

pub const LIST_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceKind {
    CheckIn,
    CheckOut,
}

impl AttendanceKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AttendanceKind::CheckIn => "check_in",
            AttendanceKind::CheckOut => "check_out",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "check_in" => Some(AttendanceKind::CheckIn),
            "check_out" => Some(AttendanceKind::CheckOut),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, PartialEq)]
#[diesel(belongs_to(StaffDb, foreign_key = staff_id))]
#[diesel(table_name = crate::schema::attendance)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AttendanceDb {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub kind: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::attendance)]
pub struct AttendanceCreate {
    pub staff_id: Uuid,
    pub kind: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
}

impl AttendanceCreate {
    pub fn save(self, connection: &DbConnection) -> Result<AttendanceDb> {
        let conn = &mut connection.pool.get()?;
        Ok(diesel::insert_into(attendance::table)
            .values(&self)
            .returning(AttendanceDb::as_returning())
            .get_result(conn)?)
    }
}

impl AttendanceDb {
    /// Latest records first, with the owner row.
    pub fn fetch_recent_with_staff(connection: &DbConnection) -> Result<Vec<(Self, StaffDb)>> {
        let conn = &mut connection.pool.get()?;
        Ok(attendance::table
            .inner_join(staff::table)
            .select((AttendanceDb::as_select(), StaffDb::as_select()))
            .order(attendance::recorded_at.desc())
            .limit(LIST_LIMIT)
            .load(conn)?)
    }
}
