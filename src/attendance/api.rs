use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AttendanceCreate, AttendanceDb, AttendanceKind};
use crate::db::connection::DbConnection;
use crate::prelude::*;
use crate::staff::StaffDb;
use crate::staff::api::StaffApi;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceApi {
    pub id: Uuid,
    pub staff_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub staff: StaffApi,
}

/// Location fields are whatever the client resolved; nothing is looked up here.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AttendancePost {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
}

impl From<(AttendanceDb, StaffDb)> for AttendanceApi {
    fn from((record, staff): (AttendanceDb, StaffDb)) -> Self {
        Self {
            id: record.id,
            staff_id: record.staff_id,
            kind: record.kind,
            latitude: record.latitude,
            longitude: record.longitude,
            address: record.address,
            timestamp: record.recorded_at,
            staff: staff.into(),
        }
    }
}

impl AttendancePost {
    pub fn into_create(self, staff_id: Uuid) -> Result<AttendanceCreate> {
        let kind = self
            .kind
            .filter(|k| !k.is_empty())
            .ok_or(Error::Validation("type is required"))?;
        let kind = AttendanceKind::parse(&kind)
            .ok_or(Error::Validation("type must be check_in or check_out"))?;

        Ok(AttendanceCreate {
            staff_id,
            kind: kind.as_str().to_string(),
            latitude: self.latitude,
            longitude: self.longitude,
            address: self
                .address
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
        })
    }

    pub fn record(self, owner: StaffDb, connection: &DbConnection) -> Result<AttendanceApi> {
        let created = self.into_create(owner.id)?.save(connection)?;
        Ok((created, owner).into())
    }
}

pub fn list_attendance(connection: &DbConnection) -> Result<Vec<AttendanceApi>> {
    Ok(AttendanceDb::fetch_recent_with_staff(connection)?
        .into_iter()
        .map(AttendanceApi::from)
        .collect())
}
