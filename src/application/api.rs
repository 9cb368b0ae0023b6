use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ApplicationCreate, ApplicationDb, ApplicationKind, ApplicationStatus};
use crate::db::connection::DbConnection;
use crate::prelude::*;
use crate::staff::StaffDb;
use crate::staff::api::StaffApi;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationApi {
    pub id: Uuid,
    pub staff_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub reason: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub staff: StaffApi,
}

/// Body of a new application. Dates accept RFC 3339 or `YYYY-MM-DD`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPost {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ApplicationStatusPatch {
    pub status: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationQuery {
    pub staff_id: Option<String>,
}

/// Which applications a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffFilter {
    All,
    Staff(Uuid),
    /// The id cannot belong to any staff member.
    Nobody,
}

impl ApplicationQuery {
    /// An absent or blank `staffId` lists everyone.
    pub fn staff_filter(&self) -> StaffFilter {
        match self.staff_id.as_deref().map(str::trim) {
            None | Some("") => StaffFilter::All,
            Some(id) => Uuid::parse_str(id).map_or(StaffFilter::Nobody, StaffFilter::Staff),
        }
    }
}

impl From<(ApplicationDb, StaffDb)> for ApplicationApi {
    fn from((application, staff): (ApplicationDb, StaffDb)) -> Self {
        Self {
            id: application.id,
            staff_id: application.staff_id,
            kind: application.kind,
            start_date: application.start_date,
            end_date: application.end_date,
            reason: application.reason,
            status: application.status,
            created_at: application.created_at,
            staff: staff.into(),
        }
    }
}

fn parse_date(value: Option<&str>, now: DateTime<Utc>, field: &'static str) -> Result<DateTime<Utc>> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(now);
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or(Error::Validation(field))
}

impl ApplicationPost {
    /// Validates the body and builds the row owned by `staff_id`.
    pub fn into_create(self, staff_id: Uuid, now: DateTime<Utc>) -> Result<ApplicationCreate> {
        let kind = self
            .kind
            .filter(|k| !k.is_empty())
            .ok_or(Error::Validation("type is required"))?;
        let kind = ApplicationKind::parse(&kind)
            .ok_or(Error::Validation("type must be leave or mc"))?;

        let start_date = parse_date(
            self.start_date.as_deref(),
            now,
            "startDate must be a valid date",
        )?;
        let end_date = parse_date(
            self.end_date.as_deref(),
            now,
            "endDate must be a valid date",
        )?;
        if end_date < start_date {
            return Err(Error::Validation(
                "End date must be on or after start date",
            ));
        }

        let reason = self
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        Ok(ApplicationCreate {
            staff_id,
            kind: kind.as_str().to_string(),
            start_date,
            end_date,
            reason,
        })
    }

    /// Files the application for the signed-in `owner`.
    pub fn submit(self, owner: StaffDb, connection: &DbConnection) -> Result<ApplicationApi> {
        let created = self.into_create(owner.id, Utc::now())?.save(connection)?;
        Ok((created, owner).into())
    }
}

impl ApplicationStatusPatch {
    pub fn decision(&self) -> Result<ApplicationStatus> {
        self.status
            .as_deref()
            .and_then(ApplicationStatus::parse_decision)
            .ok_or(Error::Validation("status must be approved or rejected"))
    }

    pub fn apply(self, application_id: &Uuid, connection: &DbConnection) -> Result<ApplicationApi> {
        let status = self.decision()?;
        let updated = ApplicationDb::update_status(application_id, status, connection)?;
        let owner = StaffDb::fetch_by_id(&updated.staff_id, connection)?;
        Ok((updated, owner).into())
    }
}

pub fn list_applications(
    query: &ApplicationQuery,
    connection: &DbConnection,
) -> Result<Vec<ApplicationApi>> {
    let staff_id = match query.staff_filter() {
        StaffFilter::All => None,
        StaffFilter::Staff(id) => Some(id),
        StaffFilter::Nobody => return Ok(Vec::new()),
    };
    Ok(ApplicationDb::fetch_with_staff(staff_id.as_ref(), connection)?
        .into_iter()
        .map(ApplicationApi::from)
        .collect())
}
