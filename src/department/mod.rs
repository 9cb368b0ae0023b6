//! Departments and the per-department attendance summary.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Local, NaiveTime, TimeDelta, TimeZone, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::attendance::AttendanceKind;
use crate::db::connection::DbConnection;
use crate::prelude::*;
use crate::schema::{attendance, staff};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[default]
    #[serde(rename = "CSO")]
    Cso,
    #[serde(rename = "CSI")]
    Csi,
    #[serde(rename = "PMO")]
    Pmo,
    #[serde(rename = "CST")]
    Cst,
    #[serde(rename = "CMT")]
    Cmt,
    Training,
    #[serde(rename = "CBA")]
    Cba,
}

impl Department {
    pub const ALL: [Department; 7] = [
        Department::Cso,
        Department::Csi,
        Department::Pmo,
        Department::Cst,
        Department::Cmt,
        Department::Training,
        Department::Cba,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Department::Cso => "CSO",
            Department::Csi => "CSI",
            Department::Pmo => "PMO",
            Department::Cst => "CST",
            Department::Cmt => "CMT",
            Department::Training => "Training",
            Department::Cba => "CBA",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == value)
    }

    /// Unknown or missing departments fall back to CSO.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentAttendance {
    pub department: Department,
    pub total: i64,
    pub present: i64,
    pub percentage: i64,
}

impl DepartmentAttendance {
    pub fn new(department: Department, total: i64, present: i64) -> Self {
        Self {
            department,
            total,
            present,
            percentage: percentage(present, total),
        }
    }
}

/// `round(present / total * 100)`, 0 for an empty department.
pub fn percentage(present: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (present as f64 / total as f64 * 100.0).round() as i64
}

/// Start and end of the current server-local day, in UTC.
pub fn today_bounds() -> (DateTime<Utc>, DateTime<Utc>) {
    let midnight = Local::now().date_naive().and_time(NaiveTime::MIN);
    let start = Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc());
    (start, start + TimeDelta::days(1))
}

/// Builds the summary rows from raw counts, in the fixed department order.
/// Departments without staff are left out.
pub fn summarize(
    totals: &HashMap<String, i64>,
    present: &HashMap<String, i64>,
) -> Vec<DepartmentAttendance> {
    Department::ALL
        .into_iter()
        .filter_map(|department| {
            let total = totals.get(department.as_str()).copied().unwrap_or(0);
            if total == 0 {
                return None;
            }
            let present = present.get(department.as_str()).copied().unwrap_or(0);
            Some(DepartmentAttendance::new(department, total, present))
        })
        .collect()
}

/// Staff count and today's distinct check-ins for every department.
pub fn department_attendance(connection: &DbConnection) -> Result<Vec<DepartmentAttendance>> {
    let conn = &mut connection.pool.get()?;
    let departments: Vec<&str> = Department::ALL.iter().map(Department::as_str).collect();

    let totals: HashMap<String, i64> = staff::table
        .filter(staff::department.eq_any(departments))
        .group_by(staff::department)
        .select((staff::department, diesel::dsl::count_star()))
        .load::<(String, i64)>(conn)?
        .into_iter()
        .collect();

    let (start, end) = today_bounds();
    let checked_in: Vec<(uuid::Uuid, String)> = attendance::table
        .inner_join(staff::table)
        .filter(attendance::recorded_at.ge(start))
        .filter(attendance::recorded_at.lt(end))
        .filter(attendance::kind.eq(AttendanceKind::CheckIn.as_str()))
        .select((staff::id, staff::department))
        .distinct()
        .load(conn)?;

    let mut present: HashMap<String, i64> = HashMap::new();
    for (_, department) in checked_in {
        *present.entry(department).or_default() += 1;
    }

    Ok(summarize(&totals, &present))
}
