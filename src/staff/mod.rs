//! Staff accounts.

use chrono::{DateTime, Utc};
use diesel::associations::HasTable;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::prelude::*;
use crate::schema::staff::dsl::*;

pub mod api;

/// A staff row, password hash included. Never serialized to clients.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::staff)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StaffDb {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::staff)]
pub struct StaffCreate {
    pub name: String,
    pub email: String,
    pub department: String,
    pub password_hash: String,
}

impl StaffCreate {
    pub fn save(self, connection: &DbConnection) -> Result<StaffDb> {
        let conn = &mut connection.pool.get()?;
        Ok(diesel::insert_into(staff)
            .values(&self)
            .returning(StaffDb::as_returning())
            .get_result(conn)?)
    }

    pub fn save_all(items: &[StaffCreate], connection: &DbConnection) -> Result<usize> {
        let conn = &mut connection.pool.get()?;
        Ok(diesel::insert_into(staff).values(items).execute(conn)?)
    }
}

impl StaffDb {
    pub fn fetch_by_id(target: &Uuid, connection: &DbConnection) -> Result<Self> {
        let conn = &mut connection.pool.get()?;
        Ok(StaffDb::by_id(target)
            .select(StaffDb::as_select())
            .get_result(conn)?)
    }

    /// Looks up a staff member by login email. `None` when nobody matches.
    pub fn find_by_email(target: &str, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(StaffDb::by_email(target)
            .select(StaffDb::as_select())
            .first(conn)
            .optional()?)
    }

    pub fn find_by_id(target: &Uuid, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(StaffDb::by_id(target)
            .select(StaffDb::as_select())
            .first(conn)
            .optional()?)
    }

    /// All staff ordered by name.
    pub fn fetch_all(connection: &DbConnection) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;
        Ok(StaffDb::table()
            .order(name.asc())
            .select(StaffDb::as_select())
            .load(conn)?)
    }

    pub fn count(connection: &DbConnection) -> Result<i64> {
        let conn = &mut connection.pool.get()?;
        Ok(StaffDb::table().count().get_result(conn)?)
    }

    pub fn update_password_hash(
        target: &Uuid,
        new_hash: &str,
        connection: &DbConnection,
    ) -> Result<Self> {
        let conn = &mut connection.pool.get()?;
        Ok(diesel::update(StaffDb::by_id(target))
            .set((password_hash.eq(new_hash), updated_at.eq(Utc::now())))
            .returning(StaffDb::as_returning())
            .get_result(conn)?)
    }

    /// Deletes a staff member; attendance and applications cascade.
    pub fn delete(target: &Uuid, connection: &DbConnection) -> Result<()> {
        let conn = &mut connection.pool.get()?;
        let deleted = diesel::delete(StaffDb::by_id(target)).execute(conn)?;
        if deleted == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }
}

impl StaffDb {
    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: &Uuid) -> _ {
        crate::schema::staff::dsl::staff.filter(id.eq(target))
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_email(target: &str) -> _ {
        crate::schema::staff::dsl::staff.filter(email.eq(target))
    }
}
