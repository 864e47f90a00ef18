//! [`SqliteStore`] — the SQLite implementation of [`Service`] for both
//! entity types.

use std::{path::Path, rc::Rc};

use rusqlite::{Connection, OptionalExtension as _, params};

use roster_core::{
  ServiceError,
  entity::{Department, Entity, Seller},
  service::Service,
};

use crate::{
  Error, Result,
  encode::{DEPARTMENT_COLUMNS, RawSeller, SELLER_SELECT, department_from_row, encode_date},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster store backed by a single SQLite file.
///
/// Clones share one connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: Rc<Connection>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = Connection::open(path)?;
    Self::init(conn)
  }

  /// Open an in-memory store.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()?;
    Self::init(conn)
  }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn: Rc::new(conn) })
  }

  // ── Departments ───────────────────────────────────────────────────────

  pub fn departments(&self) -> Result<Vec<Department>> {
    let mut stmt = self
      .conn
      .prepare(&format!("SELECT {DEPARTMENT_COLUMNS} FROM department ORDER BY name"))?;
    let rows = stmt
      .query_map([], department_from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }

  pub fn department(&self, id: i64) -> Result<Option<Department>> {
    Ok(
      self
        .conn
        .query_row(
          &format!("SELECT {DEPARTMENT_COLUMNS} FROM department WHERE id = ?1"),
          params![id],
          department_from_row,
        )
        .optional()?,
    )
  }

  pub fn save_department(&self, department: &Department) -> Result<Department> {
    let mut stored = department.clone();
    match department.id.filter(|_| !department.is_new()) {
      None => {
        self
          .conn
          .execute("INSERT INTO department (name) VALUES (?1)", params![department.name])?;
        stored.set_id(self.conn.last_insert_rowid());
        tracing::debug!(id = ?stored.id, "department inserted");
      }
      Some(id) => {
        let changed = self.conn.execute(
          "UPDATE department SET name = ?1 WHERE id = ?2",
          params![department.name, id],
        )?;
        if changed == 0 {
          return Err(Error::NotFound(id));
        }
      }
    }
    Ok(stored)
  }

  pub fn remove_department(&self, department: &Department) -> Result<()> {
    let id = department.id.unwrap_or_default();
    let changed = self.conn.execute("DELETE FROM department WHERE id = ?1", params![id])?;
    if changed == 0 {
      return Err(Error::NotFound(id));
    }
    Ok(())
  }

  // ── Sellers ───────────────────────────────────────────────────────────

  pub fn sellers(&self) -> Result<Vec<Seller>> {
    let mut stmt = self.conn.prepare(&format!("{SELLER_SELECT} ORDER BY s.name"))?;
    let raws = stmt
      .query_map([], RawSeller::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(RawSeller::into_seller).collect()
  }

  pub fn seller(&self, id: i64) -> Result<Option<Seller>> {
    let raw = self
      .conn
      .query_row(&format!("{SELLER_SELECT} WHERE s.id = ?1"), params![id], RawSeller::from_row)
      .optional()?;
    raw.map(RawSeller::into_seller).transpose()
  }

  pub fn save_seller(&self, seller: &Seller) -> Result<Seller> {
    let birth_date = seller.birth_date.map(encode_date).ok_or(Error::Incomplete("birth date"))?;
    let department_id = seller
      .department
      .as_ref()
      .and_then(|d| d.id)
      .ok_or(Error::Incomplete("department"))?;

    let mut stored = seller.clone();
    match seller.id.filter(|_| !seller.is_new()) {
      None => {
        self.conn.execute(
          "INSERT INTO seller (name, email, birth_date, base_salary, department_id)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          params![seller.name, seller.email, birth_date, seller.base_salary, department_id],
        )?;
        stored.set_id(self.conn.last_insert_rowid());
        tracing::debug!(id = ?stored.id, "seller inserted");
      }
      Some(id) => {
        let changed = self.conn.execute(
          "UPDATE seller
           SET name = ?1, email = ?2, birth_date = ?3, base_salary = ?4, department_id = ?5
           WHERE id = ?6",
          params![seller.name, seller.email, birth_date, seller.base_salary, department_id, id],
        )?;
        if changed == 0 {
          return Err(Error::NotFound(id));
        }
      }
    }
    Ok(stored)
  }

  pub fn remove_seller(&self, seller: &Seller) -> Result<()> {
    let id = seller.id.unwrap_or_default();
    let changed = self.conn.execute("DELETE FROM seller WHERE id = ?1", params![id])?;
    if changed == 0 {
      return Err(Error::NotFound(id));
    }
    Ok(())
  }
}

// ─── Service impls ───────────────────────────────────────────────────────────

impl Service<Department> for SqliteStore {
  fn find_all(&self) -> Result<Vec<Department>, ServiceError> { Ok(self.departments()?) }

  fn find_by_id(&self, id: i64) -> Result<Option<Department>, ServiceError> {
    Ok(self.department(id)?)
  }

  fn save_or_update(&self, entity: &Department) -> Result<Department, ServiceError> {
    Ok(self.save_department(entity)?)
  }

  fn remove(&self, entity: &Department) -> Result<(), ServiceError> {
    Ok(self.remove_department(entity)?)
  }
}

impl Service<Seller> for SqliteStore {
  fn find_all(&self) -> Result<Vec<Seller>, ServiceError> { Ok(self.sellers()?) }

  fn find_by_id(&self, id: i64) -> Result<Option<Seller>, ServiceError> { Ok(self.seller(id)?) }

  fn save_or_update(&self, entity: &Seller) -> Result<Seller, ServiceError> {
    Ok(self.save_seller(entity)?)
  }

  fn remove(&self, entity: &Seller) -> Result<(), ServiceError> { Ok(self.remove_seller(entity)?) }
}
