//! Chronika persistence layer.
//!
//! A single SQLite database holds the leader catalog, generated facts, user
//! accounts with roles, and the activity log. One `Mutex<Connection>` guards
//! the handle; WAL mode keeps concurrent readers cheap.

mod seed;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chronika_core::error::{ChronikaError, Result};
use chronika_core::types::{ActivityEntry, Fact, Leader, LeaderDraft, LeaderPatch};
use rusqlite::{Connection, OptionalExtension, params};

/// User account record.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub last_login: Option<String>,
    pub created_at: String,
}

/// Chronika database — leaders, facts, users, activity.
pub struct LeadersDb {
    conn: Mutex<Connection>,
}

fn db_err(e: impl std::fmt::Display) -> ChronikaError {
    ChronikaError::Database(e.to_string())
}

const LEADER_COLUMNS: &str = "id, name_primary, name_secondary, slug, birth_year, birth_place, \
     death_year, death_place, position, achievements, biography, short_description, legacy, \
     years_in_power_start, years_in_power_end, historical_significance, video_id, portrait_url, \
     is_published, view_count, created_at, updated_at";

fn row_to_leader(row: &rusqlite::Row<'_>) -> rusqlite::Result<Leader> {
    Ok(Leader {
        id: row.get(0)?,
        name_primary: row.get(1)?,
        name_secondary: row.get(2)?,
        slug: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        birth_year: row.get(4)?,
        birth_place: row.get(5)?,
        death_year: row.get(6)?,
        death_place: row.get(7)?,
        position: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
        achievements: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
        biography: row.get(10)?,
        short_description: row.get(11)?,
        legacy: row.get(12)?,
        years_in_power_start: row.get(13)?,
        years_in_power_end: row.get(14)?,
        historical_significance: row.get(15)?,
        video_id: row.get(16)?,
        portrait_url: row.get(17)?,
        is_published: row.get::<_, i32>(18)? != 0,
        view_count: row.get(19)?,
        created_at: row.get(20)?,
        updated_at: row.get(21)?,
    })
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        full_name: row.get(4)?,
        role: row.get(5)?,
        is_active: row.get::<_, i32>(6)? != 0,
        last_login: row.get(7)?,
        created_at: row.get(8)?,
    })
}

impl LeadersDb {
    /// Open or create the database.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(db_err)?;

        // WAL for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL;").ok();
        conn.execute_batch("PRAGMA foreign_keys=ON;").ok();

        let db = Self { conn: Mutex::new(conn) };
        db.migrate()?;
        db.seed_roles()?;
        Ok(db)
    }

    /// In-memory database for tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(Path::new(":memory:"))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| ChronikaError::Database(format!("Lock: {e}")))
    }

    /// Run schema migrations.
    fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS leaders (
                id INTEGER PRIMARY KEY,
                name_primary TEXT NOT NULL,
                name_secondary TEXT NOT NULL,
                slug TEXT UNIQUE,
                birth_year INTEGER,
                birth_place TEXT,
                death_year INTEGER,
                death_place TEXT,
                position TEXT DEFAULT '',
                achievements TEXT DEFAULT '',
                biography TEXT,
                short_description TEXT,
                legacy TEXT,
                years_in_power_start INTEGER,
                years_in_power_end INTEGER,
                historical_significance INTEGER DEFAULT 5,
                video_id INTEGER,
                portrait_url TEXT,
                is_published INTEGER DEFAULT 1,
                view_count INTEGER DEFAULT 0,
                created_at TEXT DEFAULT (datetime('now')),
                updated_at TEXT DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS facts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                leader_id INTEGER NOT NULL REFERENCES leaders(id) ON DELETE CASCADE,
                fact_text TEXT NOT NULL,
                category TEXT,
                is_verified INTEGER DEFAULT 0,
                created_at TEXT DEFAULT (datetime('now'))
            );
            CREATE INDEX IF NOT EXISTS idx_facts_leader ON facts(leader_id);

            CREATE TABLE IF NOT EXISTS roles (
                name TEXT PRIMARY KEY,
                description TEXT DEFAULT '',
                permissions_json TEXT DEFAULT '[]'
            );

            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                full_name TEXT,
                role TEXT NOT NULL DEFAULT 'user' REFERENCES roles(name),
                is_active INTEGER DEFAULT 1,
                last_login TEXT,
                created_at TEXT DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS activity_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT,
                leader_id INTEGER,
                action TEXT NOT NULL,
                details_json TEXT,
                ip_address TEXT,
                user_agent TEXT,
                created_at TEXT DEFAULT (datetime('now'))
            );
            CREATE INDEX IF NOT EXISTS idx_activity_action ON activity_log(action);
            CREATE INDEX IF NOT EXISTS idx_activity_created ON activity_log(created_at);
            ",
        )
        .map_err(|e| ChronikaError::Database(format!("Migration error: {e}")))?;
        Ok(())
    }

    /// Seed default roles if missing. Permission sets mirror the access
    /// tiers the API enforces.
    fn seed_roles(&self) -> Result<()> {
        let conn = self.lock()?;
        let defaults: [(&str, &str, &str); 3] = [
            (
                "guest",
                "Guest user with read-only access",
                r#"["view_leaders","search_leaders"]"#,
            ),
            (
                "user",
                "Regular authenticated user",
                r#"["view_leaders","search_leaders","view_facts","track_activity"]"#,
            ),
            (
                "admin",
                "Administrator with full access",
                r#"["view_leaders","search_leaders","view_facts","create_leaders","update_leaders","delete_leaders","manage_users","view_analytics","track_activity"]"#,
            ),
        ];
        for (name, description, permissions) in defaults {
            conn.execute(
                "INSERT OR IGNORE INTO roles (name, description, permissions_json) VALUES (?1, ?2, ?3)",
                params![name, description, permissions],
            )
            .map_err(db_err)?;
        }
        Ok(())
    }

    // ── Leaders ──────────────────────────────

    /// Insert the initial dataset when the table is empty. Returns the
    /// number of leaders seeded (0 when already populated).
    pub fn seed_leaders_if_empty(&self) -> Result<usize> {
        let count: i64 = {
            let conn = self.lock()?;
            conn.query_row("SELECT COUNT(*) FROM leaders", [], |r| r.get(0))
                .map_err(db_err)?
        };
        if count > 0 {
            return Ok(0);
        }
        let leaders = seed::seed_leaders();
        for leader in &leaders {
            self.insert_leader(leader)?;
        }
        tracing::info!("Seeded {} leaders", leaders.len());
        Ok(leaders.len())
    }

    fn insert_leader(&self, leader: &Leader) -> Result<()> {
        let conn = self.lock()?;
        let slug = if leader.slug.is_empty() { None } else { Some(leader.slug.as_str()) };
        conn.execute(
            "INSERT INTO leaders (id, name_primary, name_secondary, slug, birth_year, birth_place, \
             death_year, death_place, position, achievements, biography, short_description, legacy, \
             years_in_power_start, years_in_power_end, historical_significance, video_id, portrait_url, is_published) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
            params![
                leader.id,
                leader.name_primary,
                leader.name_secondary,
                slug,
                leader.birth_year,
                leader.birth_place,
                leader.death_year,
                leader.death_place,
                leader.position,
                leader.achievements,
                leader.biography,
                leader.short_description,
                leader.legacy,
                leader.years_in_power_start,
                leader.years_in_power_end,
                leader.historical_significance,
                leader.video_id,
                leader.portrait_url,
                leader.is_published as i32,
            ],
        )
        .map_err(db_err)?;
        Ok(())
    }

    /// All published leaders, oldest first.
    pub fn list_published(&self) -> Result<Vec<Leader>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {LEADER_COLUMNS} FROM leaders WHERE is_published=1 ORDER BY birth_year"
            ))
            .map_err(db_err)?;
        let leaders = stmt
            .query_map([], row_to_leader)
            .map_err(db_err)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(leaders)
    }

    pub fn get_leader(&self, id: i64) -> Result<Option<Leader>> {
        let conn = self.lock()?;
        conn.query_row(
            &format!("SELECT {LEADER_COLUMNS} FROM leaders WHERE id=?1"),
            params![id],
            row_to_leader,
        )
        .optional()
        .map_err(db_err)
    }

    pub fn get_leader_by_slug(&self, slug: &str) -> Result<Option<Leader>> {
        let conn = self.lock()?;
        conn.query_row(
            &format!("SELECT {LEADER_COLUMNS} FROM leaders WHERE slug=?1"),
            params![slug],
            row_to_leader,
        )
        .optional()
        .map_err(db_err)
    }

    /// Create a leader from an API draft; the id is assigned by the database.
    pub fn create_leader(&self, draft: &LeaderDraft) -> Result<Leader> {
        let id = {
            let conn = self.lock()?;
            conn.execute(
                "INSERT INTO leaders (name_primary, name_secondary, slug, birth_year, birth_place, \
                 death_year, death_place, position, achievements, biography, short_description, legacy, \
                 years_in_power_start, years_in_power_end, historical_significance, video_id, portrait_url, is_published) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
                params![
                    draft.name_primary,
                    draft.name_secondary,
                    draft.slug,
                    draft.birth_year,
                    draft.birth_place,
                    draft.death_year,
                    draft.death_place,
                    draft.position.as_deref().unwrap_or(""),
                    draft.achievements.as_deref().unwrap_or(""),
                    draft.biography,
                    draft.short_description,
                    draft.legacy,
                    draft.years_in_power_start,
                    draft.years_in_power_end,
                    draft.historical_significance.unwrap_or(5),
                    draft.video_id,
                    draft.portrait_url,
                    draft.is_published.unwrap_or(false) as i32,
                ],
            )
            .map_err(db_err)?;
            conn.last_insert_rowid()
        };
        self.get_leader(id)?
            .ok_or_else(|| ChronikaError::Database("created leader vanished".into()))
    }

    /// Partial update; returns the new record, or `None` for an unknown id.
    pub fn update_leader(&self, id: i64, patch: LeaderPatch) -> Result<Option<Leader>> {
        let Some(mut leader) = self.get_leader(id)? else {
            return Ok(None);
        };
        patch.apply(&mut leader);

        let conn = self.lock()?;
        let slug = if leader.slug.is_empty() { None } else { Some(leader.slug.as_str()) };
        conn.execute(
            "UPDATE leaders SET name_primary=?2, name_secondary=?3, slug=?4, birth_year=?5, \
             birth_place=?6, death_year=?7, death_place=?8, position=?9, achievements=?10, \
             biography=?11, short_description=?12, legacy=?13, years_in_power_start=?14, \
             years_in_power_end=?15, historical_significance=?16, video_id=?17, portrait_url=?18, \
             is_published=?19, updated_at=datetime('now') WHERE id=?1",
            params![
                id,
                leader.name_primary,
                leader.name_secondary,
                slug,
                leader.birth_year,
                leader.birth_place,
                leader.death_year,
                leader.death_place,
                leader.position,
                leader.achievements,
                leader.biography,
                leader.short_description,
                leader.legacy,
                leader.years_in_power_start,
                leader.years_in_power_end,
                leader.historical_significance,
                leader.video_id,
                leader.portrait_url,
                leader.is_published as i32,
            ],
        )
        .map_err(db_err)?;
        drop(conn);
        self.get_leader(id)
    }

    /// Delete a leader; facts cascade. Returns false for an unknown id.
    pub fn delete_leader(&self, id: i64) -> Result<bool> {
        let conn = self.lock()?;
        let changed = conn
            .execute("DELETE FROM leaders WHERE id=?1", params![id])
            .map_err(db_err)?;
        Ok(changed > 0)
    }

    pub fn increment_view_count(&self, id: i64) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE leaders SET view_count = view_count + 1 WHERE id=?1",
            params![id],
        )
        .map_err(db_err)?;
        Ok(())
    }

    /// Published leaders by view count, most viewed first.
    pub fn popular(&self, limit: usize) -> Result<Vec<Leader>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {LEADER_COLUMNS} FROM leaders WHERE is_published=1 \
                 ORDER BY view_count DESC, id LIMIT ?1"
            ))
            .map_err(db_err)?;
        let leaders = stmt
            .query_map(params![limit as i64], row_to_leader)
            .map_err(db_err)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(leaders)
    }

    // ── Facts ──────────────────────────────

    pub fn facts_for(&self, leader_id: i64) -> Result<Vec<Fact>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, leader_id, fact_text, category, is_verified, created_at \
                 FROM facts WHERE leader_id=?1 ORDER BY id",
            )
            .map_err(db_err)?;
        let facts = stmt
            .query_map(params![leader_id], |row| {
                Ok(Fact {
                    id: row.get(0)?,
                    leader_id: row.get(1)?,
                    fact_text: row.get(2)?,
                    category: row.get(3)?,
                    is_verified: row.get::<_, i32>(4)? != 0,
                    created_at: row.get(5)?,
                })
            })
            .map_err(db_err)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(facts)
    }

    /// Persist freshly generated facts unless another writer already did.
    ///
    /// The existence check and the inserts run in one transaction on the
    /// single connection, so concurrent first-time requests for the same
    /// leader cannot interleave duplicate rows. Returns the persisted set.
    pub fn insert_facts_if_absent(&self, leader_id: i64, texts: &[String]) -> Result<Vec<Fact>> {
        {
            let mut conn = self.lock()?;
            let tx = conn.transaction().map_err(db_err)?;
            let existing: i64 = tx
                .query_row(
                    "SELECT COUNT(*) FROM facts WHERE leader_id=?1",
                    params![leader_id],
                    |r| r.get(0),
                )
                .map_err(db_err)?;
            if existing == 0 {
                for text in texts {
                    tx.execute(
                        "INSERT INTO facts (leader_id, fact_text) VALUES (?1, ?2)",
                        params![leader_id, text],
                    )
                    .map_err(db_err)?;
                }
            }
            tx.commit().map_err(db_err)?;
        }
        self.facts_for(leader_id)
    }

    // ── Users & roles ──────────────────────────────

    pub fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        full_name: Option<&str>,
        role: &str,
    ) -> Result<User> {
        let id = uuid::Uuid::new_v4().to_string();
        {
            let conn = self.lock()?;
            conn.execute(
                "INSERT INTO users (id, username, email, password_hash, full_name, role) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, username, email, password_hash, full_name, role],
            )
            .map_err(db_err)?;
        }
        self.get_user_by_id(&id)?
            .ok_or_else(|| ChronikaError::Database("created user vanished".into()))
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, username, email, password_hash, full_name, role, is_active, last_login, created_at \
             FROM users WHERE id=?1",
            params![id],
            row_to_user,
        )
        .optional()
        .map_err(db_err)
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, username, email, password_hash, full_name, role, is_active, last_login, created_at \
             FROM users WHERE username=?1",
            params![username],
            row_to_user,
        )
        .optional()
        .map_err(db_err)
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, username, email, password_hash, full_name, role, is_active, last_login, created_at \
             FROM users WHERE email=?1",
            params![email],
            row_to_user,
        )
        .optional()
        .map_err(db_err)
    }

    pub fn update_last_login(&self, id: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE users SET last_login=datetime('now') WHERE id=?1",
            params![id],
        )
        .map_err(db_err)?;
        Ok(())
    }

    /// Permission names attached to a role; unknown roles have none.
    pub fn role_permissions(&self, role: &str) -> Result<Vec<String>> {
        let conn = self.lock()?;
        let json: Option<String> = conn
            .query_row(
                "SELECT permissions_json FROM roles WHERE name=?1",
                params![role],
                |r| r.get(0),
            )
            .optional()
            .map_err(db_err)?;
        Ok(json
            .and_then(|j| serde_json::from_str(&j).ok())
            .unwrap_or_default())
    }

    pub fn role_has_permission(&self, role: &str, permission: &str) -> bool {
        self.role_permissions(role)
            .map(|perms| perms.iter().any(|p| p == permission))
            .unwrap_or(false)
    }

    // ── Activity log ──────────────────────────────

    pub fn log_activity(
        &self,
        action: &str,
        user_id: Option<&str>,
        leader_id: Option<i64>,
        details: Option<serde_json::Value>,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<()> {
        let conn = self.lock()?;
        let details_json = details.map(|d| d.to_string());
        conn.execute(
            "INSERT INTO activity_log (action, user_id, leader_id, details_json, ip_address, user_agent) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![action, user_id, leader_id, details_json, ip_address, user_agent],
        )
        .map_err(db_err)?;
        Ok(())
    }

    /// Most recent activity first.
    pub fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityEntry>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, user_id, leader_id, action, details_json, ip_address, user_agent, created_at \
                 FROM activity_log ORDER BY id DESC LIMIT ?1",
            )
            .map_err(db_err)?;
        let entries = stmt
            .query_map(params![limit as i64], |row| {
                Ok(ActivityEntry {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    leader_id: row.get(2)?,
                    action: row.get(3)?,
                    details: row
                        .get::<_, Option<String>>(4)?
                        .and_then(|s| serde_json::from_str(&s).ok()),
                    ip_address: row.get(5)?,
                    user_agent: row.get(6)?,
                    created_at: row.get(7)?,
                })
            })
            .map_err(db_err)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_db() -> LeadersDb {
        let db = LeadersDb::open_in_memory().unwrap();
        db.seed_leaders_if_empty().unwrap();
        db
    }

    #[test]
    fn test_seed_leaders() {
        let db = temp_db();
        let leaders = db.list_published().unwrap();
        assert_eq!(leaders.len(), 7);
        // ordered by birth year: Lenin first, Gorbachev last
        assert_eq!(leaders[0].slug, "lenin");
        assert_eq!(leaders[6].slug, "gorbachev");

        // seeding twice is a no-op
        assert_eq!(db.seed_leaders_if_empty().unwrap(), 0);
    }

    #[test]
    fn test_get_by_id_and_slug() {
        let db = temp_db();
        let lenin = db.get_leader(1).unwrap().unwrap();
        assert_eq!(lenin.name_secondary, "Vladimir Ilyich Lenin");
        assert_eq!(lenin.birth_year, Some(1870));

        let stalin = db.get_leader_by_slug("stalin").unwrap().unwrap();
        assert_eq!(stalin.id, 2);

        assert!(db.get_leader(999).unwrap().is_none());
    }

    #[test]
    fn test_leader_crud() {
        let db = temp_db();

        let draft = LeaderDraft {
            name_primary: "Георгий Маленков".into(),
            name_secondary: "Georgy Malenkov".into(),
            birth_year: Some(1902),
            position: Some("Председатель Совета министров СССР".into()),
            ..Default::default()
        };
        let created = db.create_leader(&draft).unwrap();
        assert!(created.id > 7);
        assert!(!created.is_published);

        let patch = LeaderPatch {
            is_published: Some(true),
            historical_significance: Some(4),
            ..Default::default()
        };
        let updated = db.update_leader(created.id, patch).unwrap().unwrap();
        assert!(updated.is_published);
        assert_eq!(updated.historical_significance, 4);
        assert_eq!(updated.name_primary, "Георгий Маленков");

        assert!(db.delete_leader(created.id).unwrap());
        assert!(db.get_leader(created.id).unwrap().is_none());
        assert!(!db.delete_leader(created.id).unwrap());
    }

    #[test]
    fn test_update_unknown_leader_is_none() {
        let db = temp_db();
        let result = db.update_leader(404, LeaderPatch::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_view_count_and_popular() {
        let db = temp_db();
        db.increment_view_count(3).unwrap();
        db.increment_view_count(3).unwrap();
        db.increment_view_count(5).unwrap();

        let popular = db.popular(2).unwrap();
        assert_eq!(popular.len(), 2);
        assert_eq!(popular[0].id, 3);
        assert_eq!(popular[0].view_count, 2);
        assert_eq!(popular[1].id, 5);
    }

    #[test]
    fn test_facts_persist_once() {
        let db = temp_db();
        assert!(db.facts_for(1).unwrap().is_empty());

        let texts = vec!["факт один".to_string(), "факт два".to_string()];
        let stored = db.insert_facts_if_absent(1, &texts).unwrap();
        assert_eq!(stored.len(), 2);
        assert!(!stored[0].is_verified);

        // a second writer with different texts must not duplicate
        let again = db
            .insert_facts_if_absent(1, &["другой факт".to_string()])
            .unwrap();
        assert_eq!(again.len(), 2);
        assert_eq!(again[0].fact_text, "факт один");
    }

    #[test]
    fn test_facts_cascade_on_delete() {
        let db = temp_db();
        db.insert_facts_if_absent(7, &["факт".to_string()]).unwrap();
        assert_eq!(db.facts_for(7).unwrap().len(), 1);

        db.delete_leader(7).unwrap();
        assert!(db.facts_for(7).unwrap().is_empty());
    }

    #[test]
    fn test_user_crud() {
        let db = temp_db();
        let user = db
            .create_user("historian", "h@chronika.local", "hash", Some("A Historian"), "user")
            .unwrap();
        assert_eq!(user.role, "user");
        assert!(user.is_active);
        assert!(user.last_login.is_none());

        let by_name = db.get_user_by_username("historian").unwrap().unwrap();
        assert_eq!(by_name.id, user.id);
        let by_email = db.get_user_by_email("h@chronika.local").unwrap().unwrap();
        assert_eq!(by_email.id, user.id);

        db.update_last_login(&user.id).unwrap();
        let reloaded = db.get_user_by_id(&user.id).unwrap().unwrap();
        assert!(reloaded.last_login.is_some());

        // duplicate username rejected by the unique constraint
        assert!(db
            .create_user("historian", "other@chronika.local", "hash", None, "user")
            .is_err());
    }

    #[test]
    fn test_role_permissions() {
        let db = temp_db();
        assert!(db.role_has_permission("admin", "create_leaders"));
        assert!(db.role_has_permission("admin", "view_analytics"));
        assert!(db.role_has_permission("user", "view_facts"));
        assert!(!db.role_has_permission("user", "create_leaders"));
        assert!(!db.role_has_permission("guest", "view_facts"));
        assert!(!db.role_has_permission("nobody", "view_leaders"));
    }

    #[test]
    fn test_activity_log() {
        let db = temp_db();
        db.log_activity("search", None, None, Some(serde_json::json!({"query": "ленин"})), None, None)
            .unwrap();
        db.log_activity("view_leader", Some("u1"), Some(1), None, Some("10.0.0.1"), Some("curl"))
            .unwrap();

        let recent = db.recent_activity(10).unwrap();
        assert_eq!(recent.len(), 2);
        // newest first
        assert_eq!(recent[0].action, "view_leader");
        assert_eq!(recent[0].leader_id, Some(1));
        assert_eq!(recent[1].details.as_ref().unwrap()["query"], "ленин");

        let capped = db.recent_activity(1).unwrap();
        assert_eq!(capped.len(), 1);
    }
}
