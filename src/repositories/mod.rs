pub mod exercise_repo;
pub mod operation_store;
pub mod progress_repo;
pub mod routine_repo;
pub mod session_repo;
pub mod user_repo;

pub use exercise_repo::ExerciseRepository;
pub use operation_store::OperationStore;
pub use progress_repo::ProgressRepository;
pub use routine_repo::RoutineRepository;
pub use session_repo::SessionRepository;
pub use user_repo::UserRepository;

use rusqlite::types::Value;

/// `AND`-joined predicates for a `SELECT * FROM <table>` listing.
#[derive(Default)]
pub(crate) struct Conditions {
    clauses: Vec<&'static str>,
    params: Vec<Value>,
}

impl Conditions {
    pub(crate) fn push(&mut self, clause: &'static str, value: impl Into<Value>) {
        self.clauses.push(clause);
        self.params.push(value.into());
    }

    /// Builds the query in insertion (id) order.
    pub(crate) fn into_query(self, table: &str) -> (String, Vec<Value>) {
        let mut sql = format!("SELECT * FROM {}", table);
        if !self.clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id");
        (sql, self.params)
    }
}
