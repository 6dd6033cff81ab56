//! In-memory store, used by tests and single-process deployments.

use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    AnswerRecord, GameKind, GameSession, ObjectiveDefinition, ObjectiveProgress, QuestionRef,
    TrophyAward, TrophyDefinition, UserAccount,
};
use crate::store::{
    AccountRepository, AnswerLog, ObjectiveRepository, QuestionCatalog, SessionRepository,
    TrophyRepository,
};
use progression_core::{default_objectives, default_trophies};

#[derive(Default)]
struct Inner {
    accounts: HashMap<Uuid, UserAccount>,
    sessions: HashMap<Uuid, HashMap<String, GameSession>>,
    trophy_defs: Vec<TrophyDefinition>,
    awards: Vec<TrophyAward>,
    objective_defs: Vec<ObjectiveDefinition>,
    progress: HashMap<(Uuid, String, NaiveDate), ObjectiveProgress>,
    questions: HashMap<GameKind, Vec<QuestionRef>>,
    answers: Vec<AnswerRecord>,
}

/// Store backed by process memory behind a single lock.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store seeded with the built-in trophy and objective catalogs.
    pub fn with_default_catalogs() -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.write();
            inner.trophy_defs = default_trophies();
            inner.objective_defs = default_objectives();
        }
        store
    }

    pub fn add_account(&self, account: UserAccount) {
        self.inner.write().accounts.insert(account.id, account);
    }

    pub fn add_questions(&self, questions: impl IntoIterator<Item = QuestionRef>) {
        let mut inner = self.inner.write();
        for q in questions {
            inner.questions.entry(q.kind).or_default().push(q);
        }
    }

    pub fn set_trophy_definitions(&self, defs: Vec<TrophyDefinition>) {
        self.inner.write().trophy_defs = defs;
    }

    pub fn set_objective_definitions(&self, defs: Vec<ObjectiveDefinition>) {
        self.inner.write().objective_defs = defs;
    }
}

impl AccountRepository for MemoryStore {
    fn get_account(&self, user_id: Uuid) -> Result<Option<UserAccount>> {
        Ok(self.inner.read().accounts.get(&user_id).cloned())
    }

    fn save_account(&self, account: &UserAccount) -> Result<()> {
        self.inner
            .write()
            .accounts
            .insert(account.id, account.clone());
        Ok(())
    }

    fn all_accounts(&self) -> Result<Vec<UserAccount>> {
        Ok(self.inner.read().accounts.values().cloned().collect())
    }
}

impl SessionRepository for MemoryStore {
    fn get_session(&self, user_id: Uuid, session_key: &str) -> Result<Option<GameSession>> {
        Ok(self
            .inner
            .read()
            .sessions
            .get(&user_id)
            .and_then(|by_key| by_key.get(session_key))
            .cloned())
    }

    fn save_session(&self, session: &GameSession) -> Result<()> {
        self.inner
            .write()
            .sessions
            .entry(session.user_id)
            .or_default()
            .insert(session.key.clone(), session.clone());
        Ok(())
    }

    fn sessions_for_user(&self, user_id: Uuid) -> Result<Vec<GameSession>> {
        Ok(self
            .inner
            .read()
            .sessions
            .get(&user_id)
            .map(|by_key| by_key.values().cloned().collect())
            .unwrap_or_default())
    }
}

impl TrophyRepository for MemoryStore {
    fn trophy_definitions(&self) -> Result<Vec<TrophyDefinition>> {
        Ok(self.inner.read().trophy_defs.clone())
    }

    fn awards_for_user(&self, user_id: Uuid) -> Result<Vec<TrophyAward>> {
        Ok(self
            .inner
            .read()
            .awards
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    fn insert_award(&self, award: &TrophyAward) -> Result<bool> {
        let mut inner = self.inner.write();
        let exists = inner
            .awards
            .iter()
            .any(|a| a.user_id == award.user_id && a.trophy == award.trophy);
        if exists {
            return Ok(false);
        }
        inner.awards.push(award.clone());
        Ok(true)
    }
}

impl ObjectiveRepository for MemoryStore {
    fn objective_definitions(&self) -> Result<Vec<ObjectiveDefinition>> {
        Ok(self.inner.read().objective_defs.clone())
    }

    fn get_progress(
        &self,
        user_id: Uuid,
        objective_id: &str,
        period: NaiveDate,
    ) -> Result<Option<ObjectiveProgress>> {
        Ok(self
            .inner
            .read()
            .progress
            .get(&(user_id, objective_id.to_string(), period))
            .cloned())
    }

    fn save_progress(&self, progress: &ObjectiveProgress) -> Result<()> {
        self.inner.write().progress.insert(
            (
                progress.user_id,
                progress.objective_id.clone(),
                progress.period,
            ),
            progress.clone(),
        );
        Ok(())
    }
}

impl QuestionCatalog for MemoryStore {
    fn questions_for_game(&self, kind: GameKind) -> Result<Vec<QuestionRef>> {
        Ok(self
            .inner
            .read()
            .questions
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }
}

impl AnswerLog for MemoryStore {
    fn append_answer(&self, record: &AnswerRecord) -> Result<()> {
        self.inner.write().answers.push(record.clone());
        Ok(())
    }

    fn answers_for_user(&self, user_id: Uuid) -> Result<Vec<AnswerRecord>> {
        Ok(self
            .inner
            .read()
            .answers
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}
