//! The plan registry and its edit session.

use tracing::{debug, info, warn};

use crate::confirm::Confirm;

use super::error::PlanError;
use super::types::{Plan, PlanDraft, PlanId};
use super::validation::validate_draft;

/// A working copy of one plan, decoupled from the registry until committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    plan_id: PlanId,
    draft: PlanDraft,
}

impl EditSession {
    /// The plan this session will write back to.
    #[must_use]
    pub fn plan_id(&self) -> PlanId {
        self.plan_id
    }

    /// The working copy.
    #[must_use]
    pub fn draft(&self) -> &PlanDraft {
        &self.draft
    }
}

/// Ordered, in-memory collection of plans with at most one open edit session.
///
/// All mutation goes through `&mut self`, so the registry and its session are
/// owned by a single caller at a time.
#[derive(Debug, Clone, Default)]
pub struct PlanRegistry {
    plans: Vec<Plan>,
    next_id: u64,
    editing: Option<EditSession>,
}

impl PlanRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            plans: Vec::new(),
            next_id: 1,
            editing: None,
        }
    }

    /// All plans in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Plan] {
        &self.plans
    }

    /// Get a plan by id.
    #[must_use]
    pub fn get(&self, id: PlanId) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == id)
    }

    /// Check if a plan exists.
    #[must_use]
    pub fn contains(&self, id: PlanId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Iterate over active plans only.
    pub fn active(&self) -> impl Iterator<Item = &Plan> {
        self.plans.iter().filter(|p| p.is_active)
    }

    /// Validate `draft` and append it as a new plan.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::Validation` if the draft is invalid; the registry
    /// is unchanged.
    pub fn create(&mut self, draft: PlanDraft) -> Result<PlanId, PlanError> {
        self.insert(draft, 0)
    }

    /// Like [`create`](Self::create), but with an initial subscriber count.
    ///
    /// Used to seed display data.
    pub fn seed(&mut self, draft: PlanDraft, subscriber_count: u64) -> Result<PlanId, PlanError> {
        self.insert(draft, subscriber_count)
    }

    fn insert(&mut self, draft: PlanDraft, subscriber_count: u64) -> Result<PlanId, PlanError> {
        if let Err(err) = validate_draft(&draft) {
            warn!(error = %err, "rejected plan create");
            return Err(err);
        }

        let id = self.allocate_id();
        info!(plan_id = %id, name = %draft.name, "plan created");
        self.plans.push(Plan::from_draft(id, draft, subscriber_count));
        Ok(id)
    }

    fn allocate_id(&mut self) -> PlanId {
        // Ids are never reused, even after deletes.
        let floor = self.plans.iter().map(|p| p.id.0 + 1).max().unwrap_or(1);
        let id = self.next_id.max(floor);
        self.next_id = id + 1;
        PlanId(id)
    }

    /// Delete a plan after asking `confirm`.
    ///
    /// Returns `Ok(true)` if the plan was removed and `Ok(false)` if the user
    /// declined. Deleting the plan under edit also discards the edit session.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::NotFound` if no plan has this id; nothing is asked
    /// and nothing changes.
    pub fn delete(&mut self, id: PlanId, confirm: &impl Confirm) -> Result<bool, PlanError> {
        let Some(index) = self.position(id) else {
            warn!(plan_id = %id, "delete of unknown plan");
            return Err(PlanError::NotFound { plan_id: id });
        };

        let prompt = format!("Delete plan '{}'? This cannot be undone.", self.plans[index].name);
        if !confirm.confirm(&prompt) {
            debug!(plan_id = %id, "plan delete declined");
            return Ok(false);
        }

        let removed = self.plans.remove(index);
        if self.is_editing(id) {
            debug!(plan_id = %id, "discarding edit session for deleted plan");
            self.editing = None;
        }
        info!(plan_id = %id, name = %removed.name, "plan deleted");
        Ok(true)
    }

    /// Flip a plan's active flag and return the new value.
    ///
    /// If the plan is under edit, the working copy follows the toggle so a
    /// later commit does not undo it.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::NotFound` if no plan has this id.
    pub fn toggle_active(&mut self, id: PlanId) -> Result<bool, PlanError> {
        let plan = self
            .plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PlanError::NotFound { plan_id: id })?;

        plan.is_active = !plan.is_active;
        let is_active = plan.is_active;

        if let Some(session) = self.editing.as_mut().filter(|s| s.plan_id == id) {
            session.draft.is_active = is_active;
        }

        info!(plan_id = %id, is_active, "plan active flag toggled");
        Ok(is_active)
    }

    /// Open an edit session on a clone of the plan's editable fields.
    ///
    /// Replaces any session that was already open.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::NotFound` if no plan has this id; an existing
    /// session is left as it was.
    pub fn begin_edit(&mut self, id: PlanId) -> Result<&PlanDraft, PlanError> {
        let draft = self
            .get(id)
            .map(Plan::to_draft)
            .ok_or(PlanError::NotFound { plan_id: id })?;

        if let Some(previous) = self.editing.take() {
            debug!(
                previous = %previous.plan_id,
                plan_id = %id,
                "replacing open edit session"
            );
        }
        debug!(plan_id = %id, "edit session opened");

        let session = self.editing.insert(EditSession { plan_id: id, draft });
        Ok(&session.draft)
    }

    /// Validate the working copy and write it back to its plan.
    ///
    /// Returns the id of the updated plan, or `None` if no session was open.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::Validation` if the working copy is invalid. The
    /// session stays open so the field can be corrected.
    pub fn commit_edit(&mut self) -> Result<Option<PlanId>, PlanError> {
        let Some(session) = self.editing.as_ref() else {
            return Ok(None);
        };

        if let Err(err) = validate_draft(&session.draft) {
            warn!(plan_id = %session.plan_id, error = %err, "edit commit rejected");
            return Err(err);
        }

        let Some(session) = self.editing.take() else {
            return Ok(None);
        };
        let id = session.plan_id;
        match self.plans.iter_mut().find(|p| p.id == id) {
            Some(plan) => plan.apply_draft(session.draft),
            // Deleting a plan closes its session, so this only happens if the
            // registry was rebuilt underneath us.
            None => return Err(PlanError::NotFound { plan_id: id }),
        }

        info!(plan_id = %id, "plan updated");
        Ok(Some(id))
    }

    /// Discard the working copy without touching the registry.
    ///
    /// Returns `true` if a session was open.
    pub fn cancel_edit(&mut self) -> bool {
        match self.editing.take() {
            Some(session) => {
                debug!(plan_id = %session.plan_id, "edit session cancelled");
                true
            }
            None => false,
        }
    }

    /// The open edit session, if any.
    #[must_use]
    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    /// Check if `id` is the plan under edit.
    #[must_use]
    pub fn is_editing(&self, id: PlanId) -> bool {
        self.editing.as_ref().is_some_and(|s| s.plan_id == id)
    }

    /// Mutable access to the working copy, if a session is open.
    pub fn draft_mut(&mut self) -> Option<&mut PlanDraft> {
        self.editing.as_mut().map(|s| &mut s.draft)
    }

    /// Append a feature to the working copy.
    ///
    /// The text is trimmed; blank input is ignored. Does nothing when no
    /// session is open. Returns `true` if a feature was added.
    pub fn add_feature(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        match self.editing.as_mut() {
            Some(session) => {
                session.draft.features.push(text.to_string());
                debug!(plan_id = %session.plan_id, feature = text, "feature added to draft");
                true
            }
            None => false,
        }
    }

    /// Remove the feature at `index` from the working copy.
    ///
    /// Does nothing when no session is open and returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::FeatureIndex` if `index` is out of bounds; the
    /// feature list is unchanged.
    pub fn remove_feature(&mut self, index: usize) -> Result<Option<String>, PlanError> {
        let Some(session) = self.editing.as_mut() else {
            return Ok(None);
        };

        let len = session.draft.features.len();
        if index >= len {
            return Err(PlanError::FeatureIndex { index, len });
        }

        let removed = session.draft.features.remove(index);
        debug!(plan_id = %session.plan_id, feature = %removed, "feature removed from draft");
        Ok(Some(removed))
    }

    fn position(&self, id: PlanId) -> Option<usize> {
        self.plans.iter().position(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::AutoConfirm;
    use crate::plans::types::AppLimit;

    fn registry_with_one() -> PlanRegistry {
        let mut registry = PlanRegistry::new();
        registry
            .create(
                PlanDraft::new("Starter")
                    .monthly_price(1999)
                    .yearly_price(19990)
                    .features(["A", "B"]),
            )
            .unwrap();
        registry
    }

    fn registry_with_three() -> PlanRegistry {
        let mut registry = registry_with_one();
        registry
            .create(PlanDraft::new("Pro").monthly_price(4999))
            .unwrap();
        registry
            .create(PlanDraft::new("Enterprise").max_apps(AppLimit::Unlimited))
            .unwrap();
        registry
    }

    #[test]
    fn test_create_assigns_sequential_ids_in_order() {
        let registry = registry_with_three();
        let ids: Vec<_> = registry.list().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PlanId(1), PlanId(2), PlanId(3)]);
        let names: Vec<_> = registry.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Starter", "Pro", "Enterprise"]);
        assert!(registry.list().iter().all(|p| p.subscriber_count == 0));
    }

    #[test]
    fn test_create_invalid_leaves_registry_unchanged() {
        let mut registry = registry_with_one();
        let before = registry.list().to_vec();

        let err = registry
            .create(PlanDraft::new("").monthly_price(-500))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(registry.list(), before.as_slice());
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut registry = registry_with_three();
        assert!(registry.delete(PlanId(3), &AutoConfirm::YES).unwrap());
        let id = registry.create(PlanDraft::new("Team")).unwrap();
        assert_eq!(id, PlanId(4));

        let mut ids: Vec<_> = registry.list().iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), registry.len());
    }

    #[test]
    fn test_toggle_scenario() {
        let mut registry = registry_with_one();
        let id = PlanId(1);
        assert_eq!(registry.get(id).unwrap().monthly_price_cents, 1999);
        assert!(registry.get(id).unwrap().is_active);

        assert!(!registry.toggle_active(id).unwrap());
        assert!(!registry.get(id).unwrap().is_active);
        assert!(registry.toggle_active(id).unwrap());
        assert!(registry.get(id).unwrap().is_active);
    }

    #[test]
    fn test_toggle_unknown() {
        let mut registry = registry_with_one();
        let err = registry.toggle_active(PlanId(9)).unwrap_err();
        assert_eq!(err, PlanError::NotFound { plan_id: PlanId(9) });
    }

    #[test]
    fn test_toggle_during_edit_survives_commit() {
        let mut registry = registry_with_one();
        registry.begin_edit(PlanId(1)).unwrap();
        registry.toggle_active(PlanId(1)).unwrap();
        assert!(!registry.editing().unwrap().draft().is_active);

        registry.commit_edit().unwrap();
        assert!(!registry.get(PlanId(1)).unwrap().is_active);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut registry = registry_with_three();
        let before = registry.list().to_vec();

        let asked = std::cell::Cell::new(false);
        let err = registry
            .delete(PlanId(42), &|_: &str| {
                asked.set(true);
                true
            })
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!asked.get());
        assert_eq!(registry.list(), before.as_slice());
    }

    #[test]
    fn test_delete_declined() {
        let mut registry = registry_with_three();
        assert!(!registry.delete(PlanId(2), &AutoConfirm::NO).unwrap());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_delete_confirmed_keeps_order() {
        let mut registry = registry_with_three();
        assert!(registry.delete(PlanId(2), &AutoConfirm::YES).unwrap());
        let names: Vec<_> = registry.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Starter", "Enterprise"]);
    }

    #[test]
    fn test_delete_plan_under_edit_closes_session() {
        let mut registry = registry_with_three();
        registry.begin_edit(PlanId(2)).unwrap();
        registry.delete(PlanId(2), &AutoConfirm::YES).unwrap();
        assert!(registry.editing().is_none());
        assert_eq!(registry.commit_edit().unwrap(), None);
    }

    #[test]
    fn test_delete_other_plan_keeps_session() {
        let mut registry = registry_with_three();
        registry.begin_edit(PlanId(1)).unwrap();
        registry.delete(PlanId(3), &AutoConfirm::YES).unwrap();
        assert!(registry.is_editing(PlanId(1)));
    }

    #[test]
    fn test_begin_then_cancel_leaves_entry_unchanged() {
        let mut registry = registry_with_one();
        let before = registry.get(PlanId(1)).unwrap().clone();

        registry.begin_edit(PlanId(1)).unwrap();
        let draft = registry.draft_mut().unwrap();
        draft.name = "Changed".to_string();
        draft.monthly_price_cents = 1;
        registry.add_feature("C");

        assert!(registry.cancel_edit());
        assert_eq!(registry.get(PlanId(1)).unwrap(), &before);
        assert!(registry.editing().is_none());
    }

    #[test]
    fn test_commit_replaces_only_target() {
        let mut registry = registry_with_three();
        let before = registry.list().to_vec();

        registry.begin_edit(PlanId(2)).unwrap();
        let draft = registry.draft_mut().unwrap();
        draft.name = "Professional".to_string();
        draft.yearly_price_cents = 49990;
        registry.add_feature("Priority support");

        assert_eq!(registry.commit_edit().unwrap(), Some(PlanId(2)));
        assert!(registry.editing().is_none());
        assert!(!registry.cancel_edit());

        let after = registry.list();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].id, PlanId(2));
        assert_eq!(after[1].name, "Professional");
        assert_eq!(after[1].yearly_price_cents, 49990);
        assert_eq!(after[1].features, vec!["Priority support".to_string()]);
    }

    #[test]
    fn test_commit_preserves_subscriber_count() {
        let mut registry = PlanRegistry::new();
        let id = registry.seed(PlanDraft::new("Starter"), 120).unwrap();
        registry.begin_edit(id).unwrap();
        registry.draft_mut().unwrap().name = "Basic".to_string();
        registry.commit_edit().unwrap();
        assert_eq!(registry.get(id).unwrap().subscriber_count, 120);
    }

    #[test]
    fn test_commit_invalid_keeps_session_open() {
        let mut registry = registry_with_one();
        let before = registry.get(PlanId(1)).unwrap().clone();

        registry.begin_edit(PlanId(1)).unwrap();
        registry.draft_mut().unwrap().name = String::new();

        let err = registry.commit_edit().unwrap_err();
        assert_eq!(err.field(), Some("name"));
        assert!(registry.is_editing(PlanId(1)));
        assert_eq!(registry.get(PlanId(1)).unwrap(), &before);

        registry.draft_mut().unwrap().name = "Fixed".to_string();
        assert_eq!(registry.commit_edit().unwrap(), Some(PlanId(1)));
        assert_eq!(registry.get(PlanId(1)).unwrap().name, "Fixed");
    }

    #[test]
    fn test_commit_without_session() {
        let mut registry = registry_with_one();
        assert_eq!(registry.commit_edit().unwrap(), None);
    }

    #[test]
    fn test_begin_edit_unknown() {
        let mut registry = registry_with_one();
        let before = registry.list().to_vec();

        let err = registry.begin_edit(PlanId(2)).unwrap_err();
        assert_eq!(err, PlanError::NotFound { plan_id: PlanId(2) });
        assert_eq!(registry.list(), before.as_slice());
        assert!(registry.editing().is_none());
    }

    #[test]
    fn test_begin_edit_unknown_keeps_existing_session() {
        let mut registry = registry_with_one();
        registry.begin_edit(PlanId(1)).unwrap();
        assert!(registry.begin_edit(PlanId(5)).is_err());
        assert!(registry.is_editing(PlanId(1)));
    }

    #[test]
    fn test_begin_edit_replaces_session() {
        let mut registry = registry_with_three();
        registry.begin_edit(PlanId(1)).unwrap();
        registry.draft_mut().unwrap().name = "Discarded".to_string();

        let draft = registry.begin_edit(PlanId(3)).unwrap();
        assert_eq!(draft.name, "Enterprise");
        assert_eq!(registry.editing().unwrap().plan_id(), PlanId(3));

        registry.commit_edit().unwrap();
        assert_eq!(registry.get(PlanId(1)).unwrap().name, "Starter");
    }

    #[test]
    fn test_remove_feature_out_of_bounds() {
        let mut registry = registry_with_one();
        registry.begin_edit(PlanId(1)).unwrap();

        let err = registry.remove_feature(5).unwrap_err();
        assert_eq!(err, PlanError::FeatureIndex { index: 5, len: 2 });
        assert_eq!(
            registry.editing().unwrap().draft().features,
            vec!["A".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn test_remove_feature_in_bounds() {
        let mut registry = registry_with_one();
        registry.begin_edit(PlanId(1)).unwrap();
        assert_eq!(registry.remove_feature(0).unwrap(), Some("A".to_string()));
        assert_eq!(
            registry.editing().unwrap().draft().features,
            vec!["B".to_string()]
        );
        // Registry untouched until commit
        assert_eq!(registry.get(PlanId(1)).unwrap().features.len(), 2);
    }

    #[test]
    fn test_feature_edits_without_session_are_noops() {
        let mut registry = registry_with_one();
        let before = registry.list().to_vec();
        assert!(!registry.add_feature("C"));
        assert_eq!(registry.remove_feature(0).unwrap(), None);
        assert_eq!(registry.remove_feature(99).unwrap(), None);
        assert_eq!(registry.list(), before.as_slice());
    }

    #[test]
    fn test_add_feature_trims_and_ignores_blank() {
        let mut registry = registry_with_one();
        registry.begin_edit(PlanId(1)).unwrap();
        assert!(registry.add_feature("  SSO  "));
        assert!(!registry.add_feature("   "));
        assert_eq!(
            registry.editing().unwrap().draft().features,
            vec!["A".to_string(), "B".to_string(), "SSO".to_string()]
        );
    }

    #[test]
    fn test_active_iterator() {
        let mut registry = registry_with_three();
        registry.toggle_active(PlanId(2)).unwrap();
        let active: Vec<_> = registry.active().map(|p| p.id).collect();
        assert_eq!(active, vec![PlanId(1), PlanId(3)]);
    }
}
