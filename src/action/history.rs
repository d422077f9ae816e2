use super::Action;

/// Outcome of [`ActionLog::coalesce_or_append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appended {
    /// The trailing entry was updated in place
    Coalesced,
    /// A new entry was pushed
    New,
}

/// Ordered, append-only history of committed actions.
///
/// The log only grows at the end, shrinks from the end, or is cleared.
/// The single exception is [`ActionLog::coalesce_or_append`], which may
/// rewrite the trailing entry while a drag is in progress.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    actions: Vec<Action>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, action: Action) {
        log::debug!("log append: {} (len {})", action.name(), self.actions.len() + 1);
        self.actions.push(action);
    }

    /// Remove the most recent action. Does nothing on an empty log.
    pub fn undo_last(&mut self) -> Option<Action> {
        let popped = self.actions.pop();
        if let Some(action) = &popped {
            log::debug!("log pop: {} (len {})", action.name(), self.actions.len());
        }
        popped
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Update the trailing entry if `matches` accepts it, otherwise append
    /// the action produced by `build`.
    pub fn coalesce_or_append(
        &mut self,
        matches: impl FnOnce(&Action) -> bool,
        update: impl FnOnce(&mut Action),
        build: impl FnOnce() -> Action,
    ) -> Appended {
        match self.actions.last_mut() {
            Some(last) if matches(last) => {
                update(last);
                Appended::Coalesced
            }
            _ => {
                self.append(build());
                Appended::New
            }
        }
    }

    pub fn last(&self) -> Option<&Action> {
        self.actions.last()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }
}

impl<'a> IntoIterator for &'a ActionLog {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

impl FromIterator<Action> for ActionLog {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}
