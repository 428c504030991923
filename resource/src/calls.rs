//! One semantic operation on a resource: ordered REST actions plus the
//! database actions needed to set up state for them.

use restgen_core::CallSnapshot;
use restgen_sql::DbAction;

use crate::action::RestCallAction;

#[derive(Debug, Clone)]
pub struct ResourceCalls {
    /// Path of the owning resource node.
    pub resource_key: String,
    /// Identity of this concrete sampled instance.
    pub instance_key: String,
    /// Name of the verb template the calls were sampled from.
    pub template: String,
    pub actions: Vec<RestCallAction>,
    pub db_actions: Vec<DbAction>,
    /// Whether a structural mutation may remove this group.
    pub is_deletable: bool,
    /// Whether a structural mutation may touch this group at all.
    pub structure_mutable: bool,
    /// Resource keys this group should precede, as ordering hints for the
    /// mutator.
    pub should_be_before: Vec<String>,
}

impl ResourceCalls {
    pub fn action_names(&self) -> Vec<String> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    /// Propagate one auth name to every action of the group.
    pub fn set_auth(&mut self, auth: Option<String>) {
        for action in &mut self.actions {
            action.auth = auth.clone();
        }
    }

    pub fn auth(&self) -> Option<&str> {
        self.actions.first().and_then(|a| a.auth.as_deref())
    }

    /// Immutable structural snapshot used for post-mutation diffing.
    pub fn snapshot(&self) -> CallSnapshot {
        CallSnapshot {
            resource_key: self.resource_key.clone(),
            instance_key: self.instance_key.clone(),
            template: self.template.clone(),
            action_names: self.action_names(),
        }
    }
}
