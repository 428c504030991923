//! Resource nodes: one per API path, with its actions grouped into verb
//! templates and sampling operations over them.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::action::{HttpVerb, RestCallAction};
use crate::calls::ResourceCalls;
use crate::error::{ResourceError, ResourceResult};
use crate::path::RestPath;

/// A way of exercising one resource: a chain of verbs applied in order.
/// Single-verb templates are independent; POST-prefixed chains first create
/// the resource they then act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbTemplate {
    pub name: String,
    pub verbs: Vec<HttpVerb>,
    pub independent: bool,
}

/// One API path with its available actions and derived verb templates.
#[derive(Debug, Clone)]
pub struct ResourceNode {
    pub path: RestPath,
    pub actions: Vec<RestCallAction>,
    pub templates: Vec<VerbTemplate>,
}

impl ResourceNode {
    /// Build a node from the actions sharing one path.
    pub fn new(path: RestPath, actions: Vec<RestCallAction>) -> Self {
        let mut templates: Vec<VerbTemplate> = actions
            .iter()
            .map(|a| VerbTemplate {
                name: a.verb.to_string(),
                verbs: vec![a.verb],
                independent: true,
            })
            .collect();
        templates.dedup_by(|a, b| a.name == b.name);

        if actions.iter().any(|a| a.verb == HttpVerb::Post) {
            let chained: Vec<VerbTemplate> = actions
                .iter()
                .filter(|a| a.verb != HttpVerb::Post)
                .map(|a| VerbTemplate {
                    name: format!("POST-{}", a.verb),
                    verbs: vec![HttpVerb::Post, a.verb],
                    independent: false,
                })
                .collect();
            templates.extend(chained);
        }

        Self {
            path,
            actions,
            templates,
        }
    }

    /// Stable identity of the node.
    pub fn key(&self) -> String {
        self.path.to_string()
    }

    pub fn action_with_verb(&self, verb: HttpVerb) -> Option<&RestCallAction> {
        self.actions.iter().find(|a| a.verb == verb)
    }

    pub fn template(&self, name: &str) -> Option<&VerbTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Word tokens describing what a POST on this resource creates: the
    /// field names of its body definition.
    pub fn body_definition_tokens(&self) -> Vec<String> {
        self.action_with_verb(HttpVerb::Post)
            .map(|a| a.body_field_tokens())
            .unwrap_or_default()
    }

    /// Word tokens of the declared body type names across all actions.
    pub fn direct_type_tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = self
            .actions
            .iter()
            .flat_map(|a| a.body_type_tokens())
            .collect();
        tokens.sort();
        tokens.dedup();
        tokens
    }

    /// Every declared parameter name of this node (path and query
    /// parameters plus body fields), deduplicated.
    pub fn param_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for action in &self.actions {
            for param in &action.params {
                match param {
                    crate::action::RestParam::Body { fields, .. } => {
                        names.extend(fields.iter().cloned())
                    }
                    other => {
                        if let Some(name) = other.name() {
                            names.push(name.to_string());
                        }
                    }
                }
            }
        }
        names.sort();
        names.dedup();
        names
    }

    /// Sample a group holding a single random action.
    pub fn sample_one_action(&self, rng: &mut impl Rng) -> Option<ResourceCalls> {
        let action = self.actions.choose(rng)?;
        Some(self.materialize(&action.verb.to_string(), &[action.clone()], rng))
    }

    /// Sample a group from a random verb template.
    pub fn sample_any(&self, rng: &mut impl Rng) -> Option<ResourceCalls> {
        let template = self.templates.choose(rng)?.clone();
        self.sample_template(&template.name, rng).ok()
    }

    /// Sample a group from the named template.
    pub fn sample_template(&self, name: &str, rng: &mut impl Rng) -> ResourceResult<ResourceCalls> {
        let template = self
            .template(name)
            .ok_or_else(|| ResourceError::unknown_template(self.key(), name))?;
        let actions: Vec<RestCallAction> = template
            .verbs
            .iter()
            .filter_map(|v| self.action_with_verb(*v).cloned())
            .collect();
        Ok(self.materialize(name, &actions, rng))
    }

    /// Regenerate `current` from a different template, preserving its auth.
    /// Returns `None` when the node offers no alternative.
    pub fn generate_another(
        &self,
        current: &ResourceCalls,
        rng: &mut impl Rng,
    ) -> Option<ResourceCalls> {
        let alternatives: Vec<&VerbTemplate> = self
            .templates
            .iter()
            .filter(|t| t.name != current.template)
            .collect();
        let template = alternatives.choose(rng)?;
        let mut calls = self.sample_template(&template.name, rng).ok()?;
        calls.set_auth(current.auth().map(str::to_string));
        Some(calls)
    }

    fn materialize(
        &self,
        template: &str,
        actions: &[RestCallAction],
        rng: &mut impl Rng,
    ) -> ResourceCalls {
        let nonce: u32 = rng.gen();
        ResourceCalls {
            resource_key: self.key(),
            instance_key: format!("{}#{nonce}", self.key()),
            template: template.to_string(),
            actions: actions.to_vec(),
            db_actions: Vec::new(),
            is_deletable: true,
            structure_mutable: true,
            should_be_before: Vec::new(),
        }
    }
}
