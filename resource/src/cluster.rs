//! The resource cluster: every node known to the search, keyed by path.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::action::RestCallAction;
use crate::error::{ResourceError, ResourceResult};
use crate::node::ResourceNode;

#[derive(Debug, Clone, Default)]
pub struct ResourceCluster {
    nodes: BTreeMap<String, ResourceNode>,
}

impl ResourceCluster {
    /// Group the available actions by path into resource nodes.
    pub fn from_actions(actions: Vec<RestCallAction>) -> Self {
        let mut by_path: BTreeMap<String, Vec<RestCallAction>> = BTreeMap::new();
        for action in actions {
            by_path.entry(action.path.to_string()).or_default().push(action);
        }
        let nodes = by_path
            .into_iter()
            .map(|(key, actions)| {
                let path = actions[0].path.clone();
                (key, ResourceNode::new(path, actions))
            })
            .collect();
        Self { nodes }
    }

    pub fn node(&self, key: &str) -> ResourceResult<&ResourceNode> {
        self.nodes
            .get(key)
            .ok_or_else(|| ResourceError::UnknownResource(key.to_string()))
    }

    pub fn keys(&self) -> Vec<&str> {
        self.nodes.keys().map(String::as_str).collect()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ResourceNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// A random node whose key is not in `present`, if any.
    pub fn random_absent<'a>(
        &'a self,
        present: &[String],
        rng: &mut impl Rng,
    ) -> Option<&'a ResourceNode> {
        let absent: Vec<&ResourceNode> = self
            .nodes
            .values()
            .filter(|n| !present.contains(&n.key()))
            .collect();
        absent.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::HttpVerb;
    use crate::path::RestPath;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cluster() -> ResourceCluster {
        ResourceCluster::from_actions(vec![
            RestCallAction::new(HttpVerb::Post, RestPath::parse("/users"), vec![]),
            RestCallAction::new(HttpVerb::Get, RestPath::parse("/users"), vec![]),
            RestCallAction::new(HttpVerb::Get, RestPath::parse("/orders"), vec![]),
        ])
    }

    #[test]
    fn groups_actions_by_path() {
        let cluster = cluster();
        assert_eq!(cluster.len(), 2);
        assert_eq!(cluster.node("/users").unwrap().actions.len(), 2);
        assert!(cluster.node("/ghosts").is_err());
    }

    #[test]
    fn absent_sampling_skips_present_resources() {
        let cluster = cluster();
        let mut rng = StdRng::seed_from_u64(42);
        let node = cluster
            .random_absent(&["/users".to_string()], &mut rng)
            .unwrap();
        assert_eq!(node.key(), "/orders");
        assert!(cluster
            .random_absent(&["/users".to_string(), "/orders".to_string()], &mut rng)
            .is_none());
    }
}
