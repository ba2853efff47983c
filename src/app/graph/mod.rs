use crate::scan::HostState;

use super::classify::DeviceCategory;

mod build;
mod interaction;
mod view;

pub(in crate::app) use build::build_topology;
pub(in crate::app) use view::port_badge_label;

#[derive(Clone, Debug)]
pub(in crate::app) struct TopologyNode {
    pub id: String,
    pub label: String,
    pub ip: String,
    pub state: HostState,
    pub open_port_count: usize,
    pub ports: Vec<String>,
    pub vendor: Option<String>,
    pub os: Option<String>,
    pub mac_address: Option<String>,
    pub last_seen: Option<String>,
    pub is_router: bool,
    pub category: DeviceCategory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) struct Link {
    pub source: usize,
    pub target: usize,
}

pub(in crate::app) struct TopologyGraph {
    pub nodes: Vec<TopologyNode>,
    pub links: Vec<Link>,
    pub router_index: usize,
}

impl TopologyGraph {
    pub(in crate::app) fn router_id(&self) -> &str {
        &self.nodes[self.router_index].id
    }

    pub(in crate::app) fn edge_pairs(&self) -> Vec<(usize, usize)> {
        self.links
            .iter()
            .map(|link| (link.source, link.target))
            .collect()
    }
}
