use std::collections::HashMap;

use crate::scan::Host;

use super::super::classify::classify;
use super::{Link, TopologyGraph, TopologyNode};

fn select_router(hosts: &[Host]) -> Option<usize> {
    if hosts.is_empty() {
        return None;
    }
    Some(hosts.iter().position(Host::is_gateway).unwrap_or(0))
}

fn make_topology_node(host: &Host, is_router: bool) -> TopologyNode {
    TopologyNode {
        id: host.ip.clone(),
        label: host.display_name().to_owned(),
        ip: host.ip.clone(),
        state: host.state,
        open_port_count: host.ports.len(),
        ports: host.ports.iter().filter_map(|port| port.summary()).collect(),
        vendor: host.vendor.clone(),
        os: host.os.clone(),
        mac_address: host.mac_address.clone(),
        last_seen: host.scan_time.clone(),
        is_router,
        category: classify(host),
    }
}

fn collect_links(router_index: usize, node_count: usize) -> Vec<Link> {
    (0..node_count)
        .filter(|&index| index != router_index)
        .map(|target| Link {
            source: router_index,
            target,
        })
        .collect()
}

pub(in crate::app) fn build_topology(hosts: &[Host]) -> Option<TopologyGraph> {
    let router_host = select_router(hosts)?;
    let router_ip = hosts[router_host].ip.as_str();

    let mut nodes = Vec::with_capacity(hosts.len());
    let mut index_by_id = HashMap::with_capacity(hosts.len());
    for host in hosts {
        if index_by_id.contains_key(&host.ip) {
            tracing::warn!(ip = %host.ip, "skipping duplicate host address");
            continue;
        }

        index_by_id.insert(host.ip.clone(), nodes.len());
        nodes.push(make_topology_node(host, host.ip == router_ip));
    }

    let router_index = index_by_id.get(router_ip).copied()?;
    let links = collect_links(router_index, nodes.len());

    Some(TopologyGraph {
        nodes,
        links,
        router_index,
    })
}
