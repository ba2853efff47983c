use serde::Deserialize;

use crate::util::is_gateway_address;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostState {
    Up,
    Down,
    #[default]
    #[serde(other)]
    Unknown,
}

impl HostState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn is_up(self) -> bool {
        self == Self::Up
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Port {
    #[serde(default)]
    pub number: Option<u16>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl Port {
    pub fn summary(&self) -> Option<String> {
        let number = self.number?;
        let mut text = format!("{number}/{}", self.protocol.as_deref().unwrap_or("tcp"));
        if let Some(service) = non_blank(self.service.as_deref()) {
            text.push(' ');
            text.push_str(service);
        }
        if let Some(version) = non_blank(self.version.as_deref()) {
            text.push_str(&format!(" ({version})"));
        }
        if let Some(state) = non_blank(self.state.as_deref())
            && !state.eq_ignore_ascii_case("open")
        {
            text.push_str(&format!(" [{state}]"));
        }
        Some(text)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

#[derive(Clone, Debug, Deserialize)]
pub struct Host {
    pub ip: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub state: HostState,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub ports: Vec<Port>,
    #[serde(default)]
    pub scan_time: Option<String>,
}

impl Host {
    pub fn display_name(&self) -> &str {
        non_blank(self.hostname.as_deref()).unwrap_or(&self.ip)
    }

    pub fn is_gateway(&self) -> bool {
        is_gateway_address(&self.ip)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ScanResults {
    #[serde(default)]
    pub scan_id: Option<String>,
    #[serde(default)]
    pub network_range: String,
    #[serde(default)]
    pub total_hosts: usize,
    #[serde(default)]
    pub active_hosts: usize,
    #[serde(default)]
    pub hosts: Option<Vec<Host>>,
    #[serde(default)]
    pub scan_start: Option<String>,
    #[serde(default)]
    pub scan_end: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
}

impl ScanResults {
    pub fn graph_hosts(&self) -> Option<&[Host]> {
        self.hosts
            .as_deref()
            .filter(|hosts| !hosts.is_empty())
    }
}
