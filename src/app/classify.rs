use crate::scan::Host;
use crate::util::is_gateway_address;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(in crate::app) enum DeviceCategory {
    Router,
    Desktop,
    Phone,
    Tv,
    Printer,
    Server,
    Device,
}

impl DeviceCategory {
    pub(in crate::app) const ALL: [Self; 7] = [
        Self::Router,
        Self::Desktop,
        Self::Phone,
        Self::Tv,
        Self::Printer,
        Self::Server,
        Self::Device,
    ];

    pub(in crate::app) fn label(self) -> &'static str {
        match self {
            Self::Router => "router",
            Self::Desktop => "desktop",
            Self::Phone => "phone",
            Self::Tv => "tv",
            Self::Printer => "printer",
            Self::Server => "server",
            Self::Device => "device",
        }
    }

    pub(in crate::app) fn glyph(self) -> &'static str {
        match self {
            Self::Router => "📡",
            Self::Desktop => "🖥",
            Self::Phone => "📱",
            Self::Tv => "📺",
            Self::Printer => "🖨",
            Self::Server => "🖴",
            Self::Device => "💻",
        }
    }
}

pub(in crate::app) fn classify(host: &Host) -> DeviceCategory {
    let hostname = host.hostname.as_deref().unwrap_or_default().to_lowercase();
    let vendor = host.vendor.as_deref().unwrap_or_default().to_lowercase();
    let hostname_has = |needles: &[&str]| needles.iter().any(|needle| hostname.contains(needle));

    if hostname_has(&["router"]) || is_gateway_address(&host.ip) {
        DeviceCategory::Router
    } else if hostname_has(&["desktop", "pc"]) {
        DeviceCategory::Desktop
    } else if hostname_has(&["phone", "android", "iphone"]) {
        DeviceCategory::Phone
    } else if hostname_has(&["tv"]) {
        DeviceCategory::Tv
    } else if hostname_has(&["print"]) {
        DeviceCategory::Printer
    } else if hostname_has(&["server"]) {
        DeviceCategory::Server
    } else if vendor.contains("apple") {
        DeviceCategory::Phone
    } else if vendor.contains("samsung") || vendor.contains("lg") {
        DeviceCategory::Tv
    } else {
        DeviceCategory::Device
    }
}
