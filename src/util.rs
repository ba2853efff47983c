pub const GATEWAY_SUFFIX: &str = ".1";

pub fn is_gateway_address(ip: &str) -> bool {
    ip.ends_with(GATEWAY_SUFFIX)
}

pub fn short_ip(ip: &str) -> &str {
    match ip.rmatch_indices('.').nth(1) {
        Some((index, _)) => &ip[index + 1..],
        None => ip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_suffix_matches_only_the_last_octet() {
        assert!(is_gateway_address("192.168.1.1"));
        assert!(is_gateway_address("10.0.0.1"));
        assert!(!is_gateway_address("192.168.1.11"));
        assert!(!is_gateway_address("192.168.1.21"));
        assert!(!is_gateway_address("192.168.1.5"));
    }

    #[test]
    fn short_ip_keeps_last_two_components() {
        assert_eq!(short_ip("192.168.1.5"), "1.5");
        assert_eq!(short_ip("10.0.0.254"), "0.254");
        assert_eq!(short_ip("1.2"), "1.2");
        assert_eq!(short_ip("localhost"), "localhost");
    }
}
