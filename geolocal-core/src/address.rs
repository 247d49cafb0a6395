//! Address text parsing and integer conversion.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use geolocal_schema::Family;
use ipnet::IpNet;

use crate::error::{TableError, TableResult};

/// Parse an address or CIDR block.
///
/// A CIDR block resolves to its network address, so `10.1.2.3/8` reads as
/// `10.0.0.0`.
pub fn parse_endpoint(text: &str) -> TableResult<IpAddr> {
    let trimmed = text.trim();

    if trimmed.contains('/') {
        return trimmed
            .parse::<IpNet>()
            .map(|net| net.network())
            .map_err(|_| TableError::Parse(text.to_string()));
    }

    trimmed
        .parse::<IpAddr>()
        .map_err(|_| TableError::Parse(text.to_string()))
}

/// Parse family text such as `4`, `v6` or `ipv4`.
pub fn parse_family(text: &str) -> TableResult<Family> {
    text.parse::<Family>()
        .map_err(|e| TableError::UnknownFamily(e.0))
}

/// Integer value of an address (MSB = first octet).
pub fn to_int(addr: &IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u32::from(*v4) as u128,
        IpAddr::V6(v6) => u128::from(*v6),
    }
}

/// Address for an integer value of the given family.
/// V4 values wider than 32 bits are truncated to the low 32 bits.
pub fn from_int(family: Family, value: u128) -> IpAddr {
    match family {
        Family::V4 => IpAddr::V4(Ipv4Addr::from(value as u32)),
        Family::V6 => IpAddr::V6(Ipv6Addr::from(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_v4() {
        let addr = parse_endpoint("1.0.0.5").unwrap();
        assert_eq!(to_int(&addr), 0x01000005);
    }

    #[test]
    fn test_parse_v6() {
        let addr = parse_endpoint("::1").unwrap();
        assert_eq!(Family::of(&addr), Family::V6);
        assert_eq!(to_int(&addr), 1);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(parse_endpoint("  10.0.0.1\t").is_ok());
    }

    #[test]
    fn test_parse_cidr_uses_network_address() {
        let addr = parse_endpoint("10.1.2.3/8").unwrap();
        assert_eq!(addr, "10.0.0.0".parse::<IpAddr>().unwrap());

        let addr = parse_endpoint("2001:db8::1/32").unwrap();
        assert_eq!(addr, "2001:db8::".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            parse_endpoint("not-an-ip"),
            Err(TableError::Parse("not-an-ip".to_string()))
        );
        assert!(parse_endpoint("10.0.0.0/33").is_err());
        assert!(parse_endpoint("256.0.0.1").is_err());
        assert!(parse_endpoint("").is_err());
    }

    #[test]
    fn test_parse_family() {
        assert_eq!(parse_family("6"), Ok(Family::V6));
        assert_eq!(
            parse_family("ipx"),
            Err(TableError::UnknownFamily("ipx".to_string()))
        );
    }

    #[test]
    fn test_int_conversion_inverse() {
        let v4: IpAddr = "192.168.1.1".parse().unwrap();
        assert_eq!(from_int(Family::V4, to_int(&v4)), v4);

        let v6: IpAddr = "2001:db8::ff".parse().unwrap();
        assert_eq!(from_int(Family::V6, to_int(&v6)), v6);
    }
}
