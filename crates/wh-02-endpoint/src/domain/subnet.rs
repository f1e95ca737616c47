//! Subnet predicates over [`Address`].

use super::address::Address;
use crate::{EndpointError, Result};

fn check_cidr(addr: &Address, cidr: u32) -> Result<u32> {
    let bits = addr.family().bit_width();
    if cidr > bits {
        return Err(EndpointError::InvalidArgument(format!(
            "CIDR {cidr} is between 0 and {bits}"
        )));
    }
    Ok(bits)
}

/// Compare the leading `prefix` bits of two equal-length byte strings.
fn prefix_eq(a: &[u8], b: &[u8], prefix: u32) -> bool {
    let prefix_bytes = (prefix / 8) as usize;
    let remaining_bits = prefix % 8;

    if a[..prefix_bytes] != b[..prefix_bytes] {
        return false;
    }

    // Compare partial byte if prefix doesn't align to byte boundary
    if remaining_bits > 0 {
        let mask_byte = 0xFFu8 << (8 - remaining_bits);
        if (a[prefix_bytes] & mask_byte) != (b[prefix_bytes] & mask_byte) {
            return false;
        }
    }

    true
}

/// Whether `a` and `b` share their leading `cidr` bits. Ports are ignored.
///
/// # Errors
///
/// `InvalidArgument` if the families differ or `cidr` exceeds the address width.
pub fn same_subnet(a: &Address, b: &Address, cidr: u32) -> Result<bool> {
    if a.family() != b.family() {
        return Err(EndpointError::InvalidArgument(
            "addresses are not of the same family".into(),
        ));
    }
    check_cidr(a, cidr)?;
    Ok(prefix_eq(a.ip_bytes(), b.ip_bytes(), cidr))
}

/// Host number `index` inside the `/cidr` network containing `a`.
///
/// The port of `a` is kept. Returns `Ok(None)` when `index` is 0 (the network
/// address) or above `2^(bits - cidr) - 2` (the broadcast address and beyond).
///
/// # Errors
///
/// `InvalidArgument` if `cidr` exceeds the address width.
pub fn subnet_id(a: &Address, cidr: u32, index: u128) -> Result<Option<Address>> {
    let bits = check_cidr(a, cidr)?;
    let host_bits = bits - cidr;

    let host_mask = if host_bits == 128 {
        u128::MAX
    } else {
        (1u128 << host_bits) - 1
    };
    let max_index = host_mask.saturating_sub(1);
    if index == 0 || index > max_index {
        return Ok(None);
    }

    Ok(Some(match *a {
        Address::V4 { ip, port } => {
            let net = u128::from(u32::from_be_bytes(ip)) & !host_mask;
            // index <= 2^32 - 2, so the value fits in 32 bits
            let value = (net | index) as u32;
            Address::V4 {
                ip: value.to_be_bytes(),
                port,
            }
        }
        Address::V6 { ip, port } => {
            let net = u128::from_be_bytes(ip) & !host_mask;
            Address::V6 {
                ip: (net | index).to_be_bytes(),
                port,
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_subnet_24_vs_25() {
        let a = Address::v4(192, 0, 2, 5, 0);
        let b = Address::v4(192, 0, 2, 200, 0);
        assert!(same_subnet(&a, &b, 24).unwrap());
        assert!(!same_subnet(&a, &b, 25).unwrap());
    }

    #[test]
    fn test_same_subnet_edges() {
        let a = Address::v4(10, 0, 0, 1, 1);
        let b = Address::v4(172, 16, 0, 1, 2);
        assert!(same_subnet(&a, &b, 0).unwrap());
        assert!(same_subnet(&a, &a.with_port(9), 32).unwrap());
        assert!(!same_subnet(&a, &b, 32).unwrap());
    }

    #[test]
    fn test_same_subnet_ipv6() {
        let mut x = [0u8; 16];
        x[0] = 0xfd;
        let mut y = x;
        y[8] = 0x80;
        let (a, b) = (Address::v6(x, 0), Address::v6(y, 0));
        assert!(same_subnet(&a, &b, 64).unwrap());
        assert!(!same_subnet(&a, &b, 65).unwrap());
    }

    #[test]
    fn test_same_subnet_rejects_bad_args() {
        let v4 = Address::v4(10, 0, 0, 1, 0);
        let v6 = Address::v6([0; 16], 0);
        assert!(matches!(
            same_subnet(&v4, &v6, 8),
            Err(EndpointError::InvalidArgument(_))
        ));
        assert!(same_subnet(&v4, &v4, 33).is_err());
        assert!(same_subnet(&v6, &v6, 128).is_ok());
        assert!(same_subnet(&v6, &v6, 129).is_err());
    }

    #[test]
    fn test_subnet_id_ipv4() {
        let base = Address::v4(10, 0, 0, 77, 62096);
        assert_eq!(
            subnet_id(&base, 24, 1).unwrap(),
            Some(Address::v4(10, 0, 0, 1, 62096))
        );
        assert_eq!(
            subnet_id(&base, 24, 254).unwrap(),
            Some(Address::v4(10, 0, 0, 254, 62096))
        );
        assert_eq!(subnet_id(&base, 24, 0).unwrap(), None);
        assert_eq!(subnet_id(&base, 24, 255).unwrap(), None);
        assert_eq!(subnet_id(&base, 32, 1).unwrap(), None);
        assert_eq!(subnet_id(&base, 31, 1).unwrap(), None);
        assert!(subnet_id(&base, 33, 1).is_err());
    }

    #[test]
    fn test_subnet_id_crosses_octets() {
        let base = Address::v4(10, 1, 2, 3, 0);
        assert_eq!(
            subnet_id(&base, 16, 0x0102).unwrap(),
            Some(Address::v4(10, 1, 1, 2, 0))
        );
        assert!(subnet_id(&base, 0, u128::from(u32::MAX) - 1).unwrap().is_some());
        assert!(subnet_id(&base, 0, u128::from(u32::MAX)).unwrap().is_none());
    }

    #[test]
    fn test_subnet_id_ipv6() {
        let mut net = [0u8; 16];
        net[0] = 0xfd;
        net[15] = 0x42;
        let base = Address::v6(net, 1);

        let mut expected = [0u8; 16];
        expected[0] = 0xfd;
        expected[15] = 0x05;
        assert_eq!(subnet_id(&base, 64, 5).unwrap(), Some(Address::v6(expected, 1)));
        assert!(subnet_id(&base, 0, u128::MAX - 1).unwrap().is_some());
        assert!(subnet_id(&base, 0, u128::MAX).unwrap().is_none());
    }
}
