//! flannel option schemas: 0.5, 0.6 and 0.7.

use serde_yaml::Value;

use super::{Family, FamilyOptions, SchemaVariant};

family_options! {
    /// flannel 0.7 options.
    Flannel0_7 {
        etcd_username: String => "FLANNELD_ETCD_USERNAME",
        etcd_password: String => "FLANNELD_ETCD_PASSWORD",
        etcd_endpoints: String => "FLANNELD_ETCD_ENDPOINTS",
        etcd_cafile: String => "FLANNELD_ETCD_CAFILE",
        etcd_certfile: String => "FLANNELD_ETCD_CERTFILE",
        etcd_keyfile: String => "FLANNELD_ETCD_KEYFILE",
        etcd_prefix: String => "FLANNELD_ETCD_PREFIX",
        ip_masq: String => "FLANNELD_IP_MASQ",
        subnet_file: String => "FLANNELD_SUBNET_FILE",
        interface: String => "FLANNELD_IFACE",
        public_ip: String => "FLANNELD_PUBLIC_IP",
        kube_subnet_mgr: bool => "FLANNEL_KUBE_SUBNET_MGR",
    }
}

family_options! {
    /// flannel 0.6 options: 0.7 without the kube subnet manager.
    Flannel0_6 {
        etcd_username: String => "FLANNELD_ETCD_USERNAME",
        etcd_password: String => "FLANNELD_ETCD_PASSWORD",
        etcd_endpoints: String => "FLANNELD_ETCD_ENDPOINTS",
        etcd_cafile: String => "FLANNELD_ETCD_CAFILE",
        etcd_certfile: String => "FLANNELD_ETCD_CERTFILE",
        etcd_keyfile: String => "FLANNELD_ETCD_KEYFILE",
        etcd_prefix: String => "FLANNELD_ETCD_PREFIX",
        ip_masq: String => "FLANNELD_IP_MASQ",
        subnet_file: String => "FLANNELD_SUBNET_FILE",
        interface: String => "FLANNELD_IFACE",
        public_ip: String => "FLANNELD_PUBLIC_IP",
    }
}

family_options! {
    /// flannel 0.5 options: 0.6 without etcd credentials.
    Flannel0_5 {
        etcd_endpoints: String => "FLANNELD_ETCD_ENDPOINTS",
        etcd_cafile: String => "FLANNELD_ETCD_CAFILE",
        etcd_certfile: String => "FLANNELD_ETCD_CERTFILE",
        etcd_keyfile: String => "FLANNELD_ETCD_KEYFILE",
        etcd_prefix: String => "FLANNELD_ETCD_PREFIX",
        ip_masq: String => "FLANNELD_IP_MASQ",
        subnet_file: String => "FLANNELD_SUBNET_FILE",
        interface: String => "FLANNELD_IFACE",
        public_ip: String => "FLANNELD_PUBLIC_IP",
    }
}

/// flannel options in the schema their version selected.
#[derive(Debug, Clone, PartialEq)]
pub enum FlannelOptions {
    V0_5(Flannel0_5),
    V0_6(Flannel0_6),
    V0_7(Flannel0_7),
}

impl FamilyOptions for FlannelOptions {
    const FAMILY: Family = Family::Flannel;

    fn decode(variant: SchemaVariant, options: Value) -> Result<Self, serde_yaml::Error> {
        match (variant.major, variant.minor) {
            (0, 5) => serde_yaml::from_value(options).map(Self::V0_5),
            (0, 6) => serde_yaml::from_value(options).map(Self::V0_6),
            (0, 7) => serde_yaml::from_value(options).map(Self::V0_7),
            _ => Err(serde::de::Error::custom(format!("no flannel option schema for {variant}"))),
        }
    }

    fn keys(variant: SchemaVariant) -> &'static [&'static str] {
        match variant.minor {
            5 => Flannel0_5::KEYS,
            6 => Flannel0_6::KEYS,
            _ => Flannel0_7::KEYS,
        }
    }

    fn env_vars(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::V0_5(options) => options.env_vars(),
            Self::V0_6(options) => options.env_vars(),
            Self::V0_7(options) => options.env_vars(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::{resolve, Resolution};
    use crate::model::FamilyBlock;
    use clct_core::PositionIndex;

    fn resolve_flannel(yaml: &str) -> Resolution<FlannelOptions> {
        let block: FamilyBlock = serde_yaml::from_str(yaml).unwrap();
        resolve(&block, &PositionIndex::empty())
    }

    #[test]
    fn interface_maps_to_iface() {
        let r = resolve_flannel("version: 0.7.0\ninterface: eth1\nkube_subnet_mgr: true\n");
        let resolved = r.resolved.unwrap();
        assert!(matches!(resolved.options, FlannelOptions::V0_7(_)));
        assert_eq!(
            resolved.options.env_vars(),
            vec![
                ("FLANNELD_IFACE", "eth1".to_string()),
                ("FLANNEL_KUBE_SUBNET_MGR", "true".to_string()),
            ]
        );
        assert!(r.report.is_empty());
    }

    #[test]
    fn credentials_are_ignored_before_0_6() {
        let r = resolve_flannel("version: 0.5.1\netcd_username: admin\netcd_prefix: /coreos.com/network\n");
        let resolved = r.resolved.unwrap();
        assert!(matches!(resolved.options, FlannelOptions::V0_5(_)));
        assert_eq!(
            resolved.options.env_vars(),
            vec![("FLANNELD_ETCD_PREFIX", "/coreos.com/network".to_string())]
        );
        assert_eq!(
            r.report.entries()[0].message,
            "etcd_username is not supported by flannel 0.5; ignored"
        );
    }

    #[test]
    fn newer_minor_uses_0_7_with_warning() {
        let r = resolve_flannel("version: 0.9.1\n");
        assert!(matches!(r.resolved.unwrap().options, FlannelOptions::V0_7(_)));
        assert_eq!(r.report.warnings().count(), 1);
    }

    #[test]
    fn major_one_is_too_new() {
        let r = resolve_flannel("version: 1.0.0\n");
        assert!(r.resolved.is_none());
        assert_eq!(r.report.entries()[0].message, "flannel version is not valid (too new)");
    }
}
