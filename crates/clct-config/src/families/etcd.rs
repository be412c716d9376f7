//! etcd option schemas: 2.3, 3.0 and 3.1.

use serde_yaml::Value;

use super::{Family, FamilyOptions, SchemaVariant};
use crate::error::ResolveError;

family_options! {
    /// etcd 3.0 options.
    Etcd3_0 {
        name: String => "ETCD_NAME",
        data_dir: String => "ETCD_DATA_DIR",
        wal_dir: String => "ETCD_WAL_DIR",
        snapshot_count: u64 => "ETCD_SNAPSHOT_COUNT",
        heartbeat_interval: u64 => "ETCD_HEARTBEAT_INTERVAL",
        election_timeout: u64 => "ETCD_ELECTION_TIMEOUT",
        listen_peer_urls: String => "ETCD_LISTEN_PEER_URLS",
        listen_client_urls: String => "ETCD_LISTEN_CLIENT_URLS",
        max_snapshots: u64 => "ETCD_MAX_SNAPSHOTS",
        max_wals: u64 => "ETCD_MAX_WALS",
        cors: String => "ETCD_CORS",
        initial_advertise_peer_urls: String => "ETCD_INITIAL_ADVERTISE_PEER_URLS",
        initial_cluster: String => "ETCD_INITIAL_CLUSTER",
        initial_cluster_state: String => "ETCD_INITIAL_CLUSTER_STATE",
        initial_cluster_token: String => "ETCD_INITIAL_CLUSTER_TOKEN",
        advertise_client_urls: String => "ETCD_ADVERTISE_CLIENT_URLS",
        discovery: String => "ETCD_DISCOVERY",
        discovery_srv: String => "ETCD_DISCOVERY_SRV",
        discovery_fallback: String => "ETCD_DISCOVERY_FALLBACK",
        discovery_proxy: String => "ETCD_DISCOVERY_PROXY",
        strict_reconfig_check: bool => "ETCD_STRICT_RECONFIG_CHECK",
        auto_compaction_retention: u64 => "ETCD_AUTO_COMPACTION_RETENTION",
        proxy: String => "ETCD_PROXY",
        proxy_failure_wait: u64 => "ETCD_PROXY_FAILURE_WAIT",
        proxy_refresh_interval: u64 => "ETCD_PROXY_REFRESH_INTERVAL",
        proxy_dial_timeout: u64 => "ETCD_PROXY_DIAL_TIMEOUT",
        proxy_write_timeout: u64 => "ETCD_PROXY_WRITE_TIMEOUT",
        proxy_read_timeout: u64 => "ETCD_PROXY_READ_TIMEOUT",
        ca_file: String => "ETCD_CA_FILE",
        cert_file: String => "ETCD_CERT_FILE",
        key_file: String => "ETCD_KEY_FILE",
        client_cert_auth: bool => "ETCD_CLIENT_CERT_AUTH",
        trusted_ca_file: String => "ETCD_TRUSTED_CA_FILE",
        auto_tls: bool => "ETCD_AUTO_TLS",
        peer_ca_file: String => "ETCD_PEER_CA_FILE",
        peer_cert_file: String => "ETCD_PEER_CERT_FILE",
        peer_key_file: String => "ETCD_PEER_KEY_FILE",
        peer_client_cert_auth: bool => "ETCD_PEER_CLIENT_CERT_AUTH",
        peer_trusted_ca_file: String => "ETCD_PEER_TRUSTED_CA_FILE",
        peer_auto_tls: bool => "ETCD_PEER_AUTO_TLS",
        debug: bool => "ETCD_DEBUG",
        log_package_levels: String => "ETCD_LOG_PACKAGE_LEVELS",
        force_new_cluster: bool => "ETCD_FORCE_NEW_CLUSTER",
    }
}

family_options! {
    /// etcd 3.1 options: 3.0 plus metrics and log output.
    Etcd3_1 {
        name: String => "ETCD_NAME",
        data_dir: String => "ETCD_DATA_DIR",
        wal_dir: String => "ETCD_WAL_DIR",
        snapshot_count: u64 => "ETCD_SNAPSHOT_COUNT",
        heartbeat_interval: u64 => "ETCD_HEARTBEAT_INTERVAL",
        election_timeout: u64 => "ETCD_ELECTION_TIMEOUT",
        listen_peer_urls: String => "ETCD_LISTEN_PEER_URLS",
        listen_client_urls: String => "ETCD_LISTEN_CLIENT_URLS",
        max_snapshots: u64 => "ETCD_MAX_SNAPSHOTS",
        max_wals: u64 => "ETCD_MAX_WALS",
        cors: String => "ETCD_CORS",
        initial_advertise_peer_urls: String => "ETCD_INITIAL_ADVERTISE_PEER_URLS",
        initial_cluster: String => "ETCD_INITIAL_CLUSTER",
        initial_cluster_state: String => "ETCD_INITIAL_CLUSTER_STATE",
        initial_cluster_token: String => "ETCD_INITIAL_CLUSTER_TOKEN",
        advertise_client_urls: String => "ETCD_ADVERTISE_CLIENT_URLS",
        discovery: String => "ETCD_DISCOVERY",
        discovery_srv: String => "ETCD_DISCOVERY_SRV",
        discovery_fallback: String => "ETCD_DISCOVERY_FALLBACK",
        discovery_proxy: String => "ETCD_DISCOVERY_PROXY",
        strict_reconfig_check: bool => "ETCD_STRICT_RECONFIG_CHECK",
        auto_compaction_retention: u64 => "ETCD_AUTO_COMPACTION_RETENTION",
        proxy: String => "ETCD_PROXY",
        proxy_failure_wait: u64 => "ETCD_PROXY_FAILURE_WAIT",
        proxy_refresh_interval: u64 => "ETCD_PROXY_REFRESH_INTERVAL",
        proxy_dial_timeout: u64 => "ETCD_PROXY_DIAL_TIMEOUT",
        proxy_write_timeout: u64 => "ETCD_PROXY_WRITE_TIMEOUT",
        proxy_read_timeout: u64 => "ETCD_PROXY_READ_TIMEOUT",
        ca_file: String => "ETCD_CA_FILE",
        cert_file: String => "ETCD_CERT_FILE",
        key_file: String => "ETCD_KEY_FILE",
        client_cert_auth: bool => "ETCD_CLIENT_CERT_AUTH",
        trusted_ca_file: String => "ETCD_TRUSTED_CA_FILE",
        auto_tls: bool => "ETCD_AUTO_TLS",
        peer_ca_file: String => "ETCD_PEER_CA_FILE",
        peer_cert_file: String => "ETCD_PEER_CERT_FILE",
        peer_key_file: String => "ETCD_PEER_KEY_FILE",
        peer_client_cert_auth: bool => "ETCD_PEER_CLIENT_CERT_AUTH",
        peer_trusted_ca_file: String => "ETCD_PEER_TRUSTED_CA_FILE",
        peer_auto_tls: bool => "ETCD_PEER_AUTO_TLS",
        debug: bool => "ETCD_DEBUG",
        log_package_levels: String => "ETCD_LOG_PACKAGE_LEVELS",
        force_new_cluster: bool => "ETCD_FORCE_NEW_CLUSTER",
        metrics: String => "ETCD_METRICS",
        log_output: String => "ETCD_LOG_OUTPUT",
    }
}

family_options! {
    /// etcd 2.3 options.
    Etcd2 {
        advertise_client_urls: String => "ETCD_ADVERTISE_CLIENT_URLS",
        ca_file: String => "ETCD_CA_FILE",
        cert_file: String => "ETCD_CERT_FILE",
        client_cert_auth: bool => "ETCD_CLIENT_CERT_AUTH",
        cors: String => "ETCD_CORS",
        data_dir: String => "ETCD_DATA_DIR",
        debug: bool => "ETCD_DEBUG",
        discovery: String => "ETCD_DISCOVERY",
        discovery_fallback: String => "ETCD_DISCOVERY_FALLBACK",
        discovery_srv: String => "ETCD_DISCOVERY_SRV",
        discovery_proxy: String => "ETCD_DISCOVERY_PROXY",
        election_timeout: u64 => "ETCD_ELECTION_TIMEOUT",
        enable_pprof: bool => "ETCD_ENABLE_PPROF",
        force_new_cluster: bool => "ETCD_FORCE_NEW_CLUSTER",
        heartbeat_interval: u64 => "ETCD_HEARTBEAT_INTERVAL",
        initial_advertise_peer_urls: String => "ETCD_INITIAL_ADVERTISE_PEER_URLS",
        initial_cluster: String => "ETCD_INITIAL_CLUSTER",
        initial_cluster_state: String => "ETCD_INITIAL_CLUSTER_STATE",
        initial_cluster_token: String => "ETCD_INITIAL_CLUSTER_TOKEN",
        key_file: String => "ETCD_KEY_FILE",
        listen_client_urls: String => "ETCD_LISTEN_CLIENT_URLS",
        listen_peer_urls: String => "ETCD_LISTEN_PEER_URLS",
        log_package_levels: String => "ETCD_LOG_PACKAGE_LEVELS",
        max_snapshots: u64 => "ETCD_MAX_SNAPSHOTS",
        max_wals: u64 => "ETCD_MAX_WALS",
        name: String => "ETCD_NAME",
        peer_ca_file: String => "ETCD_PEER_CA_FILE",
        peer_cert_file: String => "ETCD_PEER_CERT_FILE",
        peer_key_file: String => "ETCD_PEER_KEY_FILE",
        peer_client_cert_auth: bool => "ETCD_PEER_CLIENT_CERT_AUTH",
        peer_trusted_ca_file: String => "ETCD_PEER_TRUSTED_CA_FILE",
        proxy: String => "ETCD_PROXY",
        proxy_dial_timeout: u64 => "ETCD_PROXY_DIAL_TIMEOUT",
        proxy_failure_wait: u64 => "ETCD_PROXY_FAILURE_WAIT",
        proxy_read_timeout: u64 => "ETCD_PROXY_READ_TIMEOUT",
        proxy_refresh_interval: u64 => "ETCD_PROXY_REFRESH_INTERVAL",
        proxy_write_timeout: u64 => "ETCD_PROXY_WRITE_TIMEOUT",
        snapshot_count: u64 => "ETCD_SNAPSHOT_COUNT",
        strict_reconfig_check: bool => "ETCD_STRICT_RECONFIG_CHECK",
        trusted_ca_file: String => "ETCD_TRUSTED_CA_FILE",
        wal_dir: String => "ETCD_WAL_DIR",
    }
}

const ETCD2_PROXY_MODES: &[&str] = &["on", "off", "readonly"];

/// etcd options in the schema their version selected.
#[derive(Debug, Clone, PartialEq)]
pub enum EtcdOptions {
    V2_3(Etcd2),
    V3_0(Etcd3_0),
    V3_1(Etcd3_1),
}

impl FamilyOptions for EtcdOptions {
    const FAMILY: Family = Family::Etcd;

    fn decode(variant: SchemaVariant, options: Value) -> Result<Self, serde_yaml::Error> {
        match (variant.major, variant.minor) {
            (2, 3) => serde_yaml::from_value(options).map(Self::V2_3),
            (3, 0) => serde_yaml::from_value(options).map(Self::V3_0),
            (3, 1) => serde_yaml::from_value(options).map(Self::V3_1),
            _ => Err(serde::de::Error::custom(format!("no etcd option schema for {variant}"))),
        }
    }

    fn keys(variant: SchemaVariant) -> &'static [&'static str] {
        match (variant.major, variant.minor) {
            (2, _) => Etcd2::KEYS,
            (3, 0) => Etcd3_0::KEYS,
            _ => Etcd3_1::KEYS,
        }
    }

    fn deprecation(key: &str) -> Option<&'static str> {
        match key {
            "ca_file" => Some("ca_file obsoleted by trusted_ca_file and client_cert_auth"),
            "peer_ca_file" => Some("peer_ca_file obsoleted peer_trusted_ca_file and peer_client_cert_auth"),
            _ => None,
        }
    }

    fn validate(&self) -> Vec<(&'static str, ResolveError)> {
        let Self::V2_3(options) = self else {
            return Vec::new();
        };
        match options.proxy.as_deref() {
            Some(mode) if !ETCD2_PROXY_MODES.contains(&mode) => vec![(
                "proxy",
                ResolveError::InvalidValue {
                    family: Family::Etcd,
                    key: "proxy",
                    value: mode.to_string(),
                    allowed: "on, off, readonly",
                },
            )],
            _ => Vec::new(),
        }
    }

    fn env_vars(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::V2_3(options) => options.env_vars(),
            Self::V3_0(options) => options.env_vars(),
            Self::V3_1(options) => options.env_vars(),
        }
    }
}
