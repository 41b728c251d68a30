/// Configuration file read when `-c` is not given
pub const DEFAULT_CONFIG_FILE: &str = "/etc/opi/dns01.toml";

/// Section holding the host identity
pub const HOSTINFO_SECTION: &str = "hostinfo";
pub const CAFILE_KEY: &str = "cafile";
pub const HOSTNAME_KEY: &str = "hostname";
pub const DOMAIN_KEY: &str = "domain";
pub const UNITID_KEY: &str = "unitid";

/// Optional section overriding the authentication server and the unit key
pub const AUTH_SECTION: &str = "auth";
pub const SERVER_KEY: &str = "server";
pub const PRIVATE_KEY_KEY: &str = "private_key";
