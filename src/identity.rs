use crate::config::HostConfig;

/// Qualifies a bare username with the configured auth domain, falling back to
/// the main domain. Already qualified names and names with no configured
/// domain are returned unchanged.
pub fn to_identity(raw: &str, hosts: &HostConfig) -> String {
    if raw.contains('@') {
        return raw.to_string();
    }

    let domain = hosts
        .authdomain
        .as_deref()
        .or(hosts.domain.as_deref())
        .filter(|d| !d.is_empty());

    match domain {
        Some(domain) => format!("{raw}@{domain}"),
        None => raw.to_string(),
    }
}

/// Domain part of a qualified identity.
pub fn domain_of(identity: &str) -> Option<&str> {
    identity.split_once('@').map(|(_, domain)| domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts(domain: Option<&str>, authdomain: Option<&str>) -> HostConfig {
        HostConfig {
            domain: domain.map(str::to_string),
            authdomain: authdomain.map(str::to_string),
        }
    }

    #[test]
    fn prefers_authdomain() {
        let hosts = hosts(Some("meet.example.org"), Some("auth.meet.example.org"));
        assert_eq!(to_identity("alice", &hosts), "alice@auth.meet.example.org");
    }

    #[test]
    fn falls_back_to_domain() {
        assert_eq!(to_identity("alice", &hosts(Some("meet.example.org"), None)), "alice@meet.example.org");
    }

    #[test]
    fn keeps_qualified_and_unconfigured_names() {
        let hosts_with = hosts(Some("meet.example.org"), None);
        assert_eq!(to_identity("bob@other.org", &hosts_with), "bob@other.org");
        assert_eq!(to_identity("alice", &HostConfig::default()), "alice");
        assert_eq!(to_identity("alice", &hosts(Some(""), None)), "alice");
    }

    #[test]
    fn splits_domain() {
        assert_eq!(domain_of("alice@meet.example.org"), Some("meet.example.org"));
        assert_eq!(domain_of("alice"), None);
    }
}
