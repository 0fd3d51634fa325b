//! Snapshots of the host and framework a loader runs in.

use std::net::SocketAddr;

use serde::Serialize;

const LOOPBACK_IP: &str = "127.0.0.1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Runtime {
    /// `desktop` on macOS, `local` elsewhere.
    #[serde(rename = "type")]
    pub kind: String,
    pub host: String,
    pub path: String,
    pub ip: String,
    pub platform: String,
    pub os: String,
    pub os_version: String,
    pub language: String,
    pub language_version: String,
    pub runtime: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Framework {
    pub name: String,
    pub version: String,
}

#[must_use]
pub fn describe_framework() -> Framework {
    Framework {
        name: safeload_document::FRAMEWORK_NAME.to_owned(),
        version: safeload_document::FRAMEWORK_VERSION.to_owned(),
    }
}

/// Gather host facts. Never fails; unknown values fall back to placeholders.
pub async fn describe_runtime() -> Runtime {
    let host = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|e| {
            tracing::debug!("hostname lookup failed: {e}");
            "localhost".to_owned()
        });
    let ip = resolve_ip(&host).await;
    let path = std::env::current_dir()
        .map(|p| p.display().to_string())
        .or_else(|_| std::env::var("PWD"))
        .unwrap_or_else(|_| "unknown".to_owned());

    let os = os_name(std::env::consts::OS);
    let os_version = os_info::get().version().to_string();
    let kind = if std::env::consts::OS == "macos" {
        "desktop"
    } else {
        "local"
    };

    let runtime = Runtime {
        kind: kind.to_owned(),
        platform: format!("{os}-{os_version}-{}", std::env::consts::ARCH),
        host,
        path,
        ip,
        os: os.to_owned(),
        os_version,
        language: "rust".to_owned(),
        language_version: option_env!("CARGO_PKG_RUST_VERSION")
            .filter(|v| !v.is_empty())
            .unwrap_or("unknown")
            .to_owned(),
        runtime: "local".to_owned(),
    };
    tracing::debug!(?runtime, "runtime described");
    runtime
}

/// Kernel-style OS name, matching `uname -s` where one exists.
fn os_name(os: &str) -> &str {
    match os {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        other => other,
    }
}

/// Address of `host` via local resolution, then of `localhost`, then loopback.
async fn resolve_ip(host: &str) -> String {
    if let Some(ip) = lookup_first(host).await {
        return ip;
    }
    tracing::debug!(host, "host did not resolve, trying localhost");
    lookup_first("localhost")
        .await
        .unwrap_or_else(|| LOOPBACK_IP.to_owned())
}

async fn lookup_first(host: &str) -> Option<String> {
    let addrs: Vec<SocketAddr> = match tokio::net::lookup_host((host, 0)).await {
        Ok(addrs) => addrs.collect(),
        Err(e) => {
            tracing::debug!(host, "address lookup failed: {e}");
            return None;
        }
    };
    addrs
        .iter()
        .find(|a| a.is_ipv4())
        .or_else(|| addrs.first())
        .map(|a| a.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_is_document_crate() {
        let framework = describe_framework();
        assert_eq!(framework.name, "safeload-document");
        assert!(!framework.version.is_empty());
    }

    #[test]
    fn os_names_match_uname() {
        assert_eq!(os_name("linux"), "Linux");
        assert_eq!(os_name("macos"), "Darwin");
        assert_eq!(os_name("haiku"), "haiku");
    }

    #[tokio::test]
    async fn localhost_resolves() {
        let ip = resolve_ip("localhost").await;
        assert!(ip.parse::<std::net::IpAddr>().is_ok(), "{ip}");
    }

    #[tokio::test]
    async fn unresolvable_host_falls_back() {
        let ip = resolve_ip("host.invalid").await;
        assert!(ip.parse::<std::net::IpAddr>().unwrap().is_loopback());
    }

    #[tokio::test]
    async fn runtime_snapshot_is_populated() {
        let runtime = describe_runtime().await;
        assert!(!runtime.host.is_empty());
        assert!(!runtime.path.is_empty());
        assert_eq!(runtime.language, "rust");
        assert_eq!(runtime.runtime, "local");
        assert!(runtime.kind == "desktop" || runtime.kind == "local");
        assert!(runtime.ip.parse::<std::net::IpAddr>().is_ok());
    }

    #[test]
    fn runtime_serializes_kind_as_type() {
        let runtime = Runtime {
            kind: "local".into(),
            host: "h".into(),
            path: "/".into(),
            ip: "127.0.0.1".into(),
            platform: "Linux-6-x86_64".into(),
            os: "Linux".into(),
            os_version: "6".into(),
            language: "rust".into(),
            language_version: "1.88".into(),
            runtime: "local".into(),
        };
        let json = serde_json::to_value(&runtime).unwrap();
        assert_eq!(json["type"], "local");
        assert!(json.get("kind").is_none());
    }
}
