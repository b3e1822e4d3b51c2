use chrono::{DateTime, Utc};
use pulse_core::{HostIdentity, Uptime};
use sysinfo::System;
use tracing::warn;

/// Hostname, primary local IP and OS string.
pub fn identity() -> HostIdentity {
    let ip = match local_ip_address::local_ip() {
        Ok(ip) => Some(ip),
        Err(e) => {
            warn!("Cannot determine local IP address: {e}");
            None
        }
    };

    HostIdentity {
        hostname: System::host_name().unwrap_or_else(|| "localhost".to_string()),
        ip,
        os: os_string(std::env::consts::OS, System::kernel_version().as_deref()),
    }
}

/// `"<system> <release>"`, e.g. `"Linux 6.8.0-45-generic"`.
pub fn os_string(os: &str, release: Option<&str>) -> String {
    let system = match os {
        "linux"   => "Linux",
        "macos"   => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "android" => "Android",
        other     => other,
    };
    match release.map(str::trim).filter(|r| !r.is_empty()) {
        Some(release) => format!("{system} {release}"),
        None => system.to_string(),
    }
}

/// Time since boot, truncated to whole seconds.
pub fn uptime() -> Uptime {
    uptime_since(System::boot_time(), Utc::now())
}

pub fn uptime_since(boot_time: u64, now: DateTime<Utc>) -> Uptime {
    let Some(boot) = i64::try_from(boot_time)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
    else {
        return Uptime::default();
    };
    Uptime((now - boot).num_seconds().max(0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_string_formats() {
        assert_eq!(os_string("linux", Some("6.8.0")), "Linux 6.8.0");
        assert_eq!(os_string("macos", Some(" 23.4.0 ")), "Darwin 23.4.0");
        assert_eq!(os_string("windows", None), "Windows");
        assert_eq!(os_string("haiku", Some("")), "haiku");
    }

    #[test]
    fn uptime_truncates_sub_seconds() {
        let now = DateTime::from_timestamp(1_000_090, 999_000_000).unwrap();
        assert_eq!(uptime_since(1_000_000, now), Uptime(90));
    }

    #[test]
    fn boot_in_the_future_is_zero() {
        let now = DateTime::from_timestamp(100, 0).unwrap();
        assert_eq!(uptime_since(200, now), Uptime(0));
    }
}
