use indexmap::IndexMap;
use pulse_core::{DiskUsage, PulseError, Result};
use std::io;
use std::path::PathBuf;
use sysinfo::Disks;
use tracing::debug;

/// One mounted partition as enumerated by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Device path, e.g. `/dev/nvme0n1p2`.
    pub device: String,
    pub mount_point: PathBuf,
    /// Space as reported at enumeration time; used where no direct measurement exists.
    pub total_space: u64,
    pub available_space: u64,
}

/// Enumerate mounted partitions.
pub fn partitions() -> Vec<Partition> {
    let disks = Disks::new_with_refreshed_list();
    disks
        .iter()
        .map(|d| Partition {
            device:          d.name().to_string_lossy().into_owned(),
            mount_point:     d.mount_point().to_path_buf(),
            total_space:     d.total_space(),
            available_space: d.available_space(),
        })
        .collect()
}

/// Usage of every partition, keyed by device path.
///
/// Partitions `measure` is not permitted to read are left out; any other
/// failure fails the whole map. A repeated device keeps its first
/// position and takes the later value.
pub fn usage_map<F>(partitions: &[Partition], mut measure: F) -> Result<IndexMap<String, DiskUsage>>
where
    F: FnMut(&Partition) -> io::Result<DiskUsage>,
{
    let mut map = IndexMap::with_capacity(partitions.len());
    for partition in partitions {
        match measure(partition) {
            Ok(usage) => {
                map.insert(partition.device.clone(), usage);
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                debug!("Skipping '{}': {e}", partition.mount_point.display());
            }
            Err(e) => {
                return Err(PulseError::System(format!(
                    "disk usage for '{}': {e}",
                    partition.mount_point.display()
                )));
            }
        }
    }
    Ok(map)
}

/// Read usage for a mount point straight from the filesystem.
#[cfg(unix)]
pub fn measure(partition: &Partition) -> io::Result<DiskUsage> {
    use nix::sys::statvfs::statvfs;

    let st = statvfs(partition.mount_point.as_path()).map_err(io::Error::from)?;
    let frsize = st.fragment_size() as u64;
    let blocks = st.blocks() as u64;

    Ok(DiskUsage {
        total: blocks * frsize,
        free:  st.blocks_available() as u64 * frsize,
        used:  blocks.saturating_sub(st.blocks_free() as u64) * frsize,
    })
}

/// Usage as reported at enumeration time.
#[cfg(not(unix))]
pub fn measure(partition: &Partition) -> io::Result<DiskUsage> {
    Ok(DiskUsage {
        total: partition.total_space,
        free:  partition.available_space,
        used:  partition.total_space.saturating_sub(partition.available_space),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(device: &str, mount: &str) -> Partition {
        Partition {
            device:          device.to_string(),
            mount_point:     PathBuf::from(mount),
            total_space:     100,
            available_space: 40,
        }
    }

    fn usage(total: u64) -> DiskUsage {
        DiskUsage { used: total / 2, free: total / 2, total }
    }

    #[test]
    fn permission_denied_partition_is_omitted() {
        let parts = [part("/dev/sda1", "/"), part("/dev/sdb1", "/secret"), part("/dev/sdc1", "/data")];
        let map = usage_map(&parts, |p| {
            if p.mount_point == PathBuf::from("/secret") {
                Err(io::Error::from(io::ErrorKind::PermissionDenied))
            } else {
                Ok(usage(10))
            }
        })
        .unwrap();

        assert_eq!(map.len(), 2);
        assert!(!map.contains_key("/dev/sdb1"));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["/dev/sda1", "/dev/sdc1"]);
    }

    #[test]
    fn other_measure_errors_fail_the_map() {
        let parts = [part("/dev/sda1", "/")];
        let err = usage_map(&parts, |_| Err(io::Error::other("boom"))).unwrap_err();
        assert!(matches!(err, PulseError::System(_)));
    }

    #[test]
    fn repeated_device_keeps_position_and_takes_last_value() {
        let parts = [part("/dev/sda1", "/"), part("/dev/sdb1", "/home"), part("/dev/sda1", "/mnt/bind")];
        let mut calls = 0u64;
        let map = usage_map(&parts, |_| {
            calls += 1;
            Ok(usage(calls * 10))
        })
        .unwrap();

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["/dev/sda1", "/dev/sdb1"]);
        assert_eq!(map["/dev/sda1"].total, 30);
    }

    #[cfg(unix)]
    #[test]
    fn measure_reads_root() {
        let root = part("rootfs", "/");
        let usage = measure(&root).unwrap();
        assert!(usage.total > 0);
        assert!(usage.used <= usage.total);
    }
}
