//! Resource-fit checks: can a host or datastore take the requested VM.
//!
//! Pure comparisons over inventory snapshots; nothing here touches the
//! network.

use vantage_common::views::{Datastore, Host};

/// Fixed conversion used when comparing a vCPU request against a host's
/// free clock budget: one requested vCPU reserves 1000 MHz.
pub const MHZ_PER_VCPU: f64 = 1000.0;

/// Whether `host` can take a VM requesting `ram_gb` of memory and `cpu`
/// vCPUs.
pub fn host_supports(host: &Host, ram_gb: u32, cpu: u32) -> bool {
    host.memory_free_gb >= f64::from(ram_gb) && host.cpu_free_mhz >= f64::from(cpu) * MHZ_PER_VCPU
}

/// Whether `datastore` can take a disk of `disk_gb`.
///
/// Falls back to total capacity when the backend did not report a
/// free-space figure. Optimistic, but some datastore types never report
/// free space and would otherwise always fail the check.
pub fn datastore_supports(datastore: &Datastore, disk_gb: f64) -> bool {
    datastore.free_space_gb.unwrap_or(datastore.capacity_gb) >= disk_gb
}

/// Combined free-minus-requested margin across both dimensions. Negative
/// totals indicate shortfall.
fn fit_margin(host: &Host, ram_gb: u32, cpu: u32) -> f64 {
    (host.memory_free_gb - f64::from(ram_gb)) + (host.cpu_free_mhz - f64::from(cpu) * MHZ_PER_VCPU)
}

/// Suggests up to two alternative hosts when none fully supports the
/// request, ranked ascending by combined margin. A heuristic tie-break
/// over a single blended score, not a guarantee of suitability on either
/// dimension.
pub fn closest_hosts<'a>(hosts: &'a [Host], ram_gb: u32, cpu: u32) -> Vec<&'a Host> {
    let mut ranked: Vec<&Host> = hosts.iter().collect();
    ranked.sort_by(|a, b| fit_margin(a, ram_gb, cpu).total_cmp(&fit_margin(b, ram_gb, cpu)));
    ranked.truncate(2);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(name: &str, memory_free_gb: f64, cpu_free_mhz: f64) -> Host {
        Host {
            id: format!("host-{name}"),
            name: name.into(),
            cluster: None,
            cpu_total_mhz: 40_000.0,
            cpu_used_mhz: 40_000.0 - cpu_free_mhz,
            cpu_free_mhz,
            memory_total_gb: 256.0,
            memory_used_gb: 256.0 - memory_free_gb,
            memory_free_gb,
            product_version: Some("8.0.2".into()),
            connection_state: Some("connected".into()),
            power_state: Some("poweredOn".into()),
            accessible_datastores: vec![],
            accessible_networks: vec![],
        }
    }

    fn datastore(capacity_gb: f64, free_space_gb: Option<f64>) -> Datastore {
        Datastore {
            id: "ds-1".into(),
            name: "ds-1".into(),
            capacity_gb,
            free_space_gb,
            accessible: Some(true),
            kind: Some("VMFS".into()),
        }
    }

    #[test]
    fn test_host_fit_requires_both_dimensions() {
        let h = host("a", 32.0, 9000.0);
        assert!(host_supports(&h, 16, 4));

        // 9000 MHz covers at most 9 vCPUs.
        assert!(!host_supports(&h, 16, 10));
        assert!(!host_supports(&h, 64, 4));
    }

    #[test]
    fn test_host_fit_boundary_is_inclusive() {
        let h = host("a", 16.0, 4000.0);
        assert!(host_supports(&h, 16, 4));
        assert!(!host_supports(&h, 17, 4));
    }

    #[test]
    fn test_datastore_fit_prefers_free_space() {
        assert!(!datastore_supports(&datastore(500.0, Some(100.0)), 400.0));
        assert!(datastore_supports(&datastore(500.0, Some(450.0)), 400.0));
    }

    #[test]
    fn test_datastore_fit_falls_back_to_capacity() {
        assert!(datastore_supports(&datastore(500.0, None), 400.0));
        assert!(!datastore_supports(&datastore(300.0, None), 400.0));
    }

    #[test]
    fn test_closest_hosts_ranks_by_combined_margin() {
        let hosts = vec![
            host("tight", 8.0, 2000.0),
            host("tighter", 4.0, 1000.0),
            host("roomy", 12.0, 3000.0),
        ];
        let suggested = closest_hosts(&hosts, 16, 4);
        assert_eq!(suggested.len(), 2);
        assert_eq!(suggested[0].name, "tighter");
        assert_eq!(suggested[1].name, "tight");
    }

    #[test]
    fn test_closest_hosts_on_short_lists() {
        let hosts = vec![host("only", 8.0, 2000.0)];
        assert_eq!(closest_hosts(&hosts, 16, 4).len(), 1);
        assert!(closest_hosts(&[], 16, 4).is_empty());
    }
}
