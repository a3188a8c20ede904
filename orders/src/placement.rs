//! Cross-entity placement validation: keeping a work order's selected
//! host/datastore/network references consistent with the inventory that
//! is actually loaded, and deciding whether the order can be submitted.

use vantage_common::views::{Datacenter, Datastore, Folder, Host, IpPool, Network, ResourcePool, Vm};

use crate::draft::WorkOrderDraft;
use crate::fit;

/// One load's worth of inventory. The edit view fetches all of these
/// before it renders anything; partial inventory would make the
/// cross-reference checks lie.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub hosts: Vec<Host>,
    pub datastores: Vec<Datastore>,
    pub networks: Vec<Network>,
    pub vms: Vec<Vm>,
    pub templates: Vec<Vm>,
    pub resource_pools: Vec<ResourcePool>,
    pub ip_pools: Vec<IpPool>,
    pub folders: Vec<Folder>,
    pub datacenters: Vec<Datacenter>,
}

impl Inventory {
    pub fn host(&self, id: &str) -> Option<&Host> {
        self.hosts.iter().find(|h| h.id == id)
    }

    pub fn datastore(&self, id: &str) -> Option<&Datastore> {
        self.datastores.iter().find(|d| d.id == id)
    }
}

/// Placement references that [`reconcile`] had to repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementField {
    Host,
    Vm,
    Template,
    Datastore,
    Network,
    ResourcePool,
    IpPool,
    Folder,
    Datacenter,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub repaired: Vec<PlacementField>,
}

fn repair(
    selection: &mut Option<String>,
    ids: impl Iterator<Item = String> + Clone,
    field: PlacementField,
    repaired: &mut Vec<PlacementField>,
) {
    let Some(current) = selection.as_deref() else {
        return;
    };
    let mut ids_iter = ids.clone();
    if !ids_iter.any(|id| id == current) {
        // Deterministic fallback: first available option, or nothing.
        *selection = ids.clone().next();
        repaired.push(field);
    }
}

/// Realigns the draft's placement references with freshly loaded
/// inventory. A reference that no longer resolves falls back to the
/// first element of its list (cleared when the list is empty). Runs once
/// per inventory snapshot; the caller owns the guard flag.
pub fn reconcile(draft: &mut WorkOrderDraft, inventory: &Inventory) -> ReconcileReport {
    let mut repaired = vec![];

    repair(
        &mut draft.host_id,
        inventory.hosts.iter().map(|h| h.id.clone()),
        PlacementField::Host,
        &mut repaired,
    );
    repair(
        &mut draft.vm_id,
        inventory.vms.iter().map(|v| v.id.clone()),
        PlacementField::Vm,
        &mut repaired,
    );
    repair(
        &mut draft.template_id,
        inventory.templates.iter().map(|t| t.id.clone()),
        PlacementField::Template,
        &mut repaired,
    );
    repair(
        &mut draft.datastore_id,
        inventory.datastores.iter().map(|d| d.id.clone()),
        PlacementField::Datastore,
        &mut repaired,
    );
    repair(
        &mut draft.network_id,
        inventory.networks.iter().map(|n| n.id.clone()),
        PlacementField::Network,
        &mut repaired,
    );
    repair(
        &mut draft.resource_pool_id,
        inventory.resource_pools.iter().map(|p| p.id.clone()),
        PlacementField::ResourcePool,
        &mut repaired,
    );
    repair(
        &mut draft.ip_pool_id,
        inventory.ip_pools.iter().map(|p| p.id.clone()),
        PlacementField::IpPool,
        &mut repaired,
    );
    repair(
        &mut draft.folder_id,
        inventory.folders.iter().map(|f| f.id.clone()),
        PlacementField::Folder,
        &mut repaired,
    );
    repair(
        &mut draft.datacenter_name,
        inventory.datacenters.iter().map(|d| d.name.clone()),
        PlacementField::Datacenter,
        &mut repaired,
    );

    ReconcileReport { repaired }
}

/// Datastore choices offered to the user. With a host selected, only the
/// datastores that host mounts; otherwise the full list.
pub fn datastore_options<'a>(inventory: &'a Inventory, host_id: Option<&str>) -> Vec<&'a Datastore> {
    match host_id.and_then(|id| inventory.host(id)) {
        Some(host) => inventory
            .datastores
            .iter()
            .filter(|d| host.accessible_datastores.iter().any(|r| r.id == d.id))
            .collect(),
        None => inventory.datastores.iter().collect(),
    }
}

/// Network choices offered to the user, restricted the same way.
pub fn network_options<'a>(inventory: &'a Inventory, host_id: Option<&str>) -> Vec<&'a Network> {
    match host_id.and_then(|id| inventory.host(id)) {
        Some(host) => inventory
            .networks
            .iter()
            .filter(|n| host.accessible_networks.iter().any(|r| r.id == n.id))
            .collect(),
        None => inventory.networks.iter().collect(),
    }
}

/// Whether the selected datastore is reachable from the selected host.
/// Vacuously true while either side is unselected; the manual-field
/// checks own that case.
pub fn datastore_accessible(inventory: &Inventory, host_id: Option<&str>, datastore_id: Option<&str>) -> bool {
    let (Some(host), Some(ds)) = (host_id.and_then(|id| inventory.host(id)), datastore_id) else {
        return true;
    };
    host.accessible_datastores.iter().any(|r| r.id == ds)
}

/// The host-support banner for the edit view. Exactly one of two fixed
/// messages; `None` when no host selection resolves, which callers must
/// not conflate with "supported".
pub fn host_support_message(host: Option<&Host>, ram_gb: u32, cpu: u32) -> Option<String> {
    let host = host?;
    if fit::host_supports(host, ram_gb, cpu) {
        Some(format!("Host {} supports this work order.", host.name))
    } else {
        Some("Selected host may not support the requested resources.".into())
    }
}

/// A condition that blocks submission. These are validation errors, not
/// notifications: the submit action stays disabled until every one is
/// resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocker {
    /// No template selected and manual configuration is incomplete.
    ManualConfigIncomplete { missing: Vec<&'static str> },

    /// The selected host does not support the requested CPU/RAM, or the
    /// resource fields do not coerce to usable numbers.
    HostLacksResources,

    /// The selected datastore is not mounted on the selected host.
    DatastoreNotAccessible,
}

/// Everything currently standing between this draft and submission.
pub fn submit_blockers(draft: &WorkOrderDraft, inventory: &Inventory) -> Vec<SubmitBlocker> {
    let mut blockers = vec![];

    if !draft.is_template_selected() && !draft.is_manual_valid() {
        blockers.push(SubmitBlocker::ManualConfigIncomplete {
            missing: draft.missing_manual_fields(),
        });
    }

    if let Some(host) = draft.host_id.as_deref().and_then(|id| inventory.host(id)) {
        match (draft.ram_value(), draft.cpu_value()) {
            (Some(ram), Some(cpu)) if fit::host_supports(host, ram, cpu) => {}
            _ => blockers.push(SubmitBlocker::HostLacksResources),
        }
    }

    if !datastore_accessible(inventory, draft.host_id.as_deref(), draft.datastore_id.as_deref()) {
        blockers.push(SubmitBlocker::DatastoreNotAccessible);
    }

    blockers
}

pub fn is_submittable(draft: &WorkOrderDraft, inventory: &Inventory) -> bool {
    submit_blockers(draft, inventory).is_empty()
}

#[cfg(test)]
mod tests {
    use vantage_common::views::InventoryRef;

    use super::*;
    use crate::draft::DraftAction;

    fn inv_ref(id: &str) -> InventoryRef {
        InventoryRef {
            id: id.into(),
            name: id.into(),
        }
    }

    fn host(id: &str, memory_free_gb: f64, cpu_free_mhz: f64, datastores: &[&str]) -> Host {
        Host {
            id: id.into(),
            name: format!("esx-{id}"),
            cluster: Some("cluster-1".into()),
            cpu_total_mhz: 40_000.0,
            cpu_used_mhz: 40_000.0 - cpu_free_mhz,
            cpu_free_mhz,
            memory_total_gb: 256.0,
            memory_used_gb: 256.0 - memory_free_gb,
            memory_free_gb,
            product_version: None,
            connection_state: None,
            power_state: None,
            accessible_datastores: datastores.iter().map(|d| inv_ref(d)).collect(),
            accessible_networks: vec![inv_ref("net-1")],
        }
    }

    fn datastore(id: &str) -> Datastore {
        Datastore {
            id: id.into(),
            name: id.into(),
            capacity_gb: 1000.0,
            free_space_gb: Some(800.0),
            accessible: Some(true),
            kind: None,
        }
    }

    fn network(id: &str) -> Network {
        Network {
            id: id.into(),
            name: id.into(),
            vlan: 0,
            kind: Some("Standard".into()),
            datacenter_name: None,
        }
    }

    fn inventory() -> Inventory {
        Inventory {
            hosts: vec![
                host("h1", 64.0, 20_000.0, &["ds-1", "ds-2"]),
                host("h2", 2.0, 1500.0, &["ds-2"]),
            ],
            datastores: vec![datastore("ds-1"), datastore("ds-2")],
            networks: vec![network("net-1"), network("net-2")],
            ..Default::default()
        }
    }

    fn manual_draft() -> WorkOrderDraft {
        let mut d = WorkOrderDraft::default();
        for action in [
            DraftAction::SetOs("ubuntu-20.04".into()),
            DraftAction::SetHardwareVersion("vmx-19".into()),
            DraftAction::SetScsiControllerType("pvscsi".into()),
            DraftAction::SetHostname("app-01".into()),
            DraftAction::SetIp("10.0.0.5".into()),
            DraftAction::SetNetmask("255.255.255.0".into()),
            DraftAction::SetGateway("10.0.0.1".into()),
            DraftAction::SetDomain("corp.local".into()),
            DraftAction::AddDisk,
            DraftAction::AddNic,
        ] {
            d.apply(action);
        }
        d
    }

    #[test]
    fn test_reconcile_repairs_dangling_datastore() {
        let mut d = WorkOrderDraft::default();
        d.apply(DraftAction::SelectDatastore(Some("ds-gone".into())));

        let inv = inventory();
        let report = reconcile(&mut d, &inv);

        assert_eq!(d.datastore_id.as_deref(), Some("ds-1"));
        assert_eq!(report.repaired, vec![PlacementField::Datastore]);
    }

    #[test]
    fn test_reconcile_leaves_valid_selections_alone() {
        let mut d = WorkOrderDraft::default();
        d.apply(DraftAction::SelectHost(Some("h2".into())));
        d.apply(DraftAction::SelectNetwork(Some("net-2".into())));

        let report = reconcile(&mut d, &inventory());
        assert!(report.repaired.is_empty());
        assert_eq!(d.host_id.as_deref(), Some("h2"));
    }

    #[test]
    fn test_reconcile_clears_when_list_is_empty() {
        let mut d = WorkOrderDraft::default();
        d.apply(DraftAction::SelectFolder(Some("folder-9".into())));

        let report = reconcile(&mut d, &inventory());
        assert_eq!(d.folder_id, None);
        assert_eq!(report.repaired, vec![PlacementField::Folder]);
    }

    #[test]
    fn test_datastore_options_follow_selected_host() {
        let inv = inventory();
        let all: Vec<_> = datastore_options(&inv, None).iter().map(|d| d.id.clone()).collect();
        assert_eq!(all, vec!["ds-1", "ds-2"]);

        let filtered: Vec<_> = datastore_options(&inv, Some("h2")).iter().map(|d| d.id.clone()).collect();
        assert_eq!(filtered, vec!["ds-2"]);
    }

    #[test]
    fn test_host_support_message_templates() {
        let inv = inventory();
        let msg = host_support_message(inv.host("h1"), 16, 4).unwrap();
        assert_eq!(msg, "Host esx-h1 supports this work order.");

        let msg = host_support_message(inv.host("h2"), 16, 4).unwrap();
        assert_eq!(msg, "Selected host may not support the requested resources.");

        // No resolvable host: no message, which is not the same as support.
        assert_eq!(host_support_message(None, 16, 4), None);
    }

    #[test]
    fn test_template_bypasses_manual_requirements() {
        let mut d = WorkOrderDraft::default();
        let inv = inventory();
        assert!(!is_submittable(&d, &inv));

        d.apply(DraftAction::SelectTemplate(Some("tmpl-1".into())));
        assert!(is_submittable(&d, &inv));
    }

    #[test]
    fn test_host_without_resources_blocks_submission() {
        let mut d = manual_draft();
        let inv = inventory();
        d.apply(DraftAction::SetCpu("4".into()));
        d.apply(DraftAction::SetRam("16".into()));

        d.apply(DraftAction::SelectHost(Some("h1".into())));
        assert!(is_submittable(&d, &inv));

        d.apply(DraftAction::SelectHost(Some("h2".into())));
        let blockers = submit_blockers(&d, &inv);
        assert_eq!(blockers, vec![SubmitBlocker::HostLacksResources]);
    }

    #[test]
    fn test_inaccessible_datastore_blocks_submission() {
        let mut d = manual_draft();
        let inv = inventory();
        d.apply(DraftAction::SelectHost(Some("h2".into())));
        d.apply(DraftAction::SetCpu("1".into()));
        d.apply(DraftAction::SetRam("1".into()));
        d.apply(DraftAction::SelectDatastore(Some("ds-1".into())));

        // ds-1 is not mounted on h2.
        let blockers = submit_blockers(&d, &inv);
        assert!(blockers.contains(&SubmitBlocker::DatastoreNotAccessible));

        d.apply(DraftAction::SelectDatastore(Some("ds-2".into())));
        assert!(is_submittable(&d, &inv));
    }
}
