// crates/netcheck-checks/src/napalm_bgp_neighbors.rs
// ============================================================================
// Module: NAPALM BGP Neighbors Check
// Description: BGP peer attributes and peer counts across VRFs.
// Purpose: Assert peer sessions by peer address, or the number of peers per host.
// Dependencies: netcheck-core, serde_json
// ============================================================================

//! ## Overview
//! The `bgp_neighbors` getter nests peers by VRF:
//! `{vrf: {"router_id": ..., "peers": {address: {...}}}}`. The extractor
//! flattens every VRF into one mapping keyed by peer address; each peer gets
//! `local_id` (the VRF router id) and `vrf` added. A peer address seen in two
//! VRFs keeps the entry of the later VRF in name order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use netcheck_core::AttemptOutcome;
use netcheck_core::CaseTemplate;
use netcheck_core::ExtractError;
use netcheck_core::HostName;
use netcheck_core::ResultExtractor;
use netcheck_core::TestClass;
use netcheck_core::TestModule;
use netcheck_core::runtime::extract::object_field;
use netcheck_core::runtime::extract::primary_success;
use serde_json::Map;
use serde_json::Value;

use crate::operations::NapalmGetter;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Module location.
pub const MODULE_PATH: &str = "netcheck.checks.napalm_bgp_neighbors";

/// Peer attribute class.
pub const CLASS_NAME: &str = "TestNapalmBgpNeighbors";

/// Peer count class.
pub const COUNT_CLASS_NAME: &str = "TestNapalmBgpNeighborsCount";

/// Peer attributes compared against same-named `test_data` fields.
const PEER_ATTRIBUTES: &[&str] =
    &["local_as", "remote_as", "remote_id", "local_id", "is_enabled", "is_up"];

// ============================================================================
// SECTION: Extractor
// ============================================================================

/// Flattens BGP peers of all VRFs into one mapping keyed by peer address.
#[derive(Debug, Clone, Copy, Default)]
pub struct BgpNeighborsExtractor;

impl ResultExtractor for BgpNeighborsExtractor {
    fn single_transform(
        &self,
        host: &HostName,
        outcomes: &[AttemptOutcome],
    ) -> Result<Value, ExtractError> {
        let payload = primary_success(host, outcomes)?;
        let vrfs = object_field(host, payload, "bgp_neighbors")?;
        let mut peers = Map::new();
        for (vrf, details) in vrfs {
            let router_id = details.get("router_id").cloned().unwrap_or(Value::Null);
            let vrf_peers = object_field(host, details, "peers")?;
            for (address, peer) in vrf_peers {
                let Value::Object(peer) = peer else {
                    return Err(ExtractError::Shape {
                        host: host.to_string(),
                        reason: format!("peer {address} in vrf {vrf} is not a record"),
                    });
                };
                let mut peer = peer.clone();
                peer.insert("local_id".to_string(), router_id.clone());
                peer.insert("vrf".to_string(), Value::from(vrf.as_str()));
                peers.insert(address.clone(), Value::Object(peer));
            }
        }
        Ok(Value::Object(peers))
    }
}

// ============================================================================
// SECTION: Module
// ============================================================================

/// Builds the module with the attribute and count classes.
#[must_use]
pub fn module() -> TestModule {
    let mut peers = TestClass::new(CLASS_NAME, NapalmGetter::new("bgp_neighbors"))
        .with_extractor(BgpNeighborsExtractor)
        .with_case(CaseTemplate::exists("peer_exists", &["peer"]));
    for attribute in PEER_ATTRIBUTES {
        peers =
            peers.with_case(CaseTemplate::attribute(*attribute, &["peer"], attribute, attribute));
    }
    let count = TestClass::new(COUNT_CLASS_NAME, NapalmGetter::new("bgp_neighbors"))
        .with_extractor(BgpNeighborsExtractor)
        .with_case(CaseTemplate::count("neighbor_count", &[], "neighbor_count"));
    TestModule::new(MODULE_PATH).with_class(peers).with_class(count)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
