// crates/netcheck-checks/tests/builtin_checks.rs
// ============================================================================
// Module: Built-in Check Tests
// Description: Built-in modules driven end to end over canned device answers.
// Purpose: Validate operations, extractors, and case templates of each check.
// ============================================================================

//! Built-in check tests over the in-memory backend.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::Arc;

use netcheck_checks::builtin_catalog;
use netcheck_checks::builtin_index;
use netcheck_checks::napalm_lldp_neighbors;
use netcheck_checks::netmiko_ping;
use netcheck_core::AttemptOutcome;
use netcheck_core::Backend;
use netcheck_core::BundleLoader;
use netcheck_core::BundleRecord;
use netcheck_core::BundleRunner;
use netcheck_core::HostName;
use netcheck_core::InMemoryBackend;
use netcheck_core::RunReport;
use netcheck_core::Verdict;
use serde_json::Value;
use serde_json::json;

type TestResult = Result<(), String>;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn record(value: Value) -> BundleRecord {
    serde_json::from_value(value).unwrap()
}

fn run(backend: &Arc<InMemoryBackend>, records: &[BundleRecord]) -> RunReport {
    let catalog = builtin_catalog().unwrap();
    let index = builtin_index();
    let loader = BundleLoader::new(&index, &catalog);
    let backend: Arc<dyn Backend> = backend.clone();
    BundleRunner::new(backend).run_bundle(&loader, records)
}

/// Collects `(case name, verdict)` pairs of the first spec.
fn verdicts(report: &RunReport) -> Vec<(String, Verdict)> {
    report.specs[0].cases.iter().map(|case| (case.name.clone(), case.verdict)).collect()
}

fn lldp_neighbor(port: &str, name: &str) -> Value {
    json!([{
        "remote_chassis_id": "001e.e611.3500",
        "remote_port": port,
        "remote_port_description": "test12345",
        "remote_system_name": name,
        "remote_system_capab": ["bridge", "router"],
        "remote_system_enable_capab": ["router"],
        "parent_interface": ""
    }])
}

fn ping_output(destination: &str, rate: &str) -> AttemptOutcome {
    AttemptOutcome::Success(Value::String(format!(
        "Type escape sequence to abort.\nSending 5, 100-byte ICMP Echos to {destination}, \
         timeout is 2 seconds:\n!!!!!\nSuccess rate is {rate}, round-trip min/avg/max = 1/1/2 ms"
    )))
}

// ============================================================================
// SECTION: NAPALM
// ============================================================================

#[test]
fn lldp_neighbors_compare_expanded_ports() {
    let backend = Arc::new(
        InMemoryBackend::new(["R1", "R2", "R3"])
            .with_response(
                "napalm_get",
                "R1",
                vec![AttemptOutcome::Success(json!({"lldp_neighbors_detail": {
                    "GigabitEthernet4": lldp_neighbor("Gi2", "R3"),
                    "GigabitEthernet3": lldp_neighbor("Gi2", "R2")
                }}))],
            )
            .with_response(
                "napalm_get",
                "R2",
                vec![AttemptOutcome::Success(json!({"lldp_neighbors_detail": {
                    "GigabitEthernet2": lldp_neighbor("Gi3", "R1")
                }}))],
            )
            .with_response(
                "napalm_get",
                "R3",
                vec![AttemptOutcome::failure("timeout", "connection timed out")],
            ),
    );
    let records = [record(json!({
        "test_class": napalm_lldp_neighbors::CLASS_NAME,
        "test_data": [
            {"host": "R1", "local_port": "GigabitEthernet4",
             "remote_host": "R3", "remote_port": "GigabitEthernet2"},
            {"host": "R1", "local_port": "GigabitEthernet3",
             "remote_host": "R2", "remote_port": "GigabitEthernet2"},
            {"host": "R2", "local_port": "GigabitEthernet2",
             "remote_host": "R1", "remote_port": "GigabitEthernet3"},
            {"host": "R3", "local_port": "GigabitEthernet2",
             "remote_host": "R2", "remote_port": "GigabitEthernet4"}
        ]
    }))];

    let report = run(&backend, &records);

    let failed: Vec<_> = verdicts(&report)
        .into_iter()
        .filter(|(_, verdict)| *verdict != Verdict::Passed)
        .collect();
    assert_eq!(
        failed,
        vec![
            ("remote_host[R3-GigabitEthernet2]".to_string(), Verdict::ExecutionFailed),
            ("remote_port[R3-GigabitEthernet2]".to_string(), Verdict::ExecutionFailed),
        ]
    );
    assert_eq!(report.case_count(), 8);
    let invocations = backend.invocations();
    assert_eq!(invocations.len(), 1);
    assert_eq!(invocations[0].arguments["getters"], json!(["lldp_neighbors_detail"]));
}

#[test]
fn users_check_reports_wrong_privilege_level() {
    let backend = Arc::new(InMemoryBackend::new(["R1"]).with_response(
        "napalm_get",
        "R1",
        vec![AttemptOutcome::Success(json!({"users": {
            "arya": {"level": 15, "password": "$1$hash", "sshkeys": []}
        }}))],
    ));
    let records = [record(json!({
        "test_class": "TestNapalmUsers",
        "test_data": [{"host": "R1", "username": "arya", "password": "$1$hash", "level": 11}]
    }))];

    let report = run(&backend, &records);

    assert_eq!(
        verdicts(&report),
        vec![
            ("user_exists[R1-arya]".to_string(), Verdict::Passed),
            ("password[R1-arya]".to_string(), Verdict::Passed),
            ("privilege_level[R1-arya]".to_string(), Verdict::Mismatch),
        ]
    );
}

#[test]
fn bgp_neighbor_count_spans_vrfs() {
    let backend = Arc::new(InMemoryBackend::new(["R1"]).with_response(
        "napalm_get",
        "R1",
        vec![AttemptOutcome::Success(json!({"bgp_neighbors": {
            "global": {"router_id": "172.16.255.1", "peers": {
                "172.16.12.2": {"remote_as": 45002},
                "172.16.13.3": {"remote_as": 45003}
            }},
            "mgmt": {"router_id": "10.0.0.1", "peers": {"10.0.0.9": {"remote_as": 65000}}}
        }}))],
    ));
    let records = [record(json!({
        "test_class": "TestNapalmBgpNeighborsCount",
        "test_data": [{"host": "R1", "neighbor_count": 3}]
    }))];

    let report = run(&backend, &records);

    assert_eq!(verdicts(&report), vec![("neighbor_count[R1]".to_string(), Verdict::Passed)]);
}

#[test]
fn network_instance_interfaces_compare_as_sets() {
    let backend = Arc::new(InMemoryBackend::new(["R1"]).with_response(
        "napalm_get",
        "R1",
        vec![AttemptOutcome::Success(json!({"network_instances": {
            "mgmt": {
                "name": "mgmt",
                "type": "L3VRF",
                "state": {"route_distinguisher": "65000:1"},
                "interfaces": {"interface": {"GigabitEthernet1": {}, "Loopback9": {}}}
            }
        }}))],
    ));
    let records = [record(json!({
        "test_class": "TestNapalmNetworkInstances",
        "test_data": [{
            "host": "R1",
            "network_instance": "mgmt",
            "interfaces": ["Loopback9", "GigabitEthernet1"],
            "route_distinguisher": "65000:1"
        }]
    }))];

    let report = run(&backend, &records);

    assert!(report.passed(), "{report:?}");
    assert_eq!(report.case_count(), 3);
}

// ============================================================================
// SECTION: Netmiko
// ============================================================================

#[test]
fn cdp_neighbors_rekey_by_destination_host() {
    let backend = Arc::new(InMemoryBackend::new(["R1"]).with_response(
        "netmiko_send_command",
        "R1",
        vec![AttemptOutcome::Success(json!([
            {"destination_host": "R2", "management_ip": "172.16.12.2",
             "local_port": "GigabitEthernet3", "remote_port": "GigabitEthernet2"},
            {"destination_host": "R3", "management_ip": "172.16.13.3",
             "local_port": "GigabitEthernet4", "remote_port": "GigabitEthernet2"}
        ]))],
    ));
    let records = [record(json!({
        "test_class": "TestNetmikoCdpNeighbors",
        "test_data": [{
            "host": "R1",
            "remote_host": "R3",
            "local_port": "GigabitEthernet4",
            "remote_port": "GigabitEthernet2",
            "management_ip": "172.16.13.3"
        }]
    }))];

    let report = run(&backend, &records);

    assert!(report.passed(), "{report:?}");
    assert_eq!(report.case_count(), 4);
    let invocations = backend.invocations();
    assert_eq!(invocations[0].arguments["command_string"], json!("show cdp neighbors detail"));
    assert_eq!(invocations[0].arguments["use_textfsm"], json!(true));
}

#[test]
fn ping_classifies_each_destination() -> TestResult {
    let backend = Arc::new(InMemoryBackend::new(["R1", "R2"]).with_response(
        netmiko_ping::PING_TASK,
        "R1",
        vec![
            AttemptOutcome::Success(Value::Null),
            ping_output("172.16.12.2", "100 percent (5/5)"),
            ping_output("172.16.99.9", "0 percent (0/5)"),
            ping_output("172.16.13.3", "60 percent (3/5)"),
        ],
    ));
    let records = [record(json!({
        "test_class": "TestNetmikoPing",
        "test_execution": {"delay_factor": 2},
        "test_data": [
            {"source": "R1", "destination": "172.16.12.2", "expected": "SUCCESS"},
            {"source": "R1", "destination": "172.16.99.9", "expected": "FAIL"},
            {"source": "R1", "destination": "172.16.13.3", "expected": "SUCCESS"}
        ]
    }))];

    let report = run(&backend, &records);

    assert_eq!(
        verdicts(&report),
        vec![
            ("ping[R1-172.16.12.2]".to_string(), Verdict::Passed),
            ("ping[R1-172.16.99.9]".to_string(), Verdict::Passed),
            ("ping[R1-172.16.13.3]".to_string(), Verdict::Mismatch),
        ]
    );
    let invocation = backend.invocations().into_iter().next().ok_or("no invocation")?;
    if invocation.hosts != vec![HostName::new("R1")] {
        return Err(format!("unexpected hosts: {:?}", invocation.hosts));
    }
    if invocation.arguments["destinations_per_host"]
        != json!({"R1": ["172.16.12.2", "172.16.99.9", "172.16.13.3"]})
    {
        return Err(format!("unexpected arguments: {:?}", invocation.arguments));
    }
    if invocation.arguments["delay_factor"] != json!(2) {
        return Err("delay_factor not forwarded".to_string());
    }
    Ok(())
}

#[test]
fn ospf_neighbor_count_counts_rekeyed_entries() {
    let backend = Arc::new(InMemoryBackend::new(["R1"]).with_response(
        "netmiko_send_command",
        "R1",
        vec![AttemptOutcome::Success(json!([
            {"neighbor_id": "172.16.255.2", "state": "FULL/DR",
             "address": "172.16.12.2", "interface": "GigabitEthernet3"},
            {"neighbor_id": "172.16.255.3", "state": "FULL/BDR",
             "address": "172.16.13.3", "interface": "GigabitEthernet4"}
        ]))],
    ));
    let records = [
        record(json!({
            "test_class": "TestNetmikoOspfNeighborsCount",
            "test_data": [{"host": "R1", "neighbor_count": 2}]
        })),
        record(json!({
            "test_class": "TestNetmikoOspfNeighbors",
            "test_data": [{"host": "R1", "neighbor_id": "172.16.255.3", "state": "FULL/DR"}]
        })),
    ];

    let report = run(&backend, &records);

    assert!(report.specs[0].passed());
    let ospf: Vec<_> = report.specs[1].cases.iter().map(|case| case.verdict).collect();
    assert_eq!(ospf, vec![Verdict::Passed, Verdict::Mismatch]);
    assert_eq!(report.specs[1].skipped.len(), 2);
}
