//! Admission Review Tests
//!
//! One request in, one response out, through `AdmissionHandler::run_with_io`.

use azp_mutator::{AdmissionHandler, AdmissionResponse, NamespacedCloudProfileMutator};
use serde_json::{json, Value};
use std::io::Cursor;

fn review(request: &Value) -> AdmissionResponse {
    let handler = AdmissionHandler::new(NamespacedCloudProfileMutator::default());
    let mut reader = Cursor::new(request.to_string());
    let mut output = Vec::new();

    handler.run_with_io(&mut reader, &mut output).unwrap();

    let output_str = String::from_utf8(output).unwrap();
    assert!(output_str.ends_with('\n'), "response should be newline terminated");
    serde_json::from_str(&output_str).unwrap()
}

fn object(spec_config: Value) -> Value {
    json!({
        "apiVersion": "core.gardener.cloud/v1beta1",
        "kind": "NamespacedCloudProfile",
        "metadata": {"name": "custom", "namespace": "garden-dev", "generation": 1},
        "spec": {
            "parent": {"kind": "CloudProfile", "name": "azure"},
            "providerConfig": spec_config
        },
        "status": {
            "observedGeneration": 1,
            "cloudProfileSpec": {
                "providerConfig": {
                    "apiVersion": "azure.provider.extensions.gardener.cloud/v1alpha1",
                    "kind": "CloudProfileConfig",
                    "machineImages": [{"name": "ubuntu", "versions": [{"version": "22.04", "urn": "u:22"}]}],
                    "machineTypes": [{"name": "Standard_D2s_v5"}]
                }
            }
        }
    })
}

#[test]
fn test_update_request_returns_merged_object() {
    let request = json!({
        "uid": "705ab4f5-6393-11e8-b7cc-42010a800002",
        "operation": "UPDATE",
        "object": object(json!({
            "machineImages": [{"name": "ubuntu", "versions": [{"version": "24.04", "urn": "u:24"}]}],
            "machineTypes": [{"name": "Standard_D2s_v5", "acceleratedNetworking": true}]
        })),
        "oldObject": object(json!({"machineImages": []}))
    });

    let response = review(&request);

    assert!(response.allowed);
    assert_eq!(response.uid, "705ab4f5-6393-11e8-b7cc-42010a800002");
    assert!(response.error.is_none());

    let config = &response.object.unwrap()["status"]["cloudProfileSpec"]["providerConfig"];
    assert_eq!(
        config["machineImages"],
        json!([{"name": "ubuntu", "versions": [
            {"version": "22.04", "urn": "u:22"},
            {"version": "24.04", "urn": "u:24"}
        ]}])
    );
    assert_eq!(config["machineTypes"], json!([{"name": "Standard_D2s_v5"}]));
}

#[test]
fn test_skipped_object_returned_unchanged() {
    let mut obj = object(json!({"machineImages": []}));
    obj["metadata"]["generation"] = json!(2);
    let request = json!({"uid": "skip-1", "operation": "UPDATE", "object": obj.clone()});

    let response = review(&request);

    assert!(response.allowed);
    assert_eq!(response.object.unwrap(), obj);
}

#[test]
fn test_bad_status_config_denied_with_side() {
    let mut obj = object(json!({"machineImages": []}));
    obj["status"]["cloudProfileSpec"]["providerConfig"]["kind"] = json!("WorkerConfig");
    let request = json!({"uid": "bad-1", "object": obj});

    let response = review(&request);

    assert!(!response.allowed);
    assert!(response.object.is_none());
    let error = response.error.unwrap();
    assert_eq!(error.code, "DECODE_FAILED");
    assert!(error.message.contains("WorkerConfig"), "{}", error.message);
    assert_eq!(error.data.unwrap()["side"], "status");
}

#[test]
fn test_foreign_kind_denied() {
    let request = json!({"uid": "kind-1", "object": {"kind": "Shoot", "metadata": {"name": "s"}}});

    let response = review(&request);

    assert!(!response.allowed);
    let error = response.error.unwrap();
    assert_eq!(error.code, "WRONG_OBJECT_TYPE");
    assert_eq!(error.data.unwrap()["kind"], "Shoot");
}

#[test]
fn test_request_without_object_denied() {
    let response = review(&json!({"uid": "empty-1"}));

    assert!(!response.allowed);
    assert_eq!(response.error.unwrap().code, "INVALID_REQUEST");
}
