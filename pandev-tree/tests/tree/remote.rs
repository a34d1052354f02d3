//
// Copyright (c) The pandev Contributors
//
// SPDX-License-Identifier: MIT
//

use pandev_tree::{
    Device, Error, Object, RecordingClient, RecordingError, Request,
};

use super::{address, device_tree, requests, zone};

#[test]
fn test_apply() {
    let (mut tree, device) = device_tree();
    let web = address(&mut tree, "web");
    tree.add(device, web).unwrap();

    tree.apply(web).unwrap();
    assert_eq!(
        requests(&tree, device),
        [Request::Edit {
            xpath: "/config/address/entry[@name='web']".to_owned(),
            element: "<entry name=\"web\"></entry>".to_owned(),
        }]
    );
}

#[test]
fn test_create() {
    let (mut tree, device) = device_tree();
    let trust = zone(&mut tree, "trust");
    let web = address(&mut tree, "web");
    tree.add(device, trust).unwrap();
    tree.add(trust, web).unwrap();

    tree.create(web).unwrap();
    assert_eq!(
        requests(&tree, device),
        [Request::Set {
            xpath: "/config/zone/entry[@name='trust']/address".to_owned(),
            element: "<entry name=\"web\"></entry>".to_owned(),
        }]
    );
    assert_ne!(
        requests(&tree, device)[0].xpath(),
        tree.xpath(web).unwrap().to_string()
    );
}

#[test]
fn test_create_name_with_slash() {
    let (mut tree, device) = device_tree();
    let iface = tree.insert_object(
        "ethernet1/1",
        Object::entry("interface", "/network/interface/ethernet"),
    );
    tree.add(device, iface).unwrap();

    tree.create(iface).unwrap();
    assert_eq!(
        requests(&tree, device)[0].xpath(),
        "/config/network/interface/ethernet"
    );
}

#[test]
fn test_delete() {
    let (mut tree, device) = device_tree();
    let web = address(&mut tree, "web");
    let db = address(&mut tree, "db");
    tree.add(device, web).unwrap();
    tree.add(device, db).unwrap();

    tree.delete(web).unwrap();
    assert_eq!(
        requests(&tree, device),
        [Request::Delete {
            xpath: "/config/address/entry[@name='web']".to_owned(),
        }]
    );
    assert_eq!(tree.children(device), [db]);
    assert_eq!(tree.parent(web), None);
    assert!(tree.contains(web));
}

#[test]
fn test_delete_duplicate_name() {
    let (mut tree, device) = device_tree();
    let first = address(&mut tree, "web");
    let second = address(&mut tree, "web");
    tree.add(device, first).unwrap();
    tree.add(device, second).unwrap();

    tree.delete(second).unwrap();
    assert_eq!(tree.children(device), [first]);
    assert_eq!(tree.parent(first), Some(device));
}

#[test]
fn test_remote_detached() {
    let (mut tree, device) = device_tree();
    let web = address(&mut tree, "web");

    assert!(matches!(tree.apply(web), Err(Error::RootNotSet(_))));
    assert!(matches!(tree.create(web), Err(Error::RootNotSet(_))));
    assert!(matches!(tree.delete(web), Err(Error::RootNotSet(_))));
    assert!(requests(&tree, device).is_empty());
}

#[test]
fn test_remote_failure() {
    let (mut tree, device) = device_tree();
    let web = address(&mut tree, "web");
    tree.add(device, web).unwrap();

    tree.client_mut(device).unwrap().fail_next("config locked");
    let result = tree.delete(web);
    assert!(matches!(
        result,
        Err(Error::Api(RecordingError(ref reason))) if reason == "config locked"
    ));
    let error = result.unwrap_err();
    assert!(std::error::Error::source(&error).is_some());

    // The local tree is left untouched and later requests go through.
    assert_eq!(tree.children(device), [web]);
    assert!(requests(&tree, device).is_empty());
    tree.apply(web).unwrap();
    assert_eq!(requests(&tree, device).len(), 1);
}

#[test]
fn test_remote_nearest_device() {
    let (mut tree, panorama) = device_tree();
    let firewall =
        tree.insert_device("fw2", Device::new(RecordingClient::default()));
    let web = address(&mut tree, "web");
    tree.add(panorama, firewall).unwrap();
    tree.add(firewall, web).unwrap();

    tree.apply(web).unwrap();
    assert!(requests(&tree, panorama).is_empty());
    assert_eq!(requests(&tree, firewall).len(), 1);
}

#[test]
fn test_request_serialization() {
    let request = Request::Set {
        xpath: "/config/address".to_owned(),
        element: "<entry name=\"web\"></entry>".to_owned(),
    };
    let json = serde_json::to_string(&request).unwrap();
    assert_eq!(
        json,
        r#"{"action":"set","xpath":"/config/address","element":"<entry name=\"web\"></entry>"}"#
    );
    let decoded: Request = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, request);
}
