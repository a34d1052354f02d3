//
// Copyright (c) The pandev Contributors
//
// SPDX-License-Identifier: MIT
//

use pandev_tree::{
    Device, Error, InvalidTag, Object, RecordingClient, XPath,
};

use super::{Tree, address, device_tree, zone};

const VSYS1: &str = "/config/devices/entry[@name='localhost.localdomain']/vsys/entry[@name='vsys1']";

#[test]
fn test_device_xpath() {
    let (tree, device) = device_tree();
    assert_eq!(tree.xpath(device).unwrap().to_string(), "/config");
}

#[test]
fn test_device_custom_root() {
    let mut tree = Tree::new();
    let device = tree.insert_device(
        "fw1",
        Device::new(RecordingClient::default())
            .with_xpath_root(XPath::parse(VSYS1)),
    );
    let web = address(&mut tree, "web");
    tree.add(device, web).unwrap();

    assert_eq!(
        tree.xpath(web).unwrap().to_string(),
        format!("{VSYS1}/address/entry[@name='web']")
    );
}

#[test]
fn test_xpath_composition() {
    let (mut tree, device) = device_tree();
    let trust = zone(&mut tree, "trust");
    let iface = tree.insert_object(
        "ethernet1/1",
        Object::member("interface", "/network/layer3"),
    );
    tree.add(device, trust).unwrap();
    tree.add(trust, iface).unwrap();

    let root_xpath = tree.xpath(device).unwrap();
    let trust_xpath = tree.xpath(trust).unwrap();
    let iface_xpath = tree.xpath(iface).unwrap();

    let trust_segment = XPath::parse("/zone/entry[@name='trust']");
    let iface_segment =
        XPath::parse("/network/layer3/member[text()='ethernet1/1']");
    assert_eq!(trust_xpath, root_xpath.join(&trust_segment));
    assert_eq!(iface_xpath, trust_xpath.join(&iface_segment));
    assert_eq!(
        iface_xpath.to_string(),
        "/config/zone/entry[@name='trust']/network/layer3/member[text()='ethernet1/1']"
    );
}

#[test]
fn test_xpath_detached() {
    let (mut tree, device) = device_tree();
    let trust = zone(&mut tree, "trust");
    let web = address(&mut tree, "web");
    tree.add(trust, web).unwrap();

    assert!(matches!(
        tree.xpath(web),
        Err(Error::RootNotSet(node)) if node == web
    ));

    // Attaching the subtree makes the whole chain addressable.
    tree.add(device, trust).unwrap();
    assert_eq!(
        tree.xpath(web).unwrap().to_string(),
        "/config/zone/entry[@name='trust']/address/entry[@name='web']"
    );
}

#[test]
fn test_element_entry() {
    let mut tree = Tree::new();
    let web = address(&mut tree, "web");
    assert_eq!(tree.element(web).unwrap(), "<entry name=\"web\"></entry>");

    let db = tree.insert_object(
        "db",
        Object::entry("address", "/address")
            .with_field("ip-netmask", "10.0.0.5/32")
            .and_then(|object| object.with_field("description", "db <primary>"))
            .unwrap(),
    );
    assert_eq!(
        tree.element(db).unwrap(),
        "<entry name=\"db\"><ip-netmask>10.0.0.5/32</ip-netmask>\
         <description>db &lt;primary&gt;</description></entry>"
    );
}

#[test]
fn test_element_invalid_field_tag() {
    let result = Object::entry("address", "/address")
        .with_field("ip-netmask", "10.0.0.5/32")
        .and_then(|object| object.with_field("a b><evil", "v"));
    assert!(matches!(result, Err(InvalidTag(ref tag)) if tag == "a b><evil"));
}

#[test]
fn test_element_member() {
    let mut tree = Tree::new();
    let iface = tree.insert_object(
        "ethernet1/1",
        Object::member("interface", "/network/layer3"),
    );
    assert_eq!(tree.element(iface).unwrap(), "<member>ethernet1/1</member>");
}

#[test]
fn test_element_escaping() {
    let mut tree = Tree::new();
    let node = address(&mut tree, "R&D \"lab\"");
    assert_eq!(
        tree.element(node).unwrap(),
        "<entry name=\"R&amp;D &quot;lab&quot;\"></entry>"
    );
}

#[test]
fn test_element_excludes_children() {
    let (mut tree, device) = device_tree();
    let trust = zone(&mut tree, "trust");
    let web = address(&mut tree, "web");
    tree.add(device, trust).unwrap();
    tree.add(trust, web).unwrap();

    assert_eq!(tree.element(device).unwrap(), "<entry name=\"fw1\"></entry>");
    assert_eq!(tree.element(trust).unwrap(), "<entry name=\"trust\"></entry>");
}

#[test]
fn test_device_resolution() {
    let (mut tree, device) = device_tree();
    let trust = zone(&mut tree, "trust");
    let web = address(&mut tree, "web");
    tree.add(device, trust).unwrap();
    tree.add(trust, web).unwrap();

    assert_eq!(tree.device(web).unwrap(), device);
    assert_eq!(tree.device(trust).unwrap(), device);
    assert_eq!(tree.device(device).unwrap(), device);

    let orphan = address(&mut tree, "orphan");
    assert!(matches!(
        tree.device(orphan),
        Err(Error::RootNotSet(node)) if node == orphan
    ));
}

#[test]
fn test_device_resolution_nearest() {
    let (mut tree, panorama) = device_tree();
    let firewall =
        tree.insert_device("fw2", Device::new(RecordingClient::default()));
    let web = address(&mut tree, "web");
    tree.add(panorama, firewall).unwrap();
    tree.add(firewall, web).unwrap();

    assert_eq!(tree.device(web).unwrap(), firewall);
    assert_eq!(tree.device(firewall).unwrap(), firewall);
}
