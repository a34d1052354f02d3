//
// Copyright (c) The pandev Contributors
//
// SPDX-License-Identifier: MIT
//

mod addressing;
mod remote;

use pandev_tree::{
    ConfigTree, Device, NodeIndex, Object, RecordingClient, Request,
};

pub(crate) type Tree = ConfigTree<RecordingClient>;

// Tree holding a single device root named "fw1" with the default namespace
// root.
pub(crate) fn device_tree() -> (Tree, NodeIndex) {
    let mut tree = Tree::new();
    let device =
        tree.insert_device("fw1", Device::new(RecordingClient::default()));
    (tree, device)
}

pub(crate) fn address(tree: &mut Tree, name: &str) -> NodeIndex {
    tree.insert_object(name, Object::entry("address", "/address"))
}

pub(crate) fn zone(tree: &mut Tree, name: &str) -> NodeIndex {
    tree.insert_object(name, Object::entry("zone", "/zone"))
}

pub(crate) fn requests(tree: &Tree, node_idx: NodeIndex) -> Vec<Request> {
    tree.client(node_idx).unwrap().requests.clone()
}
