//
// Copyright (c) The pandev Contributors
//
// SPDX-License-Identifier: MIT
//

use crate::collections::{Arena, NodeIndex};
use crate::debug::Debug;
use crate::device::Device;
use crate::error::Error;
use crate::node::{Node, NodeKind, NodeTag, Object};
use crate::xapi::{Request, XmlApi};
use crate::xpath::XPath;

/// Arena holding one or more configuration trees.
///
/// Parent and child links are [`NodeIndex`] handles into the arena, so a
/// detached subtree stays addressable until it's [released].
///
/// [released]: ConfigTree::release
#[derive(Debug)]
pub struct ConfigTree<C> {
    nodes: Arena<Node<C>>,
}

// ===== impl ConfigTree =====

impl<C> ConfigTree<C>
where
    C: XmlApi,
{
    pub fn new() -> ConfigTree<C> {
        ConfigTree {
            nodes: Default::default(),
        }
    }

    // Inserts a detached node.
    pub fn insert(
        &mut self,
        name: Option<&str>,
        kind: NodeKind<C>,
    ) -> NodeIndex {
        let node = Node::new(name.map(str::to_owned), kind);
        let tag = node.tag();
        let node_idx = self.nodes.insert(node);
        Debug::NodeInsert(node_idx, name, &tag).log();
        node_idx
    }

    pub fn insert_device(
        &mut self,
        name: &str,
        device: Device<C>,
    ) -> NodeIndex {
        self.insert(Some(name), NodeKind::Device(device))
    }

    pub fn insert_object(&mut self, name: &str, object: Object) -> NodeIndex {
        self.insert(Some(name), NodeKind::Object(object))
    }

    pub fn get(&self, node_idx: NodeIndex) -> Option<&Node<C>> {
        self.nodes.get(node_idx)
    }

    pub fn get_mut(&mut self, node_idx: NodeIndex) -> Option<&mut Node<C>> {
        self.nodes.get_mut(node_idx)
    }

    pub fn contains(&self, node_idx: NodeIndex) -> bool {
        self.nodes.contains(node_idx)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node<C>)> {
        self.nodes.iter()
    }

    // Returns the nodes that have no parent.
    pub fn roots(&self) -> impl Iterator<Item = (NodeIndex, &Node<C>)> {
        self.nodes.iter().filter(|(_, node)| node.parent.is_none())
    }

    pub fn children(&self, node_idx: NodeIndex) -> &[NodeIndex] {
        self.nodes
            .get(node_idx)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn parent(&self, node_idx: NodeIndex) -> Option<NodeIndex> {
        self.nodes.get(node_idx).and_then(|node| node.parent)
    }

    // Iterates over the node itself followed by all of its ancestors, up to
    // the top of the tree.
    pub fn ancestors(
        &self,
        node_idx: NodeIndex,
    ) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(Some(node_idx), |node_idx| {
            self.parent(*node_idx)
        })
    }

    /// Attaches `child_idx` as the last child of `parent_idx` and returns the
    /// child.
    ///
    /// A node can't be attached if it already has a parent; detach it first
    /// with [`remove_at`] or [`remove_by_name`]. Attaching a node below
    /// itself or below one of its descendants is rejected as well.
    ///
    /// [`remove_at`]: ConfigTree::remove_at
    /// [`remove_by_name`]: ConfigTree::remove_by_name
    pub fn add(
        &mut self,
        parent_idx: NodeIndex,
        child_idx: NodeIndex,
    ) -> Result<NodeIndex, Error<C::Error>> {
        self.node(parent_idx)?;
        let child = self.node(child_idx)?;
        if let Some(current) = child.parent {
            return Err(Error::AlreadyAttached(child_idx, current));
        }
        if self.ancestors(parent_idx).any(|idx| idx == child_idx) {
            return Err(Error::ParentCycle(child_idx));
        }

        self.nodes[child_idx].parent = Some(parent_idx);
        self.nodes[parent_idx].children.push(child_idx);
        Debug::NodeAttach(parent_idx, child_idx).log();

        Ok(child_idx)
    }

    /// Detaches and returns the child at position `index`.
    ///
    /// The detached node keeps its own children.
    pub fn remove_at(
        &mut self,
        parent_idx: NodeIndex,
        index: usize,
    ) -> Result<NodeIndex, Error<C::Error>> {
        let parent = self
            .nodes
            .get_mut(parent_idx)
            .ok_or(Error::NodeNotFound(parent_idx))?;
        let len = parent.children.len();
        if index >= len {
            return Err(Error::IndexOutOfRange(index, len));
        }

        let child_idx = parent.children.remove(index);
        if let Some(child) = self.nodes.get_mut(child_idx) {
            child.parent = None;
        }
        Debug::NodeDetach(parent_idx, child_idx).log();

        Ok(child_idx)
    }

    /// Detaches the first child of `parent_idx` with the given name and
    /// type. An absent filter matches any type.
    ///
    /// Returns `None` when no child matches.
    pub fn remove_by_name(
        &mut self,
        parent_idx: NodeIndex,
        name: Option<&str>,
        filter: Option<&NodeTag>,
    ) -> Option<NodeIndex> {
        let index = self.find(self.children(parent_idx), name, filter)?;
        self.remove_at(parent_idx, index).ok()
    }

    /// Returns the position within `candidates` of the first node with the
    /// given name and type. An absent filter matches any type.
    pub fn find(
        &self,
        candidates: &[NodeIndex],
        name: Option<&str>,
        filter: Option<&NodeTag>,
    ) -> Option<usize> {
        candidates.iter().position(|node_idx| {
            self.nodes
                .get(*node_idx)
                .is_some_and(|node| node.matches(name, filter))
        })
    }

    /// Frees a detached node and its whole subtree, returning the number of
    /// nodes released.
    pub fn release(
        &mut self,
        node_idx: NodeIndex,
    ) -> Result<usize, Error<C::Error>> {
        if self.node(node_idx)?.parent.is_some() {
            return Err(Error::NodeAttached(node_idx));
        }

        let mut count = 0;
        let mut stack = vec![node_idx];
        while let Some(idx) = stack.pop() {
            if let Some(node) = self.nodes.remove(idx) {
                stack.extend(node.children);
                count += 1;
            }
        }
        Debug::NodeRelease(node_idx, count).log();

        Ok(count)
    }

    /// Returns the absolute address of the node.
    ///
    /// The address is the namespace root of the nearest device root
    /// followed by the segments of every object between that device and the
    /// node.
    pub fn xpath(
        &self,
        node_idx: NodeIndex,
    ) -> Result<XPath, Error<C::Error>> {
        let mut segments = vec![];
        for idx in self.ancestors(node_idx) {
            let node = self.node(idx)?;
            match &node.kind {
                NodeKind::Device(device) => {
                    let mut xpath = device.xpath_root.clone();
                    for segment in segments.iter().rev() {
                        xpath.extend(segment);
                    }
                    return Ok(xpath);
                }
                NodeKind::Object(object) => {
                    segments.push(object.segment(node.name.as_deref()));
                }
            }
        }

        Err(Error::RootNotSet(node_idx))
    }

    pub fn element(
        &self,
        node_idx: NodeIndex,
    ) -> Result<String, Error<C::Error>> {
        self.node(node_idx).map(Node::element)
    }

    /// Resolves the device root the node belongs to. A device root resolves
    /// to itself.
    pub fn device(
        &self,
        node_idx: NodeIndex,
    ) -> Result<NodeIndex, Error<C::Error>> {
        self.node(node_idx)?;
        self.ancestors(node_idx)
            .find(|idx| self.nodes.get(*idx).is_some_and(Node::is_device))
            .ok_or(Error::RootNotSet(node_idx))
    }

    pub fn client(&self, node_idx: NodeIndex) -> Result<&C, Error<C::Error>> {
        let device_idx = self.device(node_idx)?;
        self.nodes[device_idx]
            .kind
            .as_device()
            .map(|device| &device.client)
            .ok_or(Error::RootNotSet(node_idx))
    }

    pub fn client_mut(
        &mut self,
        node_idx: NodeIndex,
    ) -> Result<&mut C, Error<C::Error>> {
        let device_idx = self.device(node_idx)?;
        self.nodes[device_idx]
            .kind
            .as_device_mut()
            .map(|device| &mut device.client)
            .ok_or(Error::RootNotSet(node_idx))
    }

    /// Replaces the node's configuration on the device (`edit` at the node's
    /// xpath).
    pub fn apply(
        &mut self,
        node_idx: NodeIndex,
    ) -> Result<(), Error<C::Error>> {
        let request = Request::Edit {
            xpath: self.xpath(node_idx)?.to_string(),
            element: self.element(node_idx)?,
        };
        self.send(node_idx, request)
    }

    /// Creates the node on the device (`set` at the address of the
    /// enclosing container).
    pub fn create(
        &mut self,
        node_idx: NodeIndex,
    ) -> Result<(), Error<C::Error>> {
        let xpath = self.xpath(node_idx)?.parent().unwrap_or_default();
        let request = Request::Set {
            xpath: xpath.to_string(),
            element: self.element(node_idx)?,
        };
        self.send(node_idx, request)
    }

    /// Deletes the node on the device and detaches it from its parent.
    ///
    /// The local tree is left untouched when the device rejects the request.
    pub fn delete(
        &mut self,
        node_idx: NodeIndex,
    ) -> Result<(), Error<C::Error>> {
        let request = Request::Delete {
            xpath: self.xpath(node_idx)?.to_string(),
        };
        self.send(node_idx, request)?;

        if let Some(parent_idx) = self.parent(node_idx) {
            let index = self
                .children(parent_idx)
                .iter()
                .position(|idx| *idx == node_idx);
            if let Some(index) = index {
                self.remove_at(parent_idx, index)?;
            }
        }

        Ok(())
    }

    // Sends a request through the client of the node's device root.
    fn send(
        &mut self,
        node_idx: NodeIndex,
        request: Request,
    ) -> Result<(), Error<C::Error>> {
        let device_idx = self.device(node_idx)?;
        let device = self.nodes[device_idx]
            .kind
            .as_device_mut()
            .ok_or(Error::RootNotSet(node_idx))?;

        device
            .span
            .in_scope(|| {
                Debug::RequestTx(&request).log();
                match &request {
                    Request::Edit { xpath, element } => {
                        device.client.edit(xpath, element)
                    }
                    Request::Set { xpath, element } => {
                        device.client.set(xpath, element)
                    }
                    Request::Delete { xpath } => device.client.delete(xpath),
                }
            })
            .map_err(Error::Api)
    }

    fn node(&self, node_idx: NodeIndex) -> Result<&Node<C>, Error<C::Error>> {
        self.nodes
            .get(node_idx)
            .ok_or(Error::NodeNotFound(node_idx))
    }
}

impl<C> Default for ConfigTree<C>
where
    C: XmlApi,
{
    fn default() -> ConfigTree<C> {
        ConfigTree::new()
    }
}
