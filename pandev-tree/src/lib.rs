//
// Copyright (c) The pandev Contributors
//
// SPDX-License-Identifier: MIT
//

//! Configuration object tree for devices managed through an XML API.
//!
//! Nodes live in a [`ConfigTree`] arena and reference each other through
//! [`NodeIndex`] handles. Each node knows how to build its own XPath from its
//! ancestry and how to serialize itself to an XML element. Remote operations
//! resolve the device root above a node and hand the request over to that
//! device's [`XmlApi`] client.

mod debug;

pub mod collections;
pub mod device;
pub mod error;
pub mod node;
pub mod tree;
pub mod xapi;
pub mod xpath;

pub use crate::collections::NodeIndex;
pub use crate::device::Device;
pub use crate::error::{Error, InvalidTag};
pub use crate::node::{Field, Location, Node, NodeKind, NodeTag, Object};
pub use crate::tree::ConfigTree;
pub use crate::xapi::{RecordingClient, RecordingError, Request, XmlApi};
pub use crate::xpath::XPath;
