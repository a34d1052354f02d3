//
// Copyright (c) The pandev Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::warn;

use crate::collections::NodeIndex;

// Configuration tree errors.
//
// `E` is the error type of the device API client.
#[derive(Debug)]
pub enum Error<E> {
    // Tree structure
    NodeNotFound(NodeIndex),
    IndexOutOfRange(usize, usize),
    AlreadyAttached(NodeIndex, NodeIndex),
    ParentCycle(NodeIndex),
    NodeAttached(NodeIndex),
    // Remote operations
    RootNotSet(NodeIndex),
    Api(E),
}

// Field tag that is not a valid XML element name.
#[derive(Debug, Eq, PartialEq)]
pub struct InvalidTag(pub String);

// ===== impl Error =====

impl<E> Error<E>
where
    E: std::error::Error,
{
    pub fn log(&self) {
        match self {
            Error::NodeNotFound(node) => {
                warn!(?node, "{}", self);
            }
            Error::IndexOutOfRange(index, len) => {
                warn!(%index, %len, "{}", self);
            }
            Error::AlreadyAttached(node, parent) => {
                warn!(?node, ?parent, "{}", self);
            }
            Error::ParentCycle(node) | Error::NodeAttached(node) => {
                warn!(?node, "{}", self);
            }
            Error::RootNotSet(node) => {
                warn!(?node, "{}", self);
            }
            Error::Api(error) => {
                warn!(%error, "{}", self);
            }
        }
    }
}

impl<E> std::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NodeNotFound(..) => {
                write!(f, "node not found")
            }
            Error::IndexOutOfRange(index, len) => {
                write!(f, "child index {index} out of range (len {len})")
            }
            Error::AlreadyAttached(..) => {
                write!(f, "node is already attached to a parent")
            }
            Error::ParentCycle(..) => {
                write!(f, "node can't be attached below itself")
            }
            Error::NodeAttached(..) => {
                write!(f, "node must be detached before release")
            }
            Error::RootNotSet(..) => {
                write!(f, "no device root set for object tree")
            }
            Error::Api(..) => {
                write!(f, "configuration API request failed")
            }
        }
    }
}

impl<E> std::error::Error for Error<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Api(error) => Some(error),
            _ => None,
        }
    }
}

// ===== impl InvalidTag =====

impl std::fmt::Display for InvalidTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid field tag {:?}: not an XML element name", self.0)
    }
}

impl std::error::Error for InvalidTag {}
