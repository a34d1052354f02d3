//
// Copyright (c) The pandev Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::{trace, trace_span};

use crate::collections::NodeIndex;
use crate::node::NodeTag;
use crate::xapi::Request;

#[derive(Debug)]
pub enum Debug<'a> {
    NodeInsert(NodeIndex, Option<&'a str>, &'a NodeTag),
    NodeAttach(NodeIndex, NodeIndex),
    NodeDetach(NodeIndex, NodeIndex),
    NodeRelease(NodeIndex, usize),
    RequestTx(&'a Request),
}

// ===== impl Debug =====

impl Debug<'_> {
    pub(crate) fn log(&self) {
        match self {
            Debug::NodeInsert(node, name, tag) => {
                trace_span!("tree").in_scope(|| {
                    trace!(?node, ?name, %tag, "{}", self);
                });
            }
            Debug::NodeAttach(parent, child)
            | Debug::NodeDetach(parent, child) => {
                trace_span!("tree").in_scope(|| {
                    trace!(?parent, ?child, "{}", self);
                });
            }
            Debug::NodeRelease(node, count) => {
                trace_span!("tree").in_scope(|| {
                    trace!(?node, %count, "{}", self);
                });
            }
            Debug::RequestTx(request) => {
                trace_span!("xapi").in_scope(|| {
                    trace!(?request, "{}", self);
                });
            }
        }
    }
}

impl std::fmt::Display for Debug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Debug::NodeInsert(..) => {
                write!(f, "node inserted")
            }
            Debug::NodeAttach(..) => {
                write!(f, "node attached")
            }
            Debug::NodeDetach(..) => {
                write!(f, "node detached")
            }
            Debug::NodeRelease(..) => {
                write!(f, "subtree released")
            }
            Debug::RequestTx(..) => {
                write!(f, "sending request")
            }
        }
    }
}
