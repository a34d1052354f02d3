//
// Copyright (c) The pandev Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::{Span, debug_span};

use crate::xpath::XPath;

// Device root payload.
//
// Owns the API client used by every remote operation issued from the
// device's subtree. Those operations are logged inside `span`.
pub struct Device<C> {
    pub client: C,
    pub xpath_root: XPath,
    pub span: Span,
}

// ===== impl Device =====

impl<C> Device<C> {
    pub fn new(client: C) -> Device<C> {
        Device {
            client,
            xpath_root: XPath::config_root(),
            span: debug_span!("device"),
        }
    }

    // Overrides the namespace root (e.g. a vsys or a device-group).
    pub fn with_xpath_root(mut self, xpath_root: XPath) -> Device<C> {
        self.xpath_root = xpath_root;
        self
    }

    pub fn with_span(mut self, span: Span) -> Device<C> {
        self.span = span;
        self
    }
}

impl<C> std::fmt::Debug for Device<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("xpath_root", &self.xpath_root)
            .finish_non_exhaustive()
    }
}
