//
// Copyright (c) The pandev Contributors
//
// SPDX-License-Identifier: MIT
//

use serde::{Deserialize, Serialize};

// Address of a node in the device configuration namespace.
//
// Steps are kept without their separators. The rendered form is every step
// prefixed with a '/'.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(into = "String", from = "String")]
pub struct XPath {
    steps: Vec<String>,
}

// ===== impl XPath =====

impl XPath {
    // Root of the configuration namespace.
    pub const CONFIG_ROOT: &'static str = "/config";

    /// Returns the configuration namespace root (`/config`).
    pub fn config_root() -> XPath {
        XPath::parse(Self::CONFIG_ROOT)
    }

    /// Parses a rendered path.
    ///
    /// Separators inside predicates (`[...]`) and quoted literals are not
    /// treated as step boundaries, so `/entry[@name='ethernet1/1']` is a
    /// single step. Empty steps are dropped.
    pub fn parse(path: &str) -> XPath {
        let mut steps = vec![];
        let mut step = String::new();
        let mut depth = 0usize;
        let mut quote = None;

        for c in path.chars() {
            match (c, quote) {
                (_, Some(q)) => {
                    if c == q {
                        quote = None;
                    }
                    step.push(c);
                }
                ('\'' | '"', None) if depth > 0 => {
                    quote = Some(c);
                    step.push(c);
                }
                ('[', None) => {
                    depth += 1;
                    step.push(c);
                }
                (']', None) => {
                    depth = depth.saturating_sub(1);
                    step.push(c);
                }
                ('/', None) if depth == 0 => {
                    if !step.is_empty() {
                        steps.push(std::mem::take(&mut step));
                    }
                }
                _ => step.push(c),
            }
        }
        if !step.is_empty() {
            steps.push(step);
        }

        XPath { steps }
    }

    /// Builds the `entry[@name='NAME']` step.
    pub fn entry_step(name: &str) -> String {
        format!("entry[@name={}]", quote_literal(name))
    }

    /// Builds the `member[text()='NAME']` step.
    pub fn member_step(name: &str) -> String {
        format!("member[text()={}]", quote_literal(name))
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.steps.last().map(String::as_str)
    }

    pub fn push(&mut self, step: impl Into<String>) {
        self.steps.push(step.into());
    }

    // Appends all steps of another path.
    pub fn extend(&mut self, other: &XPath) {
        self.steps.extend(other.steps.iter().cloned());
    }

    pub fn join(&self, other: &XPath) -> XPath {
        let mut xpath = self.clone();
        xpath.extend(other);
        xpath
    }

    /// Returns the address of the enclosing container, that is, this path
    /// with its final step stripped.
    pub fn parent(&self) -> Option<XPath> {
        let (_, steps) = self.steps.split_last()?;
        Some(XPath {
            steps: steps.to_vec(),
        })
    }
}

impl std::fmt::Display for XPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for step in &self.steps {
            write!(f, "/{step}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for XPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(XPath::parse(s))
    }
}

impl From<String> for XPath {
    fn from(path: String) -> XPath {
        XPath::parse(&path)
    }
}

impl From<XPath> for String {
    fn from(xpath: XPath) -> String {
        xpath.to_string()
    }
}

// ===== helper functions =====

// Renders a string literal. XPath 1.0 literals have no escapes, so a value
// holding both quote kinds is split on `'` and rebuilt with `concat()`.
fn quote_literal(value: &str) -> String {
    match (value.contains('\''), value.contains('"')) {
        (false, _) => format!("'{value}'"),
        (true, false) => format!("\"{value}\""),
        (true, true) => {
            let parts = value
                .split('\'')
                .map(|part| format!("'{part}'"))
                .collect::<Vec<_>>()
                .join(", \"'\", ");
            format!("concat({parts})")
        }
    }
}

// ===== unit tests =====
