//
// Copyright (c) The pandev Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Client of the device XML configuration API.
///
/// Calls are synchronous and block until the device answers. Transport,
/// authentication and retries are the client's business.
pub trait XmlApi {
    type Error: std::error::Error;

    /// Replaces the configuration at `xpath` with `element`.
    fn edit(&mut self, xpath: &str, element: &str) -> Result<(), Self::Error>;

    /// Merges `element` into the container at `xpath`.
    fn set(&mut self, xpath: &str, element: &str) -> Result<(), Self::Error>;

    /// Deletes the configuration at `xpath`.
    fn delete(&mut self, xpath: &str) -> Result<(), Self::Error>;
}

// Configuration API request.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Request {
    Edit { xpath: String, element: String },
    Set { xpath: String, element: String },
    Delete { xpath: String },
}

// Client that records requests instead of sending them.
#[derive(Debug, Default)]
pub struct RecordingClient {
    pub requests: Vec<Request>,
    failures: VecDeque<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordingError(pub String);

// ===== impl Request =====

impl Request {
    pub fn xpath(&self) -> &str {
        match self {
            Request::Edit { xpath, .. }
            | Request::Set { xpath, .. }
            | Request::Delete { xpath } => xpath,
        }
    }
}

// ===== impl RecordingClient =====

impl RecordingClient {
    // Makes the next request fail with the given reason. Queued failures are
    // consumed in order, one per request.
    pub fn fail_next(&mut self, reason: impl Into<String>) {
        self.failures.push_back(reason.into());
    }

    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }

    fn record(&mut self, request: Request) -> Result<(), RecordingError> {
        if let Some(reason) = self.failures.pop_front() {
            return Err(RecordingError(reason));
        }
        self.requests.push(request);
        Ok(())
    }
}

impl XmlApi for RecordingClient {
    type Error = RecordingError;

    fn edit(&mut self, xpath: &str, element: &str) -> Result<(), Self::Error> {
        self.record(Request::Edit {
            xpath: xpath.to_owned(),
            element: element.to_owned(),
        })
    }

    fn set(&mut self, xpath: &str, element: &str) -> Result<(), Self::Error> {
        self.record(Request::Set {
            xpath: xpath.to_owned(),
            element: element.to_owned(),
        })
    }

    fn delete(&mut self, xpath: &str) -> Result<(), Self::Error> {
        self.record(Request::Delete {
            xpath: xpath.to_owned(),
        })
    }
}

// ===== impl RecordingError =====

impl std::fmt::Display for RecordingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "request rejected: {}", self.0)
    }
}

impl std::error::Error for RecordingError {}
