//
// Copyright (c) The pandev Contributors
//
// SPDX-License-Identifier: MIT
//

#![allow(clippy::derivable_impls)]

use pandev_tree::{
    ConfigTree, Device, Error, Field, Location, NodeIndex, NodeKind, Object,
    RecordingClient, RecordingError, XPath, XmlApi,
};
use serde::Deserialize;
use tracing::debug_span;

pub type DryRunTree = (ConfigTree<RecordingClient>, NodeIndex);

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub logging: Logging,
    pub device: DeviceCfg,
    pub objects: Vec<ObjectCfg>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Logging {
    pub filter: String,
    pub file: LoggingFile,
    pub stderr: LoggingStderr,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingFile {
    pub enabled: bool,
    pub dir: String,
    pub name: String,
    pub rotation: LoggingFileRotation,
    #[serde(flatten)]
    pub fmt: LoggingFmt,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingStderr {
    pub enabled: bool,
    #[serde(flatten)]
    pub fmt: LoggingFmt,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingFmt {
    pub style: LoggingFmtStyle,
    pub colors: bool,
    pub show_thread_id: bool,
    pub show_source: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggingFileRotation {
    #[default]
    Never,
    Hourly,
    Daily,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggingFmtStyle {
    Compact,
    Full,
    Json,
    Pretty,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceCfg {
    pub hostname: String,
    pub xpath: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectCfg {
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub location: LocationCfg,
    pub container: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub children: Vec<ObjectCfg>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationCfg {
    #[default]
    Entry,
    Member,
}

// ===== impl Config =====

impl Config {
    const DFLT_FILEPATH: &'static str = "/etc/pandev.toml";

    pub(crate) fn load(
        config_file: Option<&str>,
    ) -> Result<Config, toml::de::Error> {
        let config_file = config_file.unwrap_or(Config::DFLT_FILEPATH);

        match std::fs::read_to_string(config_file) {
            Ok(config_str) => toml::from_str(&config_str),
            Err(err) => {
                eprintln!("Failed to load configuration file: {err}");
                eprintln!("Falling back to default configuration...");
                Ok(Config::default())
            }
        }
    }

    // Builds the object tree described by the configuration. Requests are
    // recorded rather than sent to the device.
    pub(crate) fn build_tree(
        &self,
    ) -> Result<DryRunTree, Error<RecordingError>> {
        let span = debug_span!("device", hostname = %self.device.hostname);
        let device = Device::new(RecordingClient::default())
            .with_xpath_root(XPath::parse(&self.device.xpath))
            .with_span(span);

        let mut tree = ConfigTree::new();
        let device_idx = tree.insert_device(&self.device.hostname, device);

        for object in &self.objects {
            object.insert(&mut tree, device_idx)?;
        }

        Ok((tree, device_idx))
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            logging: Default::default(),
            device: Default::default(),
            objects: vec![],
        }
    }
}

// ===== impl Logging =====

impl Default for Logging {
    fn default() -> Logging {
        Logging {
            filter: "warn".to_owned(),
            file: Default::default(),
            stderr: Default::default(),
        }
    }
}

// ===== impl LoggingFile =====

impl Default for LoggingFile {
    fn default() -> LoggingFile {
        LoggingFile {
            enabled: false,
            dir: "/var/log".to_owned(),
            name: "pandev.log".to_owned(),
            rotation: Default::default(),
            fmt: Default::default(),
        }
    }
}

// ===== impl LoggingStderr =====

impl Default for LoggingStderr {
    fn default() -> LoggingStderr {
        LoggingStderr {
            enabled: true,
            fmt: Default::default(),
        }
    }
}

// ===== impl LoggingFmt =====

impl Default for LoggingFmt {
    fn default() -> LoggingFmt {
        LoggingFmt {
            style: LoggingFmtStyle::Compact,
            colors: false,
            show_thread_id: false,
            show_source: false,
        }
    }
}

// ===== impl DeviceCfg =====

impl Default for DeviceCfg {
    fn default() -> DeviceCfg {
        DeviceCfg {
            hostname: "localhost".to_owned(),
            xpath: XPath::CONFIG_ROOT.to_owned(),
        }
    }
}

// ===== impl ObjectCfg =====

impl ObjectCfg {
    fn object(&self) -> Object {
        let container = XPath::parse(&self.container);
        let location = match self.location {
            LocationCfg::Entry => Location::Entry { container },
            LocationCfg::Member => Location::Member { container },
        };

        Object {
            tag: self.kind.clone(),
            location,
            fields: self.fields.clone(),
        }
    }

    // Inserts the object and its children below `parent_idx`.
    fn insert<C>(
        &self,
        tree: &mut ConfigTree<C>,
        parent_idx: NodeIndex,
    ) -> Result<NodeIndex, Error<C::Error>>
    where
        C: XmlApi,
    {
        let kind = NodeKind::Object(self.object());
        let node_idx = tree.insert(Some(self.name.as_str()), kind);
        tree.add(parent_idx, node_idx)?;

        for child in &self.children {
            child.insert(tree, node_idx)?;
        }

        Ok(node_idx)
    }
}

// ===== unit tests =====
