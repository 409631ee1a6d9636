//! Shared value types for the WFCOS configuration toolkit

use serde::{Deserialize, Serialize};
use std::fmt;

/// Detector family described by a configuration document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    /// Watershed FCOS: FCOS with an energy map replacing centerness
    #[serde(rename = "WFCOS")]
    Wfcos,
    /// Plain FCOS
    #[serde(rename = "FCOS")]
    Fcos,
}

impl ModelKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "WFCOS" => Some(Self::Wfcos),
            "FCOS" => Some(Self::Fcos),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wfcos => "WFCOS",
            Self::Fcos => "FCOS",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weight-layout convention of the backbone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackboneStyle {
    /// Caffe-style weights (BGR input, stride on the 1x1 conv)
    #[serde(rename = "caffe")]
    Caffe,
    /// PyTorch-style weights
    #[serde(rename = "pytorch")]
    Pytorch,
}

impl BackboneStyle {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "caffe" => Some(Self::Caffe),
            "pytorch" => Some(Self::Pytorch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Caffe => "caffe",
            Self::Pytorch => "pytorch",
        }
    }
}

impl fmt::Display for BackboneStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimization algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptimizerKind {
    #[serde(rename = "SGD")]
    Sgd,
    #[serde(rename = "Adam")]
    Adam,
}

impl OptimizerKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SGD" => Some(Self::Sgd),
            "Adam" => Some(Self::Adam),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sgd => "SGD",
            Self::Adam => "Adam",
        }
    }
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logging verbosity requested for a training run. The toolkit stores this
/// as declarative data for the run orchestrator; it does not configure its
/// own logging from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogLevelKind {
    #[serde(rename = "DEBUG")]
    Debug,
    #[serde(rename = "INFO")]
    Info,
    #[serde(rename = "WARNING")]
    Warning,
    #[serde(rename = "ERROR")]
    Error,
}

impl LogLevelKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "WARNING" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
